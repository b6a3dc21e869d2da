//! Purpose: Execute conformance manifests against the parser API.
//! Exports: None (binary entry point).
//! Role: Reference runner for JSON conformance manifests of scalar parse cases.
//! Invariants: Manifests are JSON-only; cases execute in order; fail-fast on the first mismatch.
//! Invariants: Each case is parsed twice through `parse_into` to confirm determinism.

use serde_json::Value as JsonValue;
use std::env;
use std::fs;
use std::path::PathBuf;
use tinyjson::api::{ParseStatus, Value, parse_into};

fn main() {
    match run() {
        Ok(count) => println!("conformance ok: {count} cases"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<usize, String> {
    let mut args = env::args();
    let _exe = args.next();
    let manifest_path = args
        .next()
        .ok_or_else(|| "usage: tinyjson-conformance <path/to/manifest.json>".to_string())?;
    if args.next().is_some() {
        return Err("unexpected extra arguments".to_string());
    }

    let manifest_path = PathBuf::from(manifest_path);
    let content = fs::read_to_string(&manifest_path)
        .map_err(|err| format!("failed to read manifest: {err}"))?;
    let manifest: JsonValue = serde_json::from_str(&content)
        .map_err(|err| format!("failed to parse manifest json: {err}"))?;

    let version = manifest
        .get("conformance_version")
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| "missing conformance_version".to_string())?;
    if version != 0 {
        return Err(format!("unsupported conformance_version: {version}"));
    }

    let cases = manifest
        .get("cases")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| "manifest cases must be an array".to_string())?;

    for (index, case) in cases.iter().enumerate() {
        let case_id = case.get("id").and_then(JsonValue::as_str).map(str::to_string);
        run_case(case, index, &case_id)?;
    }

    Ok(cases.len())
}

fn run_case(case: &JsonValue, index: usize, case_id: &Option<String>) -> Result<(), String> {
    let input = case
        .get("input")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| case_err(index, case_id, "input must be a string"))?;
    let expect = case
        .get("expect")
        .ok_or_else(|| case_err(index, case_id, "missing expect"))?;
    let expected_status = expect
        .get("status")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| case_err(index, case_id, "missing expect.status"))?;
    let expected_status = ParseStatus::from_label(expected_status).ok_or_else(|| {
        case_err(
            index,
            case_id,
            &format!("unknown status: {expected_status}"),
        )
    })?;

    let mut value = Value::default();
    let status = parse_into(&mut value, input);
    if status != expected_status {
        return Err(case_err(
            index,
            case_id,
            &format!("expected status {expected_status}, got {status}"),
        ));
    }

    let mut again = Value::default();
    if parse_into(&mut again, input) != status || !same_value(&again, &value) {
        return Err(case_err(index, case_id, "parse is not deterministic"));
    }

    if let Some(expected_type) = expect.get("type").and_then(JsonValue::as_str) {
        let actual = value.value_type().as_str();
        if actual != expected_type {
            return Err(case_err(
                index,
                case_id,
                &format!("expected type {expected_type}, got {actual}"),
            ));
        }
    }

    if let Some(expected_number) = expect.get("number").and_then(JsonValue::as_f64) {
        let actual = value
            .as_number()
            .ok_or_else(|| case_err(index, case_id, "expected a number value"))?;
        if actual != expected_number {
            return Err(case_err(
                index,
                case_id,
                &format!("expected number {expected_number}, got {actual}"),
            ));
        }
    }

    if let Some(negative_zero) = expect.get("negative_zero").and_then(JsonValue::as_bool) {
        let actual = value
            .as_number()
            .is_some_and(|n| n == 0.0 && n.is_sign_negative());
        if actual != negative_zero {
            return Err(case_err(index, case_id, "negative zero mismatch"));
        }
    }

    Ok(())
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

fn case_err(index: usize, case_id: &Option<String>, message: &str) -> String {
    match case_id {
        Some(id) => format!("case {index} ({id}): {message}"),
        None => format!("case {index}: {message}"),
    }
}
