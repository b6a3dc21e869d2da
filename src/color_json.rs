//! Purpose: Render parse reports as pretty JSON with optional ANSI colorization.
//! Exports: colorize_report.
//! Role: Small, pure formatter used by the CLI's TTY emission path.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty for flat reports.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

// 8/16-color palette.
const COLOR_KEY: &str = "36";
const COLOR_OK: &str = "32";
const COLOR_FAILED: &str = "31";
const COLOR_TYPE: &str = "35";
const COLOR_NUMBER: &str = "33";
const COLOR_PLAIN: &str = "39";

/// Reports are flat objects; nested members are written compactly on one line.
pub fn colorize_report(report: &Value, use_color: bool) -> String {
    let mut out = String::new();
    match report {
        Value::Object(map) => write_report(map, use_color, &mut out),
        other => write_field("", other, use_color, &mut out),
    }
    out
}

fn write_report(map: &Map<String, Value>, use_color: bool, out: &mut String) {
    if map.is_empty() {
        push_colored("{}", COLOR_PLAIN, use_color, out);
        return;
    }
    push_colored("{", COLOR_PLAIN, use_color, out);
    out.push('\n');
    for (idx, (key, value)) in map.iter().enumerate() {
        out.push_str(INDENT);
        push_colored(&encode(&Value::from(key.as_str())), COLOR_KEY, use_color, out);
        push_colored(":", COLOR_PLAIN, use_color, out);
        out.push(' ');
        write_field(key, value, use_color, out);
        if idx + 1 < map.len() {
            push_colored(",", COLOR_PLAIN, use_color, out);
        }
        out.push('\n');
    }
    push_colored("}", COLOR_PLAIN, use_color, out);
}

fn write_field(key: &str, value: &Value, use_color: bool, out: &mut String) {
    let color = match (key, value) {
        ("status", Value::String(status)) if status == "ok" => COLOR_OK,
        ("status", Value::String(_)) => COLOR_FAILED,
        ("type", Value::String(_)) => COLOR_TYPE,
        (_, Value::Number(_)) => COLOR_NUMBER,
        _ => COLOR_PLAIN,
    };
    push_colored(&encode(value), color, use_color, out);
}

fn encode(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}
