//! Purpose: Hold top-level CLI command dispatch for `tinyjson`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Reports go to stdout; errors and notices go to stderr.
//! Invariants: In `--lines` skip mode the exit code is that of the first skipped line.

use std::io::Write;

use tinyjson::api::{BatchConfig, parse, parse_lines};
use tinyjson::notice::{batch_summary_notice, skipped_line_notice};
use tracing::debug;

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "tinyjson", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Parse {
            text,
            file,
            lines,
            errors,
            keep_blank,
            max_line_bytes,
        } => {
            let source = InputSource::resolve(text, file)?;
            if lines {
                let config = BatchConfig {
                    errors: errors.into(),
                    skip_blank: !keep_blank,
                    max_line_bytes,
                };
                parse_lines_command(source, config, color_mode)
            } else {
                parse_single_command(source, color_mode)
            }
        }
    }
}

fn parse_single_command(source: InputSource, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    let label = source.label();
    let text = read_text(source)?;
    debug!(source = %label, bytes = text.len(), "parsing single value");

    let value = parse(&text).map_err(|err| {
        let err = Error::from(err);
        match err.kind() {
            ErrorKind::RootNotSingular => {
                err.with_hint("Only one value is allowed; use --lines for one value per line.")
            }
            ErrorKind::ExpectValue => err.with_hint("Input is empty or whitespace only."),
            _ => err,
        }
    })?;
    emit_json(value_report(&value, None), color_mode);
    Ok(RunOutcome::ok())
}

fn parse_lines_command(
    source: InputSource,
    config: BatchConfig,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    let label = source.label();
    debug!(source = %label, errors = ?config.errors, "parsing one value per line");
    let reader = source.open()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut first_failure = None;

    let outcome = parse_lines(
        reader,
        config,
        |line, value| {
            let report = value_report(&value, Some(line));
            writeln!(out, "{report}").map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write report")
                    .with_source(err)
            })
        },
        |failure| {
            first_failure.get_or_insert(failure.kind);
            emit_notice(
                &skipped_line_notice(&failure, &label, notice_time_now()),
                color_mode,
            );
        },
    )?;
    out.flush().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to flush reports")
            .with_source(err)
    })?;

    debug!(
        lines = outcome.lines_total,
        ok = outcome.ok,
        failed = outcome.failed,
        "line batch finished"
    );
    match first_failure {
        Some(kind) => {
            emit_notice(
                &batch_summary_notice(&outcome, &label, notice_time_now()),
                color_mode,
            );
            Ok(RunOutcome::with_code(to_exit_code(kind)))
        }
        None => Ok(RunOutcome::ok()),
    }
}
