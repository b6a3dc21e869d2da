//! Purpose: `tinyjson` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits JSON reports on stdout.
//! Invariants: Successful parses emit a stable JSON report on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value as JsonValue, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::colorize_report;
use tinyjson::api::{Error, ErrorKind, ErrorPolicy, Value, to_exit_code};
use tinyjson::notice::{Notice, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `tinyjson --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();
    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "tinyjson",
    version,
    about = "Validate and decode a single JSON scalar",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Accepts exactly one of null, true, false, or an RFC 8259 number,
optionally surrounded by spaces, tabs, and line breaks.
"#,
    after_help = r#"EXAMPLES
  $ tinyjson parse ' true '
  $ tinyjson parse -- -1.5e3
  $ printf '1\nnull\n' | tinyjson parse --lines

EXIT CODES
  0 ok, 2 usage, 3 not found, 4 i/o,
  10 expect_value, 11 invalid_value, 12 root_not_singular, 13 number_too_big

LEARN MORE
  $ tinyjson <command> --help"#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum ErrorPolicyCli {
    Stop,
    Skip,
}

impl From<ErrorPolicyCli> for ErrorPolicy {
    fn from(value: ErrorPolicyCli) -> Self {
        match value {
            ErrorPolicyCli::Stop => ErrorPolicy::Stop,
            ErrorPolicyCli::Skip => ErrorPolicy::Skip,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Parse one value (or one value per line)",
        long_about = r#"Parse JSON scalar input and print a report.

Input comes from TEXT, from --file, or from piped stdin."#,
        after_help = r#"EXAMPLES
  $ tinyjson parse null
  $ tinyjson parse -f value.json
  $ tinyjson parse --lines -e skip -f values.txt

NOTES
  - A report looks like {"status":"ok","code":0,"type":"number","number":1.5}
  - Failures go to stderr and set the exit code of their status
  - `--lines` prints one compact report per line (JSON Lines)"#
    )]
    Parse {
        #[arg(help = "Inline JSON text", allow_hyphen_values = true)]
        text: Option<String>,
        #[arg(
            short = 'f',
            long = "file",
            help = "Input file path (use - for stdin)",
            conflicts_with = "text",
            value_hint = ValueHint::FilePath
        )]
        file: Option<String>,
        #[arg(long, help = "Parse every line as its own value")]
        lines: bool,
        #[arg(
            short = 'e',
            long = "errors",
            default_value = "stop",
            value_enum,
            requires = "lines",
            help = "Line error policy: stop|skip"
        )]
        errors: ErrorPolicyCli,
        #[arg(
            long = "keep-blank",
            requires = "lines",
            help = "Treat blank lines as values (they fail with expect_value)"
        )]
        keep_blank: bool,
        #[arg(
            long = "max-line-bytes",
            default_value_t = 1024 * 1024,
            requires = "lines",
            help = "Longest accepted line in bytes"
        )]
        max_line_bytes: usize,
    },
    #[command(
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ tinyjson completion bash > ~/.local/share/bash-completion/completions/tinyjson
  $ tinyjson completion zsh > ~/.zfunc/_tinyjson"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

/// Where input bytes come from, plus the label used in diagnostics.
enum InputSource {
    Inline(String),
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn resolve(text: Option<String>, file: Option<String>) -> Result<Self, Error> {
        match (text, file) {
            (Some(text), _) => Ok(InputSource::Inline(text)),
            (None, Some(file)) if file == "-" => Ok(InputSource::Stdin),
            (None, Some(file)) => Ok(InputSource::File(PathBuf::from(file))),
            (None, None) if io::stdin().is_terminal() => Err(Error::new(ErrorKind::Usage)
                .with_message("parse requires input")
                .with_hint("Pass TEXT, use --file, or pipe data on stdin.")),
            (None, None) => Ok(InputSource::Stdin),
        }
    }

    fn label(&self) -> String {
        match self {
            InputSource::Inline(_) => "arg".to_string(),
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    fn open(self) -> Result<Box<dyn Read>, Error> {
        match self {
            InputSource::Inline(text) => Ok(Box::new(io::Cursor::new(text.into_bytes()))),
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let file = File::open(&path).map_err(|err| open_error(err, &path))?;
                Ok(Box::new(file))
            }
        }
    }
}

fn open_error(err: io::Error, path: &Path) -> Error {
    let kind = if err.kind() == io::ErrorKind::NotFound {
        ErrorKind::NotFound
    } else {
        ErrorKind::Io
    };
    Error::new(kind)
        .with_message("failed to open input file")
        .with_path(path)
        .with_source(err)
}

fn read_text(source: InputSource) -> Result<String, Error> {
    let path = match &source {
        InputSource::File(path) => Some(path.clone()),
        _ => None,
    };
    let mut bytes = Vec::new();
    source.open()?.read_to_end(&mut bytes).map_err(|err| {
        let err = Error::new(ErrorKind::Io)
            .with_message("failed to read input")
            .with_source(err);
        match &path {
            Some(path) => err.with_path(path),
            None => err,
        }
    })?;
    String::from_utf8(bytes).map_err(|err| {
        Error::new(ErrorKind::InvalidValue)
            .with_message("input is not valid UTF-8")
            .with_offset(err.utf8_error().valid_up_to() as u64)
    })
}

fn value_report(value: &Value, line: Option<u64>) -> JsonValue {
    let mut report = Map::new();
    if let Some(line) = line {
        report.insert("line".to_string(), json!(line));
    }
    report.insert("status".to_string(), json!("ok"));
    report.insert("code".to_string(), json!(0));
    report.insert("type".to_string(), json!(value.value_type()));
    if let Some(number) = value.as_number() {
        report.insert("number".to_string(), json!(number));
    }
    JsonValue::Object(report)
}

fn emit_json(value: JsonValue, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let json = if is_tty || use_color {
        colorize_report(&value, use_color)
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> String {
    use time::format_description::well_known::Rfc3339;
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| {
            time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()
        })
        .and_then(|ts| ts.format(&Rfc3339).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {} ({})", notice.message, notice.source);
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        kind => kind
            .parse_status()
            .map(|status| status.description().to_string())
            .unwrap_or_else(|| "parse failed".to_string()),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> JsonValue {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(status) = err.kind().parse_status() {
        inner.insert("status".to_string(), json!(status));
        inner.insert("code".to_string(), json!(status.code()));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(line) = err.line() {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), JsonValue::Object(inner));
    JsonValue::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(line) = err.line() {
        lines.push(format!(
            "{} {line}",
            colorize_label("line:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Cli, error_json, value_report};
    use clap::CommandFactory;
    use tinyjson::api::{Error, ErrorKind, ParseError, ParseStatus, Value};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn number_report_carries_payload() {
        let report = value_report(&Value::Number(1.5), None);
        assert_eq!(report["status"], "ok");
        assert_eq!(report["code"], 0);
        assert_eq!(report["type"], "number");
        assert_eq!(report["number"], 1.5);
        assert!(report.get("line").is_none());
    }

    #[test]
    fn literal_report_has_no_number() {
        let report = value_report(&Value::False, Some(4));
        assert_eq!(report["type"], "false");
        assert_eq!(report["line"], 4);
        assert!(report.get("number").is_none());
    }

    #[test]
    fn parse_error_json_includes_status_and_offset() {
        let err: Error = ParseError::new(ParseStatus::RootNotSingular, 2).into();
        let value = error_json(&err);
        let inner = &value["error"];
        assert_eq!(inner["kind"], "RootNotSingular");
        assert_eq!(inner["status"], "root_not_singular");
        assert_eq!(inner["code"], 3);
        assert_eq!(inner["offset"], 2);
    }

    #[test]
    fn usage_error_json_has_no_status() {
        let err = Error::new(ErrorKind::Usage).with_message("bad flag");
        let value = error_json(&err);
        assert!(value["error"].get("status").is_none());
        assert_eq!(value["error"]["message"], "bad flag");
    }
}
