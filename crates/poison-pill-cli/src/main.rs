// crates/poison-pill-cli/src/main.rs
// ============================================================================
// Module: Poison Pill Validator CLI Entry Point
// Description: Command dispatcher for offline PoisonPillConfig admission checks.
// Purpose: Run the timing validator against manifests outside the cluster.
// Dependencies: clap, poison-pill-config, poison-pill-core, serde_json, serde_yaml.
// ============================================================================

//! ## Overview
//! The validator CLI reads a `PoisonPillConfig` manifest, runs the same
//! admission review the webhook performs, and reports whether the object
//! would be admitted. It also prints the fixed timing floors and validates
//! the process configuration file. All user-facing strings are routed through
//! the message catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use poison_pill_cli::t;
use poison_pill_config::ValidatorConfig;
use poison_pill_core::AdmissionOperation;
use poison_pill_core::AdmissionResponse;
use poison_pill_core::AdmissionValidator;
use poison_pill_core::PoisonPillConfig;
use poison_pill_core::ThresholdTable;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "poison-pill-validator",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Review a `PoisonPillConfig` manifest as the admission webhook would.
    Check(CheckCommand),
    /// Print the timing floors enforced by the validator.
    Thresholds(ThresholdsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a validator configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Path to a YAML or JSON manifest.
    #[arg(long, value_name = "PATH")]
    manifest: PathBuf,
    /// Admission operation to simulate.
    #[arg(long, value_enum, default_value_t = OperationArg::Create)]
    operation: OperationArg,
    /// Optional config file path (defaults to poison-pill-validator.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for the `thresholds` command.
#[derive(Args, Debug)]
struct ThresholdsCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to poison-pill-validator.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Admission operations accepted on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OperationArg {
    /// Object creation.
    Create,
    /// Object update.
    Update,
    /// Object deletion.
    Delete,
}

impl From<OperationArg> for AdmissionOperation {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::Create => Self::Create,
            OperationArg::Update => Self::Update,
            OperationArg::Delete => Self::Delete,
        }
    }
}

/// Output formats for command results.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Compact JSON.
    Json,
    /// Human-readable text.
    Text,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog-rendered error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(&command),
        Commands::Thresholds(command) => command_thresholds(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command.
///
/// Exits with success when the object would be admitted.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let config = ValidatorConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let bytes = read_manifest(&command.manifest, config.limits.max_manifest_bytes)?;
    let object = parse_manifest(&command.manifest, &bytes)?;
    let audit = config
        .audit_sink()
        .map_err(|err| CliError::new(t!("config.audit_failed", error = err)))?;
    let admission = AdmissionValidator::new(audit)
        .map_err(|err| CliError::new(t!("thresholds.init_failed", error = err)))?;

    let response = admission.review(command.operation.into(), &object);
    let rendered = match command.format {
        OutputFormat::Json => serde_json::to_string(&response)
            .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?,
        OutputFormat::Text => render_check_text(&response),
    };
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if response.allowed { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Reads a manifest under the configured size limit.
fn read_manifest(path: &Path, max_bytes: usize) -> CliResult<Vec<u8>> {
    let kind = t!("input.kind.manifest");
    read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = error
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })
}

/// Parses manifest bytes as JSON (by `.json` extension) or YAML.
fn parse_manifest(path: &Path, bytes: &[u8]) -> CliResult<PoisonPillConfig> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_slice(bytes).map_err(|err| err.to_string())
    } else {
        serde_yaml::from_slice(bytes).map_err(|err| err.to_string())
    };
    parsed.map_err(|error| {
        CliError::new(t!("check.parse_failed", path = path.display(), error = error))
    })
}

/// Renders an admission response as a single text line.
fn render_check_text(response: &AdmissionResponse) -> String {
    let name = response.name.clone().unwrap_or_else(|| t!("check.unnamed"));
    let operation = response.operation.as_str();
    match response.message.as_deref() {
        Some(message) if !response.allowed => {
            t!("check.rejected", operation = operation, name = name, message = message)
        }
        _ => t!("check.allowed", operation = operation, name = name),
    }
}

// ============================================================================
// SECTION: Thresholds Command
// ============================================================================

/// Executes the `thresholds` command.
fn command_thresholds(command: &ThresholdsCommand) -> CliResult<ExitCode> {
    let table = ThresholdTable::global()
        .map_err(|err| CliError::new(t!("thresholds.init_failed", error = err)))?;
    let rendered = match command.format {
        OutputFormat::Json => serde_json::to_string(table.rules())
            .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?,
        OutputFormat::Text => render_thresholds_text(table),
    };
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders the threshold table as text, one rule per line.
fn render_thresholds_text(table: &ThresholdTable) -> String {
    let mut lines = vec![t!("thresholds.header")];
    for rule in table.rules() {
        lines.push(t!(
            "thresholds.row",
            field = rule.field,
            literal = rule.minimum_literal,
            minimum_ms = rule.minimum_ms
        ));
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = ValidatorConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
