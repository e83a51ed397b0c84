//! Command-line options.

use std::fmt;

use church_eval::EvalMode;

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the shell.
    Run(Options),
    Help,
    Version,
}

/// Shell settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Policy for every `eval`.
    pub mode: EvalMode,
    /// Suppress the banner and prompt.
    pub quiet: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    InvalidMaxSteps(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnknownArgument(arg) => write!(f, "unknown argument '{arg}'"),
            CliError::InvalidMaxSteps(value) => {
                write!(f, "--max-steps expects a non-negative integer, got '{value}'")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Parse arguments, not including the program name.
///
/// `--help` and `--version` win over anything else on the line.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut options = Options::default();
    let mut command = None;

    for arg in args {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix("--max-steps=") {
            let max_steps = value
                .parse()
                .map_err(|_| CliError::InvalidMaxSteps(value.to_string()))?;
            options.mode = EvalMode::Budgeted { max_steps };
        } else {
            match arg {
                "--quiet" | "-q" => options.quiet = true,
                "--help" | "-h" => command = command.or(Some(Command::Help)),
                "--version" | "-V" => command = command.or(Some(Command::Version)),
                _ => return Err(CliError::UnknownArgument(arg.to_string())),
            }
        }
    }

    Ok(command.unwrap_or(Command::Run(options)))
}

pub fn usage() -> &'static str {
    "\
Church lambda-calculus shell

Usage: church [options]

Options:
  --max-steps=<n>   Give up on an eval after <n> beta reductions
  -q, --quiet       Do not print the banner or prompt
  -h, --help        Show this help message
  -V, --version     Show version information

Set RUST_LOG (e.g. RUST_LOG=church_eval=debug) to trace evaluation on stderr."
}
