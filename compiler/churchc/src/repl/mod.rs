//! The line-oriented shell.
//!
//! Each line is one command:
//!
//! ```text
//! let <name> <args> = <expr>   define a name
//! eval <expr>                  print the normal form of an expression
//! show <name>                  print a definition as it was written
//! help                         list commands
//! exit                         leave the shell
//! ```
//!
//! `#` starts a comment anywhere on a line. Definitions are lexically
//! scoped: each one sees the definitions made before it, and redefining a
//! name later does not change them.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use church_bind::{bind, unbind, BindError};
use church_eval::{EvalError, EvalMode, Reducer};
use church_fmt::format_ast;
use church_ir::{BinderId, Binding, Environment, Name, Term};
use church_lexer::is_identifier;
use church_parse::{parse_definition, parse_expr, parse_name, ParseError};

use crate::cli::Options;

pub const PROMPT: &str = "(church) ";

const BANNER: &str = "Church lambda-calculus shell. Type 'help' for a list of commands.";

const HELP: &str = "\
Commands:
  let <name> <args> = <expr>   Define a name, e.g. let two f x = f(f x)
  eval <expr>                  Reduce an expression to normal form
  show <name>                  Show the definition of a name
  help                         Show this message
  exit                         Leave the shell";

/// Whether the shell should keep reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// A failed command. Reported as a single line; the session is unchanged.
#[derive(Debug)]
enum CommandError {
    Parse(ParseError),
    Bind(BindError),
    Eval(EvalError),
    Usage(&'static str),
    InvalidName(String),
    UndefinedName(Name),
    UnknownSyntax(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Parse(err) => err.fmt(f),
            CommandError::Bind(err) => err.fmt(f),
            CommandError::Eval(err) => err.fmt(f),
            CommandError::Usage(usage) => write!(f, "Usage: {usage}"),
            CommandError::InvalidName(piece) => write!(f, "Invalid name: '{piece}'"),
            CommandError::UndefinedName(name) => write!(f, "Undefined name: {name}"),
            CommandError::UnknownSyntax(line) => write!(f, "*** Unknown syntax: {line}"),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::Parse(err)
    }
}

impl From<BindError> for CommandError {
    fn from(err: BindError) -> Self {
        CommandError::Bind(err)
    }
}

impl From<EvalError> for CommandError {
    fn from(err: EvalError) -> Self {
        CommandError::Eval(err)
    }
}

/// Shell state: the top-level definitions and where output goes.
pub struct Session<W: Write> {
    env: Environment,
    mode: EvalMode,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(mode: EvalMode, out: W) -> Self {
        Session {
            env: Environment::empty(),
            mode,
            out,
        }
    }

    /// Top-level definitions, newest first.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one line of input.
    ///
    /// Only failures to write output are errors; a bad command prints a
    /// message and leaves the session as it was.
    pub fn execute(&mut self, line: &str) -> io::Result<Control> {
        let line = strip_comment(line);
        if line.is_empty() {
            return Ok(Control::Continue);
        }

        let split = line
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(line.len());
        let (command, arg) = line.split_at(split);
        let arg = arg.trim();
        tracing::debug!(command, "executing");

        let result = match command {
            "let" => self.define(arg).map(|()| None),
            "eval" => self.evaluate(arg).map(Some),
            "show" => self.show(arg).map(Some),
            "help" => Ok(Some(HELP.to_string())),
            "exit" => return Ok(Control::Exit),
            _ => Err(CommandError::UnknownSyntax(line.to_string())),
        };

        match result {
            Ok(Some(output)) => writeln!(self.out, "{output}")?,
            Ok(None) => {}
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Control::Continue)
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// With `interactive`, a prompt is written before every line.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(self.out, "{PROMPT}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                if interactive {
                    writeln!(self.out)?;
                }
                return Ok(());
            };
            if self.execute(&line?)? == Control::Exit {
                return Ok(());
            }
        }
    }

    fn define(&mut self, arg: &str) -> Result<(), CommandError> {
        const USAGE: &str = "let <name> <args> = <expr>";

        let (pattern, value) = arg.split_once('=').unwrap_or((arg, ""));
        let (pattern, value) = (pattern.trim(), value.trim());
        if pattern.is_empty() || value.is_empty() {
            return Err(CommandError::Usage(USAGE));
        }
        if let Some(piece) = pattern.split_whitespace().find(|piece| !is_identifier(piece)) {
            return Err(CommandError::InvalidName(piece.to_string()));
        }

        let definition = parse_definition(arg)?;
        let name = definition.name;
        let term = bind(&definition.into_value(), &self.env)?;
        tracing::debug!(%name, size = term.size(), "defined");
        let binder = BinderId::fresh(name);
        self.env = self.env.extend(binder, Binding::Thunk(term, self.env.clone()));
        Ok(())
    }

    fn evaluate(&self, arg: &str) -> Result<String, CommandError> {
        let term = bind(&parse_expr(arg)?, &self.env)?;
        let mut reducer = Reducer::new(self.mode);
        let result = reducer.normalize(&term, &self.env);
        let stats = reducer.stats();
        tracing::debug!(
            beta_steps = stats.beta_steps,
            variable_lookups = stats.variable_lookups,
            "evaluated"
        );
        Ok(render(&result?, &self.env))
    }

    fn show(&self, arg: &str) -> Result<String, CommandError> {
        let name = parse_name(arg).map_err(|_| CommandError::Usage("show <identifier>"))?;
        match self.env.lookup_by_name(name) {
            Some((_, Binding::Thunk(term, env))) => Ok(render(term, env)),
            Some((binder, Binding::Value(_))) => Ok(binder.name().to_string()),
            None => Err(CommandError::UndefinedName(name)),
        }
    }
}

/// Print `term`, naming its free binders after the definitions in `env`.
fn render(term: &Term, env: &Environment) -> String {
    format_ast(&unbind(term, &env.free_names()))
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _)| code).trim()
}

/// Run the shell on standard input and output.
///
/// The banner and prompt appear only when standard input is a terminal and
/// `options.quiet` is off.
pub fn run_stdio(options: &Options) -> io::Result<()> {
    let stdin = io::stdin();
    let interactive = !options.quiet && stdin.is_terminal();
    let mut session = Session::new(options.mode, io::stdout().lock());
    if interactive {
        writeln!(session.out, "{BANNER}")?;
    }
    session.run(stdin.lock(), interactive)
}
