//! Client for the external puzzle generator.
//!
//! The generator is an opaque program taking a subjects argument followed by
//! options. Two requests are made of it:
//!
//! | Request | Arguments | Output |
//! |---------|-----------|--------|
//! | entry count | `<subjects> -print_entry_cnt_and_exit 1` | one integer on stdout |
//! | render | `<subjects> -side N -seed N -reverse 0\|1 -start_pct N -title T` | HTML document on stdout |
//!
//! Render requests carry the destination path explicitly; the runner
//! redirects the generator's stdout into it.
//!
//! All process handling lives behind [`CommandRunner`]. The production
//! implementation is [`ProcessRunner`]; with execution disabled it spawns
//! nothing, writes nothing, and returns empty output. Tests use
//! `tests::MockRunner`.

use crate::types::Variant;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The message is one line; the captured stderr is available through
    /// [`RunnerError::stderr`].
    #[error("command failed ({status}): {command}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

impl RunnerError {
    /// Trimmed stderr of a failed command, if it wrote any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RunnerError::Failed { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.trim())
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Command(#[from] RunnerError),
    #[error("entry count for '{specifier}' is not an integer: {output:?}")]
    EntryCount { specifier: String, output: String },
}

impl GeneratorError {
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GeneratorError::Command(err) => err.stderr(),
            GeneratorError::EntryCount { .. } => None,
        }
    }
}

/// Where a command's standard output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdoutTarget {
    /// Captured and returned by [`CommandRunner::run`].
    Capture,
    /// Written to this file, created or truncated.
    File(PathBuf),
}

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdout: StdoutTarget,
}

impl Invocation {
    /// Build from an argv slice (program first). `None` if `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            stdout: StdoutTarget::Capture,
        })
    }
}

/// Shell-like rendering, used for echoing and error messages.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let StdoutTarget::File(path) = &self.stdout {
            write!(f, " > {}", path.display())?;
        }
        Ok(())
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run to completion, blocking. Returns captured stdout (empty when
    /// redirected to a file). A non-zero exit is an error.
    fn run(&self, invocation: &Invocation) -> Result<String, RunnerError>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    execute: bool,
}

impl ProcessRunner {
    pub fn new(execute: bool) -> Self {
        Self { execute }
    }

    pub fn executes(&self) -> bool {
        self.execute
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<String, RunnerError> {
        if !self.execute {
            return Ok(String::new());
        }
        let io_error = |source| RunnerError::Io {
            command: invocation.to_string(),
            source,
        };

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped());
        match &invocation.stdout {
            StdoutTarget::Capture => {
                command.stdout(Stdio::piped());
            }
            StdoutTarget::File(path) => {
                let file = File::create(path).map_err(io_error)?;
                command.stdout(Stdio::from(file));
            }
        }

        let output = command.output().map_err(io_error)?;
        if !output.status.success() {
            return Err(RunnerError::Failed {
                command: invocation.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The two requests made of the puzzle generator.
pub struct GeneratorClient<'a, R: CommandRunner> {
    runner: &'a R,
    command: &'a [String],
}

impl<'a, R: CommandRunner> GeneratorClient<'a, R> {
    /// `command` is the generator's program plus any leading arguments.
    pub fn new(runner: &'a R, command: &'a [String]) -> Self {
        Self { runner, command }
    }

    fn invocation(&self, args: Vec<String>, stdout: StdoutTarget) -> Invocation {
        let (program, leading) = match self.command.split_first() {
            Some((program, leading)) => (program.clone(), leading),
            None => (String::new(), &[][..]),
        };
        Invocation {
            program,
            args: leading.iter().cloned().chain(args).collect(),
            stdout,
        }
    }

    pub fn entry_count_invocation(&self, specifier: &str) -> Invocation {
        self.invocation(
            vec![
                specifier.to_string(),
                "-print_entry_cnt_and_exit".to_string(),
                "1".to_string(),
            ],
            StdoutTarget::Capture,
        )
    }

    pub fn render_invocation(&self, variant: &Variant, output: &Path) -> Invocation {
        self.invocation(
            vec![
                variant.specifier.clone(),
                "-side".to_string(),
                variant.side.to_string(),
                "-seed".to_string(),
                variant.seed.to_string(),
                "-reverse".to_string(),
                variant.direction.flag().to_string(),
                "-start_pct".to_string(),
                variant.start_pct.to_string(),
                "-title".to_string(),
                variant.title.clone(),
            ],
            StdoutTarget::File(output.to_path_buf()),
        )
    }

    /// Ask the generator how many entries `specifier` covers.
    ///
    /// Output that is not an integer (including the empty output of a runner
    /// that does not execute) is [`GeneratorError::EntryCount`].
    pub fn query_entry_count(&self, specifier: &str) -> Result<usize, GeneratorError> {
        let output = self.runner.run(&self.entry_count_invocation(specifier))?;
        output
            .trim()
            .parse()
            .map_err(|_| GeneratorError::EntryCount {
                specifier: specifier.to_string(),
                output,
            })
    }

    /// Render one puzzle into `output`.
    pub fn render_variant(&self, variant: &Variant, output: &Path) -> Result<(), GeneratorError> {
        self.runner.run(&self.render_invocation(variant, output))?;
        Ok(())
    }
}
