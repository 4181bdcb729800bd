//! Navigation back-ends.

use std::future::Future;
use std::io::{self, Write};

use tokio::process::Command;

use crate::config::{RedirectConfig, RedirectMode};

/// Errors raised while carrying out a redirect.
#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    #[error("failed to write redirect target: {0}")]
    Output(#[source] io::Error),

    #[error("failed to launch opener '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("opener '{program}' exited with {status}")]
    Opener {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("no opener command configured")]
    NoOpener,
}

/// Something that can send the user to a URL.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str) -> impl Future<Output = Result<(), RedirectError>> + Send;
}

/// Writes the target URL as one line on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    async fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{url}").map_err(RedirectError::Output)?;
        stdout.flush().map_err(RedirectError::Output)
    }
}

/// Runs an opener program with the target URL as its last argument.
#[derive(Debug, Clone)]
pub struct CommandNavigator {
    program: String,
    args: Vec<String>,
}

impl CommandNavigator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split `[program, args...]` as found in the config file.
    pub fn from_command_line(command: &[String]) -> Result<Self, RedirectError> {
        let (program, args) = command.split_first().ok_or(RedirectError::NoOpener)?;
        if program.trim().is_empty() {
            return Err(RedirectError::NoOpener);
        }
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

impl Navigator for CommandNavigator {
    async fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        tracing::debug!(program = %self.program, url = %url, "Launching opener");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .status()
            .await
            .map_err(|source| RedirectError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RedirectError::Opener {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Navigator selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredNavigator {
    Print(PrintNavigator),
    Command(CommandNavigator),
}

impl ConfiguredNavigator {
    pub fn from_config(config: &RedirectConfig) -> Result<Self, RedirectError> {
        match config.mode {
            RedirectMode::Print => Ok(Self::Print(PrintNavigator)),
            RedirectMode::Command => {
                CommandNavigator::from_command_line(&config.command).map(Self::Command)
            }
        }
    }
}

impl Navigator for ConfiguredNavigator {
    async fn navigate(&self, url: &str) -> Result<(), RedirectError> {
        match self {
            Self::Print(nav) => nav.navigate(url).await,
            Self::Command(nav) => nav.navigate(url).await,
        }
    }
}
