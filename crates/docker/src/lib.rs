//! Docker command execution for the dvn toolkit.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dvn-labs/dvn/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::{
    path::Path,
    process::{Command, ExitStatus, Stdio},
};

use tracing::debug;

/// The path inside the charon container where the addon data directory is
/// bind-mounted. Fixed by the charon image.
pub const CHARON_DATA_MOUNT: &str = "/opt/charon/.charon";

/// Errors produced when running an external command.
#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    /// The binary could not be started at all.
    #[error("failed to launch {binary}: {source}")]
    Spawn {
        /// The binary that failed to start.
        binary: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The command started but exited with a non-zero status.
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        /// The command line, joined for display.
        command: String,
        /// The process exit status.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Executes external commands synchronously.
///
/// Arguments are passed through as an argv vector: each element reaches the
/// operating system as one opaque token, so user-supplied values (cluster
/// names, URLs, ENRs) cannot be reinterpreted as shell syntax.
pub trait CommandRunner {
    /// Run a command, capturing and returning its standard output verbatim.
    fn run_captured(&self, args: &[String]) -> Result<String, DockerError>;

    /// Run a command with stdio inherited from the calling terminal.
    ///
    /// Used for long-running invocations whose output the operator watches
    /// directly (the DKG ceremony, identity creation).
    fn run_attached(&self, args: &[String]) -> Result<(), DockerError>;
}

/// [`CommandRunner`] backed by the local `docker` binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    /// Create a runner that invokes `docker` from `PATH`.
    pub fn new() -> Self {
        Self { binary: "docker".to_owned() }
    }

    /// Create a runner that invokes the given binary instead of `docker`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn display(&self, args: &[String]) -> String {
        let mut line = self.binary.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl CommandRunner for DockerCli {
    fn run_captured(&self, args: &[String]) -> Result<String, DockerError> {
        debug!(command = %self.display(args), "running captured command");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DockerError::Spawn { binary: self.binary.clone(), source })?;
        if !output.status.success() {
            return Err(DockerError::Failed {
                command: self.display(args),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_attached(&self, args: &[String]) -> Result<(), DockerError> {
        debug!(command = %self.display(args), "running attached command");
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|source| DockerError::Spawn { binary: self.binary.clone(), source })?;
        if !status.success() {
            return Err(DockerError::Failed {
                command: self.display(args),
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

/// Compose `docker run --rm` arguments with a directory bind-mounted at a
/// fixed in-container path.
pub fn run_args(
    host_dir: &Path,
    mount_point: &str,
    image: &str,
    command: &[&str],
) -> Vec<String> {
    let mut args = vec![
        "run".to_owned(),
        "--rm".to_owned(),
        "-v".to_owned(),
        format!("{}:{}", host_dir.display(), mount_point),
        image.to_owned(),
    ];
    args.extend(command.iter().map(|s| (*s).to_owned()));
    args
}

/// Compose `docker exec` arguments against a running container.
pub fn exec_args(container: &str, command: &[&str]) -> Vec<String> {
    let mut args = vec!["exec".to_owned(), container.to_owned()];
    args.extend(command.iter().map(|s| (*s).to_owned()));
    args
}
