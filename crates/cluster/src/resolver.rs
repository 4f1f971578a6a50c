//! Local identity record resolution.

use std::path::PathBuf;

use dvn_docker::{exec_args, run_args, CommandRunner, CHARON_DATA_MOUNT};
use tracing::debug;

use crate::ResolveError;

/// One way of fetching this node's identity record.
///
/// Sources form an explicit ordered chain; each knows its own command line
/// and can be exercised independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrSource {
    /// Ask a live charon container. Cheap, but only works while the
    /// container happens to be running.
    RunningContainer {
        /// Full name of the running container.
        container: String,
    },
    /// One-shot container invocation against the persisted private key.
    /// Works whenever an identity has been created, running or not.
    OneShot {
        /// The charon image tag to run.
        image: String,
        /// Host directory holding the private key.
        data_dir: PathBuf,
    },
}

impl EnrSource {
    /// The standard resolution chain: live container first, then the
    /// persisted key. The identity material outlives any single container,
    /// so a running instance is an optimization, never a requirement.
    pub fn standard_chain(container: String, image: String, data_dir: PathBuf) -> Vec<Self> {
        vec![
            Self::RunningContainer { container },
            Self::OneShot { image, data_dir },
        ]
    }

    /// The docker argument vector for this source.
    pub fn command(&self) -> Vec<String> {
        match self {
            Self::RunningContainer { container } => exec_args(container, &["charon", "enr"]),
            Self::OneShot { image, data_dir } => {
                run_args(data_dir, CHARON_DATA_MOUNT, image, &["enr"])
            }
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::RunningContainer { .. } => "running container",
            Self::OneShot { .. } => "one-shot container",
        }
    }
}

/// Fetch the local identity record, trying each source in order.
///
/// The first success wins and its output is returned trimmed. Failures of
/// earlier sources are logged at debug level only; they are expected
/// whenever the charon container is not running and must not surface to
/// the operator when a later source succeeds.
pub fn resolve_local_enr(
    runner: &impl CommandRunner,
    sources: &[EnrSource],
) -> Result<String, ResolveError> {
    let mut last_failure = None;
    for source in sources {
        match runner.run_captured(&source.command()) {
            Ok(output) => return Ok(output.trim().to_owned()),
            Err(err) => {
                debug!(source = source.describe(), error = %err, "identity source failed");
                last_failure = Some(err);
            }
        }
    }
    match last_failure {
        Some(source) => Err(ResolveError::NotFound { source }),
        None => Err(ResolveError::NoSources),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use dvn_docker::DockerError;

    use super::*;

    /// Runner that scripts one result per invocation, recording the
    /// commands it saw.
    struct ScriptedRunner {
        results: RefCell<Vec<Result<String, DockerError>>>,
        seen: RefCell<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        fn new(results: Vec<Result<String, DockerError>>) -> Self {
            Self { results: RefCell::new(results), seen: RefCell::new(Vec::new()) }
        }

        fn failure() -> DockerError {
            DockerError::Spawn {
                binary: "docker".to_owned(),
                source: std::io::Error::other("container not running"),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run_captured(&self, args: &[String]) -> Result<String, DockerError> {
            self.seen.borrow_mut().push(args.to_vec());
            self.results.borrow_mut().remove(0)
        }

        fn run_attached(&self, _args: &[String]) -> Result<(), DockerError> {
            unreachable!("resolver never runs attached commands")
        }
    }

    fn chain() -> Vec<EnrSource> {
        EnrSource::standard_chain(
            "dvn_addon_charon".to_owned(),
            "obolnetwork/charon:v1.7.0".to_owned(),
            PathBuf::from("/var/lib/dvn/addons/charon"),
        )
    }

    #[test]
    fn fast_path_success_skips_fallback() {
        let runner = ScriptedRunner::new(vec![Ok("enr:-abc\n".to_owned())]);
        let enr = resolve_local_enr(&runner, &chain()).expect("fast path succeeds");
        assert_eq!(enr, "enr:-abc");
        let seen = runner.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0][0], "exec");
    }

    #[test]
    fn fallback_recovers_from_fast_path_failure() {
        let runner = ScriptedRunner::new(vec![
            Err(ScriptedRunner::failure()),
            Ok("  enr:-fallback  \n".to_owned()),
        ]);
        let enr = resolve_local_enr(&runner, &chain()).expect("fallback succeeds");
        assert_eq!(enr, "enr:-fallback");
        let seen = runner.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1][0], "run");
    }

    #[test]
    fn all_sources_failing_is_not_found() {
        let runner = ScriptedRunner::new(vec![
            Err(ScriptedRunner::failure()),
            Err(ScriptedRunner::failure()),
        ]);
        let err = resolve_local_enr(&runner, &chain()).expect_err("nothing succeeded");
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn empty_chain_is_rejected() {
        let runner = ScriptedRunner::new(Vec::new());
        let err = resolve_local_enr(&runner, &[]).expect_err("no sources");
        assert!(matches!(err, ResolveError::NoSources));
    }

    #[test]
    fn source_commands_are_exact() {
        let sources = chain();
        assert_eq!(
            sources[0].command(),
            vec!["exec", "dvn_addon_charon", "charon", "enr"]
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        );
        assert_eq!(
            sources[1].command(),
            vec![
                "run",
                "--rm",
                "-v",
                "/var/lib/dvn/addons/charon:/opt/charon/.charon",
                "obolnetwork/charon:v1.7.0",
                "enr",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>()
        );
    }
}
