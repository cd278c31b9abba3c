//! Evaluator service contract and the subprocess-backed implementation.

use crate::error::{Result, TcalcError};
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Substring marking an evaluator response as an error.
///
/// This containment test is the entire error/success discriminator exposed by
/// the evaluator contract: there is no status code or structured error
/// object. A legitimate result containing the substring would be
/// misclassified; the contract makes that the evaluator's problem, not ours.
pub const ERROR_MARKER: &str = "error";

/// Classified evaluator response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    /// Normalized result text; replaces the expression buffer verbatim.
    Value(String),
    /// Error text; lands in the error slot, buffer untouched.
    Error(String),
}

impl EvalOutcome {
    /// Apply the substring classification rule to a raw response.
    pub fn classify(response: String) -> Self {
        if response.contains(ERROR_MARKER) {
            Self::Error(response)
        } else {
            Self::Value(response)
        }
    }
}

/// External collaborator that computes expression strings.
///
/// `process` is one-shot and opaque: malformed expressions, division by zero,
/// and every other evaluation failure come back in-band as error-tagged text.
/// `test` runs the evaluator's own diagnostic suite; its report is displayed,
/// never interpreted.
#[async_trait]
pub trait EvaluatorService: Send + Sync {
    async fn process(&self, input: &str) -> Result<String>;

    async fn test(&self) -> Result<String>;
}

/// Evaluator reached by spawning a subprocess per request.
///
/// The expression is written to the child's stdin and the full stdout is the
/// response. The diagnostic probe runs the same program with `--self-test`.
pub struct CommandEvaluator {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandEvaluator {
    pub fn new(program: impl Into<OsString>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    async fn run(&self, extra_arg: Option<&str>, stdin_payload: Option<&str>) -> Result<String> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(arg) = extra_arg {
            command.arg(arg);
        }

        let mut child = command
            .spawn()
            .map_err(|err| TcalcError::evaluator(format!("failed to spawn evaluator: {}", err)))?;

        if let Some(payload) = stdin_payload {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| TcalcError::evaluator("evaluator stdin unavailable"))?;
            stdin
                .write_all(payload.as_bytes())
                .await
                .map_err(|err| TcalcError::evaluator(format!("failed to write input: {}", err)))?;
            // Dropping the handle closes the pipe so the child sees EOF.
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|err| TcalcError::evaluator(format!("evaluator did not finish: {}", err)))?;

        if !output.status.success() {
            return Err(TcalcError::evaluator(format!(
                "evaluator exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|_| TcalcError::evaluator("evaluator produced non-UTF-8 output"))?;
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[async_trait]
impl EvaluatorService for CommandEvaluator {
    async fn process(&self, input: &str) -> Result<String> {
        self.run(None, Some(input)).await
    }

    async fn test(&self) -> Result<String> {
        self.run(Some("--self-test"), None).await
    }
}
