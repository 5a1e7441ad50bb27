//! Provisioning plans
//!
//! Every action is planned up front as a linear list of [`Step`]s, then run
//! in order through a [`StepRunner`]. All precondition checks happen while
//! planning, so a plan that exists can only fail at an external call.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::core::environment::EnvDelta;
use crate::error::ProvisionError;

/// How a non-zero exit of a command is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A package installer (maps to [`ProvisionError::InstallFailure`])
    Install,
    /// Any other command (maps to [`ProvisionError::CommandFailure`])
    Command,
}

/// A sub-process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program name or path
    pub program: String,
    /// Arguments, passed verbatim
    pub args: Vec<String>,
    /// Variables set on top of the inherited environment
    pub env: BTreeMap<String, String>,
    /// Error class used when the command exits non-zero
    pub failure: FailureKind,
}

impl CommandLine {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            failure: FailureKind::Command,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set environment overrides for this command
    #[must_use]
    pub fn envs(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Mark this command as an installer
    #[must_use]
    pub fn installer(mut self) -> Self {
        self.failure = FailureKind::Install;
        self
    }

    /// Error for a non-zero exit of this command
    pub fn failure_error(&self, code: Option<i32>) -> ProvisionError {
        let command = self.to_string();
        match self.failure {
            FailureKind::Install => ProvisionError::InstallFailure { command, code },
            FailureKind::Command => ProvisionError::CommandFailure { command, code },
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One external call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Fetch `url` into `dest`
    Download { url: String, dest: PathBuf },
    /// Run a sub-process to completion
    Run(CommandLine),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download { url, dest } => write!(f, "download {url} -> {}", dest.display()),
            Self::Run(cmd) => write!(f, "run {cmd}"),
        }
    }
}

/// Result of one completed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// File fetched
    Downloaded {
        path: PathBuf,
        size: u64,
        sha256: String,
    },
    /// Command exited successfully
    Exited { code: i32 },
    /// Step was only printed (dry run)
    Planned,
}

/// Ordered steps for one action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Human-readable summary, e.g. "Installing Rust (stable)"
    pub title: String,
    /// Environment changes applied to the commands of this plan
    pub delta: EnvDelta,
    steps: Vec<Step>,
}

impl Plan {
    /// Create an empty plan
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            delta: EnvDelta::new(),
            steps: Vec::new(),
        }
    }

    /// Append a download step
    pub fn download(&mut self, url: impl Into<String>, dest: impl Into<PathBuf>) {
        self.steps.push(Step::Download {
            url: url.into(),
            dest: dest.into(),
        });
    }

    /// Append a command step
    pub fn run(&mut self, cmd: CommandLine) {
        self.steps.push(Step::Run(cmd));
    }

    /// Planned steps, in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Download steps only
    pub fn downloads(&self) -> impl Iterator<Item = (&str, &PathBuf)> {
        self.steps.iter().filter_map(|step| match step {
            Step::Download { url, dest } => Some((url.as_str(), dest)),
            Step::Run(_) => None,
        })
    }

    /// Command steps only
    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        self.steps.iter().filter_map(|step| match step {
            Step::Run(cmd) => Some(cmd),
            Step::Download { .. } => None,
        })
    }
}

/// Performs the external side of a step
#[allow(async_fn_in_trait)]
pub trait StepRunner {
    /// Run one step, returning its outcome or the error that aborts the plan
    async fn run_step(&mut self, step: &Step) -> Result<StepOutcome, ProvisionError>;
}

/// Run every step of `plan` in order, stopping at the first failure
pub async fn execute<R: StepRunner>(
    plan: &Plan,
    runner: &mut R,
) -> Result<Vec<StepOutcome>, ProvisionError> {
    let mut outcomes = Vec::with_capacity(plan.steps.len());
    for (index, step) in plan.steps.iter().enumerate() {
        tracing::debug!("step {}/{}: {step}", index + 1, plan.steps.len());
        match runner.run_step(step).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                tracing::debug!("step {} failed, aborting: {e}", index + 1);
                return Err(e);
            }
        }
    }
    Ok(outcomes)
}
