// src/types.rs

/// Phases of a single packaging run.
///
/// `Start → CheckTool → (InstallTool)? → RunBuild → {Success, Failure}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Start,
    CheckTool,
    InstallTool,
    RunBuild,
    Success,
    Failure,
}

impl BuildPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildPhase::Success | BuildPhase::Failure)
    }
}

/// Result of probing the environment for the packaging tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Present,
    Absent,
}

impl ToolStatus {
    pub fn is_present(self) -> bool {
        matches!(self, ToolStatus::Present)
    }
}

/// Terminal outcome of the packaging invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failure(i32), // exit code
}

impl BuildOutcome {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            BuildOutcome::Success
        } else {
            BuildOutcome::Failure(code)
        }
    }

    /// Process exit status the orchestrator should terminate with.
    pub fn exit_status(self) -> i32 {
        match self {
            BuildOutcome::Success => 0,
            BuildOutcome::Failure(_) => 1,
        }
    }

    pub fn phase(self) -> BuildPhase {
        match self {
            BuildOutcome::Success => BuildPhase::Success,
            BuildOutcome::Failure(_) => BuildPhase::Failure,
        }
    }
}
