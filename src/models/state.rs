use std::fmt;

use serde::Serialize;

/// The four stages of a report run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Normalize,
    Embed,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Embed => "embed",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Progress of a single run.
///
/// `Start → Loaded → Normalized → Embedded → Written → Done`, with an exit
/// to `Aborted` from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Start,
    Loaded,
    Normalized,
    Embedded,
    Written,
    Done,
    Aborted(Stage),
}

impl PipelineState {
    /// No further transitions leave a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Aborted(_))
    }

    /// State reached when the current stage succeeds
    pub fn advance(self) -> Self {
        match self {
            PipelineState::Start => PipelineState::Loaded,
            PipelineState::Loaded => PipelineState::Normalized,
            PipelineState::Normalized => PipelineState::Embedded,
            PipelineState::Embedded => PipelineState::Written,
            PipelineState::Written | PipelineState::Done => PipelineState::Done,
            aborted @ PipelineState::Aborted(_) => aborted,
        }
    }

    /// Stage that runs from this state, if any
    pub fn pending_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Start => Some(Stage::Load),
            PipelineState::Loaded => Some(Stage::Normalize),
            PipelineState::Normalized => Some(Stage::Embed),
            PipelineState::Embedded => Some(Stage::Write),
            _ => None,
        }
    }
}
