// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Lifecycle state of a task.
///
/// ```text
/// Created ──► Executing ──┬──► Finished
///                         ├──► Failed
///                         └──► Timeout
/// ```
///
/// The three right-hand states are terminal. Each state has a stable numeric
/// code, handed to state-change observers that want an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Created,
    Executing,
    Finished,
    Failed,
    Timeout,
}

impl TaskState {
    pub fn code(self) -> i32 {
        match self {
            TaskState::Created => 0,
            TaskState::Executing => 1,
            TaskState::Finished => 2,
            TaskState::Failed => 3,
            TaskState::Timeout => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Finished | TaskState::Failed | TaskState::Timeout
        )
    }
}

impl TryFrom<i32> for TaskState {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TaskState::Created),
            1 => Ok(TaskState::Executing),
            2 => Ok(TaskState::Finished),
            3 => Ok(TaskState::Failed),
            4 => Ok(TaskState::Timeout),
            other => Err(other),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Created => "created",
            TaskState::Executing => "executing",
            TaskState::Finished => "finished",
            TaskState::Failed => "failed",
            TaskState::Timeout => "timeout",
        };
        f.write_str(name)
    }
}
