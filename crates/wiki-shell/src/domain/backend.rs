//! Backend lifecycle types

use serde::{Deserialize, Serialize};

/// Lifecycle state of the backend process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendState {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
    Crashed,
}

impl BackendState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendState::Stopped => "stopped",
            BackendState::Starting => "starting",
            BackendState::Running => "running",
            BackendState::Stopping => "stopping",
            BackendState::Crashed => "crashed",
        }
    }

    /// A process may still be attached in these states
    pub fn is_live(&self) -> bool {
        matches!(self, BackendState::Starting | BackendState::Running | BackendState::Stopping)
    }
}

impl std::fmt::Display for BackendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot returned by `backend:status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub state: BackendState,
    pub last_exit_code: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { pid: u32 },
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_shape() {
        let status = BackendStatus {
            running: true,
            pid: Some(4242),
            state: BackendState::Running,
            last_exit_code: None,
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"running": true, "pid": 4242, "state": "running", "lastExitCode": null})
        );
    }

    #[test]
    fn test_state_names_match_wire() {
        for state in [
            BackendState::Stopped,
            BackendState::Starting,
            BackendState::Running,
            BackendState::Stopping,
            BackendState::Crashed,
        ] {
            assert_eq!(serde_json::to_value(state).unwrap(), json!(state.as_str()));
        }
        assert!(!BackendState::Crashed.is_live());
        assert!(BackendState::Stopping.is_live());
    }
}
