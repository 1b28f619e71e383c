//! Backend Process Supervisor
//!
//! Owns the single backend child process. All transitions happen under one
//! async lock that is never held across an await point, so concurrent
//! commands interleave safely: the check for a live process, the spawn, and
//! the move to `Starting` are one critical section.
//!
//! Each spawned child gets a generation number. The exit observer only
//! touches state that still belongs to its generation, so a late exit from an
//! abandoned process can never clobber a newer one.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::{oneshot, Mutex};
use tokio::time::{sleep, Instant};

use crate::config::{BackendConfig, Readiness};
use crate::diagnostics::{report_anomaly, report_failure};
use crate::domain::{BackendState, BackendStatus, ShellError, ShellResult, StartOutcome, StopOutcome};


const STOP_POLL: Duration = Duration::from_millis(25);
const PROBE_REQUEST_CAP: Duration = Duration::from_secs(2);

struct ProcessHandle {
    pid: u32,
    generation: u64,
    kill: Option<oneshot::Sender<()>>,
}

impl ProcessHandle {
    /// Ask the observer to kill the child; repeated calls are no-ops
    fn terminate(&mut self) {
        if let Some(kill) = self.kill.take() {
            let _ = kill.send(());
        }
    }
}

#[derive(Default)]
struct SupervisorState {
    phase: BackendState,
    handle: Option<ProcessHandle>,
    last_exit_code: Option<i32>,
    generation: u64,
}

impl SupervisorState {
    fn owns(&self, generation: u64) -> bool {
        self.handle.as_ref().is_some_and(|h| h.generation == generation)
    }
}

pub struct BackendSupervisor {
    config: BackendConfig,
    state: Arc<Mutex<SupervisorState>>,
    http: reqwest::Client,
}

impl BackendSupervisor {
    pub fn new(config: BackendConfig) -> Self {
        // Readiness only ever talks to loopback; proxies from the environment must not apply.
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_default();

        Self {
            config,
            state: Arc::new(Mutex::new(SupervisorState::default())),
            http,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Spawn the backend listening on `port` and wait until it is ready
    ///
    /// Startup errors are returned, not logged; the caller reports them.
    pub async fn start(&self, port: u16) -> ShellResult<StartOutcome> {
        let (pid, generation) = {
            let mut state = self.state.lock().await;
            if state.handle.is_some() || state.phase.is_live() {
                log::info!("Backend already {}, not spawning another", state.phase);
                return Ok(StartOutcome::AlreadyRunning);
            }

            let entry = &self.config.entry_point;
            if !entry.exists() {
                return Err(ShellError::BackendNotFound(entry.clone()));
            }

            let child = match self.command(port).spawn() {
                Ok(child) => child,
                Err(err) => {
                    state.handle = None;
                    state.phase = BackendState::Stopped;
                    return Err(ShellError::StartupFailed(format!(
                        "could not launch {}: {}",
                        self.program().display(),
                        err
                    )));
                }
            };

            let pid = child.id().unwrap_or_default();
            state.generation += 1;
            let generation = state.generation;
            let (kill_tx, kill_rx) = oneshot::channel();
            state.handle = Some(ProcessHandle {
                pid,
                generation,
                kill: Some(kill_tx),
            });
            state.phase = BackendState::Starting;
            state.last_exit_code = None;

            tokio::spawn(observe_exit(self.state.clone(), child, generation, kill_rx));
            (pid, generation)
        };

        log::info!("Backend spawned (pid {}, port {})", pid, port);

        if let Err(err) = self.await_ready(port, generation).await {
            self.abandon(generation).await;
            return Err(err);
        }

        self.confirm_running(pid, generation).await
    }

    /// Terminate the backend if one is attached
    pub async fn stop(&self) -> StopOutcome {
        let generation = {
            let mut state = self.state.lock().await;
            let Some(handle) = state.handle.as_mut() else {
                return StopOutcome::NotRunning;
            };
            handle.terminate();
            let generation = handle.generation;
            state.phase = BackendState::Stopping;
            generation
        };

        let deadline = Instant::now() + self.config.stop_grace;
        while Instant::now() < deadline {
            if !self.state.lock().await.owns(generation) {
                break;
            }
            sleep(STOP_POLL).await;
        }

        let mut state = self.state.lock().await;
        if state.owns(generation) {
            // Dropping the handle closes the kill channel; the observer still reaps.
            state.handle = None;
            state.phase = BackendState::Stopped;
            drop(state);
            report_anomaly(
                "backend-stop",
                &format!("process did not exit within {:?}", self.config.stop_grace),
            );
        } else if state.handle.is_none() && state.phase == BackendState::Stopping {
            state.phase = BackendState::Stopped;
        }

        log::info!("Backend stopped");
        StopOutcome::Stopped
    }

    pub async fn status(&self) -> BackendStatus {
        let state = self.state.lock().await;
        let attached = state.handle.as_ref();
        BackendStatus {
            running: attached.is_some()
                && matches!(state.phase, BackendState::Starting | BackendState::Running),
            pid: attached.map(|h| h.pid),
            state: state.phase,
            last_exit_code: state.last_exit_code,
        }
    }

    /// Stop-if-live, for shell exit
    pub async fn shutdown(&self) {
        if self.stop().await == StopOutcome::Stopped {
            log::info!("Backend stopped on shutdown");
        }
    }

    fn program(&self) -> &Path {
        self.config
            .interpreter
            .as_deref()
            .unwrap_or(self.config.entry_point.as_path())
    }

    fn command(&self, port: u16) -> Command {
        let entry = &self.config.entry_point;
        let mut command = match &self.config.interpreter {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(entry);
                command
            }
            None => Command::new(entry),
        };

        command
            .env(&self.config.module_root_var, &self.config.module_root)
            .env(&self.config.port_var, port.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    async fn await_ready(&self, port: u16, generation: u64) -> ShellResult<()> {
        let (path, timeout, interval) = match &self.config.readiness {
            Readiness::GracePeriod(grace) => {
                sleep(*grace).await;
                return Ok(());
            }
            Readiness::HealthProbe { path, timeout, interval } => (path, *timeout, *interval),
        };

        let url = format!("http://127.0.0.1:{}{}", port, path);
        let deadline = Instant::now() + timeout;
        loop {
            // Lost the process: let confirm_running report how it ended.
            if !self.state.lock().await.owns(generation) {
                return Ok(());
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ShellError::StartupFailed(format!(
                    "no healthy response from {} within {:?}",
                    url, timeout
                )));
            }

            match self
                .http
                .get(&url)
                .timeout(remaining.min(PROBE_REQUEST_CAP))
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    log::debug!("Backend healthy at {}", url);
                    return Ok(());
                }
                Ok(resp) => log::debug!("Health probe {} answered {}", url, resp.status()),
                Err(err) => log::debug!("Health probe {} not ready: {}", url, err),
            }

            sleep(interval.min(deadline.saturating_duration_since(Instant::now()))).await;
        }
    }

    async fn confirm_running(&self, pid: u32, generation: u64) -> ShellResult<StartOutcome> {
        let mut state = self.state.lock().await;
        if state.owns(generation) && state.phase == BackendState::Starting {
            state.phase = BackendState::Running;
            log::info!("Backend running (pid {})", pid);
            return Ok(StartOutcome::Started { pid });
        }

        let exit = match state.last_exit_code {
            Some(code) => format!("exit code {}", code),
            None => "no exit code".to_string(),
        };
        Err(ShellError::StartupFailed(format!("process is {} ({})", state.phase, exit)))
    }

    /// Kill a process that never became ready
    async fn abandon(&self, generation: u64) {
        let mut state = self.state.lock().await;
        if state.owns(generation) {
            if let Some(mut handle) = state.handle.take() {
                handle.terminate();
            }
            state.phase = BackendState::Stopped;
        }
    }
}

/// Waits for the child to exit (or for a kill request), reaps it, and records
/// the outcome if the state still belongs to this generation.
async fn observe_exit(
    state: Arc<Mutex<SupervisorState>>,
    mut child: Child,
    generation: u64,
    kill: oneshot::Receiver<()>,
) {
    // A closed channel means the handle was dropped; treat it as a kill request.
    let exited = tokio::select! {
        status = child.wait() => Some(status),
        _ = kill => None,
    };
    let status = match exited {
        Some(status) => status,
        None => {
            if let Err(err) = child.start_kill() {
                log::warn!("Failed to signal backend: {}", err);
            }
            child.wait().await
        }
    };

    let code = match status {
        Ok(status) => status.code(),
        Err(err) => {
            report_failure("backend-process-error", &ShellError::Io(err));
            None
        }
    };
    log::info!("Backend process exited with code {:?}", code);

    let mut state = state.lock().await;
    if state.generation != generation {
        return;
    }
    state.last_exit_code = code;

    // Already released by stop() or abandon(); they own the phase.
    if state.handle.take().is_none() {
        return;
    }

    state.phase = match state.phase {
        BackendState::Stopping => BackendState::Stopped,
        _ if code == Some(0) => BackendState::Stopped,
        _ => BackendState::Crashed,
    };
    if state.phase == BackendState::Crashed {
        drop(state);
        report_anomaly(
            "backend-process-exit",
            &format!("Backend process exited with code {:?}", code),
        );
    }
}
