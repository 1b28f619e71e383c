//! Shell Configuration
//!
//! Paths and backend launch parameters. The host resolves the per-user
//! directories; environment variables can override how the backend is run.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

pub const ENV_BACKEND_ENTRY: &str = "WIKI_DESK_BACKEND_ENTRY";
pub const ENV_BACKEND_INTERPRETER: &str = "WIKI_DESK_BACKEND_INTERPRETER";
pub const ENV_READINESS: &str = "WIKI_DESK_READINESS";

pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(2000);
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_millis(1000);
pub const DEFAULT_HEALTH_PATH: &str = "/health";
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_millis(250);

/// How `start` decides the backend is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Sleep, then check the process is still alive
    GracePeriod(Duration),
    /// Poll `http://127.0.0.1:<port><path>` until it answers 2xx or `timeout` passes
    HealthProbe {
        path: String,
        timeout: Duration,
        interval: Duration,
    },
}

impl Readiness {
    pub fn health_probe() -> Self {
        Readiness::HealthProbe {
            path: DEFAULT_HEALTH_PATH.to_string(),
            timeout: DEFAULT_HEALTH_TIMEOUT,
            interval: DEFAULT_HEALTH_INTERVAL,
        }
    }

    /// `grace` or `probe`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "grace" => Some(Readiness::GracePeriod(DEFAULT_GRACE_PERIOD)),
            "probe" => Some(Readiness::health_probe()),
            _ => None,
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Readiness::health_probe()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Program the entry point is handed to; `None` runs the entry point directly
    pub interpreter: Option<PathBuf>,
    pub entry_point: PathBuf,
    /// Value of `module_root_var` in the child's environment
    pub module_root: PathBuf,
    pub module_root_var: String,
    /// Variable carrying the listening port
    pub port_var: String,
    pub readiness: Readiness,
    /// Upper bound on waiting for the child to exit after termination
    pub stop_grace: Duration,
}

impl BackendConfig {
    pub fn new(entry_point: impl Into<PathBuf>) -> Self {
        let entry_point = entry_point.into();
        let module_root = entry_point
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            interpreter: None,
            entry_point,
            module_root,
            module_root_var: "PYTHONPATH".to_string(),
            port_var: "WIKI_BACKEND_PORT".to_string(),
            readiness: Readiness::default(),
            stop_grace: DEFAULT_STOP_GRACE,
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_stop_grace(mut self, stop_grace: Duration) -> Self {
        self.stop_grace = stop_grace;
        self
    }
}

fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub settings_path: PathBuf,
    pub log_dir: PathBuf,
    pub backend: BackendConfig,
}

impl ShellConfig {
    /// Layout under the host's per-user directories
    ///
    /// The backend ships as `<resource_dir>/backend/main.py`.
    pub fn from_dirs(config_dir: &Path, log_dir: &Path, resource_dir: &Path) -> Self {
        let entry_point = resource_dir.join("backend").join("main.py");
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            log_dir: log_dir.to_path_buf(),
            backend: BackendConfig::new(entry_point).with_interpreter(default_interpreter()),
        }
    }

    /// Apply `WIKI_DESK_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(entry) = lookup(ENV_BACKEND_ENTRY).filter(|v| !v.is_empty()) {
            let interpreter = self.backend.interpreter.take();
            let readiness = self.backend.readiness.clone();
            self.backend = BackendConfig::new(entry).with_readiness(readiness);
            self.backend.interpreter = interpreter;
        }

        if let Some(interpreter) = lookup(ENV_BACKEND_INTERPRETER) {
            // Empty means "execute the entry point itself".
            self.backend.interpreter = if interpreter.is_empty() {
                None
            } else {
                Some(PathBuf::from(interpreter))
            };
        }

        if let Some(name) = lookup(ENV_READINESS) {
            match Readiness::from_name(&name) {
                Some(readiness) => self.backend.readiness = readiness,
                None => log::warn!("Ignoring {}={:?}; expected \"grace\" or \"probe\"", ENV_READINESS, name),
            }
        }

        self
    }
}
