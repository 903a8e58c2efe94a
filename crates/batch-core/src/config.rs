//! Carga de configuración del runtime desde variables de entorno.
//! Usa convención `BATCH_*` con valores por defecto.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Tiempo máximo por defecto que `start_job_and_wait_for_result` espera.
pub const DEFAULT_JOB_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub job_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { job_timeout_ms: DEFAULT_JOB_TIMEOUT_MS }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let job_timeout_ms = env::var("BATCH_JOB_TIMEOUT_MS").ok()
                                                              .and_then(|v| v.parse().ok())
                                                              .unwrap_or(DEFAULT_JOB_TIMEOUT_MS);
        Self { job_timeout_ms }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_millis(self.job_timeout_ms)
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
