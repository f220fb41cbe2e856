//! Client configuration for the `arena` binary.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Settings that only concern the client, separate from [`runtime::RuntimeConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scenario file to run. The built-in demo runs when unset.
    pub scenario: Option<PathBuf>,
    /// Directory for the daily rolling log file. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// How long an effect stays on screen before the consumer prunes it.
    pub effect_lifetime: Duration,
    /// Upper bound on waiting for the effect queues to drain at the end.
    pub drain_timeout: Duration,
    /// Skip printing the action log.
    pub quiet: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            log_dir: None,
            effect_lifetime: Duration::from_millis(400),
            drain_timeout: Duration::from_secs(5),
            quiet: false,
        }
    }
}

impl ClientConfig {
    pub const ENV_SCENARIO: &'static str = "ARENA_SCENARIO";
    pub const ENV_LOG_DIR: &'static str = "ARENA_LOG_DIR";
    pub const ENV_EFFECT_LIFETIME: &'static str = "ARENA_EFFECT_LIFETIME_MS";
    pub const ENV_DRAIN_TIMEOUT: &'static str = "ARENA_DRAIN_TIMEOUT_MS";

    /// Log directory alone, read before the subscriber is installed.
    pub fn log_dir_from_env() -> Option<PathBuf> {
        read_env::<PathBuf>(Self::ENV_LOG_DIR)
    }

    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SCENARIO` - Path to a `.ron` or `.json` scenario
    /// - `ARENA_LOG_DIR` - Directory for rolling log files
    /// - `ARENA_EFFECT_LIFETIME_MS` - Effect lifetime in milliseconds (default: 400)
    /// - `ARENA_DRAIN_TIMEOUT_MS` - Final drain timeout in milliseconds (default: 5000)
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>(Self::ENV_SCENARIO) {
            config.scenario = Some(path);
        }
        config.log_dir = Self::log_dir_from_env();
        if let Some(ms) = read_env::<u64>(Self::ENV_EFFECT_LIFETIME) {
            config.effect_lifetime = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>(Self::ENV_DRAIN_TIMEOUT) {
            config.drain_timeout = Duration::from_millis(ms);
        }

        config
    }

    /// Effect lifetime scaled by the animation speed, like every other pause.
    pub fn scaled_lifetime(&self, speed: f32) -> Duration {
        if speed <= 0.0 || !speed.is_finite() {
            return Duration::ZERO;
        }
        let millis = self.effect_lifetime.as_millis() as f64 * f64::from(speed);
        Duration::from_millis(millis.round() as u64)
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok().filter(|v| !v.is_empty())?;
    parse_env(key, &raw)
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "client::config", key, value = %raw, "ignoring unparsable variable");
            None
        }
    }
}
