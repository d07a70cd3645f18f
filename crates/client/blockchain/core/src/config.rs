//! In-memory ledger configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct MemoryLedgerConfig {
    pub network: String,
    /// Artificial delay applied to every fetch and submit.
    pub latency: Duration,
    /// JSON scenario to seed the ledger with. `None` uses the demo scenario.
    pub scenario_path: Option<PathBuf>,
}

impl Default for MemoryLedgerConfig {
    fn default() -> Self {
        Self {
            network: "local".to_string(),
            latency: Duration::ZERO,
            scenario_path: None,
        }
    }
}

impl MemoryLedgerConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// - `LEDGER_NETWORK` - Network label (default: "local")
    /// - `LEDGER_LATENCY_MS` - Simulated round-trip latency (default: 0)
    /// - `SCENARIO_PATH` - Scenario JSON file (default: built-in demo)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(network) = env::var("LEDGER_NETWORK")
            && !network.trim().is_empty()
        {
            config.network = network.trim().to_string();
        }

        if let Some(millis) = read_env::<u64>("LEDGER_LATENCY_MS") {
            config.latency = Duration::from_millis(millis);
        }

        config.scenario_path = env::var_os("SCENARIO_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_and_instant() {
        let config = MemoryLedgerConfig::default();
        assert_eq!(config.network, "local");
        assert_eq!(config.latency, Duration::ZERO);
        assert!(config.scenario_path.is_none());
    }
}
