//! Runner trait and configuration.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qobalt_ir::Circuit;

use crate::error::{RunError, RunResult};

/// Configuration for a runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Name of the runner.
    pub name: String,
    /// Additional runner-specific configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RunnerConfig {
    /// Create a new runner configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an extra option as an unsigned integer.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }
}

/// Trait for shot runners — the backend seam of the simulator.
///
/// A runner executes one shot at a time. Runners are `Send + Sync` and must
/// not retain state across shots; all per-shot resources (amplitudes,
/// classical register, RNG) live inside [`Runner::run_once`]. The shot
/// scheduler shares a circuit immutably across workers and confines each
/// runner instance to one worker.
pub trait Runner: Send + Sync {
    /// Get the name of this runner.
    fn name(&self) -> &str;

    /// Execute the circuit for one shot and return the outcome string.
    ///
    /// The outcome string has length `circuit.num_clbits()`; the character at
    /// position `i` is `'0'` or `'1'` for classical bit `i`. `seed`, when
    /// present, selects the shot's independent pseudo-random stream; `None`
    /// draws from OS entropy.
    fn run_once(&self, circuit: &Circuit, seed: Option<u64>) -> RunResult<String>;

    /// Compute the final state vector of the circuit, if supported.
    ///
    /// Measurements are applied as no-ops in this mode. Runners that cannot
    /// surface amplitudes report [`RunError::Unsupported`].
    fn statevector(&self, circuit: &Circuit) -> RunResult<Vec<Complex64>> {
        let _ = circuit;
        Err(RunError::Unsupported(format!(
            "runner '{}' does not support state-vector extraction",
            self.name()
        )))
    }
}

/// Trait for creating runners from configuration.
pub trait RunnerFactory: Runner + Sized {
    /// Create a runner from configuration.
    fn from_config(config: RunnerConfig) -> RunResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullRunner;

    impl Runner for NullRunner {
        fn name(&self) -> &str {
            "null"
        }

        fn run_once(&self, circuit: &Circuit, _seed: Option<u64>) -> RunResult<String> {
            Ok("0".repeat(circuit.num_clbits()))
        }
    }

    #[test]
    fn test_config_extras() {
        let config = RunnerConfig::new("test").with_extra("max_qubits", serde_json::json!(12));
        assert_eq!(config.name, "test");
        assert_eq!(config.extra_u64("max_qubits"), Some(12));
        assert_eq!(config.extra_u64("missing"), None);
    }

    #[test]
    fn test_statevector_default_is_unsupported() {
        let runner = NullRunner;
        let circuit = qobalt_ir::CircuitBuilder::new(1, 0).build();
        assert!(matches!(
            runner.statevector(&circuit),
            Err(RunError::Unsupported(_))
        ));
    }
}
