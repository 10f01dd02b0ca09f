//! Runner implementation over the state-vector engine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use num_complex::Complex64;
use qobalt_backend::{RunError, RunResult, Runner, RunnerConfig, RunnerFactory};
use qobalt_ir::Circuit;

use crate::statevector::Statevector;

/// Registry name of this runner.
pub const RUNNER_NAME: &str = "statevector";

/// Default qubit capacity. A 24-qubit state is 256 MiB of amplitudes.
const DEFAULT_MAX_QUBITS: u32 = 24;

/// The primary backend: exact state-vector simulation.
///
/// Holds no per-shot state; every [`Runner::run_once`] call owns a fresh
/// amplitude array, classical register, and RNG stream, so one instance can
/// serve any number of sequential shots.
pub struct StatevectorRunner {
    /// Maximum number of qubits accepted.
    max_qubits: u32,
}

impl StatevectorRunner {
    /// Create a runner with the default qubit capacity.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Create a runner with a custom qubit capacity.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Get the qubit capacity.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    fn validate(&self, circuit: &Circuit) -> RunResult<()> {
        if circuit.num_qubits() == 0 {
            return Err(RunError::EmptyCircuit);
        }
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(RunError::TooManyQubits {
                got: circuit.num_qubits(),
                max: self.max_qubits,
            });
        }
        Ok(())
    }
}

impl Default for StatevectorRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for StatevectorRunner {
    fn name(&self) -> &str {
        RUNNER_NAME
    }

    #[instrument(skip(self, circuit))]
    fn run_once(&self, circuit: &Circuit, seed: Option<u64>) -> RunResult<String> {
        self.validate(circuit)?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sv = Statevector::new(circuit.num_qubits());
        let mut register = vec![false; circuit.num_clbits()];

        // Operations arrive in canonical layout order; within a time step
        // they touch disjoint bits, so this order is also a valid schedule.
        for op in circuit.operations() {
            if op.is_measure() {
                let qubit = op.qubits[0].index();
                let clbit = op.clbit.expect("measurement without classical bit").index();
                register[clbit] = sv.measure(qubit, &mut rng)?;
            } else {
                let qubits: Vec<usize> = op.qubits.iter().map(|q| q.index()).collect();
                sv.apply_unitary(op.gate, &qubits);
            }
        }

        // Classical bit 0 is the leftmost character.
        Ok(register.iter().map(|&b| if b { '1' } else { '0' }).collect())
    }

    #[instrument(skip(self, circuit))]
    fn statevector(&self, circuit: &Circuit) -> RunResult<Vec<Complex64>> {
        self.validate(circuit)?;

        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            "computing final state vector"
        );

        let mut sv = Statevector::new(circuit.num_qubits());
        for op in circuit.operations() {
            // Measurements do not project in this mode.
            if !op.is_measure() {
                let qubits: Vec<usize> = op.qubits.iter().map(|q| q.index()).collect();
                sv.apply_unitary(op.gate, &qubits);
            }
        }

        Ok(sv.into_amplitudes())
    }
}

impl RunnerFactory for StatevectorRunner {
    fn from_config(config: RunnerConfig) -> RunResult<Self> {
        let max_qubits = config
            .extra_u64("max_qubits")
            .map_or(DEFAULT_MAX_QUBITS, |v| v as u32);
        Ok(Self { max_qubits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qobalt_ir::CircuitBuilder;

    #[test]
    fn test_bell_outcomes_are_correlated() {
        let runner = StatevectorRunner::new();
        let circuit = CircuitBuilder::bell().unwrap();

        for shot in 0..64u64 {
            let outcome = runner.run_once(&circuit, Some(shot)).unwrap();
            assert!(outcome == "00" || outcome == "11", "got {outcome}");
        }
    }

    #[test]
    fn test_seeded_shot_is_reproducible() {
        let runner = StatevectorRunner::new();
        let circuit = CircuitBuilder::bell().unwrap();

        let a = runner.run_once(&circuit, Some(99)).unwrap();
        let b = runner.run_once(&circuit, Some(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_outcome_string_layout() {
        // Measure qubit 1 (always |1⟩ after X) into clbit 0, and qubit 0
        // (always |0⟩) into clbit 1: the string is "10", clbit 0 leftmost.
        let mut b = CircuitBuilder::new(2, 2);
        b.x(1u32).unwrap();
        b.measure(1u32, 0u32).unwrap();
        b.measure(0u32, 1u32).unwrap();
        let circuit = b.build();

        let runner = StatevectorRunner::new();
        assert_eq!(runner.run_once(&circuit, Some(0)).unwrap(), "10");
    }

    #[test]
    fn test_unmeasured_clbits_stay_zero() {
        let mut b = CircuitBuilder::new(1, 3);
        b.x(0u32).unwrap();
        b.measure(0u32, 1u32).unwrap();
        let circuit = b.build();

        let runner = StatevectorRunner::new();
        assert_eq!(runner.run_once(&circuit, Some(0)).unwrap(), "010");
    }

    #[test]
    fn test_empty_circuit_rejected() {
        let runner = StatevectorRunner::new();
        let circuit = CircuitBuilder::new(0, 0).build();
        assert!(matches!(
            runner.run_once(&circuit, None),
            Err(RunError::EmptyCircuit)
        ));
        assert!(matches!(
            runner.statevector(&circuit),
            Err(RunError::EmptyCircuit)
        ));
    }

    #[test]
    fn test_capacity_limit() {
        let runner = StatevectorRunner::with_max_qubits(2);
        let circuit = CircuitBuilder::new(3, 0).build();
        assert!(matches!(
            runner.run_once(&circuit, None),
            Err(RunError::TooManyQubits { got: 3, max: 2 })
        ));
    }

    #[test]
    fn test_statevector_ignores_measurements() {
        let circuit = CircuitBuilder::bell().unwrap();
        let runner = StatevectorRunner::new();
        let amps = runner.statevector(&circuit).unwrap();

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert_eq!(amps.len(), 4);
        assert!((amps[0].re - sqrt2_inv).abs() < 1e-9);
        assert!((amps[3].re - sqrt2_inv).abs() < 1e-9);
        assert!(amps[1].norm() < 1e-9);
        assert!(amps[2].norm() < 1e-9);
    }

    #[test]
    fn test_from_config_reads_max_qubits() {
        let config = RunnerConfig::new(RUNNER_NAME).with_extra("max_qubits", serde_json::json!(8));
        let runner = StatevectorRunner::from_config(config).unwrap();
        assert_eq!(runner.max_qubits(), 8);

        let default = StatevectorRunner::from_config(RunnerConfig::new(RUNNER_NAME)).unwrap();
        assert_eq!(default.max_qubits(), DEFAULT_MAX_QUBITS);
    }
}
