//! Dense state-vector representation and gate kernels.
//!
//! Amplitudes are indexed little-endian: bit `i` of a state index is the
//! value of qubit `i`. Gates are applied in place by iterating over state
//! indices and testing the relevant bit masks; the full `2^Q × 2^Q` matrix
//! is never materialized.

use num_complex::Complex64;
use rand::Rng;
use rand::rngs::StdRng;

use qobalt_backend::{RunError, RunResult};
use qobalt_ir::Gate;

/// Probability below which a measurement branch counts as numerically
/// degenerate. Unreachable for well-formed circuits.
const DEGENERATE_PROB: f64 = 1e-300;

/// A pure quantum state over `num_qubits` qubits.
pub struct Statevector {
    /// The state amplitudes (`2^n` complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the state and return the amplitude vector.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// The squared L2 norm of the state. 1 up to floating rounding.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Apply a unitary gate from the catalog to the given qubits.
    ///
    /// Operand order is positional (controls before targets), matching the
    /// catalog. Measurement is not a unitary and is handled separately by
    /// [`Statevector::measure`].
    pub fn apply_unitary(&mut self, gate: Gate, qubits: &[usize]) {
        match gate {
            Gate::H => self.apply_h(qubits[0]),
            Gate::X => self.apply_x(qubits[0]),
            Gate::Y => self.apply_y(qubits[0]),
            Gate::Z => self.apply_phase(qubits[0], Complex64::new(-1.0, 0.0)),
            Gate::S => self.apply_phase(qubits[0], Complex64::new(0.0, 1.0)),
            Gate::Cnot => self.apply_cnot(qubits[0], qubits[1]),
            Gate::Cz => self.apply_cz(qubits[0], qubits[1]),
            Gate::Swap => self.apply_swap(qubits[0], qubits[1]),
            Gate::Toffoli => self.apply_toffoli(qubits[0], qubits[1], qubits[2]),
            Gate::Fredkin => self.apply_fredkin(qubits[0], qubits[1], qubits[2]),
            Gate::Measure => unreachable!("measurement is not a unitary"),
        }
    }

    // =========================================================================
    // Single-qubit kernels
    // =========================================================================

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for k0 in 0..(1 << self.num_qubits) {
            if k0 & mask == 0 {
                let k1 = k0 | mask;
                let a = self.amplitudes[k0];
                let b = self.amplitudes[k1];
                self.amplitudes[k0] = sqrt2_inv * (a + b);
                self.amplitudes[k1] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for k0 in 0..(1 << self.num_qubits) {
            if k0 & mask == 0 {
                let k1 = k0 | mask;
                self.amplitudes.swap(k0, k1);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for k0 in 0..(1 << self.num_qubits) {
            if k0 & mask == 0 {
                let k1 = k0 | mask;
                let a = self.amplitudes[k0];
                self.amplitudes[k0] = -i_val * self.amplitudes[k1];
                self.amplitudes[k1] = i_val * a;
            }
        }
    }

    /// Multiply the amplitude of every bit-set index by `factor`.
    /// Z is `factor = -1`, S is `factor = i`.
    fn apply_phase(&mut self, qubit: usize, factor: Complex64) {
        let mask = 1 << qubit;
        for k in 0..(1 << self.num_qubits) {
            if k & mask != 0 {
                self.amplitudes[k] *= factor;
            }
        }
    }

    // =========================================================================
    // Multi-qubit kernels
    // =========================================================================

    fn apply_cnot(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for k in 0..(1 << self.num_qubits) {
            if (k & ctrl_mask != 0) && (k & tgt_mask == 0) {
                let j = k | tgt_mask;
                self.amplitudes.swap(k, j);
            }
        }
    }

    fn apply_cz(&mut self, a: usize, b: usize) {
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        for k in 0..(1 << self.num_qubits) {
            if (k & mask_a != 0) && (k & mask_b != 0) {
                self.amplitudes[k] = -self.amplitudes[k];
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        for k in 0..(1 << self.num_qubits) {
            let bit_a = (k & mask_a) != 0;
            let bit_b = (k & mask_b) != 0;
            if bit_a && !bit_b {
                let j = (k & !mask_a) | mask_b;
                self.amplitudes.swap(k, j);
            }
        }
    }

    fn apply_toffoli(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1 << c1;
        let c2_mask = 1 << c2;
        let tgt_mask = 1 << target;
        for k in 0..(1 << self.num_qubits) {
            if (k & c1_mask != 0) && (k & c2_mask != 0) && (k & tgt_mask == 0) {
                let j = k | tgt_mask;
                self.amplitudes.swap(k, j);
            }
        }
    }

    fn apply_fredkin(&mut self, control: usize, a: usize, b: usize) {
        let ctrl_mask = 1 << control;
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        for k in 0..(1 << self.num_qubits) {
            if k & ctrl_mask != 0 {
                let bit_a = (k & mask_a) != 0;
                let bit_b = (k & mask_b) != 0;
                if bit_a && !bit_b {
                    let j = (k & !mask_a) | mask_b;
                    self.amplitudes.swap(k, j);
                }
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// The probability of reading 1 on `qubit`.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Projectively measure `qubit` in the computational basis.
    ///
    /// Draws the outcome from `rng`, zeroes all amplitudes inconsistent with
    /// it, and rescales the survivors so the state stays normalized.
    pub fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> RunResult<bool> {
        let p1 = self.probability_of_one(qubit);
        let u: f64 = rng.gen();
        let outcome = u < p1;

        let p_outcome = if outcome { p1 } else { 1.0 - p1 };
        if p_outcome < DEGENERATE_PROB {
            return Err(RunError::NumericDegenerate {
                qubit,
                outcome: outcome as u8,
                prob: p_outcome,
            });
        }

        let mask = 1 << qubit;
        let scale = 1.0 / p_outcome.sqrt();
        for (k, amp) in self.amplitudes.iter_mut().enumerate() {
            if ((k & mask) != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }

        Ok(outcome)
    }
}
