//! Quantum gate catalog.
//!
//! The catalog is a closed set: every gate the pipeline understands is a
//! variant of [`Gate`], and the builder, DAG, and backends all reference
//! gates by this type. There are no parametric angles and no user-defined
//! unitaries.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

/// A gate kind from the closed catalog.
///
/// Operand roles are positional: controls precede targets. The two swap
/// targets of [`Gate::Swap`] and [`Gate::Fredkin`] are semantically
/// order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate: `(1/√2)·[[1, 1], [1, -1]]`.
    H,
    /// Pauli-X gate: `[[0, 1], [1, 0]]`.
    X,
    /// Pauli-Y gate: `[[0, -i], [i, 0]]`.
    Y,
    /// Pauli-Z gate: `[[1, 0], [0, -1]]`.
    Z,
    /// S gate (sqrt(Z)): `[[1, 0], [0, i]]`.
    S,
    /// Controlled-NOT: flips the target iff the control is 1.
    Cnot,
    /// Controlled-Z: negates the amplitude iff both qubits are 1.
    Cz,
    /// SWAP: exchanges the basis labels of its two qubits.
    Swap,
    /// Toffoli (CCX): flips the target iff both controls are 1.
    Toffoli,
    /// Fredkin (CSWAP): swaps the two targets iff the control is 1.
    Fredkin,
    /// Projective computational-basis measurement into a classical bit.
    Measure,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Cnot => "cnot",
            Gate::Cz => "cz",
            Gate::Swap => "swap",
            Gate::Toffoli => "toffoli",
            Gate::Fredkin => "fredkin",
            Gate::Measure => "measure",
        }
    }

    /// Get the number of quantum operands this gate takes.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            Gate::H | Gate::X | Gate::Y | Gate::Z | Gate::S | Gate::Measure => 1,
            Gate::Cnot | Gate::Cz | Gate::Swap => 2,
            Gate::Toffoli | Gate::Fredkin => 3,
        }
    }

    /// Check if this is the measurement operation.
    #[inline]
    pub fn is_measurement(self) -> bool {
        matches!(self, Gate::Measure)
    }

    /// Check if this gate consumes a classical bit operand.
    ///
    /// Only measurement writes to the classical register.
    #[inline]
    pub fn uses_clbit(self) -> bool {
        self.is_measurement()
    }

    /// The 2×2 unitary of a single-qubit gate, row-major over the standard
    /// basis. `None` for multi-qubit gates and measurement; the engine uses
    /// specialized kernels for those, so no larger matrices are materialized.
    pub fn unitary(self) -> Option<[[Complex64; 2]; 2]> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);

        match self {
            Gate::H => Some([[h, h], [h, -h]]),
            Gate::X => Some([[zero, one], [one, zero]]),
            Gate::Y => Some([[zero, -i], [i, zero]]),
            Gate::Z => Some([[one, zero], [zero, -one]]),
            Gate::S => Some([[one, zero], [zero, i]]),
            _ => None,
        }
    }

    /// All catalog gates, in declaration order.
    pub fn all() -> &'static [Gate] {
        &[
            Gate::H,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::S,
            Gate::Cnot,
            Gate::Cz,
            Gate::Swap,
            Gate::Toffoli,
            Gate::Fredkin,
            Gate::Measure,
        ]
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
