//! Circuit operations combining a gate with its operands.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// A single operation appended to the circuit DAG: a gate kind, its quantum
/// operands in positional order (controls before targets), and the classical
/// bit written by a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Op {
    /// The gate kind.
    pub gate: Gate,
    /// Quantum operands, positional.
    pub qubits: Vec<QubitId>,
    /// Classical operand; `Some` exactly when the gate is a measurement.
    pub clbit: Option<ClbitId>,
}

impl Op {
    /// Create a unitary gate operation.
    pub fn gate(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
            clbit: None,
        }
    }

    /// Create a single-qubit gate operation.
    pub fn single(gate: Gate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate operation.
    pub fn two(gate: Gate, a: QubitId, b: QubitId) -> Self {
        Self::gate(gate, [a, b])
    }

    /// Create a measurement of `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            gate: Gate::Measure,
            qubits: vec![qubit],
            clbit: Some(clbit),
        }
    }

    /// Check if this operation is a measurement.
    #[inline]
    pub fn is_measure(&self) -> bool {
        self.gate.is_measurement()
    }

    /// Get the name of the underlying gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }
}
