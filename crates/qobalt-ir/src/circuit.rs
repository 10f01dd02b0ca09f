//! Frozen circuit with layout.
//!
//! Freezing a [`CircuitDag`] runs the layout pass: every operation gets a
//! `time_step` (its earliest schedule slot consistent with dependencies) and
//! a `line` (its topmost render line), and the operation list is sorted by
//! `(time_step, line)`. The result is immutable and may be shared freely
//! across shots and threads.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dag::CircuitDag;
use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// An operation with layout coordinates, as surfaced to backends and
/// renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate kind.
    pub gate: Gate,
    /// Quantum operands, positional (controls before targets).
    pub qubits: Vec<QubitId>,
    /// Classical operand; `Some` exactly for measurements.
    pub clbit: Option<ClbitId>,
    /// Schedule column, starting at 0.
    pub time_step: u32,
    /// Render line: the minimum quantum operand index.
    pub line: u32,
}

impl Operation {
    /// Check if this operation is a measurement.
    #[inline]
    pub fn is_measure(&self) -> bool {
        self.gate.is_measurement()
    }

    /// The classical bit index, or `-1` when the operation has none.
    ///
    /// Convenience for consumers that use the classic sentinel convention.
    pub fn clbit_or_neg1(&self) -> i64 {
        self.clbit.map_or(-1, |c| i64::from(c.0))
    }
}

/// An immutable, laid-out quantum circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    ops: Vec<Operation>,
    max_step: i32,
}

impl Circuit {
    /// Freeze a DAG into a circuit, computing the layout.
    ///
    /// `time_step` is one greater than the latest-finishing parent (roots get
    /// 0) and `line` is the minimum operand index; the operation list is then
    /// stable-sorted by `(time_step, line)`. The pass is pure and
    /// deterministic for a given append sequence.
    pub fn from_dag(dag: &CircuitDag) -> Self {
        let mut ops = Vec::with_capacity(dag.num_ops());
        let mut node_step: FxHashMap<_, u32> = FxHashMap::default();
        let mut max_step: i32 = -1;

        for (node, op) in dag.topological_ops() {
            let parent_step = dag
                .op_parents(node)
                .filter_map(|p| node_step.get(&p).copied())
                .max();
            let step = parent_step.map_or(0, |s| s + 1);
            node_step.insert(node, step);
            max_step = max_step.max(step as i32);

            let line = op
                .qubits
                .iter()
                .map(|q| q.0)
                .min()
                .expect("operation with no quantum operands");

            ops.push(Operation {
                gate: op.gate,
                qubits: op.qubits.clone(),
                clbit: op.clbit,
                time_step: step,
                line,
            });
        }

        ops.sort_by_key(|op| (op.time_step, op.line));

        Self {
            num_qubits: dag.num_qubits(),
            num_clbits: dag.num_clbits(),
            ops,
            max_step,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Get the operations sorted by `(time_step, line)`.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// The highest time step, `-1` for an empty circuit.
    pub fn max_step(&self) -> i32 {
        self.max_step
    }

    /// The number of schedule layers, `max_step + 1`.
    pub fn depth(&self) -> usize {
        (self.max_step + 1) as usize
    }

    /// Check whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.ops.iter().any(Operation::is_measure)
    }
}
