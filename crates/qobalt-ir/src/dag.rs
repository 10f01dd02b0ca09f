//! DAG-based circuit representation.
//!
//! The only dependency source is the last-writer rule: for each bit a new
//! operation touches, an edge runs from the most recent operation on that bit
//! to the new one. Operations that share no bit are unordered and may be
//! scheduled into the same time step by the layout pass.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::op::Op;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input boundary node for a wire.
    In(WireId),
    /// Output boundary node for a wire.
    Out(WireId),
    /// Operation node.
    Op(Op),
}

impl DagNode {
    /// Check if this is an operation node.
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the operation if this is an operation node.
    pub fn op(&self) -> Option<&Op> {
        match self {
            DagNode::Op(op) => Some(op),
            _ => None,
        }
    }
}

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// An edge in the circuit DAG representing a wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// Mutable circuit DAG.
///
/// Each wire (qubit or classical bit) has an In and an Out boundary node
/// connected by exactly one path; appending an operation splices its node
/// into every wire it touches. Edges only ever run from older nodes to the
/// newly appended one, so cycles are structurally impossible and insertion
/// order is a topological order.
pub struct CircuitDag {
    /// The underlying graph.
    graph: DiGraph<DagNode, DagEdge, u32>,
    /// Map from qubit to its input boundary node.
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from qubit to its output boundary node.
    qubit_outputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from classical bit to its input boundary node.
    clbit_inputs: FxHashMap<ClbitId, NodeIndex>,
    /// Map from classical bit to its output boundary node.
    clbit_outputs: FxHashMap<ClbitId, NodeIndex>,
    /// Qubits that have been consumed by a measurement.
    measured: FxHashSet<QubitId>,
    /// Operation nodes in insertion order.
    op_order: Vec<NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::default(),
            qubit_inputs: FxHashMap::default(),
            qubit_outputs: FxHashMap::default(),
            clbit_inputs: FxHashMap::default(),
            clbit_outputs: FxHashMap::default(),
            measured: FxHashSet::default(),
            op_order: Vec::new(),
        }
    }

    /// Create a DAG with `num_qubits` quantum and `num_clbits` classical wires.
    pub fn with_size(num_qubits: u32, num_clbits: u32) -> Self {
        let mut dag = Self::new();
        for q in 0..num_qubits {
            dag.add_qubit(QubitId(q));
        }
        for c in 0..num_clbits {
            dag.add_clbit(ClbitId(c));
        }
        dag
    }

    /// Add a qubit wire to the circuit.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.qubit_inputs.contains_key(&qubit) {
            return;
        }
        let wire = WireId::Qubit(qubit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.qubit_inputs.insert(qubit, in_node);
        self.qubit_outputs.insert(qubit, out_node);
    }

    /// Add a classical bit wire to the circuit.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.clbit_inputs.contains_key(&clbit) {
            return;
        }
        let wire = WireId::Clbit(clbit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.clbit_inputs.insert(clbit, in_node);
        self.clbit_outputs.insert(clbit, out_node);
    }

    /// Append an operation to the circuit.
    ///
    /// Validates the operation against the gate catalog and the current DAG
    /// state, then splices it into every wire it touches (last-writer rule).
    pub fn apply(&mut self, op: Op) -> IrResult<NodeIndex> {
        self.validate(&op)?;

        if op.is_measure() {
            self.measured.insert(op.qubits[0]);
        }

        let qubits = op.qubits.clone();
        let clbit = op.clbit;
        let op_node = self.graph.add_node(DagNode::Op(op));

        for &qubit in &qubits {
            let out_node = self.qubit_outputs[&qubit];
            self.splice(op_node, out_node, WireId::Qubit(qubit));
        }
        if let Some(clbit) = clbit {
            let out_node = self.clbit_outputs[&clbit];
            self.splice(op_node, out_node, WireId::Clbit(clbit));
        }

        self.op_order.push(op_node);
        Ok(op_node)
    }

    /// Check an operation against arity, range, duplication, classical bit
    /// pairing, and the terminal-measurement rule.
    fn validate(&self, op: &Op) -> IrResult<()> {
        let gate_name = op.gate.name();

        let expected = op.gate.num_qubits();
        let got = op.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            });
        }

        for &qubit in &op.qubits {
            if !self.qubit_inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate_name),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &op.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name),
                });
            }
        }

        match (op.gate.uses_clbit(), op.clbit) {
            (true, None) => return Err(IrError::MissingClbit),
            (false, Some(_)) => return Err(IrError::UnexpectedClbit(gate_name)),
            (true, Some(clbit)) => {
                if !self.clbit_inputs.contains_key(&clbit) {
                    return Err(IrError::ClbitNotFound {
                        clbit,
                        gate_name: Some(gate_name),
                    });
                }
            }
            (false, None) => {}
        }

        // Measurements are terminal: nothing may touch a measured qubit.
        for &qubit in &op.qubits {
            if self.measured.contains(&qubit) {
                return Err(IrError::MeasuredQubit {
                    qubit,
                    gate_name: Some(gate_name),
                });
            }
        }

        Ok(())
    }

    /// Splice `op_node` into the wire terminating at `out_node`: the edge
    /// from the wire's last writer to the output boundary is replaced by
    /// last-writer → op → output.
    fn splice(&mut self, op_node: NodeIndex, out_node: NodeIndex, wire: WireId) {
        let incoming: Option<_> = self
            .graph
            .edges_directed(out_node, Direction::Incoming)
            .find(|e| e.weight().wire == wire)
            .map(|e| (e.source(), e.id()));

        debug_assert!(incoming.is_some(), "wire has no path to its output node");

        if let Some((prev_node, edge_id)) = incoming {
            self.graph.remove_edge(edge_id);
            self.graph.add_edge(prev_node, op_node, DagEdge { wire });
            self.graph.add_edge(op_node, out_node, DagEdge { wire });
        }
    }

    /// Iterate over operations in the canonical topological order.
    ///
    /// The canonical order is insertion order: every edge runs from an older
    /// node to a newer one, so it respects all dependencies and makes the
    /// layout pass deterministic for a given append sequence.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Op)> {
        self.op_order.iter().filter_map(|&idx| {
            self.graph
                .node_weight(idx)
                .and_then(DagNode::op)
                .map(|op| (idx, op))
        })
    }

    /// Operation-node parents of a node (input boundary nodes are skipped).
    pub fn op_parents(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.source())
            .filter(|&src| self.graph[src].is_op())
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubit_inputs.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbit_inputs.len()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.op_order.len()
    }

    /// Check whether `qubit` has been measured.
    pub fn is_measured(&self, qubit: QubitId) -> bool {
        self.measured.contains(&qubit)
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }
}

impl Default for CircuitDag {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CircuitDag {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            qubit_inputs: self.qubit_inputs.clone(),
            qubit_outputs: self.qubit_outputs.clone(),
            clbit_inputs: self.clbit_inputs.clone(),
            clbit_outputs: self.clbit_outputs.clone(),
            measured: self.measured.clone(),
            op_order: self.op_order.clone(),
        }
    }
}
