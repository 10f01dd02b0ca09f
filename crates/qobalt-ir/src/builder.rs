//! Fluent circuit builder.

use crate::circuit::Circuit;
use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::gate::Gate;
use crate::op::Op;
use crate::qubit::{ClbitId, QubitId};

/// A mutable circuit under construction.
///
/// Provides one chainable method per catalog gate; each append is validated
/// immediately, so malformed operations fail at the offending call. Freezing
/// with [`CircuitBuilder::build`] produces an immutable [`Circuit`] with
/// layout information.
pub struct CircuitBuilder {
    num_qubits: u32,
    num_clbits: u32,
    dag: CircuitDag,
}

impl CircuitBuilder {
    /// Create a builder for a circuit with `num_qubits` qubits and
    /// `num_clbits` classical bits.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            num_qubits,
            num_clbits,
            dag: CircuitDag::with_size(num_qubits, num_clbits),
        }
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::single(Gate::H, qubit.into()))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::single(Gate::X, qubit.into()))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::single(Gate::Y, qubit.into()))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::single(Gate::Z, qubit.into()))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::single(Gate::S, qubit.into()))?;
        Ok(self)
    }

    /// Apply CNOT gate.
    pub fn cnot(
        &mut self,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag
            .apply(Op::two(Gate::Cnot, control.into(), target.into()))?;
        Ok(self)
    }

    /// Apply controlled-Z gate.
    pub fn cz(&mut self, a: impl Into<QubitId>, b: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::two(Gate::Cz, a.into(), b.into()))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, a: impl Into<QubitId>, b: impl Into<QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Op::two(Gate::Swap, a.into(), b.into()))?;
        Ok(self)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn toffoli(
        &mut self,
        c1: impl Into<QubitId>,
        c2: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag
            .apply(Op::gate(Gate::Toffoli, [c1.into(), c2.into(), target.into()]))?;
        Ok(self)
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn fredkin(
        &mut self,
        control: impl Into<QubitId>,
        a: impl Into<QubitId>,
        b: impl Into<QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag
            .apply(Op::gate(Gate::Fredkin, [control.into(), a.into(), b.into()]))?;
        Ok(self)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(
        &mut self,
        qubit: impl Into<QubitId>,
        clbit: impl Into<ClbitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Op::measure(qubit.into(), clbit.into()))?;
        Ok(self)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Freeze into an immutable, laid-out circuit.
    pub fn build(&self) -> Circuit {
        Circuit::from_dag(&self.dag)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// The |Φ⁺⟩ Bell state with both qubits measured.
    pub fn bell() -> IrResult<Circuit> {
        let mut b = Self::new(2, 2);
        b.h(0u32)?
            .cnot(0u32, 1u32)?
            .measure(0u32, 0u32)?
            .measure(1u32, 1u32)?;
        Ok(b.build())
    }

    /// An `n`-qubit GHZ state with every qubit measured.
    pub fn ghz(n: u32) -> IrResult<Circuit> {
        let mut b = Self::new(n, n);
        if n == 0 {
            return Ok(b.build());
        }
        b.h(0u32)?;
        for i in 0..n - 1 {
            b.cnot(i, i + 1)?;
        }
        for i in 0..n {
            b.measure(i, i)?;
        }
        Ok(b.build())
    }
}
