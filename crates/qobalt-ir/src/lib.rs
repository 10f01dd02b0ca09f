//! Qobalt circuit intermediate representation.
//!
//! This crate provides the core data structures for representing quantum
//! circuits: the gate catalog, the dependency DAG built while a circuit is
//! under construction, and the frozen, laid-out [`Circuit`] handed to
//! backends.
//!
//! # Overview
//!
//! A circuit is built through [`CircuitBuilder`], which appends operations to
//! a [`CircuitDag`]. The DAG records only last-writer dependencies: for each
//! bit an operation touches, an edge runs from the previous operation on that
//! bit. Gates that share no bit are unordered and commute in the schedule.
//!
//! Freezing the DAG runs the layout pass, which assigns every operation a
//! `time_step` (earliest slot consistent with its dependencies) and a `line`
//! (minimum operand index), and sorts operations by `(time_step, line)`. The
//! frozen [`Circuit`] is immutable and can be shared across threads.
//!
//! # Example: Building a Bell state
//!
//! ```rust
//! use qobalt_ir::CircuitBuilder;
//!
//! let mut builder = CircuitBuilder::new(2, 2);
//! builder.h(0u32).unwrap();
//! builder.cnot(0u32, 1u32).unwrap();
//! builder.measure(0u32, 0u32).unwrap();
//! builder.measure(1u32, 1u32).unwrap();
//!
//! let circuit = builder.build();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3); // H, CNOT, parallel measures
//! ```
//!
//! # Supported gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S` | 1 | Phase gate (sqrt(Z)) |
//! | `CNOT` | 2 | Controlled-NOT |
//! | `CZ` | 2 | Controlled-Z |
//! | `SWAP` | 2 | SWAP gate |
//! | `TOFFOLI` | 3 | Doubly-controlled NOT |
//! | `FREDKIN` | 3 | Controlled SWAP |
//! | `MEASURE` | 1 | Computational-basis measurement |
//!
//! Measurements are terminal: appending any operation on an already-measured
//! qubit is rejected at build time.

pub mod builder;
pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod op;
pub mod qubit;

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, Operation};
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use op::Op;
pub use qubit::{ClbitId, QubitId};
