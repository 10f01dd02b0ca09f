//! Backend error types.
//!
//! Construction-time failures (`UnknownRunner`) fail fast and locally;
//! everything else surfaces from `run`/`statevector`. The scheduler returns
//! the first shot error verbatim and never returns a partial histogram.

use thiserror::Error;

/// Errors that can occur while executing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// A backend was asked to execute a circuit with zero qubits.
    #[error("Circuit has no qubits")]
    EmptyCircuit,

    /// Circuit exceeds the backend's qubit capacity.
    #[error("Circuit has {got} qubits but the runner supports at most {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        got: usize,
        /// Maximum the runner supports.
        max: u32,
    },

    /// Runner cannot fulfil an optional capability.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// No runner registered under the requested name.
    #[error("No runner registered with name '{0}'")]
    UnknownRunner(String),

    /// Measurement probability of the chosen branch underflowed to
    /// effectively zero.
    #[error("Measurement branch {outcome} on qubit {qubit} has vanishing probability {prob:e}")]
    NumericDegenerate {
        /// The measured qubit index.
        qubit: usize,
        /// The chosen outcome bit.
        outcome: u8,
        /// The underflowed probability.
        prob: f64,
    },

    /// Runner-specific failure.
    #[error("Runner error: {0}")]
    Internal(String),

    /// The run was aborted before all shots completed.
    #[error("Run cancelled")]
    Cancelled,
}

/// Result type for backend operations.
pub type RunResult<T> = Result<T, RunError>;
