//! Qobalt state-vector engine.
//!
//! The primary backend of the simulator: a dense amplitude array of `2^Q`
//! complex numbers with in-place gate kernels and projective measurement.
//! State indices are little-endian in qubit index (bit `i` of the index is
//! qubit `i`); outcome strings are classical-bit-0 first. Both conventions
//! are observable and deliberately distinct.
//!
//! The engine registers itself in the process-wide runner registry under the
//! name `"statevector"`:
//!
//! ```rust
//! use qobalt_backend::{Runner, registry};
//!
//! qobalt_engine::register();
//! let runner = registry::create_runner("statevector").unwrap();
//!
//! let circuit = qobalt_ir::CircuitBuilder::bell().unwrap();
//! let outcome = runner.run_once(&circuit, Some(1)).unwrap();
//! assert!(outcome == "00" || outcome == "11");
//! ```

pub mod runner;
pub mod statevector;

pub use runner::{RUNNER_NAME, StatevectorRunner};
pub use statevector::Statevector;

use std::sync::Once;

use qobalt_backend::registry;
use qobalt_backend::runner::RunnerFactory;

/// Install the state-vector runner into the process-wide registry.
///
/// Idempotent; safe to call from multiple entry points.
pub fn register() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        registry::register_runner(RUNNER_NAME, |config| {
            let runner = StatevectorRunner::from_config(config)?;
            Ok(Box::new(runner))
        });
    });
}
