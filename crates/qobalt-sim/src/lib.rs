//! Qobalt shot scheduler.
//!
//! Executes an immutable circuit for a number of shots on a pool of OS
//! threads and aggregates the outcome strings into a [`Histogram`]. Each
//! shot is computed synchronously inside one worker; the frozen circuit is
//! the only shared state and workers pull shot indices from an atomic
//! counter, so no lock is held while a shot runs.
//!
//! # Example: Bell state
//!
//! ```rust
//! use qobalt_ir::CircuitBuilder;
//! use qobalt_sim::{Simulator, SimulatorOptions};
//!
//! let circuit = CircuitBuilder::bell().unwrap();
//!
//! let sim = Simulator::with_runner_name(
//!     "statevector",
//!     SimulatorOptions {
//!         shots: 256,
//!         seed: Some(7),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! let histogram = sim.run(&circuit).unwrap();
//! assert_eq!(histogram.total(), 256);
//! assert_eq!(histogram.get("00") + histogram.get("11"), 256);
//! ```
//!
//! With a master seed the run is reproducible: per-shot streams are derived
//! from the seed and the shot index, so the histogram does not depend on the
//! worker count or on scheduling.

pub mod simulator;

pub use qobalt_backend::{Histogram, RunError, RunResult, Runner};
pub use simulator::{DEFAULT_SHOTS, Execution, Simulator, SimulatorOptions};
