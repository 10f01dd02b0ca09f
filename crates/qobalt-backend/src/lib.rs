//! Qobalt backend abstraction.
//!
//! This crate defines the seam between circuits and the engines that execute
//! them:
//!
//! - The [`Runner`] trait — "run one shot" plus the optional "return the
//!   final state vector" capability
//! - [`RunnerConfig`] and [`RunnerFactory`] for constructing runners
//! - The [`RunnerRegistry`] and the process-wide name → factory mapping
//! - [`Histogram`] for aggregated measurement outcomes
//! - The [`RunError`] taxonomy shared by runners and the shot scheduler
//!
//! # Implementing a runner
//!
//! ```rust
//! use qobalt_backend::{RunResult, Runner};
//! use qobalt_ir::Circuit;
//!
//! struct ZeroRunner;
//!
//! impl Runner for ZeroRunner {
//!     fn name(&self) -> &str {
//!         "zero"
//!     }
//!
//!     // Pretends every measurement came out 0.
//!     fn run_once(&self, circuit: &Circuit, _seed: Option<u64>) -> RunResult<String> {
//!         Ok("0".repeat(circuit.num_clbits()))
//!     }
//! }
//! ```
//!
//! Providers install themselves into the process-wide registry at startup:
//!
//! ```rust
//! use qobalt_backend::{Runner, registry};
//!
//! # struct ZeroRunner;
//! # impl qobalt_backend::Runner for ZeroRunner {
//! #     fn name(&self) -> &str { "zero" }
//! #     fn run_once(&self, c: &qobalt_ir::Circuit, _s: Option<u64>) -> qobalt_backend::RunResult<String> {
//! #         Ok("0".repeat(c.num_clbits()))
//! #     }
//! # }
//! registry::register_runner("zero", |_config| Ok(Box::new(ZeroRunner)));
//! let runner = registry::create_runner("zero").unwrap();
//! assert_eq!(runner.name(), "zero");
//! ```

pub mod error;
pub mod histogram;
pub mod registry;
pub mod runner;

pub use error::{RunError, RunResult};
pub use histogram::Histogram;
pub use registry::RunnerRegistry;
pub use runner::{Runner, RunnerConfig, RunnerFactory};
