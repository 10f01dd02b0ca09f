//! Parallel shot scheduler.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use num_complex::Complex64;
use tracing::{debug, instrument};

use qobalt_backend::{Histogram, RunError, RunResult, Runner, registry};
use qobalt_ir::Circuit;

/// Default number of shots when none is requested.
pub const DEFAULT_SHOTS: usize = 1024;

/// Options for constructing a [`Simulator`].
#[derive(Debug, Clone, Default)]
pub struct SimulatorOptions {
    /// Number of shots; 0 means [`DEFAULT_SHOTS`].
    pub shots: usize,
    /// Number of worker threads; 0 means host parallelism. Capped at `shots`.
    pub workers: usize,
    /// Master seed for reproducible runs. Per-shot streams are derived from
    /// this plus the shot index, so results are independent of how shots are
    /// distributed over workers.
    pub seed: Option<u64>,
    /// If set, [`Simulator::execute`] computes the state vector instead of
    /// sampling.
    pub state_vector: bool,
}

/// Where worker runners come from.
enum RunnerSource {
    /// One shared instance; runners hold no per-shot state.
    Shared(Arc<dyn Runner>),
    /// A registry name; each worker gets a fresh instance.
    Named(String),
}

/// The result of [`Simulator::execute`].
#[derive(Debug, Clone)]
pub enum Execution {
    /// Shot-sampling outcome histogram.
    Histogram(Histogram),
    /// Final state vector amplitudes.
    Statevector(Vec<Complex64>),
}

/// Executes an immutable circuit for a number of shots on a worker pool.
///
/// Workers pull shot indices from a shared counter, so uneven per-shot cost
/// never starves a worker. Each worker accumulates a local histogram; locals
/// are merged after all workers finish. A single failed shot aborts the run:
/// the first error is returned, remaining workers stop between shots, and no
/// partial histogram is ever surfaced.
pub struct Simulator {
    shots: usize,
    workers: usize,
    seed: Option<u64>,
    state_vector: bool,
    source: RunnerSource,
}

impl Simulator {
    /// Create a simulator driving the given runner instance.
    ///
    /// The instance is shared across workers; runners are stateless between
    /// shots by contract.
    pub fn new(runner: Arc<dyn Runner>, options: SimulatorOptions) -> Self {
        Self::with_source(RunnerSource::Shared(runner), options)
    }

    /// Create a simulator using a named runner from the process-wide
    /// registry. Each worker receives a fresh instance.
    ///
    /// The built-in state-vector engine is registered before lookup, so
    /// `"statevector"` always resolves.
    pub fn with_runner_name(
        name: impl Into<String>,
        options: SimulatorOptions,
    ) -> RunResult<Self> {
        qobalt_engine::register();
        let name = name.into();
        if !registry::has_runner(&name) {
            return Err(RunError::UnknownRunner(name));
        }
        Ok(Self::with_source(RunnerSource::Named(name), options))
    }

    /// Create a simulator with default options for a named runner.
    pub fn with_defaults(name: impl Into<String>) -> RunResult<Self> {
        Self::with_runner_name(name, SimulatorOptions::default())
    }

    fn with_source(source: RunnerSource, options: SimulatorOptions) -> Self {
        let shots = if options.shots == 0 {
            DEFAULT_SHOTS
        } else {
            options.shots
        };
        let workers = if options.workers == 0 {
            thread::available_parallelism().map_or(1, usize::from)
        } else {
            options.workers
        };

        Self {
            shots,
            // No point starting more workers than shots.
            workers: workers.min(shots),
            seed: options.seed,
            state_vector: options.state_vector,
            source,
        }
    }

    /// Get the number of shots per run.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Get the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the circuit and aggregate outcomes into a histogram.
    #[instrument(skip(self, circuit))]
    pub fn run(&self, circuit: &Circuit) -> RunResult<Histogram> {
        self.run_inner(circuit, None)
    }

    /// Like [`Simulator::run`], but also stops when `cancel` becomes true.
    ///
    /// Cancellation is cooperative: in-flight shots finish, no new shots
    /// start, and the run reports [`RunError::Cancelled`].
    pub fn run_cancellable(
        &self,
        circuit: &Circuit,
        cancel: &AtomicBool,
    ) -> RunResult<Histogram> {
        self.run_inner(circuit, Some(cancel))
    }

    /// Compute the final state vector of the circuit.
    ///
    /// Delegates to the runner's optional capability; runners without it
    /// report [`RunError::Unsupported`].
    pub fn statevector(&self, circuit: &Circuit) -> RunResult<Vec<Complex64>> {
        match &self.source {
            RunnerSource::Shared(runner) => runner.statevector(circuit),
            RunnerSource::Named(name) => registry::create_runner(name)?.statevector(circuit),
        }
    }

    /// Run the circuit according to the `state_vector` option: a sampling
    /// run by default, a state-vector computation when the option is set.
    pub fn execute(&self, circuit: &Circuit) -> RunResult<Execution> {
        if self.state_vector {
            Ok(Execution::Statevector(self.statevector(circuit)?))
        } else {
            Ok(Execution::Histogram(self.run(circuit)?))
        }
    }

    fn run_inner(
        &self,
        circuit: &Circuit,
        cancel: Option<&AtomicBool>,
    ) -> RunResult<Histogram> {
        debug!(
            shots = self.shots,
            workers = self.workers,
            qubits = circuit.num_qubits(),
            "starting run"
        );

        // Named sources get a fresh runner per worker; failures surface
        // before any thread starts.
        let mut runners: Vec<Arc<dyn Runner>> = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            runners.push(match &self.source {
                RunnerSource::Shared(runner) => Arc::clone(runner),
                RunnerSource::Named(name) => Arc::from(registry::create_runner(name)?),
            });
        }

        let next_shot = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let first_error: Mutex<Option<RunError>> = Mutex::new(None);

        let locals: Vec<Histogram> = thread::scope(|scope| {
            let handles: Vec<_> = runners
                .into_iter()
                .map(|runner| {
                    let next_shot = &next_shot;
                    let stop = &stop;
                    let first_error = &first_error;
                    scope.spawn(move || {
                        let mut local = Histogram::new();
                        loop {
                            // Cancellation is checked between shots only.
                            if stop.load(Ordering::Relaxed)
                                || cancel.is_some_and(|c| c.load(Ordering::Relaxed))
                            {
                                break;
                            }
                            let shot = next_shot.fetch_add(1, Ordering::Relaxed);
                            if shot >= self.shots {
                                break;
                            }

                            let seed = self.seed.map(|master| shot_seed(master, shot as u64));
                            match runner.run_once(circuit, seed) {
                                Ok(outcome) => local.record(outcome),
                                Err(err) => {
                                    let mut slot = first_error
                                        .lock()
                                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                                    if slot.is_none() {
                                        *slot = Some(err);
                                    }
                                    stop.store(true, Ordering::Relaxed);
                                    break;
                                }
                            }
                        }
                        local
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .map_err(|_| RunError::Internal("shot worker panicked".into()))
                })
                .collect::<RunResult<Vec<_>>>()
        })?;

        if let Some(err) = first_error
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
        {
            return Err(err);
        }

        let mut histogram = Histogram::new();
        for local in locals {
            histogram.merge(local);
        }

        if histogram.total() < self.shots as u64 {
            // Only possible through external cancellation; partial results
            // are discarded.
            return Err(RunError::Cancelled);
        }

        debug!(
            total = histogram.total(),
            outcomes = histogram.len(),
            "run complete"
        );
        Ok(histogram)
    }
}

/// Derive the independent per-shot stream seed from the master seed and the
/// shot index (SplitMix64 finalizer). Depends only on the shot index, never
/// on worker scheduling.
fn shot_seed(master: u64, shot: u64) -> u64 {
    let mut z = master.wrapping_add(shot).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
