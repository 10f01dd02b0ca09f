//! Scheduler behavior: determinism, failure policy, cancellation, and
//! histogram shape.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use qobalt_ir::{Circuit, CircuitBuilder};
use qobalt_sim::{Execution, RunError, RunResult, Runner, Simulator, SimulatorOptions};

fn bell() -> Circuit {
    CircuitBuilder::bell().unwrap()
}

fn simulator(shots: usize, workers: usize, seed: Option<u64>) -> Simulator {
    Simulator::with_runner_name(
        "statevector",
        SimulatorOptions {
            shots,
            workers,
            seed,
            ..Default::default()
        },
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Histogram shape
// ---------------------------------------------------------------------------

#[test]
fn histogram_totals_and_keys_are_well_formed() {
    let circuit = bell();
    let hist = simulator(777, 0, Some(3)).run(&circuit).unwrap();

    assert_eq!(hist.total(), 777);
    for (outcome, count) in hist.iter() {
        assert_eq!(outcome.len(), circuit.num_clbits());
        assert!(outcome.chars().all(|c| c == '0' || c == '1'));
        assert!(count > 0);
    }
}

// ---------------------------------------------------------------------------
// Seed determinism
// ---------------------------------------------------------------------------

#[test]
fn fixed_seed_reproduces_histogram() {
    let circuit = bell();
    let a = simulator(512, 4, Some(11)).run(&circuit).unwrap();
    let b = simulator(512, 4, Some(11)).run(&circuit).unwrap();
    assert_eq!(a, b);
}

#[test]
fn histogram_is_independent_of_worker_count() {
    let circuit = bell();
    let single = simulator(512, 1, Some(11)).run(&circuit).unwrap();
    for workers in [2, 3, 8] {
        let parallel = simulator(512, workers, Some(11)).run(&circuit).unwrap();
        assert_eq!(single, parallel, "diverged at {workers} workers");
    }
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

/// Fails once a given number of shots have run; every other shot returns "0".
struct FailingRunner {
    calls: AtomicUsize,
    fail_at: usize,
}

impl Runner for FailingRunner {
    fn name(&self) -> &str {
        "failing"
    }

    fn run_once(&self, _circuit: &Circuit, _seed: Option<u64>) -> RunResult<String> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        if call == self.fail_at {
            Err(RunError::Internal("injected failure".into()))
        } else {
            Ok("0".into())
        }
    }
}

#[test]
fn first_shot_error_aborts_the_run() {
    let runner = Arc::new(FailingRunner {
        calls: AtomicUsize::new(0),
        fail_at: 10,
    });
    let sim = Simulator::new(
        runner.clone(),
        SimulatorOptions {
            shots: 10_000,
            workers: 4,
            ..Default::default()
        },
    );

    let result = sim.run(&bell());
    assert!(matches!(result, Err(RunError::Internal(_))));

    // Workers stop between shots: nowhere near all shots ran.
    assert!(runner.calls.load(Ordering::Relaxed) < 10_000);
}

#[test]
fn engine_error_propagates_verbatim() {
    // Zero-qubit circuit: the engine rejects it on the first shot and the
    // scheduler must surface exactly that error, not a partial histogram.
    let circuit = CircuitBuilder::new(0, 0).build();
    let result = simulator(128, 2, None).run(&circuit);
    assert!(matches!(result, Err(RunError::EmptyCircuit)));
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[test]
fn pre_cancelled_run_reports_cancelled() {
    let cancel = AtomicBool::new(true);
    let result = simulator(1024, 2, Some(5)).run_cancellable(&bell(), &cancel);
    assert!(matches!(result, Err(RunError::Cancelled)));
}

#[test]
fn unset_cancel_flag_changes_nothing() {
    let cancel = AtomicBool::new(false);
    let hist = simulator(64, 2, Some(5))
        .run_cancellable(&bell(), &cancel)
        .unwrap();
    assert_eq!(hist.total(), 64);
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A runner without state-vector support.
struct SamplingOnlyRunner;

impl Runner for SamplingOnlyRunner {
    fn name(&self) -> &str {
        "sampling-only"
    }

    fn run_once(&self, circuit: &Circuit, _seed: Option<u64>) -> RunResult<String> {
        Ok("0".repeat(circuit.num_clbits()))
    }
}

#[test]
fn statevector_on_unsupporting_runner_fails() {
    let sim = Simulator::new(Arc::new(SamplingOnlyRunner), SimulatorOptions::default());
    let result = sim.statevector(&bell());
    assert!(matches!(result, Err(RunError::Unsupported(_))));
}

#[test]
fn execute_dispatches_on_state_vector_option() {
    let circuit = bell();

    let sampling = Simulator::with_runner_name(
        "statevector",
        SimulatorOptions {
            shots: 32,
            seed: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(matches!(
        sampling.execute(&circuit).unwrap(),
        Execution::Histogram(_)
    ));

    let exact = Simulator::with_runner_name(
        "statevector",
        SimulatorOptions {
            state_vector: true,
            ..Default::default()
        },
    )
    .unwrap();
    match exact.execute(&circuit).unwrap() {
        Execution::Statevector(amps) => assert_eq!(amps.len(), 4),
        Execution::Histogram(_) => panic!("expected a state vector"),
    }
}

// ---------------------------------------------------------------------------
// Registry integration
// ---------------------------------------------------------------------------

#[test]
fn named_construction_uses_engine_config_defaults() {
    // The built-in engine registers lazily on first named construction.
    let sim = Simulator::with_defaults("statevector").unwrap();
    let hist = sim.run(&bell()).unwrap();
    assert_eq!(hist.total(), qobalt_sim::DEFAULT_SHOTS as u64);
}

#[test]
fn custom_runner_registration_roundtrip() {
    qobalt_backend::registry::register_runner("always-zero", |_config| {
        Ok(Box::new(SamplingOnlyRunner))
    });

    let sim = Simulator::with_runner_name(
        "always-zero",
        SimulatorOptions {
            shots: 16,
            ..Default::default()
        },
    )
    .unwrap();
    let hist = sim.run(&bell()).unwrap();
    assert_eq!(hist.get("00"), 16);
}
