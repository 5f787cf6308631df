//! Check runner: executes registered checks and isolates their failures.
//!
//! One misbehaving check must never abort the gate or disturb the scores of
//! other checks. An `Err` returned from `run`, or a panic unwinding out of it,
//! is turned into a zero-score result carrying a single `"Check crashed: ..."`
//! error.
//!
//! Passes that include `fix=true` always run sequentially, because fixable
//! checks rewrite shared files. A read-only pass may fan out on the rayon pool
//! when `parallel` is enabled; results keep registration order either way.

use crate::core::check::{Check, CheckOptions, CheckResult, WeightedResult, clamp_score};
use crate::core::registry::{CheckRegistry, RegisteredCheck};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

pub struct CheckRunner<'a> {
    registry: &'a CheckRegistry,
    parallel: bool,
    timeout: Option<Duration>,
}

impl<'a> CheckRunner<'a> {
    pub fn new(registry: &'a CheckRegistry) -> Self {
        Self {
            registry,
            parallel: false,
            timeout: None,
        }
    }

    /// Allow read-only passes to run checks concurrently.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Per-check wall-clock budget for read-only passes.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &CheckRegistry {
        self.registry
    }

    /// Run every registered check once, in registration order.
    pub fn run_pass(&self, options: CheckOptions) -> Vec<WeightedResult> {
        let _span = tracing::info_span!("pass", fix = options.fix).entered();
        if self.parallel && !options.fix {
            self.registry
                .entries()
                .par_iter()
                .map(|entry| self.run_one(entry, options))
                .collect()
        } else {
            self.registry
                .iter()
                .map(|entry| self.run_one(entry, options))
                .collect()
        }
    }

    fn run_one(&self, entry: &RegisteredCheck, options: CheckOptions) -> WeightedResult {
        let check = &entry.check;
        // Non-fixable checks never see fix=true, whatever the global mode.
        let options = CheckOptions {
            fix: options.fix && check.fixable(),
        };

        let started = Instant::now();
        let result = match self.timeout {
            Some(budget) if !options.fix => invoke_with_timeout(Arc::clone(check), options, budget),
            _ => invoke(check.as_ref(), options),
        };
        let result = sanitize(result);
        let duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            check = check.id(),
            score = result.score,
            weight = entry.weight,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            fix = options.fix,
            duration_ms,
            "check finished"
        );

        WeightedResult::new(result, entry.weight)
    }
}

/// Call a check, converting returned errors and panics into crash results.
pub fn invoke(check: &dyn Check, options: CheckOptions) -> CheckResult {
    match panic::catch_unwind(AssertUnwindSafe(|| check.run(options))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            tracing::warn!(check = check.id(), error = %format!("{:#}", err), "check crashed");
            CheckResult::crashed(check.name(), format!("{:#}", err))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(check = check.id(), panic = %message, "check panicked");
            CheckResult::crashed(check.name(), message)
        }
    }
}

fn invoke_with_timeout(
    check: Arc<dyn Check>,
    options: CheckOptions,
    budget: Duration,
) -> CheckResult {
    let name = check.name();
    let id = check.id();
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("check-{}", id))
        .spawn(move || {
            let _ = tx.send(invoke(check.as_ref(), options));
        });
    if let Err(err) = spawned {
        return CheckResult::crashed(name, format!("could not spawn check thread: {}", err));
    }

    match rx.recv_timeout(budget) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            // The thread is detached; it cannot be cancelled from here.
            tracing::warn!(check = id, budget_ms = budget.as_millis() as u64, "check timed out");
            CheckResult::timed_out(name, budget)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            CheckResult::crashed(name, "check thread exited without a result")
        }
    }
}

fn sanitize(result: CheckResult) -> CheckResult {
    let clamped = clamp_score(result.score);
    if clamped == result.score {
        return result;
    }
    tracing::warn!(
        check = %result.name,
        reported = result.score,
        clamped,
        "check score out of range"
    );
    CheckResult {
        score: clamped,
        ..result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
