use std::time::Instant;

use crate::{
    config::{CancellationToken, CompileOptions},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// The limits a single evaluation runs under.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    max_iterations: Option<u64>,
    iterations:     u64,
    deadline:       Option<Instant>,
    cancellation:   Option<CancellationToken>,
}

impl Budget {
    /// A budget that never runs out.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Starts the clock for `options`.
    #[must_use]
    pub fn from_options(options: &CompileOptions) -> Self {
        let deadline = options.timeout
                              .and_then(|timeout| Instant::now().checked_add(timeout));
        Self { max_iterations: options.max_iterations,
               iterations: 0,
               deadline,
               cancellation: options.cancellation.clone() }
    }

    /// Loop iterations consumed so far.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Fails if the compile was cancelled or ran past its deadline.
    pub fn check(&self, line: usize) -> EvalResult<()> {
        if self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
            tracing::warn!(line, "compilation cancelled");
            return Err(RuntimeError::Cancelled { line });
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            tracing::warn!(line, iterations = self.iterations, "evaluation timed out");
            return Err(RuntimeError::TimedOut { line });
        }
        Ok(())
    }

    /// Records one loop iteration, then runs [`Budget::check`].
    pub fn tick(&mut self, line: usize) -> EvalResult<()> {
        self.iterations += 1;
        if let Some(limit) = self.max_iterations
           && self.iterations > limit
        {
            tracing::warn!(line, limit, "iteration budget exhausted");
            return Err(RuntimeError::IterationBudgetExceeded { limit, line });
        }
        self.check(line)
    }
}
