use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

/// Loop iterations allowed per compile unless configured otherwise.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;

/// A flag a host can raise from any thread to stop a running compile.
///
/// Clones share the same flag. The evaluator polls it at every loop
/// iteration and statement boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Configuration for a compilation run.
///
/// Every field bounds how much work a single compile may do. The language
/// itself has no limit: `for true { ... }` never ends without one.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use pato::CompileOptions;
///
/// let options = CompileOptions::default().with_max_iterations(10)
///                                        .with_timeout(Duration::from_secs(1));
/// assert_eq!(options.max_iterations, Some(10));
/// assert!(CompileOptions::unbounded().max_iterations.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Total loop iterations allowed, counting statement loops and form loops.
    pub max_iterations: Option<u64>,
    /// Wall-clock limit for evaluation.
    pub timeout:        Option<Duration>,
    /// External stop signal.
    pub cancellation:   Option<CancellationToken>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { max_iterations: Some(DEFAULT_MAX_ITERATIONS),
               timeout:        None,
               cancellation:   None, }
    }
}

impl CompileOptions {
    /// Options without any limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_iterations: None,
               timeout:        None,
               cancellation:   None, }
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn default_limits_iterations_only() {
        let options = CompileOptions::default();
        assert_eq!(options.max_iterations, Some(DEFAULT_MAX_ITERATIONS));
        assert!(options.timeout.is_none());
        assert!(options.cancellation.is_none());
    }
}
