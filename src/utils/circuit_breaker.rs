use std::sync::Arc;
use tokio::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// Circuit Breaker
// ============================================================================
//
// Stops calling a failing downstream for a cool-down period so notification
// delivery does not keep hammering an unavailable broker.
//
// Closed   -> calls pass through, consecutive failures are counted
// Open     -> calls are refused until `open_for` has elapsed
// HalfOpen -> calls are trial runs; enough successes close the circuit,
//             any failure re-opens it
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_gauge(&self) -> i64 {
        match self {
            CircuitState::Closed => 0,
            CircuitState::Open => 1,
            CircuitState::HalfOpen => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// How long the circuit stays open before a trial call
    pub open_for: Duration,
    /// Trial successes needed to close again
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_for: Duration::from_secs(30),
            success_threshold: 3,
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    failures: u32,
    successes: u32,
    opened_at: Option<Instant>,
}

#[derive(Clone)]
pub struct CircuitBreaker {
    inner: Arc<Mutex<Inner>>,
    config: CircuitBreakerConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E> {
    #[error("Circuit breaker is open")]
    CircuitOpen,

    #[error("Operation failed: {0}")]
    OperationFailed(E),
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: CircuitState::Closed,
                failures: 0,
                successes: 0,
                opened_at: None,
            })),
            config,
        }
    }

    /// Run `operation` unless the circuit is open.
    pub async fn call<F, T, E>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: std::future::Future<Output = Result<T, E>>,
    {
        self.admit().await?;

        match operation.await {
            Ok(value) => {
                self.on_success().await;
                Ok(value)
            }
            Err(err) => {
                self.on_failure().await;
                Err(CircuitBreakerError::OperationFailed(err))
            }
        }
    }

    async fn admit<E>(&self) -> Result<(), CircuitBreakerError<E>> {
        let mut inner = self.inner.lock().await;
        if inner.state != CircuitState::Open {
            return Ok(());
        }

        let cooled_down = inner
            .opened_at
            .is_some_and(|opened_at| opened_at.elapsed() >= self.config.open_for);
        if !cooled_down {
            return Err(CircuitBreakerError::CircuitOpen);
        }

        tracing::info!("Circuit breaker half-open, allowing trial call");
        inner.state = CircuitState::HalfOpen;
        inner.successes = 0;
        Ok(())
    }

    async fn on_success(&self) {
        let mut inner = self.inner.lock().await;
        match inner.state {
            CircuitState::HalfOpen => {
                inner.successes += 1;
                if inner.successes >= self.config.success_threshold {
                    tracing::info!(successes = inner.successes, "Circuit breaker closed");
                    *inner = Inner {
                        state: CircuitState::Closed,
                        failures: 0,
                        successes: 0,
                        opened_at: None,
                    };
                }
            }
            CircuitState::Closed => inner.failures = 0,
            CircuitState::Open => {}
        }
    }

    async fn on_failure(&self) {
        let mut inner = self.inner.lock().await;
        inner.failures += 1;

        let trip = match inner.state {
            CircuitState::Closed => inner.failures >= self.config.failure_threshold,
            CircuitState::HalfOpen => true,
            CircuitState::Open => false,
        };
        if trip {
            tracing::warn!(failures = inner.failures, "Circuit breaker opened");
            inner.state = CircuitState::Open;
            inner.successes = 0;
            inner.opened_at = Some(Instant::now());
        }
    }

    pub async fn state(&self) -> CircuitState {
        self.inner.lock().await.state
    }
}
