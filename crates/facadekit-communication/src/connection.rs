//! Connection acquisition with bounded, fixed-delay retry.
//!
//! Hosts reject calls while a modal dialog is open or a command is running.
//! Those rejections are transient, so acquiring a document handle is retried
//! a fixed number of times with a constant pause between attempts. Retries
//! are never exponential.

use crate::drawing::DrawingClient;
use facadekit_core::ConnectionError;
use std::time::Duration;

/// Something that can hand out a live document.
pub trait DocumentConnector {
    type Client: DrawingClient;

    /// Obtain and validate a handle to the document
    fn connect(&mut self) -> Result<Self::Client, ConnectionError>;

    /// Human-readable description of the target, for log messages
    fn target(&self) -> String;
}

/// Adapter turning a closure into a [`DocumentConnector`]
pub struct FnConnector<F> {
    connect: F,
    target: String,
}

impl<F> FnConnector<F> {
    pub fn new(target: impl Into<String>, connect: F) -> Self {
        Self {
            connect,
            target: target.into(),
        }
    }
}

impl<F, C> DocumentConnector for FnConnector<F>
where
    F: FnMut() -> Result<C, ConnectionError>,
    C: DrawingClient,
{
    type Client = C;

    fn connect(&mut self) -> Result<C, ConnectionError> {
        (self.connect)()
    }

    fn target(&self) -> String {
        self.target.clone()
    }
}

/// Retry schedule for connection attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy with no pause between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

/// Connect, retrying transient failures according to `policy`.
///
/// Returns [`ConnectionError::RetriesExhausted`] carrying the last failure
/// when every attempt fails. Non-transient failures are returned at once.
pub fn connect_with_retry<K: DocumentConnector>(
    connector: &mut K,
    policy: &RetryPolicy,
) -> Result<K::Client, ConnectionError> {
    let attempts = policy.max_attempts.max(1);
    let mut last = ConnectionError::DocumentUnavailable {
        reason: "no connection attempt made".to_string(),
    };

    for attempt in 1..=attempts {
        match connector.connect() {
            Ok(client) => {
                tracing::info!(
                    document = %client.document_name(),
                    attempt,
                    "Connected to drawing"
                );
                return Ok(client);
            }
            Err(err) if !err.is_transient() => {
                tracing::error!(target_doc = %connector.target(), "Connection failed: {}", err);
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(
                    "Document busy... retrying ({}/{}): {}",
                    attempt,
                    attempts,
                    err
                );
                last = err;
                if attempt < attempts && !policy.delay.is_zero() {
                    std::thread::sleep(policy.delay);
                }
            }
        }
    }

    tracing::error!(
        target_doc = %connector.target(),
        attempts,
        "Could not connect to drawing"
    );
    Err(ConnectionError::RetriesExhausted {
        attempts,
        last: Box::new(last),
    })
}
