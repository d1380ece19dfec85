//! # Greeting Service
//!
//! Produces the `{"message": ...}` payload for `/` and `/header`.
//!
//! Both operations can yield to the runtime for a short, fixed interval
//! before answering. The pause never changes the result; it only shows that
//! a slow handler does not hold up other requests on the same worker.

use serde::Serialize;
use std::time::Duration;

/// Message returned by [`GreetingService::greet`]
pub const DEFAULT_MESSAGE: &str = "hi!";

/// Response body for the greeting endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub message: String,
}

impl Greeting {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingService {
    delay: Option<Duration>,
}

impl GreetingService {
    /// `delay_ms == 0` answers immediately.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: (delay_ms > 0).then(|| Duration::from_millis(delay_ms)),
        }
    }

    /// Always `{"message": "hi!"}`.
    pub async fn greet(&self) -> Greeting {
        self.pause().await;
        Greeting::new(DEFAULT_MESSAGE)
    }

    /// Echo `value` verbatim.
    pub async fn greet_with_header(&self, value: &str) -> Greeting {
        self.pause().await;
        Greeting::new(value)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}
