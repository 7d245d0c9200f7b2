//! Pluggable unit of work executed between pending and settled phases.
//!
//! # Responsibility
//! - Suspend the dispatching task where a real network round trip would be.
//! - Keep containers unaware of how the suspension is produced.
//!
//! # Invariants
//! - `perform` always completes; there is no cancellation or timeout.

use super::{ActionKind, LatencyClass};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(500);
pub const DEFAULT_DATA_LATENCY: Duration = Duration::from_millis(300);

/// Suspension point of an async action.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn perform(&self, kind: ActionKind);
}

/// Fixed-delay stand-in for a backend round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub auth: Duration,
    pub data: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            auth: DEFAULT_AUTH_LATENCY,
            data: DEFAULT_DATA_LATENCY,
        }
    }
}

impl SimulatedLatency {
    pub fn delay_for(&self, kind: ActionKind) -> Duration {
        match kind.latency_class() {
            LatencyClass::Auth => self.auth,
            LatencyClass::Data => self.data,
        }
    }
}

#[async_trait]
impl UnitOfWork for SimulatedLatency {
    async fn perform(&self, kind: ActionKind) {
        tokio::time::sleep(self.delay_for(kind)).await;
    }
}

/// Unit of work that still yields once but never waits on the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLatency;

#[async_trait]
impl UnitOfWork for NoLatency {
    async fn perform(&self, _kind: ActionKind) {
        tokio::task::yield_now().await;
    }
}
