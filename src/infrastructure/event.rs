//! In-memory event publisher.
//!
//! Records published events in order. Used by tests and as the seam where a
//! real-time broadcast fan-out attaches in a full deployment.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DomainEvent, EventPublisher};

/// Event publisher that keeps every published event in memory.
pub struct InMemoryEventPublisher {
    published: Mutex<Vec<DomainEvent>>,
}

impl InMemoryEventPublisher {
    /// Create a new InMemoryEventPublisher.
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    /// Get all events published so far, in publication order.
    pub async fn published(&self) -> Vec<DomainEvent> {
        self.published.lock().await.clone()
    }
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish_all(&self, events: Vec<DomainEvent>) {
        for event in &events {
            tracing::debug!("Publishing domain event: {:?}", event);
        }
        self.published.lock().await.extend(events);
    }
}
