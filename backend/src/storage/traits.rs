//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{DateOnly, EventSummary, SessionSummary};

/// Trait defining the interface for onboarding session storage operations
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Store a new session
    async fn store_session(&self, session: &SessionSummary) -> Result<()>;

    /// Retrieve a specific session by ID
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionSummary>>;

    /// List every stored session in insertion order
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// List sessions whose date range shares at least one day with
    /// `[start, end]`, in insertion order
    async fn list_sessions_in_range(&self, start: DateOnly, end: DateOnly) -> Result<Vec<SessionSummary>>;

    /// Delete a session
    /// Returns true if the session was found and deleted, false otherwise
    async fn delete_session(&self, session_id: &str) -> Result<bool>;
}

/// Trait defining the interface for calendar event storage operations
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Store a new event
    async fn store_event(&self, event: &EventSummary) -> Result<()>;

    /// Retrieve a specific event by ID
    async fn get_event(&self, event_id: &str) -> Result<Option<EventSummary>>;

    /// List every stored event in insertion order
    async fn list_events(&self) -> Result<Vec<EventSummary>>;

    /// List events overlapping `[start, end]`, in insertion order
    async fn list_events_in_range(&self, start: DateOnly, end: DateOnly) -> Result<Vec<EventSummary>>;

    /// Delete an event
    /// Returns true if the event was found and deleted, false otherwise
    async fn delete_event(&self, event_id: &str) -> Result<bool>;
}
