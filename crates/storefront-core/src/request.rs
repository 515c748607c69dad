//! # Request State
//!
//! Explicit state for a view's outstanding catalog call.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Slot Lifecycle                               │
//! │                                                                         │
//! │   begin() ──► Pending ──settle(ticket, Ok)──► Succeeded(value)          │
//! │                  │                                                      │
//! │                  └────settle(ticket, Err)──► Failed(reason)             │
//! │                                                                         │
//! │   begin() again ──► older tickets become stale                          │
//! │   discard()     ──► every ticket becomes stale                          │
//! │                                                                         │
//! │   settle() with a stale ticket is ignored: a call that completes after  │
//! │   its view went away never writes into that view.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt::Display;

// =============================================================================
// Request State
// =============================================================================

/// The three states of a request a view is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum RequestState<T> {
    /// The call has been issued and not yet resolved.
    Pending,
    /// The call failed; the reason is the message to show.
    Failed(String),
    /// The call resolved with a value.
    Succeeded(T),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// The value, when the request succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure reason, when the request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Builds a settled state from a call result.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => RequestState::Succeeded(value),
            Err(err) => RequestState::Failed(err.to_string()),
        }
    }
}

// =============================================================================
// Request Slot
// =============================================================================

/// Token for one issued request. Only the most recent ticket of a live slot
/// may settle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A view's holder for its current request.
#[derive(Debug)]
pub struct RequestSlot<T> {
    generation: u64,
    discarded: bool,
    state: Option<RequestState<T>>,
}

impl<T> RequestSlot<T> {
    /// Creates an idle slot with no request issued.
    pub fn new() -> Self {
        RequestSlot {
            generation: 0,
            discarded: false,
            state: None,
        }
    }

    /// Marks the slot pending and returns the ticket for the new request.
    ///
    /// Any ticket handed out earlier becomes stale. Beginning a request on a
    /// discarded slot revives it.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.discarded = false;
        self.state = Some(RequestState::Pending);
        Ticket(self.generation)
    }

    /// Applies a call result if `ticket` is still current.
    ///
    /// Returns `true` when the result was applied.
    pub fn settle<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = Some(RequestState::from_result(result));
        true
    }

    /// Detaches the slot from its view. Results still in flight are dropped
    /// when they arrive.
    pub fn discard(&mut self) {
        self.discarded = true;
        self.generation += 1;
        self.state = None;
    }

    /// Whether a result carrying `ticket` would be applied.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        !self.discarded && ticket.0 == self.generation
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Current state; `None` while idle or after a discard.
    pub fn state(&self) -> Option<&RequestState<T>> {
        self.state.as_ref()
    }

    /// Takes the settled state out of the slot, leaving it idle.
    ///
    /// A pending state is left in place.
    pub fn take_settled(&mut self) -> Option<RequestState<T>> {
        match self.state {
            Some(RequestState::Pending) | None => None,
            Some(_) => self.state.take(),
        }
    }
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
