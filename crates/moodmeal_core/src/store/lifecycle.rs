//! crates/moodmeal_core/src/store/lifecycle.rs
//!
//! The three-phase request lifecycle shared by every slice that owns an
//! asynchronous operation, plus the bookkeeping that keeps `is_loading` and
//! `error` consistent with it.

use std::fmt;

/// Identifies one issued request. Ids come from the store and only ever increase,
/// so a larger id was always issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One phase of an asynchronous operation, as carried inside an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending { request_id: RequestId },
    Fulfilled { request_id: RequestId, payload: T },
    Rejected { request_id: RequestId, message: String },
}

impl<T> Lifecycle<T> {
    pub fn request_id(&self) -> RequestId {
        match self {
            Lifecycle::Pending { request_id }
            | Lifecycle::Fulfilled { request_id, .. }
            | Lifecycle::Rejected { request_id, .. } => *request_id,
        }
    }

    pub fn phase_name(&self) -> &'static str {
        match self {
            Lifecycle::Pending { .. } => "pending",
            Lifecycle::Fulfilled { .. } => "fulfilled",
            Lifecycle::Rejected { .. } => "rejected",
        }
    }
}

/// What a slice does with a terminal action that belongs to a request older than
/// the latest one issued for the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponsePolicy {
    /// Responses from superseded requests are dropped.
    #[default]
    LatestIssuedWins,
    /// Every response applies in the order it arrives, so a slow early request can
    /// overwrite the result of a faster later one.
    LastFulfilledWins,
}

/// Tracks the requests issued for a single operation kind.
///
/// A replacing slot follows the store's `ResponsePolicy`. An appending slot keeps
/// every result, because each one adds a new record instead of overwriting the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSlot {
    policy: ResponsePolicy,
    latest_issued: Option<RequestId>,
    in_flight: u32,
}

impl RequestSlot {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            policy,
            latest_issued: None,
            in_flight: 0,
        }
    }

    /// A slot whose results are appended to a list. No response is ever stale.
    pub fn appending() -> Self {
        Self::new(ResponsePolicy::LastFulfilledWins)
    }

    pub fn latest_issued(&self) -> Option<RequestId> {
        self.latest_issued
    }

    /// Requests issued on this slot that have not settled yet.
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    fn issue(&mut self, request_id: RequestId) {
        self.in_flight += 1;
        self.latest_issued = Some(match self.latest_issued {
            Some(latest) => latest.max(request_id),
            None => request_id,
        });
    }

    /// Records a terminal phase and reports whether its result should be applied.
    fn settle(&mut self, request_id: RequestId) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.policy {
            ResponsePolicy::LastFulfilledWins => true,
            ResponsePolicy::LatestIssuedWins => {
                self.latest_issued.map_or(true, |latest| request_id >= latest)
            }
        }
    }

    /// Whether the slice should still report loading after an accepted result.
    fn still_loading(&self) -> bool {
        match self.policy {
            ResponsePolicy::LatestIssuedWins => false,
            ResponsePolicy::LastFulfilledWins => self.in_flight > 0,
        }
    }
}

/// The `is_loading` / `error` pair every asynchronous slice carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsyncStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AsyncStatus {
    /// Applies one lifecycle phase and returns the payload when the caller should
    /// store it. Pending clears any previous error. An accepted terminal phase ends
    /// loading once no other request on the slot is outstanding. Stale terminal
    /// phases change nothing.
    pub fn track<'a, T>(
        &mut self,
        slot: &mut RequestSlot,
        lifecycle: &'a Lifecycle<T>,
        fallback: &str,
    ) -> Option<&'a T> {
        match lifecycle {
            Lifecycle::Pending { request_id } => {
                slot.issue(*request_id);
                self.is_loading = true;
                self.error = None;
                None
            }
            Lifecycle::Fulfilled {
                request_id,
                payload,
            } => {
                if !slot.settle(*request_id) {
                    return None;
                }
                self.is_loading = slot.still_loading();
                self.error = None;
                Some(payload)
            }
            Lifecycle::Rejected {
                request_id,
                message,
            } => {
                if slot.settle(*request_id) {
                    self.is_loading = slot.still_loading();
                    self.error = Some(if message.trim().is_empty() {
                        fallback.to_string()
                    } else {
                        message.clone()
                    });
                }
                None
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
