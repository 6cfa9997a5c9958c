//! Per-controller model state

use crate::scene::NodeId;
use std::fmt;

/// Opaque token identifying one issued load
///
/// Ids come from a per-controller counter and only ever increase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An issued load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub url: String,
    pub id: RequestId,
}

/// Whether a load is in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapState {
    Idle,
    Loading,
}

/// The single piece of mutable state behind a swap controller
///
/// `current` is the node this controller added to the scene, if any.
/// `pending` is the only request whose completion will be honored.
#[derive(Debug, Default)]
pub struct ModelSlot {
    current: Option<NodeId>,
    current_url: Option<String>,
    pending: Option<LoadRequest>,
}

impl ModelSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Node currently displayed by this slot
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// URL the current node was loaded from
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// In-flight request, if any
    pub fn pending(&self) -> Option<&LoadRequest> {
        self.pending.as_ref()
    }

    /// Current state
    pub fn state(&self) -> SwapState {
        if self.pending.is_some() {
            SwapState::Loading
        } else {
            SwapState::Idle
        }
    }

    /// Record a new request, returning the one it supersedes
    pub fn begin(&mut self, request: LoadRequest) -> Option<LoadRequest> {
        self.pending.replace(request)
    }

    /// Drop the pending request without a completion
    pub fn abandon(&mut self) -> Option<LoadRequest> {
        self.pending.take()
    }

    /// Take the pending request if `id` matches it
    ///
    /// Returns `None` for stale ids and leaves `pending` alone.
    pub fn settle(&mut self, id: RequestId) -> Option<LoadRequest> {
        match &self.pending {
            Some(request) if request.id == id => self.pending.take(),
            _ => None,
        }
    }

    /// Record `node` as displayed, returning the node it replaces
    pub fn install(&mut self, node: NodeId, url: String) -> Option<NodeId> {
        self.current_url = Some(url);
        self.current.replace(node)
    }

    /// Forget everything without touching the scene
    pub fn clear(&mut self) {
        self.current = None;
        self.current_url = None;
        self.pending = None;
    }
}
