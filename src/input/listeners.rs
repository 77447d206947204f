//! Bookkeeping for host listeners registered on behalf of gesture engines.
//!
//! The host owns the actual event hooks (a document-level wheel/touch blocker,
//! window-scoped drag listeners, per-mode surface listeners). Engines record
//! each acquisition here keyed by their own [`EngineId`], and release exactly
//! what they acquired. Several mounted engines can share one registry without
//! stepping on each other's registrations.

use super::mode::InputMode;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Registry shared between the host and every mounted engine.
pub type SharedListeners = Rc<RefCell<ListenerRegistry>>;

/// Identity of one mounted engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(u64);

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

impl EngineId {
    /// Hands out a process-unique engine identity.
    pub fn next() -> Self {
        Self(NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Kinds of host listeners an engine can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Document-wide blocker for the host's own pinch and ctrl+wheel zoom
    HostZoomSuppression,
    /// Window-scoped move/up listeners, held only while a drag pan is active
    DragPan,
    /// Surface listeners specific to one input mode
    ModeInput(InputMode),
}

/// Set of listeners currently held, keyed by engine identity.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    held: BTreeSet<(EngineId, ListenerKind)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry wrapped for sharing.
    pub fn shared() -> SharedListeners {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Records an acquisition. Returns false (and changes nothing) on double registration.
    pub fn acquire(&mut self, id: EngineId, kind: ListenerKind) -> bool {
        if self.held.insert((id, kind)) {
            debug!("Engine {} acquired {:?}", id.0, kind);
            true
        } else {
            warn!("Engine {} already holds {:?}; ignoring", id.0, kind);
            false
        }
    }

    /// Records a release. Returns false when the listener was not held.
    pub fn release(&mut self, id: EngineId, kind: ListenerKind) -> bool {
        if self.held.remove(&(id, kind)) {
            debug!("Engine {} released {:?}", id.0, kind);
            true
        } else {
            warn!("Engine {} released {:?} without holding it", id.0, kind);
            false
        }
    }

    /// Releases everything held by one engine; returns how many listeners were dropped.
    pub fn release_all(&mut self, id: EngineId) -> usize {
        let owned: Vec<_> = self.held.iter().filter(|(owner, _)| *owner == id).copied().collect();
        for entry in &owned {
            self.held.remove(entry);
        }
        if !owned.is_empty() {
            debug!("Engine {} released {} listener(s)", id.0, owned.len());
        }
        owned.len()
    }

    pub fn is_held(&self, id: EngineId, kind: ListenerKind) -> bool {
        self.held.contains(&(id, kind))
    }

    /// Listeners held by one engine, in a stable order.
    pub fn held_by(&self, id: EngineId) -> Vec<ListenerKind> {
        self.held
            .iter()
            .filter(|(owner, _)| *owner == id)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Number of engines holding the given kind.
    pub fn holders(&self, kind: ListenerKind) -> usize {
        self.held.iter().filter(|(_, held)| *held == kind).count()
    }

    /// Whether any mounted engine wants the host's own zoom gestures blocked.
    pub fn host_zoom_suppressed(&self) -> bool {
        self.holders(ListenerKind::HostZoomSuppression) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }
}
