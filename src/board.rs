//! Per-channel order store.
//!
//! Holds, for every channel, the active group order and the pending start
//! proposal awaiting confirmation. All read-then-write decisions for one
//! channel run under that channel's own lock, so commands on different
//! channels never serialize against each other. Locks are never held across an
//! await: callers compute a decision inside [`OrderBoard::with_slot`] and
//! perform any sends afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::order::GroupOrder;

/// A start proposal waiting for a matching second request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStart {
    pub restaurant: String,
}

/// Everything tracked for one channel.
#[derive(Debug, Default)]
pub struct ChannelSlot {
    pub active: Option<GroupOrder>,
    pub pending: Option<PendingStart>,
}

/// Process-wide store of channel slots.
#[derive(Default)]
pub struct OrderBoard {
    slots: Mutex<HashMap<String, Arc<Mutex<ChannelSlot>>>>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to `channel_id`'s slot.
    ///
    /// The outer map lock is held only long enough to fetch or create the
    /// slot; the per-channel lock is held for the duration of `f`.
    pub fn with_slot<R>(&self, channel_id: &str, f: impl FnOnce(&mut ChannelSlot) -> R) -> R {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(channel_id.to_string()).or_default())
        };
        let mut guard = slot.lock();
        f(&mut guard)
    }

    /// Restaurant of the channel's active order, if any.
    pub fn active_restaurant(&self, channel_id: &str) -> Option<String> {
        self.with_slot(channel_id, |slot| {
            slot.active.as_ref().map(|o| o.restaurant().to_string())
        })
    }

    /// Restaurant of the channel's pending start proposal, if any.
    pub fn pending_restaurant(&self, channel_id: &str) -> Option<String> {
        self.with_slot(channel_id, |slot| {
            slot.pending.as_ref().map(|p| p.restaurant.clone())
        })
    }
}
