//! Group-order lifecycle: when a start is allowed, when it needs confirming,
//! and the mutations on the active order.
//!
//! Every operation returns a decision value; expected negative outcomes (no
//! active order, not a member, confirmation required) are variants, never
//! errors. Clock input is always an explicit `now` so staleness stays a pure
//! function of its inputs.

use chrono::{DateTime, Duration, Utc};

use crate::board::{ChannelSlot, OrderBoard, PendingStart};
use crate::order::GroupOrder;
use crate::transport::Member;

/// Default confirmation threshold, in hours.
pub const DEFAULT_THRESHOLD_HOURS: i64 = 2;

/// Result of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh empty order is now active.
    Started,
    /// A recent order exists; the same request sent again will overwrite it.
    NeedsConfirmation { current_entries: usize },
}

/// Result of placing an individual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed { restaurant: String, stale: bool },
    NoActiveOrder,
}

/// Result of listing the active order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// `(display name, content)` pairs in the order members first joined.
    Listing {
        restaurant: String,
        entries: Vec<(String, String)>,
    },
    NoActiveOrder,
}

/// Result of collecting mention tokens for a tag broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// Mention tokens in join order; empty when nobody has ordered yet.
    Mentions(Vec<String>),
    NoActiveOrder,
}

/// Result of leaving the active order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left { restaurant: String },
    NotAMember,
    NoActiveOrder,
}

/// Owns the order board and decides every lifecycle transition.
pub struct Coordinator {
    board: OrderBoard,
    threshold: Duration,
}

impl Coordinator {
    pub fn new(threshold_hours: i64) -> Self {
        Self {
            board: OrderBoard::new(),
            threshold: Duration::hours(threshold_hours),
        }
    }

    pub fn board(&self) -> &OrderBoard {
        &self.board
    }

    pub fn threshold_hours(&self) -> i64 {
        self.threshold.num_hours()
    }

    /// An order strictly older than the threshold may be overwritten without
    /// confirmation.
    fn is_overwritable(&self, order: &GroupOrder, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(order.created_at()) > self.threshold
    }

    fn needs_confirmation(&self, slot: &ChannelSlot, restaurant: &str, now: DateTime<Utc>) -> bool {
        let Some(active) = &slot.active else {
            return false;
        };
        if self.is_overwritable(active, now) {
            return false;
        }
        // A pending proposal with the exact same name means this request is
        // the confirmation. Comparison is case-sensitive, no normalization,
        // and the requester's identity does not matter.
        !slot
            .pending
            .as_ref()
            .is_some_and(|p| p.restaurant == restaurant)
    }

    /// Start a group order, or ask for confirmation when a recent one exists.
    ///
    /// When confirmation is needed the active order is left untouched and the
    /// proposal is parked; any previous proposal, even for a different
    /// restaurant, is silently replaced.
    pub fn start(&self, channel_id: &str, restaurant: &str, now: DateTime<Utc>) -> StartOutcome {
        self.board.with_slot(channel_id, |slot| {
            if self.needs_confirmation(slot, restaurant, now) {
                let current_entries = slot.active.as_ref().map_or(0, GroupOrder::entry_count);
                slot.pending = Some(PendingStart {
                    restaurant: restaurant.to_string(),
                });
                tracing::info!(
                    channel = channel_id,
                    restaurant,
                    current_entries,
                    "start requires confirmation"
                );
                StartOutcome::NeedsConfirmation { current_entries }
            } else {
                slot.pending = None;
                slot.active = Some(GroupOrder::new(restaurant, now));
                tracing::info!(channel = channel_id, restaurant, "group order started");
                StartOutcome::Started
            }
        })
    }

    /// Add or replace `member`'s entry on the channel's active order.
    ///
    /// Placing on a stale order is permitted; staleness only gates starting a
    /// new order. The `stale` flag is read before the entry is written.
    pub fn place_order(
        &self,
        channel_id: &str,
        member: &Member,
        content: &str,
        now: DateTime<Utc>,
    ) -> PlaceOutcome {
        self.board.with_slot(channel_id, |slot| {
            let Some(order) = slot.active.as_mut() else {
                return PlaceOutcome::NoActiveOrder;
            };
            let stale = self.is_overwritable(order, now);
            order.upsert_entry(member.clone(), content.to_string());
            PlaceOutcome::Placed {
                restaurant: order.restaurant().to_string(),
                stale,
            }
        })
    }

    pub fn list(&self, channel_id: &str) -> ListOutcome {
        self.board.with_slot(channel_id, |slot| {
            let Some(order) = &slot.active else {
                return ListOutcome::NoActiveOrder;
            };
            let entries = order
                .entries()
                .iter()
                .map(|e| (e.member.display_name.clone(), e.content.clone()))
                .collect();
            ListOutcome::Listing {
                restaurant: order.restaurant().to_string(),
                entries,
            }
        })
    }

    pub fn tag_mentions(&self, channel_id: &str) -> TagOutcome {
        self.board.with_slot(channel_id, |slot| {
            let Some(order) = &slot.active else {
                return TagOutcome::NoActiveOrder;
            };
            TagOutcome::Mentions(
                order
                    .entries()
                    .iter()
                    .map(|e| e.member.mention.clone())
                    .collect(),
            )
        })
    }

    /// Remove `member_id`'s entry. Never deletes the order itself, even when
    /// the last entry goes.
    pub fn leave(&self, channel_id: &str, member_id: &str) -> LeaveOutcome {
        self.board.with_slot(channel_id, |slot| {
            let Some(order) = slot.active.as_mut() else {
                return LeaveOutcome::NoActiveOrder;
            };
            match order.remove_entry(member_id) {
                Some(_) => LeaveOutcome::Left {
                    restaurant: order.restaurant().to_string(),
                },
                None => LeaveOutcome::NotAMember,
            }
        })
    }
}
