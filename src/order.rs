//! Group order data model.
//!
//! A [`GroupOrder`] is one channel's shared order: the restaurant it is for,
//! when it was started, and each member's individual entry in the order they
//! first joined.

use chrono::{DateTime, Utc};

use crate::transport::Member;

/// One member's order within a group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub member: Member,
    pub content: String,
}

/// One active group order on one channel.
#[derive(Debug, Clone)]
pub struct GroupOrder {
    restaurant: String,
    created_at: DateTime<Utc>,
    entries: Vec<OrderEntry>,
}

impl GroupOrder {
    pub fn new(restaurant: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            restaurant: restaurant.into(),
            created_at: now,
            entries: Vec::new(),
        }
    }

    pub fn restaurant(&self) -> &str {
        &self.restaurant
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Entries in the order members first joined.
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Add or replace `member`'s entry. A re-order replaces the content
    /// wholesale but keeps the member's original position in the listing.
    pub fn upsert_entry(&mut self, member: Member, content: String) {
        match self.entries.iter_mut().find(|e| e.member.id == member.id) {
            Some(entry) => {
                entry.member = member;
                entry.content = content;
            }
            None => self.entries.push(OrderEntry { member, content }),
        }
    }

    /// Remove `member_id`'s entry, returning it if present. Other entries keep
    /// their relative order.
    pub fn remove_entry(&mut self, member_id: &str) -> Option<OrderEntry> {
        let idx = self.entries.iter().position(|e| e.member.id == member_id)?;
        Some(self.entries.remove(idx))
    }
}
