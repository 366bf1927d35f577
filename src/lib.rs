//! lunchbot: a group food-ordering bot for chat channels.
//!
//! Users in a channel collectively build one order for a restaurant: someone
//! starts it, everyone adds their own entry, anyone can list or tag the
//! participants, and starting over a recent order needs a second confirming
//! request. The chat transport is pluggable; `transport` defines the seam and
//! the `lunchbot` binary ships a console harness.

pub mod board;
pub mod bot;
pub mod commands;
pub mod format;
pub mod lifecycle;
pub mod order;
pub mod transport;
