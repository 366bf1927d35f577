//! Transport seam: chat identities and outbound delivery.
//!
//! The chat platform itself lives outside this crate. It supplies channel and
//! member identities and consumes outbound messages; everything here is the
//! minimal surface the bot needs from it. [`ChatHandle`] is a cloneable handle
//! over an mpsc channel: sends are fire-and-forget, the bot never observes
//! delivery.

use anyhow::Result;
use tokio::sync::mpsc;

/// A channel the bot participates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Stable identity, used as the registry key.
    pub id: String,
    /// Human-readable name, used in receipts.
    pub name: String,
}

/// A chat user as the transport presents them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub display_name: String,
    /// Platform mention token, e.g. "@alice".
    pub mention: String,
}

/// An outbound message for the transport to deliver.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// Public message to a channel.
    Channel { channel: Channel, text: String },
    /// Private message to one member.
    Direct { member: Member, text: String },
}

/// Handle the bot uses to emit messages.
#[derive(Clone)]
pub struct ChatHandle {
    tx: mpsc::Sender<Outbound>,
}

impl ChatHandle {
    /// Create a handle plus the receiver the transport drains.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    pub async fn send_channel(&self, channel: &Channel, text: &str) -> Result<()> {
        self.tx
            .send(Outbound::Channel {
                channel: channel.clone(),
                text: text.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn send_direct(&self, member: &Member, text: &str) -> Result<()> {
        self.tx
            .send(Outbound::Direct {
                member: member.clone(),
                text: text.to_string(),
            })
            .await?;
        Ok(())
    }
}
