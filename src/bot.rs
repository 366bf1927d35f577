//! Command dispatch: parse an inbound chat line, run the lifecycle operation,
//! and send the rendered replies.
//!
//! Decisions are computed under the channel's lock inside the coordinator;
//! every send happens afterwards, so slow transports never hold up other
//! channels.

use anyhow::Result;
use chrono::Utc;

use crate::commands::{self, Command, ParseError};
use crate::format;
use crate::lifecycle::{
    Coordinator, LeaveOutcome, ListOutcome, PlaceOutcome, StartOutcome, TagOutcome,
};
use crate::transport::{Channel, ChatHandle, Member};

pub struct Bot {
    coordinator: Coordinator,
    chat: ChatHandle,
    prefix: String,
}

impl Bot {
    pub fn new(coordinator: Coordinator, chat: ChatHandle, prefix: impl Into<String>) -> Self {
        Self {
            coordinator,
            chat,
            prefix: prefix.into(),
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Handle one inbound channel message. Non-commands and unknown commands
    /// are ignored silently.
    pub async fn handle_message(
        &self,
        channel: &Channel,
        sender: &Member,
        text: &str,
    ) -> Result<()> {
        let command = match commands::parse(&self.prefix, text) {
            Ok(command) => command,
            Err(ParseError::NotACommand | ParseError::Unknown(_)) => return Ok(()),
            Err(ParseError::MissingArgument { command }) => {
                return self
                    .chat
                    .send_channel(channel, &format::usage(&self.prefix, command))
                    .await;
            }
            Err(ParseError::UnbalancedQuotes) => {
                return self
                    .chat
                    .send_channel(channel, &format::unbalanced_quotes())
                    .await;
            }
        };

        tracing::debug!(
            channel = %channel.name,
            sender = %sender.display_name,
            ?command,
            "dispatching command"
        );

        match command {
            Command::Start { restaurant } => self.start(channel, &restaurant).await,
            Command::Place { content } => self.place(channel, sender, &content).await,
            Command::List => self.list(channel).await,
            Command::Tag { message } => self.tag(channel, &message).await,
            Command::Leave => self.leave(channel, sender).await,
            Command::Help { topic } => self.help(channel, topic.as_deref()).await,
        }
    }

    async fn start(&self, channel: &Channel, restaurant: &str) -> Result<()> {
        match self.coordinator.start(&channel.id, restaurant, Utc::now()) {
            StartOutcome::Started => {
                self.chat
                    .send_channel(channel, &format::taking_orders(restaurant))
                    .await
            }
            StartOutcome::NeedsConfirmation { current_entries } => {
                let text = format::confirmation_request(
                    restaurant,
                    current_entries,
                    self.coordinator.threshold_hours(),
                    &self.prefix,
                );
                self.chat.send_channel(channel, &text).await
            }
        }
    }

    async fn place(&self, channel: &Channel, sender: &Member, content: &str) -> Result<()> {
        match self
            .coordinator
            .place_order(&channel.id, sender, content, Utc::now())
        {
            PlaceOutcome::Placed { restaurant, stale } => {
                let text = format::placement_receipt(
                    content,
                    &restaurant,
                    &channel.name,
                    stale,
                    self.coordinator.threshold_hours(),
                );
                self.chat.send_direct(sender, &text).await
            }
            PlaceOutcome::NoActiveOrder => self.no_active_order(channel).await,
        }
    }

    async fn list(&self, channel: &Channel) -> Result<()> {
        match self.coordinator.list(&channel.id) {
            ListOutcome::Listing { restaurant, entries } => {
                self.chat
                    .send_channel(channel, &format::order_listing(&restaurant, &entries))
                    .await
            }
            ListOutcome::NoActiveOrder => self.no_active_order(channel).await,
        }
    }

    async fn tag(&self, channel: &Channel, message: &str) -> Result<()> {
        match self.coordinator.tag_mentions(&channel.id) {
            TagOutcome::Mentions(mentions) => {
                self.chat
                    .send_channel(channel, &format::tag_broadcast(message, &mentions))
                    .await
            }
            TagOutcome::NoActiveOrder => self.no_active_order(channel).await,
        }
    }

    async fn leave(&self, channel: &Channel, sender: &Member) -> Result<()> {
        match self.coordinator.leave(&channel.id, &sender.id) {
            LeaveOutcome::Left { restaurant } => {
                self.chat
                    .send_direct(sender, &format::leave_receipt(&restaurant, &channel.name))
                    .await
            }
            LeaveOutcome::NotAMember => {
                self.chat
                    .send_direct(sender, &format::not_a_member(&channel.name))
                    .await
            }
            LeaveOutcome::NoActiveOrder => self.no_active_order(channel).await,
        }
    }

    async fn help(&self, channel: &Channel, topic: Option<&str>) -> Result<()> {
        let text = match topic {
            Some(topic) => {
                format::help_topic(&self.prefix, topic, self.coordinator.threshold_hours())
                    .unwrap_or_else(|| format!("No command named \"{topic}\""))
            }
            None => format::help_overview(&self.prefix),
        };
        self.chat.send_channel(channel, &text).await
    }

    async fn no_active_order(&self, channel: &Channel) -> Result<()> {
        self.chat
            .send_channel(channel, &format::no_active_order())
            .await
    }
}
