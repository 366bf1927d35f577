//! lunchbot console harness.
//!
//! Runs the bot against a simulated chat: each stdin line is a channel
//! message, outbound traffic is printed with its destination. Useful for
//! exercising the confirmation protocol without wiring up a chat platform.
//!
//! Input format:
//!   <nick> <message>              message to the default channel
//!   #<channel> <nick> <message>   message to a named channel
//!
//! Example session:
//!   alice $order_start "The Prancing Pony"
//!   bob $order "one stew"
//!   alice $order_list

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use lunchbot::bot::Bot;
use lunchbot::commands;
use lunchbot::lifecycle::{Coordinator, DEFAULT_THRESHOLD_HOURS};
use lunchbot::transport::{Channel, ChatHandle, Member, Outbound};

#[derive(Parser)]
#[command(name = "lunchbot", about = "Group food-ordering bot, console harness")]
struct Args {
    /// Command prefix
    #[arg(long, default_value = "$")]
    prefix: String,

    /// Hours before an active order may be overwritten without confirmation
    #[arg(long, env = "LUNCHBOT_THRESHOLD_HOURS", default_value_t = DEFAULT_THRESHOLD_HOURS)]
    threshold_hours: i64,

    /// Default channel for lines that do not name one
    #[arg(long, default_value = "#lunch")]
    channel: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lunchbot=info".into()),
        )
        .init();

    let args = Args::parse();

    let (chat, mut outbound) = ChatHandle::new(64);
    let bot = Bot::new(
        Coordinator::new(args.threshold_hours),
        chat,
        args.prefix.clone(),
    );

    // Print outbound traffic as the transport would deliver it.
    tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            match message {
                Outbound::Channel { channel, text } => {
                    println!("\x1b[32m[{}]\x1b[0m {text}", channel.name);
                }
                Outbound::Direct { member, text } => {
                    println!("\x1b[36m[dm -> {}]\x1b[0m {text}", member.display_name);
                }
            }
        }
    });

    println!("lunchbot console. Lines: [#channel] <nick> <message>. Ctrl+D to exit.");
    println!(
        "Try: alice {}{} \"The Prancing Pony\"",
        args.prefix,
        commands::START
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((channel_name, nick, text)) = split_input(line, &args.channel) else {
            println!("Expected: [#channel] <nick> <message>");
            continue;
        };
        let channel = Channel {
            id: channel_name.clone(),
            name: channel_name,
        };
        let sender = Member {
            id: nick.clone(),
            display_name: nick.clone(),
            mention: format!("@{nick}"),
        };
        bot.handle_message(&channel, &sender, &text).await?;
    }

    Ok(())
}

/// Split an input line into (channel, nick, message).
fn split_input(line: &str, default_channel: &str) -> Option<(String, String, String)> {
    let mut rest = line;
    let channel = if rest.starts_with('#') {
        let (channel, tail) = rest.split_once(char::is_whitespace)?;
        rest = tail.trim_start();
        channel.to_string()
    } else {
        default_channel.to_string()
    };
    let (nick, text) = rest.split_once(char::is_whitespace)?;
    Some((channel, nick.to_string(), text.trim_start().to_string()))
}
