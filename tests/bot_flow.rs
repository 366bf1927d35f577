//! End-to-end command flow through the bot: inbound chat lines in, outbound
//! channel and direct messages out, captured through the transport receiver.

use tokio::sync::mpsc;

use lunchbot::bot::Bot;
use lunchbot::lifecycle::Coordinator;
use lunchbot::transport::{Channel, ChatHandle, Member, Outbound};

fn channel(name: &str) -> Channel {
    Channel {
        id: name.to_string(),
        name: name.to_string(),
    }
}

fn member(nick: &str) -> Member {
    Member {
        id: nick.to_string(),
        display_name: nick.to_string(),
        mention: format!("@{nick}"),
    }
}

fn new_bot() -> (Bot, mpsc::Receiver<Outbound>) {
    let (chat, rx) = ChatHandle::new(32);
    (Bot::new(Coordinator::new(2), chat, "$"), rx)
}

/// Sends complete before `handle_message` returns, so the queue is ready.
fn next(rx: &mut mpsc::Receiver<Outbound>) -> Outbound {
    rx.try_recv().expect("expected an outbound message")
}

fn channel_text(out: Outbound) -> String {
    match out {
        Outbound::Channel { text, .. } => text,
        other => panic!("expected channel message, got {other:?}"),
    }
}

fn direct_text(out: Outbound) -> (String, String) {
    match out {
        Outbound::Direct { member, text } => (member.display_name, text),
        other => panic!("expected direct message, got {other:?}"),
    }
}

#[tokio::test]
async fn start_announces_to_the_channel() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "$order_start \"Pizza Place\"")
        .await
        .unwrap();

    let text = channel_text(next(&mut rx));
    assert!(text.contains("Taking orders"));
    assert!(text.contains("Pizza Place"));
    assert!(text.contains("@here"));
}

#[tokio::test]
async fn overwrite_needs_a_matching_second_request() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");
    let alice = member("alice");

    bot.handle_message(&ch, &alice, "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &alice, "$order_start \"Burger Barn\"")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("Burger Barn"));
    assert!(text.contains("2 hour(s)"));
    assert!(text.contains("0 order(s)"));
    // Still taking orders for the original restaurant.
    assert_eq!(
        bot.coordinator().board().active_restaurant("#lunch"),
        Some("Pizza Place".to_string())
    );

    // Any user's matching repeat confirms, not just the proposer's.
    bot.handle_message(&ch, &member("bob"), "$order_start \"Burger Barn\"")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("Taking orders"));
    assert!(text.contains("Burger Barn"));
    assert_eq!(
        bot.coordinator().board().active_restaurant("#lunch"),
        Some("Burger Barn".to_string())
    );
}

#[tokio::test]
async fn ordering_without_an_active_order_is_announced() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    for line in ["$order pizza", "$order_list", "$order_tag hi", "$order_leave"] {
        bot.handle_message(&ch, &member("alice"), line).await.unwrap();
        let text = channel_text(next(&mut rx));
        assert_eq!(text, "No active group order on this channel");
    }
}

#[tokio::test]
async fn placing_orders_sends_receipts_and_lists_in_join_order() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");
    let alice = member("alice");
    let bob = member("bob");

    bot.handle_message(&ch, &alice, "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &alice, "$order burger").await.unwrap();
    let (to, text) = direct_text(next(&mut rx));
    assert_eq!(to, "alice");
    assert!(text.contains("burger"));
    assert!(text.contains("Pizza Place"));
    assert!(text.contains("#lunch"));
    assert!(!text.contains("WARNING"));

    bot.handle_message(&ch, &bob, "$order salad").await.unwrap();
    let _ = next(&mut rx);

    // Re-order replaces content but keeps alice first.
    bot.handle_message(&ch, &alice, "$order fries").await.unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &bob, "$order_list").await.unwrap();
    let text = channel_text(next(&mut rx));
    let alice_pos = text.find("alice: fries").expect("alice line");
    let bob_pos = text.find("bob: salad").expect("bob line");
    assert!(alice_pos < bob_pos);
    assert!(!text.contains("burger"));
}

#[tokio::test]
async fn empty_listing_contains_the_sentinel() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &member("alice"), "$order_list")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("no orders placed"), "{text}");
}

#[tokio::test]
async fn tag_broadcast_mentions_entrants_in_join_order() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);

    // Nobody has ordered yet: message still goes out, no mentions.
    bot.handle_message(&ch, &member("alice"), "$order_tag \"Order up!\"")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert_eq!(text, "Order up!");

    bot.handle_message(&ch, &member("bob"), "$order salad").await.unwrap();
    let _ = next(&mut rx);
    bot.handle_message(&ch, &member("alice"), "$order burger").await.unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &member("alice"), "$order_tag \"Pizza time!\"")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert_eq!(text, "Pizza time!\n\n@bob @alice");
}

#[tokio::test]
async fn leaving_sends_the_right_private_notice() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");
    let alice = member("alice");

    bot.handle_message(&ch, &alice, "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);
    bot.handle_message(&ch, &alice, "$order burger").await.unwrap();
    let _ = next(&mut rx);

    bot.handle_message(&ch, &alice, "$order_leave").await.unwrap();
    let (to, text) = direct_text(next(&mut rx));
    assert_eq!(to, "alice");
    assert!(text.contains("left the group order"));
    assert!(text.contains("Pizza Place"));

    // Never joined, so leaving is rejected privately.
    bot.handle_message(&ch, &member("carol"), "$order_leave")
        .await
        .unwrap();
    let (to, text) = direct_text(next(&mut rx));
    assert_eq!(to, "carol");
    assert!(text.contains("not a part of"));
}

#[tokio::test]
async fn channels_run_independent_orders() {
    let (bot, mut rx) = new_bot();
    let lunch = channel("#lunch");
    let dinner = channel("#dinner");

    bot.handle_message(&lunch, &member("alice"), "$order_start \"Pizza Place\"")
        .await
        .unwrap();
    let _ = next(&mut rx);

    // A fresh order on #lunch does not gate #dinner.
    bot.handle_message(&dinner, &member("bob"), "$order_start \"Sushi Bar\"")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("Taking orders"));
    assert!(text.contains("Sushi Bar"));
}

#[tokio::test]
async fn chatter_and_unknown_commands_are_ignored() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "anyone hungry?")
        .await
        .unwrap();
    bot.handle_message(&ch, &member("alice"), "$frobnicate")
        .await
        .unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn missing_argument_gets_a_usage_reply() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "$order_start")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.starts_with("Usage:"));
    assert!(text.contains("order_start"));

    bot.handle_message(&ch, &member("alice"), "$order_start \"Pizza")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("quotes"));
}

#[tokio::test]
async fn help_lists_commands() {
    let (bot, mut rx) = new_bot();
    let ch = channel("#lunch");

    bot.handle_message(&ch, &member("alice"), "$help").await.unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("$order_start"));
    assert!(text.contains("$order_leave"));

    bot.handle_message(&ch, &member("alice"), "$help order")
        .await
        .unwrap();
    let text = channel_text(next(&mut rx));
    assert!(text.contains("replaces"));
}
