//! Outbound message wording.
//!
//! Everything the bot says lives here so the lifecycle layer stays free of
//! presentation. The one phrase treated as a stable contract is the
//! [`NO_ORDERS_PLACED`] sentinel in an empty listing.

use crate::commands;

/// Empty-listing sentinel. Exact phrase is a contract; tests rely on it.
pub const NO_ORDERS_PLACED: &str = "no orders placed";

pub fn taking_orders(restaurant: &str) -> String {
    format!("Taking orders for **{restaurant}**\n@here")
}

pub fn confirmation_request(
    restaurant: &str,
    current_entries: usize,
    threshold_hours: i64,
    prefix: &str,
) -> String {
    format!(
        "There is a recent (not older than {threshold_hours} hour(s)) group order \
         active on this channel with {current_entries} order(s) already placed.\n\
         Send `{prefix}{} \"{restaurant}\"` again to overwrite it, or use a \
         different channel for your group order.",
        commands::START
    )
}

pub fn no_active_order() -> String {
    "No active group order on this channel".to_string()
}

pub fn placement_receipt(
    content: &str,
    restaurant: &str,
    channel_name: &str,
    stale: bool,
    threshold_hours: i64,
) -> String {
    let mut text = format!(
        "You've just ordered ```{content}``` from **{restaurant}** on the \
         \"{channel_name}\" channel."
    );
    if stale {
        text.push_str(&format!(
            "\n\nWARNING: The order has been placed but note that the currently \
             active group order on this channel is older than {threshold_hours} hour(s)."
        ));
    }
    text
}

pub fn order_listing(restaurant: &str, entries: &[(String, String)]) -> String {
    let body = if entries.is_empty() {
        NO_ORDERS_PLACED.to_string()
    } else {
        entries
            .iter()
            .map(|(name, content)| format!("{name}: {content}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("Group order for **{restaurant}**\n```\n{body}\n```")
}

pub fn tag_broadcast(message: &str, mentions: &[String]) -> String {
    if mentions.is_empty() {
        message.to_string()
    } else {
        format!("{message}\n\n{}", mentions.join(" "))
    }
}

pub fn leave_receipt(restaurant: &str, channel_name: &str) -> String {
    format!(
        "You've just left the group order for **{restaurant}** on the \
         \"{channel_name}\" channel."
    )
}

pub fn not_a_member(channel_name: &str) -> String {
    format!(
        "You've just tried to leave a group order you are not a part of (on the \
         \"{channel_name}\" channel)."
    )
}

pub fn unbalanced_quotes() -> String {
    "Unbalanced quotes. Wrap multi-word phrases in double quotes.".to_string()
}

pub fn usage(prefix: &str, command: &str) -> String {
    match command {
        commands::START => format!("Usage: {prefix}{} \"<restaurant>\"", commands::START),
        commands::PLACE => format!("Usage: {prefix}{} \"<your order>\"", commands::PLACE),
        commands::TAG => format!("Usage: {prefix}{} \"<message>\"", commands::TAG),
        other => format!("Usage: {prefix}{other}"),
    }
}

pub fn help_overview(prefix: &str) -> String {
    [
        format!("Command prefix: '{prefix}'"),
        String::new(),
        "Commands:".to_string(),
        format!("  {prefix}{} <restaurant>   Start a new group order", commands::START),
        format!("  {prefix}{} <content>            Add your order to the group order", commands::PLACE),
        format!("  {prefix}{}                 List all orders in the group order", commands::LIST),
        format!("  {prefix}{} <message>       Send a message and tag everyone in the order", commands::TAG),
        format!("  {prefix}{}                Leave the group order", commands::LEAVE),
        String::new(),
        format!("Type {prefix}{} <command> for more information on a command.", commands::HELP),
    ]
    .join("\n")
}

/// Detailed help for one command; `None` when the name is unknown.
pub fn help_topic(prefix: &str, topic: &str, threshold_hours: i64) -> Option<String> {
    let name = topic.strip_prefix(prefix).unwrap_or(topic);
    let text = match name {
        commands::START => format!(
            "Starts a new group order for the given restaurant. Only one group \
             order can be active on a channel; to overwrite the active one, just \
             start a new one. If the active order is not older than \
             {threshold_hours} hour(s) you will be asked to confirm the overwrite \
             by sending the same request again, otherwise it is overwritten \
             immediately.\n\nExample: {prefix}{} \"The Prancing Pony\"\n\
             Note: phrases containing spaces have to be put in double quotes.",
            commands::START
        ),
        commands::PLACE => format!(
            "Adds your order to the active group order. Calling it again replaces \
             your previous order instead of adding a new one. You will receive a \
             DM confirming the action.\n\n\
             Example: {prefix}{} \"Can I have a hamburger please?!\"\n\
             Note: phrases containing spaces have to be put in double quotes.",
            commands::PLACE
        ),
        commands::LIST => format!(
            "Shows the restaurant the group order is for and every participant's \
             individual order.\n\nExample: {prefix}{}",
            commands::LIST
        ),
        commands::TAG => format!(
            "Sends the given message and tags everyone taking part in the active \
             group order.\n\nExample: {prefix}{} \"Pizza time!\"\n\
             Note: phrases containing spaces have to be put in double quotes.",
            commands::TAG
        ),
        commands::LEAVE => format!(
            "Removes your order from the active group order. You will receive a \
             DM confirming the action.\n\nExample: {prefix}{}",
            commands::LEAVE
        ),
        commands::HELP => format!(
            "Shows available commands, or details for one command.\n\n\
             Examples: {prefix}{h}, {prefix}{h} {}",
            commands::PLACE,
            h = commands::HELP
        ),
        _ => return None,
    };
    Some(text)
}
