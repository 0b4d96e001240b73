//! Test factory for creating Serenity Message objects.

use serenity::all::Message;

use crate::serenity::user::test_user_json;

/// Author ID used for every test message.
pub const TEST_AUTHOR_ID: u64 = 300000000000000000;

/// Creates a test Serenity Message with the given content.
///
/// The message is a plain text message outside any guild, authored by a
/// non-bot user with ID [`TEST_AUTHOR_ID`], without attachments, embeds, or
/// mentions.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `channel_id` - Discord channel ID the message was sent in
/// - `content` - Message text
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::message::create_test_message;
///
/// let message = create_test_message(1, 2, "!ping");
/// assert_eq!(message.content, "!ping");
/// ```
pub fn create_test_message(message_id: u64, channel_id: u64, content: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": test_user_json(TEST_AUTHOR_ID, "tester"),
        "content": content,
        "timestamp": "2020-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "mention_channels": [],
        "attachments": [],
        "embeds": [],
        "reactions": [],
        "pinned": false,
        "type": 0,
        "flags": 0,
        "components": [],
        "sticker_items": [],
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
