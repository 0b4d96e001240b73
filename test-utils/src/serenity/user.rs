//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// JSON for a non-bot user without avatar, shared with the message factory.
pub(crate) fn test_user_json(user_id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": false,
    })
}

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Username
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, name: &str) -> User {
    serde_json::from_value(test_user_json(user_id, name))
        .expect("Failed to create test user - invalid JSON structure")
}
