//! Discord Module Test Utils
//!
//! Shared testing utilities for the Discord module. Listener and gateway tests
//! need serenity payloads (messages, guilds, roles, users) to emit through the
//! listener table without a live Discord connection; this crate builds them by
//! deserializing JSON shaped like Discord's API responses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use discord_module::event::DiscordEvent;
//! use test_utils::serenity::create_test_message;
//!
//! #[tokio::test]
//! async fn on_message_receives_content() {
//!     let message = create_test_message(1, 2, "Some important text");
//!     listeners.emit(DiscordEvent::MessageCreate(message)).await;
//! }
//! ```

pub mod serenity;
