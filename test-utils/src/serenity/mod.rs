//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON,
//! simulating what Discord's gateway would deliver. Only the fields a test is
//! likely to assert on are parameters; everything else gets a sensible default.
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects
//! - `message::create_test_message` - Create Serenity Message objects
//! - `role::create_test_role` - Create Serenity Role objects
//! - `user::create_test_user` - Create Serenity User objects

pub mod guild;
pub mod message;
pub mod role;
pub mod user;

// Re-export commonly used functions for convenience
pub use guild::create_test_guild;
pub use message::create_test_message;
pub use role::create_test_role;
pub use user::create_test_user;
