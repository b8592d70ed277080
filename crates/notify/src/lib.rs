//! Discord webhook notifications for automation events.
//!
//! This crate provides:
//! - `Category` with fixed display templates per event kind
//! - `Notification` builder for structured messages with ordered metadata
//! - `DiscordNotifier` for one-shot, best-effort webhook delivery

pub mod discord;
pub mod error;
pub mod message;

pub use discord::DiscordNotifier;
pub use error::NotifyError;
pub use message::{Category, MetaValue, Notification};
