//! Centralized user-facing messages.
//!
//! Every piece of text shown to the user is a [`Message`] variant rendered
//! through its `Display` implementation, and printed through the `msg_*`
//! macros defined in [`macros`].

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
