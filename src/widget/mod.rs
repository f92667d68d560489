//! The chat widget.
//!
//! A single controller, [`ChatWidget`], mediates between user input and the
//! chat endpoint. It is bound to a [`ChatView`] (the message list, text
//! input, send control and typing indicator) and a
//! [`ChatTransport`](crate::transport::ChatTransport).
//!
//! # Structure
//!
//! - [`controller`]: the controller and the view contract
//! - [`format`]: reply text to markup
//! - [`message`]: transcript entries
//! - [`transcript`]: headless HTML view
//! - [`terminal`]: terminal view
//!
//! # Example
//!
//! ```rust
//! use chat_widget::widget::format_response;
//!
//! let html = format_response("Availability for Room 4: Yes");
//! assert_eq!(html, "<strong>Availability for Room 4</strong>: Yes");
//! ```

pub mod controller;
pub mod format;
pub mod message;
pub mod terminal;
pub mod transcript;

pub use controller::{ChatView, ChatWidget, FALLBACK_MESSAGE, Key, TypingIndicator};
pub use format::{MarkupMode, escape_markup, format_response};
pub use message::{Message, Sender};
pub use terminal::TerminalView;
pub use transcript::HtmlTranscript;

/// Height of the empty text input, in pixels.
pub const DEFAULT_INPUT_HEIGHT: u32 = 52;

/// Height added per extra line of input, in pixels.
pub const INPUT_LINE_HEIGHT: u32 = 24;

/// Element identifiers of the DOM contract.
pub mod dom {
    pub const MESSAGES: &str = "messages";
    pub const USER_INPUT: &str = "userInput";
    pub const SEND_BUTTON: &str = "sendBtn";
    pub const TYPING: &str = "typing";
}
