//! Line-oriented view for terminals.

use std::io::Write;

use super::controller::{ChatView, TypingIndicator};
use super::format::markup_to_plain;
use super::message::{Message, Sender};

const TYPING_LINE: &str = "  ... bot is typing";

/// A [`ChatView`] that writes each transcript entry as prefixed lines.
///
/// Markup is flattened to plain text. The input is whatever line the user
/// entered last, so `clear_input` only forgets it.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
    input: String,
    typing: TypingIndicator,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input: String::new(),
            typing: TypingIndicator::Hidden,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(name: "terminal.write.failed", error = %err, "Failed to write to terminal");
        }
    }
}

fn prefix(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you> ",
        Sender::Bot => "bot> ",
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_message(&mut self, message: &Message) {
        let plain = markup_to_plain(message.text());
        let prefix = prefix(message.sender());
        let mut rendered = String::new();
        for (idx, line) in plain.lines().enumerate() {
            if idx > 0 {
                rendered.push('\n');
                rendered.push_str(&" ".repeat(prefix.len()));
            } else {
                rendered.push_str(prefix);
            }
            rendered.push_str(line);
        }
        if rendered.is_empty() {
            rendered.push_str(prefix.trim_end());
        }
        self.write_line(&rendered);
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn set_typing(&mut self, indicator: TypingIndicator) {
        if indicator == TypingIndicator::Shown && self.typing == TypingIndicator::Hidden {
            self.write_line(TYPING_LINE);
        }
        self.typing = indicator;
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }
}
