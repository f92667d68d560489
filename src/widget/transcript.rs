//! In-memory transcript that renders the same markup as the browser page.

use super::controller::{ChatView, TypingIndicator};
use super::message::Message;
use super::{DEFAULT_INPUT_HEIGHT, INPUT_LINE_HEIGHT, dom};

/// A headless [`ChatView`].
///
/// Holds the rendered message nodes, the input's value and height, and the
/// typing indicator's position. [`HtmlTranscript::to_html`] produces the
/// inner markup of the message list exactly as the page script would.
#[derive(Debug, Clone)]
pub struct HtmlTranscript {
    nodes: Vec<Message>,
    input: String,
    input_height: u32,
    typing: TypingIndicator,
    /// Number of nodes preceding the indicator when it was last shown.
    typing_anchor: usize,
}

impl Default for HtmlTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlTranscript {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            input: String::new(),
            input_height: DEFAULT_INPUT_HEIGHT,
            typing: TypingIndicator::Hidden,
            typing_anchor: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.nodes
    }

    pub fn typing(&self) -> TypingIndicator {
        self.typing
    }

    pub fn input_height(&self) -> u32 {
        self.input_height
    }

    /// Simulate typing into the input; the height grows with the line count.
    pub fn type_input(&mut self, text: &str) {
        self.input = text.to_string();
        let extra_lines = u32::try_from(text.split('\n').count().saturating_sub(1)).unwrap_or(u32::MAX);
        self.input_height =
            DEFAULT_INPUT_HEIGHT.saturating_add(extra_lines.saturating_mul(INPUT_LINE_HEIGHT));
    }

    /// Inner markup of the message list, typing indicator included when shown.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (idx, message) in self.nodes.iter().enumerate() {
            if self.typing == TypingIndicator::Shown && idx == self.typing_anchor {
                html.push_str(&typing_node());
            }
            html.push_str(&render_node(message));
        }
        if self.typing == TypingIndicator::Shown && self.typing_anchor >= self.nodes.len() {
            html.push_str(&typing_node());
        }
        html
    }
}

impl ChatView for HtmlTranscript {
    fn append_message(&mut self, message: &Message) {
        self.nodes.push(message.clone());
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.input_height = DEFAULT_INPUT_HEIGHT;
    }

    fn set_typing(&mut self, indicator: TypingIndicator) {
        if indicator == TypingIndicator::Shown {
            self.typing_anchor = self.nodes.len();
        }
        self.typing = indicator;
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.type_input(value);
    }
}

/// Markup for one message node. The text is inserted verbatim.
pub fn render_node(message: &Message) -> String {
    format!(
        r#"<div class="message {}">{}</div>"#,
        message.sender(),
        message.text()
    )
}

fn typing_node() -> String {
    format!(
        r#"<div id="{}" class="typing-indicator" style="display: flex"><span></span><span></span><span></span></div>"#,
        dom::TYPING
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_node_uses_sender_class() {
        assert_eq!(
            render_node(&Message::user("hi")),
            r#"<div class="message user">hi</div>"#
        );
        assert_eq!(
            render_node(&Message::bot("<strong>x</strong>")),
            r#"<div class="message bot"><strong>x</strong></div>"#
        );
    }

    #[test]
    fn test_typing_indicator_follows_last_node_when_shown() {
        let mut view = HtmlTranscript::new();
        view.append_message(&Message::user("one"));
        view.set_typing(TypingIndicator::Shown);

        let html = view.to_html();
        assert!(html.starts_with(r#"<div class="message user">one</div>"#));
        assert!(html.ends_with("</span></div>"));
        assert!(html.contains(r#"id="typing""#));

        view.set_typing(TypingIndicator::Hidden);
        assert!(!view.to_html().contains("typing-indicator"));
    }

    #[test]
    fn test_typing_indicator_stays_put_while_replies_arrive() {
        let mut view = HtmlTranscript::new();
        view.append_message(&Message::user("one"));
        view.set_typing(TypingIndicator::Shown);
        view.append_message(&Message::bot("late"));

        let html = view.to_html();
        let typing_at = html.find("typing-indicator").unwrap();
        let late_at = html.find("late").unwrap();
        assert!(typing_at < late_at);
    }

    #[test]
    fn test_input_grows_and_resets() {
        let mut view = HtmlTranscript::new();
        view.type_input("a\nb\nc");
        assert_eq!(view.input_height(), DEFAULT_INPUT_HEIGHT + 2 * INPUT_LINE_HEIGHT);

        view.type_input("a\n");
        assert_eq!(view.input_height(), DEFAULT_INPUT_HEIGHT + INPUT_LINE_HEIGHT);

        view.clear_input();
        assert_eq!(view.input_value(), "");
        assert_eq!(view.input_height(), DEFAULT_INPUT_HEIGHT);
    }
}
