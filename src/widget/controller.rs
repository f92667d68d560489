//! The chat widget controller.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error};

use super::format::MarkupMode;
use super::message::Message;
use crate::error::TransportError;
use crate::protocol::{ChatRequest, ChatResponse};
use crate::transport::ChatTransport;

/// Bubble shown when the endpoint cannot be reached or its reply cannot be
/// decoded.
pub const FALLBACK_MESSAGE: &str = "Sorry, I'm having trouble connecting to the server.";

/// Visibility of the typing indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypingIndicator {
    Shown,
    #[default]
    Hidden,
}

/// Keys the widget reacts to while the input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Plain Enter: send.
    Enter,
    /// Shift+Enter: newline, handled by the input itself.
    ShiftEnter,
    Other,
}

/// The four elements the widget is bound to.
///
/// Implementations render into whatever surface they own; the widget never
/// checks that the elements exist.
pub trait ChatView {
    /// Append a node to the message list and scroll to the bottom.
    fn append_message(&mut self, message: &Message);

    /// Clear the text input and reset its height.
    fn clear_input(&mut self);

    /// Show or hide the typing indicator. Showing moves it to the end of the
    /// message list.
    fn set_typing(&mut self, indicator: TypingIndicator);

    /// Current contents of the text input.
    fn input_value(&self) -> String;

    /// Replace the contents of the text input.
    fn set_input_value(&mut self, value: &str);
}

/// Controller binding a [`ChatView`] to a [`ChatTransport`].
///
/// Every operation takes `&self`, so several submissions can be awaited at
/// once on the same task. There is no in-flight guard; replies are rendered
/// in completion order.
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::transport::HttpTransport;
/// use chat_widget::widget::{ChatWidget, HtmlTranscript};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("http://localhost:3000/api/chat")?;
/// let widget = ChatWidget::new(HtmlTranscript::new(), transport);
///
/// widget.submit("Which simulators are free tomorrow?").await;
/// println!("{}", widget.view().to_html());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChatWidget<V, T> {
    view: Mutex<V>,
    transport: T,
    markup: MarkupMode,
    fallback_message: String,
}

impl<V: ChatView, T: ChatTransport> ChatWidget<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self {
            view: Mutex::new(view),
            transport,
            markup: MarkupMode::default(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_markup(mut self, markup: MarkupMode) -> Self {
        self.markup = markup;
        self
    }

    #[must_use]
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Lock the view for inspection.
    ///
    /// Do not hold the guard across an `.await` on this widget.
    pub fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `text` and render the outcome.
    ///
    /// Whitespace-only input is ignored. Otherwise the trimmed text is
    /// appended as a user message, the input is cleared, the typing indicator
    /// is shown and the request goes out. Resolves once the reply (or the
    /// fallback bubble) has been rendered.
    pub async fn submit(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        {
            let mut view = self.view();
            view.append_message(&Message::user(self.markup.user_text(text)));
            view.clear_input();
            view.set_typing(TypingIndicator::Shown);
        }

        debug!(name: "widget.submit", chars = text.len(), "Sending chat message");

        match self.transport.send(&ChatRequest::new(text)).await {
            Ok(payload) => self.on_response(&payload),
            Err(err) => self.on_transport_failure(&err),
        }
    }

    /// Submit whatever is currently in the input.
    pub async fn submit_input(&self) {
        let text = self.view().input_value();
        self.submit(&text).await;
    }

    /// Place `text` in the input and submit it, as a quick-reply button does.
    pub async fn send_quick_message(&self, text: &str) {
        self.view().set_input_value(text);
        self.submit_input().await;
    }

    /// React to a key press in the input. Only plain Enter submits.
    pub async fn handle_key(&self, key: Key) {
        if key == Key::Enter {
            self.submit_input().await;
        }
    }

    /// Render a decoded reply.
    pub fn on_response(&self, payload: &ChatResponse) {
        let mut view = self.view();
        view.set_typing(TypingIndicator::Hidden);
        view.append_message(&Message::bot(self.markup.reply_text(&payload.response)));
    }

    /// Render the fallback bubble for a failed round-trip.
    pub fn on_transport_failure(&self, err: &TransportError) {
        error!(name: "widget.transport.failed", error = %err, "Chat request failed");

        let mut view = self.view();
        view.set_typing(TypingIndicator::Hidden);
        view.append_message(&Message::bot(self.markup.user_text(&self.fallback_message)));
    }
}
