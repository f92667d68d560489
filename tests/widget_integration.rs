//! End-to-end: the widget controller over a real HTTP transport.

mod common;

use chat_widget::error::TransportError;
use chat_widget::protocol::ChatRequest;
use chat_widget::transport::{ChatTransport, HttpTransport};
use chat_widget::widget::{
    ChatWidget, FALLBACK_MESSAGE, HtmlTranscript, Message, Sender, TypingIndicator,
};

use common::{closed_port_url, spawn_upstream, upstream_router};

async fn widget_for(path: &str, reply: &'static str) -> ChatWidget<HtmlTranscript, HttpTransport> {
    let upstream = spawn_upstream(upstream_router(reply)).await;
    let transport = HttpTransport::new(format!("{upstream}{path}")).expect("valid url");
    ChatWidget::new(HtmlTranscript::new(), transport)
}

#[tokio::test]
async fn test_hello_round_trip() {
    let widget = widget_for("/api/chat", "unused").await;

    widget.submit("hello").await;

    let view = widget.view();
    assert_eq!(view.messages()[0], Message::user("hello"));
    // The echo route returns the exact body it received.
    assert_eq!(view.messages()[1].text(), r#"{"message":"hello"}"#);
    assert_eq!(view.typing(), TypingIndicator::Hidden);
}

#[tokio::test]
async fn test_confirmation_reply_rendered() {
    let widget = widget_for("/reply", "Confirmation #: 123\n- item A\n- item B").await;

    widget.submit("book").await;

    assert_eq!(
        widget.view().to_html(),
        concat!(
            r#"<div class="message user">book</div>"#,
            r#"<div class="message bot"><strong>Confirmation #:</strong> 123<br>"#,
            "\u{2022} item A<br>\u{2022} item B</div>"
        )
    );
}

#[tokio::test]
async fn test_availability_reply_rendered() {
    let widget = widget_for("/reply", "Availability for Room 4: Yes").await;

    widget.submit("room 4?").await;

    assert_eq!(
        widget.view().messages()[1].text(),
        "<strong>Availability for Room 4</strong>: Yes"
    );
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let widget = widget_for("/html", "unused").await;

    widget.submit("hello").await;

    let view = widget.view();
    let bots: Vec<_> = view
        .messages()
        .iter()
        .filter(|m| m.sender() == Sender::Bot)
        .collect();
    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].text(), FALLBACK_MESSAGE);
    assert_eq!(view.typing(), TypingIndicator::Hidden);
}

#[tokio::test]
async fn test_error_status_with_json_body_is_a_reply() {
    let widget = widget_for("/degraded", "unused").await;

    widget.submit("hello").await;

    assert_eq!(widget.view().messages()[1], Message::bot("degraded"));
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    let transport = HttpTransport::new(closed_port_url().await).expect("valid url");

    let err = transport
        .send(&ChatRequest::new("hello"))
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, TransportError::Http(_)));

    let widget = ChatWidget::new(HtmlTranscript::new(), transport);
    widget.submit("hello").await;

    assert_eq!(widget.view().messages()[1], Message::bot(FALLBACK_MESSAGE));
}
