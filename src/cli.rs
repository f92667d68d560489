//! Terminal front end.
//!
//! Each stdin line is an Enter press in the widget's input. Submissions are
//! polled together on one task, so a slow reply never blocks typing the next
//! message.

use futures::stream::{FuturesUnordered, Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::info;

use crate::config::AppConfig;
use crate::transport::{ChatTransport, HttpTransport};
use crate::widget::{ChatView, ChatWidget, Key, TerminalView};

/// What a terminal line asks the widget to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// `/N`: send the N-th (1-based) quick reply.
    QuickReply(usize),
    /// Anything else is typed into the input and sent with Enter.
    Text(String),
}

impl TerminalInput {
    pub fn parse(line: &str, quick_replies: usize) -> Self {
        if let Some(n) = line.trim().strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            if (1..=quick_replies).contains(&n) {
                return Self::QuickReply(n - 1);
            }
        }
        Self::Text(line.to_string())
    }
}

/// Run the terminal widget against the configured endpoint until stdin closes.
pub async fn run_terminal(config: &AppConfig) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&config.endpoint.url)?;
    let widget = ChatWidget::new(TerminalView::new(std::io::stdout()), transport)
        .with_markup(config.widget.markup_mode())
        .with_fallback_message(config.widget.fallback_message.as_str());

    info!(
        name: "terminal.started",
        endpoint = %config.endpoint.url,
        "Terminal chat started"
    );

    println!("{}", config.widget.title);
    for (idx, reply) in config.widget.quick_replies.iter().enumerate() {
        println!("  /{} {reply}", idx + 1);
    }

    let lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    drive(&widget, &config.widget.quick_replies, lines).await
}

/// Feed input lines to `widget`, keeping every submission in flight until it
/// resolves. Returns once input is exhausted and all replies are rendered.
pub async fn drive<V, T, S>(
    widget: &ChatWidget<V, T>,
    quick_replies: &[String],
    mut lines: S,
) -> anyhow::Result<()>
where
    V: ChatView,
    T: ChatTransport,
    S: Stream<Item = std::io::Result<String>> + Unpin,
{
    let mut in_flight = FuturesUnordered::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next(), if input_open => match line {
                Some(line) => {
                    let input = TerminalInput::parse(&line?, quick_replies.len());
                    in_flight.push(dispatch(widget, quick_replies, input));
                }
                None => input_open = false,
            },
            Some(()) = in_flight.next(), if !in_flight.is_empty() => {}
            else => break,
        }
    }

    Ok(())
}

async fn dispatch<V: ChatView, T: ChatTransport>(
    widget: &ChatWidget<V, T>,
    quick_replies: &[String],
    input: TerminalInput,
) {
    match input {
        TerminalInput::QuickReply(idx) => widget.send_quick_message(&quick_replies[idx]).await,
        TerminalInput::Text(line) => {
            widget.view().set_input_value(&line);
            widget.handle_key(Key::Enter).await;
        }
    }
}
