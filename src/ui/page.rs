//! Widget page template.
//!
//! Self-contained HTML/CSS/JS page: the four widget elements, the quick-reply
//! bar and the browser controller script. Runtime settings reach the script
//! through a JSON island, so the script itself is static.

use serde::Serialize;

use crate::config::{EndpointConfig, WidgetConfig};
use crate::widget::{DEFAULT_INPUT_HEIGHT, dom, escape_markup};

/// Settings read by the browser script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    endpoint: &'a str,
    fallback_message: &'a str,
    escape_markup: bool,
    input_height: u32,
}

/// Build the complete widget page.
pub fn build_widget_page(widget: &WidgetConfig, endpoint: &EndpointConfig) -> String {
    let title = escape_markup(&widget.title);
    let settings = script_config_json(&ScriptConfig {
        endpoint: &endpoint.path,
        fallback_message: &widget.fallback_message,
        escape_markup: widget.escape_markup,
        input_height: DEFAULT_INPUT_HEIGHT,
    });
    let quick_replies = quick_reply_bar(&widget.quick_replies);
    let messages = dom::MESSAGES;
    let user_input = dom::USER_INPUT;
    let send_button = dom::SEND_BUTTON;
    let typing = dom::TYPING;

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="chat-shell">
  <header class="chat-header"><h1>{title}</h1></header>
  <div class="messages" id="{messages}">
    <div class="typing-indicator" id="{typing}" style="display: none"><span></span><span></span><span></span></div>
  </div>
  {quick_replies}
  <div class="input-bar">
    <textarea id="{user_input}" placeholder="Type your message..." rows="1"></textarea>
    <button id="{send_button}" type="button">Send</button>
  </div>
  <p class="hint">Press Enter to send, Shift+Enter for new line</p>
</div>
<script type="application/json" id="widget-config">{settings}</script>
<script>{SCRIPT}</script>
</body>
</html>"##
    )
}

/// Serialize script settings so they can sit inside a `<script>` element.
fn script_config_json(config: &ScriptConfig<'_>) -> String {
    // Serializing a struct of strings and numbers cannot fail.
    let json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());
    json.replace("</", "<\\/")
}

fn quick_reply_bar(replies: &[String]) -> String {
    if replies.is_empty() {
        return String::new();
    }
    let buttons: String = replies
        .iter()
        .map(|reply| {
            let reply = escape_markup(reply);
            format!(r#"<button class="quick-reply" type="button" data-quick-reply="{reply}">{reply}</button>"#)
        })
        .collect();
    format!(r#"<div class="quick-replies">{buttons}</div>"#)
}

const STYLE: &str = r"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;background:#f4f6fb;color:#1f2937;height:100vh}
.chat-shell{max-width:720px;margin:0 auto;height:100vh;display:flex;flex-direction:column;background:#fff}
.chat-header{padding:16px 20px;border-bottom:1px solid #e5e7eb}
.chat-header h1{font-size:17px;font-weight:600}
.messages{flex:1;overflow-y:auto;padding:20px;display:flex;flex-direction:column;gap:10px}
.message{max-width:80%;padding:10px 14px;border-radius:14px;font-size:14px;line-height:1.5;word-wrap:break-word}
.message.user{align-self:flex-end;background:#2563eb;color:#fff}
.message.bot{align-self:flex-start;background:#f1f5f9}
.typing-indicator{align-self:flex-start;gap:4px;padding:12px 14px;background:#f1f5f9;border-radius:14px}
.typing-indicator span{width:6px;height:6px;border-radius:50%;background:#94a3b8;animation:blink 1.2s infinite}
.typing-indicator span:nth-child(2){animation-delay:.2s}
.typing-indicator span:nth-child(3){animation-delay:.4s}
@keyframes blink{0%,80%,100%{opacity:.3}40%{opacity:1}}
.quick-replies{display:flex;gap:8px;flex-wrap:wrap;padding:0 20px 10px}
.quick-reply{padding:6px 12px;border:1px solid #cbd5e1;border-radius:999px;background:#fff;cursor:pointer;font-size:13px}
.input-bar{padding:12px 20px;border-top:1px solid #e5e7eb;display:flex;gap:8px;align-items:flex-end}
.input-bar textarea{flex:1;height:52px;max-height:200px;padding:14px;border:1px solid #cbd5e1;border-radius:12px;font:inherit;resize:none;outline:none}
.input-bar button{height:52px;padding:0 20px;background:#2563eb;color:#fff;border:none;border-radius:12px;font-weight:600;cursor:pointer}
.hint{font-size:12px;color:#94a3b8;text-align:center;padding-bottom:8px}
";

const SCRIPT: &str = r"
(function () {
  const config = JSON.parse(document.getElementById('widget-config').textContent);
  const messagesArea = document.getElementById('messages');
  const userInput = document.getElementById('userInput');
  const sendBtn = document.getElementById('sendBtn');
  const typingIndicator = document.getElementById('typing');
  const defaultHeight = config.inputHeight + 'px';

  userInput.addEventListener('input', function () {
    this.style.height = 'auto';
    this.style.height = this.scrollHeight + 'px';
    if (this.value === '') this.style.height = defaultHeight;
  });

  userInput.addEventListener('keydown', function (e) {
    if (e.key === 'Enter' && !e.shiftKey) {
      e.preventDefault();
      sendMessage();
    }
  });

  sendBtn.addEventListener('click', sendMessage);

  document.querySelectorAll('[data-quick-reply]').forEach(function (button) {
    button.addEventListener('click', function () {
      userInput.value = button.dataset.quickReply;
      sendMessage();
    });
  });

  function escapeMarkup(text) {
    return text
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/\x22/g, '&quot;')
      .replace(/'/g, '&#39;');
  }

  function formatResponse(text) {
    let html = text.replace(/\n/g, '<br>');
    html = html.replace(/(Confirmation #:)/g, '<strong>$1</strong>');
    html = html.replace(/(Availability for .*?):/g, '<strong>$1</strong>:');
    return html.replace(/- /g, '• ');
  }

  function prepare(text) {
    return config.escapeMarkup ? escapeMarkup(text) : text;
  }

  async function sendMessage() {
    const text = userInput.value.trim();
    if (!text) return;

    addMessage(prepare(text), 'user');
    userInput.value = '';
    userInput.style.height = defaultHeight;
    showTyping(true);

    try {
      const response = await fetch(config.endpoint, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ message: text })
      });
      const data = await response.json();
      showTyping(false);
      addMessage(formatResponse(prepare(data.response)), 'bot');
    } catch (error) {
      showTyping(false);
      addMessage(prepare(config.fallbackMessage), 'bot');
      console.error('Error:', error);
    }
  }

  function addMessage(markup, sender) {
    const div = document.createElement('div');
    div.classList.add('message', sender);
    div.innerHTML = markup;
    messagesArea.appendChild(div);
    scrollToBottom();
  }

  function showTyping(show) {
    if (show) {
      messagesArea.appendChild(typingIndicator);
      typingIndicator.style.display = 'flex';
    } else {
      typingIndicator.style.display = 'none';
    }
    scrollToBottom();
  }

  function scrollToBottom() {
    messagesArea.scrollTop = messagesArea.scrollHeight;
  }
})();
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::FALLBACK_MESSAGE;

    fn widget_config(quick_replies: Vec<String>) -> WidgetConfig {
        WidgetConfig {
            title: "Sim <Booking>".to_string(),
            fallback_message: FALLBACK_MESSAGE.to_string(),
            escape_markup: false,
            quick_replies,
        }
    }

    fn endpoint_config() -> EndpointConfig {
        EndpointConfig {
            url: "http://127.0.0.1:3000/api/chat".to_string(),
            path: "/api/chat".to_string(),
            upstream_url: None,
        }
    }

    #[test]
    fn test_page_has_dom_contract() {
        let page = build_widget_page(&widget_config(Vec::new()), &endpoint_config());
        for id in [dom::MESSAGES, dom::USER_INPUT, dom::SEND_BUTTON, dom::TYPING] {
            assert!(page.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert!(!page.contains("quick-replies"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = build_widget_page(&widget_config(Vec::new()), &endpoint_config());
        assert!(page.contains("<title>Sim &lt;Booking&gt;</title>"));
    }

    #[test]
    fn test_quick_replies_rendered() {
        let page = build_widget_page(
            &widget_config(vec!["List devices".to_string(), "View cart".to_string()]),
            &endpoint_config(),
        );
        assert!(page.contains(r#"data-quick-reply="List devices""#));
        assert!(page.contains(">View cart</button>"));
    }

    #[test]
    fn test_script_config_cannot_close_script_tag() {
        let json = script_config_json(&ScriptConfig {
            endpoint: "/api/chat",
            fallback_message: "</script><script>alert(1)</script>",
            escape_markup: false,
            input_height: DEFAULT_INPUT_HEIGHT,
        });
        assert!(!json.contains("</script>"));
        assert!(json.contains(r#""endpoint":"/api/chat""#));
        assert!(json.contains(r#""inputHeight":52"#));
    }
}
