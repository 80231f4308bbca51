// HTML rendering for the chat page
//
// Plain string building. Every piece of user or dataset text goes through
// `html_escape` before it reaches the page.

use crate::session::HistoryEntry;

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 0; background: #fafafa; }
.main-container {
    background: linear-gradient(to bottom right, #e3f2fd, #f3e5f5);
    border-radius: 15px;
    padding: 2rem;
    margin: 1rem;
    box-shadow: 0 4px 20px rgba(0,0,0,0.1);
}
.columns { display: flex; gap: 2rem; }
.sidebar { flex: 1; }
.chat { flex: 3; }
.question-box {
    background-color:#1976D2;
    color:#FFFFFF;
    padding:10px;
    border-radius:10px;
    margin:5px 0;
    font-size:14px;
}
.response-box {
    background-color:#2E7D32;
    color:#FFFFFF;
    padding:12px;
    border-radius:15px;
    margin-top:15px;
    font-size:16px;
}
.emotion-box {
    color:#FFFFFF;
    padding:12px;
    border-left:5px solid #fff;
    border-radius:8px;
    font-size:16px;
    margin-top:15px;
}
.transcript-entry { margin: 4px 0; font-size: 14px; }
.notice { color: #B71C1C; margin-top: 10px; }
.history-empty { color: #777; font-style: italic; }
</style>"#;

/// Escape text for HTML bodies and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Labels and presentation for the message just submitted
#[derive(Debug, Clone, Copy)]
pub struct ExchangeView<'a> {
    pub reply: &'a str,
    pub emotion: &'a str,
    pub color: &'a str,
    pub media_url: Option<&'a str>,
}

/// Everything the page needs
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub questions: &'a [String],
    pub messages: &'a [HistoryEntry],
    pub exchange: Option<ExchangeView<'a>>,
    /// Shown under the form when a submission was refused
    pub notice: Option<&'a str>,
}

/// Render the whole page
#[must_use]
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Chatbot</title>\n");
    html.push_str(STYLE);
    html.push_str("\n</head>\n<body>\n<div class=\"main-container\">\n");
    html.push_str(
        "<h2 style=\"text-align: center; color: #3F51B5;\">🤖 Friendly Fun Chatbot &amp; Sentiment Detector</h2>\n",
    );
    html.push_str(
        "<p style=\"text-align: center; font-size:18px;\">Talk like a friend. I reply &amp; feel your emotion too 💬❤️</p>\n",
    );
    html.push_str("<div class=\"columns\">\n");

    html.push_str(&render_sidebar(view.questions));

    html.push_str("<div class=\"chat\">\n");
    html.push_str(&render_form());
    if let Some(notice) = view.notice {
        html.push_str(&format!("<p class=\"notice\">{}</p>\n", html_escape(notice)));
    }
    if let Some(exchange) = &view.exchange {
        html.push_str(&render_exchange(exchange));
    }
    html.push_str(&render_transcript(view.messages));
    html.push_str("</div>\n</div>\n</div>\n");

    html.push_str("<hr>\n<center><small style=\"color:#555;\">Made with ❤️ • Chat + Mood Aware</small></center>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Left column: asked questions and the clear button
#[must_use]
pub fn render_sidebar(questions: &[String]) -> String {
    let mut html = String::from("<div class=\"sidebar\">\n<h4>📜 Your Asked Questions</h4>\n");
    html.push_str(
        "<form method=\"post\" action=\"/clear\"><button type=\"submit\">🧹 Clear Chat</button></form>\n",
    );
    for question in questions {
        html.push_str(&format!(
            "<div class=\"question-box\"><b>You:</b> {}</div>\n",
            html_escape(question)
        ));
    }
    html.push_str("</div>\n");
    html
}

fn render_form() -> String {
    r#"<form method="post" action="/message" autocomplete="off">
<label for="message">💬 Type your message:</label>
<input type="text" id="message" name="message" placeholder="Yedhachum Pesu Daa" autofocus>
<button type="submit">Send</button>
</form>
"#
    .to_string()
}

/// Emotion box, bot response and optional media player
#[must_use]
pub fn render_exchange(exchange: &ExchangeView<'_>) -> String {
    let mut html = format!(
        "<div class=\"emotion-box\" style=\"background-color:{};\">🔔 <b>Detected Emotion:</b> {}</div>\n",
        html_escape(exchange.color),
        html_escape(&exchange.emotion.to_uppercase())
    );
    html.push_str(&format!(
        "<div class=\"response-box\"><b>Bot:</b> {}</div>\n",
        html_escape(exchange.reply)
    ));
    if let Some(url) = exchange.media_url {
        html.push_str(&format!(
            "<iframe style=\"border-radius:12px; margin-top:10px;\" src=\"{}\" width=\"100%\" height=\"152\" frameborder=\"0\" \
             allow=\"autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture\" loading=\"lazy\"></iframe>\n",
            html_escape(url)
        ));
    }
    html
}

/// Full (speaker, text) transcript of the session
#[must_use]
pub fn render_transcript(messages: &[HistoryEntry]) -> String {
    if messages.is_empty() {
        return "<div class=\"transcript\"><p class=\"history-empty\">No messages yet</p></div>\n"
            .to_string();
    }

    let mut html = String::from("<div class=\"transcript\">\n");
    for entry in messages {
        html.push_str(&format!(
            "<div class=\"transcript-entry\"><b>{}:</b> {}</div>\n",
            entry.speaker.as_str(),
            html_escape(&entry.text)
        ));
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionHistory;

    #[test]
    fn html_escape_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"it's\""), "&quot;it&#x27;s&quot;");
    }

    #[test]
    fn render_exchange_with_media() {
        let html = render_exchange(&ExchangeView {
            reply: "Cheer up!",
            emotion: "sad",
            color: "#E53935",
            media_url: Some("https://open.spotify.com/embed/playlist/x"),
        });
        assert!(html.contains("background-color:#E53935;"));
        assert!(html.contains("Detected Emotion:</b> SAD"));
        assert!(html.contains("<b>Bot:</b> Cheer up!"));
        assert!(html.contains("<iframe"));
        assert!(html.contains("src=\"https://open.spotify.com/embed/playlist/x\""));
    }

    #[test]
    fn render_exchange_without_media() {
        let html = render_exchange(&ExchangeView {
            reply: "ok",
            emotion: "neutral",
            color: "#616161",
            media_url: None,
        });
        assert!(!html.contains("<iframe"));
        assert!(html.contains("NEUTRAL"));
    }

    #[test]
    fn render_escapes_user_text() {
        let mut history = SessionHistory::new();
        history.record("<b>bold</b>", "reply & more");
        let html = render_page(&PageView {
            questions: history.questions(),
            messages: history.messages(),
            exchange: None,
            notice: None,
        });
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("reply &amp; more"));
    }

    #[test]
    fn render_empty_page() {
        let html = render_page(&PageView {
            questions: &[],
            messages: &[],
            exchange: None,
            notice: None,
        });
        assert!(html.contains("No messages yet"));
        assert!(html.contains("Clear Chat"));
        assert!(!html.contains("question-box\">"));
        assert!(!html.contains("Detected Emotion"));
        assert!(!html.contains("class=\"notice\""));
    }

    #[test]
    fn render_notice_is_escaped() {
        let html = render_page(&PageView {
            questions: &[],
            messages: &[],
            exchange: None,
            notice: Some("too <long>"),
        });
        assert!(html.contains("<p class=\"notice\">too &lt;long&gt;</p>"));
    }
}
