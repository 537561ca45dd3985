//! Terminal rendering of the transcript.
//!
//! `ChatRenderer` formats single messages: bot content goes through
//! `termimad`, followed by a "Recommended Products:" block when the reply
//! carries links. `PanelView` keeps the panel's own view of the widget and
//! turns [`WidgetEvent`]s into text to print; nothing is shown while the
//! panel is closed.

use console::style;
use termimad::MadSkin;

use rakkchat_types::chat::{ChatMessage, MessageRole, ProductLink};
use rakkchat_types::event::WidgetEvent;

/// Heading printed above a reply's product links.
pub const PRODUCTS_HEADING: &str = "Recommended Products:";

/// Markdown renderer for chat messages.
pub struct ChatRenderer {
    skin: MadSkin,
    title: String,
}

impl ChatRenderer {
    /// Create a renderer labelling bot messages with `title`.
    pub fn new(title: impl Into<String>) -> Self {
        let mut skin = MadSkin::default_dark();
        let accent = termimad::crossterm::style::Color::Cyan;
        skin.bold.set_fg(accent);
        skin.headers[0].set_fg(accent);
        skin.headers[1].set_fg(accent);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            title: title.into(),
        }
    }

    /// Render one message, including its product links.
    pub fn render_message(&self, message: &ChatMessage) -> String {
        match message.role {
            MessageRole::User => format!(
                "  {} {}\n",
                style("You >").green().bold(),
                message.content
            ),
            MessageRole::Bot => {
                let mut out = format!("\n  {}\n", style(&self.title).cyan().bold());
                let body = self.skin.term_text(&message.content).to_string();
                for line in body.lines() {
                    out.push_str(&format!("  {line}\n"));
                }
                if let Some(links) = format_product_links(&message.product_links) {
                    out.push_str(&links);
                }
                out.push('\n');
                out
            }
        }
    }

    /// Render a whole transcript.
    pub fn render_transcript(&self, messages: &[ChatMessage]) -> String {
        if messages.is_empty() {
            return format!("  {}\n\n", style("No messages yet. Say hello!").dim());
        }
        messages.iter().map(|m| self.render_message(m)).collect()
    }
}

/// The "Recommended Products:" block, or `None` when there are no links.
///
/// Each link is listed as `name -> url`, in the order the service gave them.
pub fn format_product_links(links: &[ProductLink]) -> Option<String> {
    if links.is_empty() {
        return None;
    }

    let mut out = format!("\n  {}\n", style(PRODUCTS_HEADING).bold());
    for link in links {
        out.push_str(&format!(
            "    {} {} {}\n",
            style("-").dim(),
            link.name,
            style(format!("-> {}", link.url)).cyan().underlined()
        ));
    }
    Some(out)
}

/// The panel's view of the widget, driven by widget events.
pub struct PanelView {
    renderer: ChatRenderer,
    open: bool,
}

impl PanelView {
    pub fn new(renderer: ChatRenderer) -> Self {
        Self {
            renderer,
            open: false,
        }
    }

    /// Apply one event and return the text to print, if any.
    ///
    /// User messages arriving live are not echoed: the prompt line already
    /// shows them. They do appear when history is replayed.
    pub fn apply(&mut self, event: &WidgetEvent) -> Option<String> {
        match event {
            WidgetEvent::PanelToggled { open } => {
                self.open = *open;
                if *open {
                    None
                } else {
                    Some(format!(
                        "  {}\n",
                        style("Panel closed. /open to show the conversation.").dim()
                    ))
                }
            }
            WidgetEvent::HistoryReplaced { messages } if self.open => Some(format!(
                "  {}\n{}",
                style("--- conversation ---").dim(),
                self.renderer.render_transcript(messages)
            )),
            WidgetEvent::MessageAppended { message } if self.open && message.is_bot() => {
                Some(self.renderer.render_message(message))
            }
            WidgetEvent::TranscriptCleared => Some(format!(
                "  {}\n\n",
                style("Signed out. Conversation cleared.").dim()
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).to_string()
    }

    fn jacket_reply() -> ChatMessage {
        ChatMessage::bot(
            "Here are some",
            vec![ProductLink::new("/product_info/1", "Jacket A")],
        )
    }

    #[test]
    fn test_product_links_block() {
        let block = format_product_links(&[
            ProductLink::new("/product_info/1", "Jacket A"),
            ProductLink::new("/product_info/2", "Jacket B"),
        ])
        .unwrap();
        let block = plain(&block);

        assert!(block.contains(PRODUCTS_HEADING));
        let a = block.find("Jacket A -> /product_info/1").unwrap();
        let b = block.find("Jacket B -> /product_info/2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_no_links_no_block() {
        assert!(format_product_links(&[]).is_none());

        let renderer = ChatRenderer::new("Assistant");
        let out = plain(&renderer.render_message(&ChatMessage::bot("Hello", Vec::new())));
        assert!(out.contains("Hello"));
        assert!(!out.contains(PRODUCTS_HEADING));
    }

    #[test]
    fn test_bot_message_includes_title_and_links() {
        let renderer = ChatRenderer::new("RakkGears Assistant");
        let out = plain(&renderer.render_message(&jacket_reply()));

        assert!(out.contains("RakkGears Assistant"));
        assert!(out.contains("Here are some"));
        assert!(out.contains("Jacket A -> /product_info/1"));
    }

    #[test]
    fn test_closed_panel_renders_nothing() {
        let mut view = PanelView::new(ChatRenderer::new("Assistant"));

        assert!(!view.open);
        assert!(view
            .apply(&WidgetEvent::MessageAppended { message: jacket_reply() })
            .is_none());
        assert!(view
            .apply(&WidgetEvent::HistoryReplaced { messages: vec![jacket_reply()] })
            .is_none());
    }

    #[test]
    fn test_open_panel_renders_history_and_bot_replies() {
        let mut view = PanelView::new(ChatRenderer::new("Assistant"));
        view.apply(&WidgetEvent::PanelToggled { open: true });

        let history = view
            .apply(&WidgetEvent::HistoryReplaced {
                messages: vec![ChatMessage::user("hi"), ChatMessage::bot("hello", Vec::new())],
            })
            .unwrap();
        let history = plain(&history);
        assert!(history.find("hi").unwrap() < history.find("hello").unwrap());

        assert!(view
            .apply(&WidgetEvent::MessageAppended { message: ChatMessage::user("again") })
            .is_none());
        let reply = view
            .apply(&WidgetEvent::MessageAppended { message: jacket_reply() })
            .unwrap();
        assert!(plain(&reply).contains(PRODUCTS_HEADING));
    }

    #[test]
    fn test_closing_stops_rendering() {
        let mut view = PanelView::new(ChatRenderer::new("Assistant"));
        view.apply(&WidgetEvent::PanelToggled { open: true });
        assert!(view.apply(&WidgetEvent::PanelToggled { open: false }).is_some());

        assert!(!view.open);
        assert!(view
            .apply(&WidgetEvent::MessageAppended { message: jacket_reply() })
            .is_none());
    }

    #[test]
    fn test_cleared_transcript_is_announced() {
        let mut view = PanelView::new(ChatRenderer::new("Assistant"));
        let out = view.apply(&WidgetEvent::TranscriptCleared).unwrap();
        assert!(plain(&out).contains("Conversation cleared"));
    }

    #[test]
    fn test_empty_history_placeholder() {
        let renderer = ChatRenderer::new("Assistant");
        assert!(plain(&renderer.render_transcript(&[])).contains("No messages yet"));
    }
}
