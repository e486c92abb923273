use pulldown_cmark::{html, Event, Options, Parser};
use tfgchat_chat::Sender;

/// Render markdown to HTML, showing any raw HTML in the source as text
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Render a message body: bot replies as markdown, user text verbatim
pub fn render_message_content(sender: Sender, content: &str) -> String {
    match sender {
        Sender::Bot => render_markdown(content),
        Sender::User => crate::utils::escape_html(content).replace('\n', "<br>"),
    }
}
