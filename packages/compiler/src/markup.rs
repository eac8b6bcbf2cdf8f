//! Pass 2: markup emission.
//!
//! Tags come from an exhaustive table over [`NodeType`]. The one heuristic is
//! text, whose tag follows its resolved font size.

use crate::bundle::{LinkTable, PageTree};
use crate::context::Context;
use crate::css::Identifiers;
use crate::errors::{CompileError, CompileResult};
use crate::options::CompileOptions;
use sitecraft_document::{parse_px, Interaction, Node, NodeType};
use tracing::{debug, warn};

type Attributes = Vec<(&'static str, String)>;

/// HTML tag for a node
pub fn tag_for(node: &Node, options: &CompileOptions) -> &'static str {
    match node.node_type {
        NodeType::Page => "main",
        NodeType::Section => "section",
        NodeType::Container
        | NodeType::Row
        | NodeType::Column
        | NodeType::Product
        | NodeType::Spacer => "div",
        NodeType::Text => text_tag(node, options),
        NodeType::Image => "img",
        NodeType::Video => "video",
        NodeType::Button => "button",
        NodeType::Icon => {
            if node.content.as_deref().is_some_and(is_url) {
                "img"
            } else {
                "span"
            }
        }
        NodeType::Divider => "hr",
    }
}

fn text_tag(node: &Node, options: &CompileOptions) -> &'static str {
    let font_size = node.style("fontSize").and_then(parse_px).unwrap_or(0.0);
    if font_size > options.h1_threshold {
        "h1"
    } else if font_size > options.h2_threshold {
        "h2"
    } else {
        "p"
    }
}

fn is_url(content: &str) -> bool {
    let content = content.trim();
    ["http://", "https://", "data:", "/", "./"]
        .iter()
        .any(|prefix| content.starts_with(prefix))
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(tag, "img" | "hr" | "br" | "input" | "meta" | "link")
}

fn render_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

/// Render one page as a full HTML document
pub fn render_page(
    page: &PageTree,
    page_index: usize,
    identifiers: &Identifiers,
    links: &LinkTable,
    options: &CompileOptions,
) -> CompileResult<String> {
    let emitter = MarkupEmitter {
        page_index,
        identifiers,
        links,
    };
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!(
        "<title>{}</title>",
        escape_html(&format!("{}{}", page.name, options.title_suffix))
    ));
    ctx.add_line(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">",
        escape_html(&options.stylesheet)
    ));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    emitter.emit(&page.tree, &mut ctx)?;
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(page_id = %page.id, "Rendered page");
    Ok(ctx.get_output())
}

struct MarkupEmitter<'a> {
    page_index: usize,
    identifiers: &'a Identifiers,
    links: &'a LinkTable,
}

impl MarkupEmitter<'_> {
    fn emit(&self, node: &Node, ctx: &mut Context) -> CompileResult<()> {
        let identifier = self
            .identifiers
            .get(self.page_index, &node.id)
            .ok_or_else(|| CompileError::InvalidIdentifier {
                node_id: node.id.clone(),
            })?;

        let tag = tag_for(node, ctx.options);
        let mut attributes = Attributes::new();

        if let Some(html_id) = node.html_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            attributes.push(("id", html_id.to_string()));
        }
        let class = match node.class_name.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{} {}", identifier, extra),
            _ => identifier.to_string(),
        };
        attributes.push(("class", class));

        self.media_attributes(node, tag, &mut attributes)?;
        data_attributes(node, &mut attributes);

        match self.navigation_href(node) {
            // media keeps its element; the anchor goes around it
            Some(href) if matches!(tag, "img" | "video") => {
                ctx.add_line(&format!("<a href=\"{}\">", escape_html(&href)));
                ctx.indent();
                self.emit_element(node, tag, &attributes, ctx)?;
                ctx.dedent();
                ctx.add_line("</a>");
                Ok(())
            }
            Some(href) => {
                attributes.push(("href", href));
                self.emit_element(node, "a", &attributes, ctx)
            }
            None => self.emit_element(node, tag, &attributes, ctx),
        }
    }

    fn emit_element(
        &self,
        node: &Node,
        tag: &str,
        attributes: &Attributes,
        ctx: &mut Context,
    ) -> CompileResult<()> {
        let attrs = render_attributes(attributes);

        if is_self_closing(tag) {
            ctx.add_line(&format!("<{}{} />", tag, attrs));
            return Ok(());
        }

        let text = text_content(node).map(escape_html).unwrap_or_default();
        if node.children.is_empty() {
            ctx.add_line(&format!("<{}{}>{}</{}>", tag, attrs, text, tag));
            return Ok(());
        }

        ctx.add_line(&format!("<{}{}>", tag, attrs));
        ctx.indent();
        if !text.is_empty() {
            ctx.add_line(&text);
        }
        for child in &node.children {
            self.emit(child, ctx)?;
        }
        ctx.dedent();
        ctx.add_line(&format!("</{}>", tag));
        Ok(())
    }

    fn media_attributes(
        &self,
        node: &Node,
        tag: &str,
        attributes: &mut Attributes,
    ) -> CompileResult<()> {
        let source = node.content.as_deref().map(str::trim).unwrap_or_default();
        if node.node_type.is_media() && source.is_empty() {
            return Err(CompileError::MissingMediaSource {
                node_id: node.id.clone(),
                node_type: node.node_type.to_string(),
            });
        }

        match tag {
            "img" => {
                attributes.push(("src", source.to_string()));
                attributes.push(("alt", node.name.clone().unwrap_or_default()));
            }
            "video" => {
                attributes.push(("src", source.to_string()));
                attributes.push(("controls", "controls".to_string()));
            }
            _ => {}
        }
        Ok(())
    }

    fn navigation_href(&self, node: &Node) -> Option<String> {
        let Some(Interaction::NavigateToPage { page_id }) = &node.interaction else {
            return None;
        };
        match self.links.href(page_id) {
            Some(href) => Some(href),
            None => {
                warn!(node_id = %node.id, %page_id, "Link to unknown page");
                Some("#".to_string())
            }
        }
    }
}

/// Text rendered inside the element
fn text_content(node: &Node) -> Option<&str> {
    match node.node_type {
        NodeType::Text | NodeType::Button | NodeType::Icon => node.content.as_deref(),
        NodeType::Page
        | NodeType::Section
        | NodeType::Container
        | NodeType::Row
        | NodeType::Column
        | NodeType::Image
        | NodeType::Video
        | NodeType::Product
        | NodeType::Divider
        | NodeType::Spacer => None,
    }
}

fn data_attributes(node: &Node, attributes: &mut Attributes) {
    if node.node_type == NodeType::Product {
        if let Some(data) = &node.data {
            for (key, name) in [
                ("currency", "data-currency"),
                ("price", "data-price"),
                ("title", "data-title"),
            ] {
                let value = match data.get(key) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Number(n)) => n.to_string(),
                    _ => continue,
                };
                attributes.push((name, value));
            }
        }
    }

    if let Some(Interaction::OpenUrl { url, new_tab }) = &node.interaction {
        attributes.push(("data-href", url.clone()));
        if *new_tab {
            attributes.push(("data-target", "_blank".to_string()));
        }
    }
}
