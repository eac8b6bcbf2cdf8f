//! Type-keyed node factory.
//!
//! New nodes start from per-type defaults; author-supplied overrides are
//! layered on top.

use crate::id_generator::IDGenerator;
use crate::node::{DataMap, LayoutMode, Node, NodeType, Styles, ROOT_ID};
use serde::{Deserialize, Serialize};

/// Author-supplied values applied over factory defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOverrides {
    #[serde(default)]
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMap>,
}

impl NodeOverrides {
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Layer overrides on top of `node`; styles merge key by key
    pub fn apply_to(self, node: &mut Node) {
        node.styles.extend(self.styles);
        if let Some(content) = self.content {
            node.content = Some(content);
        }
        if let Some(name) = self.name {
            node.name = Some(name);
        }
        if let Some(layout_mode) = self.layout_mode {
            node.layout_mode = layout_mode;
        }
        if let Some(data) = self.data {
            node.data.get_or_insert_with(DataMap::new).extend(data);
        }
    }
}

fn styles(pairs: &[(&str, &str)]) -> Styles {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl NodeType {
    pub fn default_styles(self) -> Styles {
        match self {
            NodeType::Page => styles(&[
                ("backgroundColor", "#ffffff"),
                ("display", "flex"),
                ("flexDirection", "column"),
                ("minHeight", "100vh"),
            ]),
            NodeType::Section => styles(&[
                ("display", "flex"),
                ("flexDirection", "column"),
                ("gap", "16px"),
                ("padding", "48px 24px"),
                ("width", "100%"),
            ]),
            NodeType::Container => styles(&[
                ("display", "flex"),
                ("flexDirection", "column"),
                ("gap", "8px"),
                ("minHeight", "80px"),
                ("padding", "16px"),
                ("position", "relative"),
            ]),
            NodeType::Row => styles(&[
                ("display", "flex"),
                ("flexDirection", "row"),
                ("gap", "16px"),
            ]),
            NodeType::Column => styles(&[
                ("display", "flex"),
                ("flex", "1"),
                ("flexDirection", "column"),
                ("gap", "8px"),
            ]),
            NodeType::Text => styles(&[
                ("color", "#1f2937"),
                ("fontSize", "16px"),
                ("lineHeight", "1.5"),
            ]),
            NodeType::Image => styles(&[
                ("height", "160px"),
                ("objectFit", "cover"),
                ("width", "240px"),
            ]),
            NodeType::Video => styles(&[("height", "180px"), ("width", "320px")]),
            NodeType::Button => styles(&[
                ("backgroundColor", "#2563eb"),
                ("border", "none"),
                ("borderRadius", "6px"),
                ("color", "#ffffff"),
                ("cursor", "pointer"),
                ("padding", "10px 20px"),
            ]),
            NodeType::Icon => styles(&[("height", "24px"), ("width", "24px")]),
            NodeType::Product => styles(&[
                ("border", "1px solid #e5e7eb"),
                ("borderRadius", "8px"),
                ("display", "flex"),
                ("flexDirection", "column"),
                ("gap", "8px"),
                ("padding", "16px"),
                ("width", "240px"),
            ]),
            NodeType::Divider => styles(&[
                ("backgroundColor", "#e5e7eb"),
                ("border", "none"),
                ("height", "1px"),
                ("width", "100%"),
            ]),
            NodeType::Spacer => styles(&[("height", "32px"), ("width", "100%")]),
        }
    }

    pub fn default_content(self) -> Option<&'static str> {
        match self {
            NodeType::Text => Some("New text"),
            NodeType::Button => Some("Button"),
            NodeType::Image => Some("https://placehold.co/240x160"),
            NodeType::Icon => Some("star"),
            NodeType::Page
            | NodeType::Section
            | NodeType::Container
            | NodeType::Row
            | NodeType::Column
            | NodeType::Video
            | NodeType::Product
            | NodeType::Divider
            | NodeType::Spacer => None,
        }
    }
}

impl Node {
    /// Empty page root with default page styles
    pub fn root() -> Self {
        let mut node = Node::new(ROOT_ID, NodeType::Page);
        node.styles = NodeType::Page.default_styles();
        node
    }

    /// Build a node of `node_type` with its default styles, content and
    /// child skeleton. Ids (including the skeleton's) come from `ids`.
    pub fn create(node_type: NodeType, ids: &mut IDGenerator) -> Self {
        let mut node = Node::new(ids.new_id(), node_type);
        node.styles = node_type.default_styles();
        node.content = node_type.default_content().map(str::to_string);

        if node_type == NodeType::Product {
            let mut data = DataMap::new();
            data.insert("title".into(), "Product".into());
            data.insert("price".into(), "0.00".into());
            data.insert("currency".into(), "USD".into());
            node.data = Some(data);

            let image = Node::create(NodeType::Image, ids).with_style("width", "100%");
            let title = Node::create(NodeType::Text, ids)
                .with_content("Product")
                .with_style("fontSize", "18px")
                .with_style("fontWeight", "600");
            let price = Node::create(NodeType::Text, ids).with_content("$0.00");
            node.children = vec![image, title, price];
        }

        node
    }

    /// Factory defaults plus `overrides`
    pub fn create_with(node_type: NodeType, overrides: NodeOverrides, ids: &mut IDGenerator) -> Self {
        let mut node = Node::create(node_type, ids);
        overrides.apply_to(&mut node);
        node
    }
}
