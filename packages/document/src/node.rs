use crate::effects::Effects;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved id of every document root
pub const ROOT_ID: &str = "root";

/// Style property (camelCase) → CSS value
pub type Styles = BTreeMap<String, String>;

/// Free-form property bag (product data, etc.)
pub type DataMap = serde_json::Map<String, serde_json::Value>;

/// Closed set of node kinds.
///
/// Every consumer (factory, serializer) matches on this exhaustively, so
/// adding a kind forces each site to decide how to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Page,
    Section,
    Container,
    Row,
    Column,
    Text,
    Image,
    Video,
    Button,
    Icon,
    Product,
    Divider,
    Spacer,
}

impl NodeType {
    pub const ALL: [NodeType; 13] = [
        NodeType::Page,
        NodeType::Section,
        NodeType::Container,
        NodeType::Row,
        NodeType::Column,
        NodeType::Text,
        NodeType::Image,
        NodeType::Video,
        NodeType::Button,
        NodeType::Icon,
        NodeType::Product,
        NodeType::Divider,
        NodeType::Spacer,
    ];

    /// Lower-case name, as used in JSON and derived identifiers
    pub fn tag(self) -> &'static str {
        match self {
            NodeType::Page => "page",
            NodeType::Section => "section",
            NodeType::Container => "container",
            NodeType::Row => "row",
            NodeType::Column => "column",
            NodeType::Text => "text",
            NodeType::Image => "image",
            NodeType::Video => "video",
            NodeType::Button => "button",
            NodeType::Icon => "icon",
            NodeType::Product => "product",
            NodeType::Divider => "divider",
            NodeType::Spacer => "spacer",
        }
    }

    /// Whether nodes of this kind may own children
    pub fn accepts_children(self) -> bool {
        match self {
            NodeType::Page
            | NodeType::Section
            | NodeType::Container
            | NodeType::Row
            | NodeType::Column
            | NodeType::Product => true,
            NodeType::Text
            | NodeType::Image
            | NodeType::Video
            | NodeType::Button
            | NodeType::Icon
            | NodeType::Divider
            | NodeType::Spacer => false,
        }
    }

    /// Media kinds carry a URL in `content`
    pub fn is_media(self) -> bool {
        matches!(self, NodeType::Image | NodeType::Video)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a container places its children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Flow layout: position follows child order
    #[default]
    Stack,
    /// Children carry explicit `top`/`left` offsets
    Free,
}

/// Entrance animation compiled to CSS keyframes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub preset: AnimationPreset,
    #[serde(default = "default_duration")]
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default = "default_easing")]
    pub easing: String,
}

fn default_duration() -> u32 {
    600
}

fn default_easing() -> String {
    "ease-out".to_string()
}

impl Animation {
    pub fn new(preset: AnimationPreset) -> Self {
        Self {
            preset,
            duration_ms: default_duration(),
            delay_ms: 0,
            easing: default_easing(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationPreset {
    FadeIn,
    SlideUp,
    SlideLeft,
    ZoomIn,
    Bounce,
}

/// What happens when a visitor activates the node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Interaction {
    /// Link to another page of the same site
    #[serde(rename_all = "camelCase")]
    NavigateToPage { page_id: String },

    /// Open an external URL
    #[serde(rename_all = "camelCase")]
    OpenUrl {
        url: String,
        #[serde(default)]
        new_tab: bool,
    },
}

/// One element of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,

    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Author-facing name, drives export identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Text for text/button nodes, URL for media and icons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default)]
    pub children: Vec<Node>,

    #[serde(default)]
    pub layout_mode: LayoutMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Effects::is_empty")]
    pub effects: Effects,
}

impl Node {
    /// Bare node with no defaults applied
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: None,
            content: None,
            styles: Styles::new(),
            children: Vec::new(),
            layout_mode: LayoutMode::Stack,
            animation: None,
            interaction: None,
            data: None,
            html_id: None,
            class_name: None,
            effects: Effects::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// Whether the node is placed by explicit offsets rather than flow
    pub fn is_positioned(&self) -> bool {
        matches!(
            self.styles.get("position").map(String::as_str),
            Some("absolute") | Some("fixed")
        )
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_layout_mode(mut self, layout_mode: LayoutMode) -> Self {
        self.layout_mode = layout_mode;
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = Some(interaction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_uses_type_tag() {
        let node = Node::new("hero", NodeType::Section).with_style("padding", "24px");
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "section");
        assert_eq!(json["layoutMode"], "stack");
        assert_eq!(json["styles"]["padding"], "24px");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let node: Node = serde_json::from_str(r#"{ "id": "t", "type": "text" }"#).unwrap();
        assert_eq!(node.node_type, NodeType::Text);
        assert!(node.styles.is_empty());
        assert!(node.children.is_empty());
        assert_eq!(node.layout_mode, LayoutMode::Stack);
    }

    #[test]
    fn test_interaction_serialization() {
        let json = r#"{ "kind": "navigateToPage", "pageId": "about" }"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(
            interaction,
            Interaction::NavigateToPage {
                page_id: "about".to_string()
            }
        );
    }

    #[test]
    fn test_only_containers_accept_children() {
        assert!(NodeType::Section.accepts_children());
        assert!(NodeType::Product.accepts_children());
        assert!(!NodeType::Text.accepts_children());
        assert!(!NodeType::Image.accepts_children());
    }

    #[test]
    fn test_positioned_detection() {
        let flow = Node::new("a", NodeType::Container);
        let free = Node::new("b", NodeType::Image).with_style("position", "absolute");
        assert!(!flow.is_positioned());
        assert!(free.is_positioned());
    }
}
