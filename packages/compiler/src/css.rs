//! Pass 1: style extraction.
//!
//! Every node gets an identifier and exactly one rule. Identifiers come from
//! the node's name when it has one, otherwise `{type}-{ordinal}` where the
//! ordinal is a pre-order counter shared by every page of the site.
//!
//! Two nodes that derive the same identifier share it when their rule
//! bodies are identical. Otherwise the later node is renamed to
//! `{identifier}-{ordinal}`, so one identifier never maps to two different
//! rule bodies.

use crate::animation::{animation_value, keyframe_steps, keyframes_name};
use crate::context::Context;
use crate::errors::{CompileError, CompileResult};
use crate::options::CompileOptions;
use crate::slug::slugify;
use sitecraft_document::{AnimationPreset, Node};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Convert a camelCase style key to a CSS property name
pub fn to_kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    // msTransform is the one vendor prefix written in lower case
    if property
        .strip_prefix("ms")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    {
        out.push('-');
    }
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// CSS rule for one identifier
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub identifier: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn selector(&self) -> String {
        format!(".{}", self.identifier)
    }
}

/// Characters that would end a declaration or rule early
const RULE_BREAKING: &[char] = &['{', '}', ';'];

fn checked(node: &Node, property: &str, value: &str) -> CompileResult<()> {
    if property.contains(RULE_BREAKING) || value.contains(RULE_BREAKING) {
        return Err(CompileError::InvalidStyle {
            node_id: node.id.clone(),
            property: property.to_string(),
        });
    }
    Ok(())
}

/// Declarations for a node: styles, then effects and animation on top, sorted
/// by property name. A key or value that could escape its rule is an error.
pub fn node_declarations(node: &Node) -> CompileResult<Vec<(String, String)>> {
    let mut declarations = BTreeMap::new();
    for (key, value) in &node.styles {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        checked(node, key, value)?;
        declarations.insert(to_kebab_case(key), value.to_string());
    }

    for (key, value) in node.effects.declarations() {
        checked(node, key, &value)?;
        declarations.insert(to_kebab_case(key), value);
    }
    if let Some(animation) = &node.animation {
        declarations.insert("animation".to_string(), animation_value(animation));
    }

    Ok(declarations.into_iter().collect())
}

/// Identifier a node asks for before collision handling
pub fn base_identifier(node: &Node, ordinal: usize) -> CompileResult<String> {
    let type_tag = node.node_type.tag();
    match node.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(format!("{}-{}", type_tag, ordinal)),
        Some(name) => {
            let slug = slugify(name);
            if slug.is_empty() {
                return Err(CompileError::InvalidIdentifier {
                    node_id: node.id.clone(),
                });
            }
            // class names cannot start with a digit
            if slug.starts_with(|c: char| c.is_ascii_digit()) {
                Ok(format!("{}-{}", type_tag, slug))
            } else {
                Ok(slug)
            }
        }
    }
}

/// Identifiers assigned in pass 1, keyed by (page index, node id)
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    by_node: HashMap<(usize, String), String>,
}

impl Identifiers {
    pub fn get(&self, page_index: usize, node_id: &str) -> Option<&str> {
        self.by_node
            .get(&(page_index, node_id.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

/// The extracted stylesheet
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
    pub keyframes: BTreeSet<AnimationPreset>,
}

impl Stylesheet {
    pub fn rule(&self, identifier: &str) -> Option<&CssRule> {
        self.rules.iter().find(|r| r.identifier == identifier)
    }

    pub fn to_css(&self, options: &CompileOptions) -> String {
        let mut ctx = Context::new(options);

        if options.reset_css {
            write_block(&mut ctx, "*, *::before, *::after", &[("box-sizing", "border-box")]);
            write_block(&mut ctx, "body", &[("margin", "0")]);
            write_block(&mut ctx, "img, video", &[("display", "block"), ("max-width", "100%")]);
        }

        for rule in &self.rules {
            let declarations: Vec<(&str, &str)> = rule
                .declarations
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            write_block(&mut ctx, &rule.selector(), &declarations);
        }

        for preset in &self.keyframes {
            ctx.add_line(&format!("@keyframes {} {{", keyframes_name(*preset)));
            ctx.indent();
            for (step, declarations) in keyframe_steps(*preset) {
                write_declarations(&mut ctx, step, declarations);
            }
            ctx.dedent();
            ctx.add_line("}");
            ctx.newline();
        }

        ctx.get_output()
    }
}

fn write_declarations(ctx: &mut Context, selector: &str, declarations: &[(&str, &str)]) {
    let separator = if ctx.options.pretty { " " } else { "" };
    ctx.add_line(&format!("{}{}{{", selector, separator));
    ctx.indent();
    for (key, value) in declarations {
        ctx.add_line(&format!("{}:{}{};", key, separator, value));
    }
    ctx.dedent();
    ctx.add_line("}");
}

fn write_block(ctx: &mut Context, selector: &str, declarations: &[(&str, &str)]) {
    write_declarations(ctx, selector, declarations);
    ctx.newline();
}

/// Walks pages in order and builds the stylesheet
#[derive(Debug, Default)]
pub struct StyleExtractor {
    ordinal: usize,
    rules: Vec<CssRule>,
    by_identifier: HashMap<String, usize>,
    identifiers: Identifiers,
    keyframes: BTreeSet<AnimationPreset>,
}

impl StyleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract one page. Pages must be visited in site order.
    pub fn extract_page(&mut self, page_index: usize, tree: &Node) -> CompileResult<()> {
        self.visit(page_index, tree)
    }

    fn visit(&mut self, page_index: usize, node: &Node) -> CompileResult<()> {
        self.ordinal += 1;
        let ordinal = self.ordinal;

        let base = base_identifier(node, ordinal)?;
        let declarations = node_declarations(node)?;
        if let Some(animation) = &node.animation {
            self.keyframes.insert(animation.preset);
        }
        let identifier = self.claim(base, ordinal, declarations);
        debug!(node_id = %node.id, %identifier, "Assigned identifier");
        self.identifiers
            .by_node
            .insert((page_index, node.id.clone()), identifier);

        for child in &node.children {
            self.visit(page_index, child)?;
        }
        Ok(())
    }

    fn claim(&mut self, base: String, ordinal: usize, declarations: Vec<(String, String)>) -> String {
        let mut candidate = base.clone();
        let mut attempt = 0;
        loop {
            match self.by_identifier.get(&candidate) {
                None => break,
                Some(&index) if self.rules[index].declarations == declarations => {
                    return candidate;
                }
                Some(_) => {
                    attempt += 1;
                    candidate = if attempt == 1 {
                        format!("{}-{}", base, ordinal)
                    } else {
                        format!("{}-{}-{}", base, ordinal, attempt)
                    };
                }
            }
        }

        if attempt > 0 {
            debug!(%base, identifier = %candidate, "Disambiguated identifier");
        }
        self.by_identifier.insert(candidate.clone(), self.rules.len());
        self.rules.push(CssRule {
            identifier: candidate.clone(),
            declarations,
        });
        candidate
    }

    pub fn finish(self) -> (Stylesheet, Identifiers) {
        info!(
            nodes = self.ordinal,
            rules = self.rules.len(),
            keyframes = self.keyframes.len(),
            "Style extraction complete"
        );
        (
            Stylesheet {
                rules: self.rules,
                keyframes: self.keyframes,
            },
            self.identifiers,
        )
    }
}
