//! # Sitecraft Compiler
//!
//! Compiles finalized page trees into a static bundle: one shared stylesheet
//! plus one HTML document per page.
//!
//! Compilation is two depth-first passes over a snapshot:
//!
//! 1. **Style extraction** assigns every node an identifier and a CSS rule,
//!    sharing identifiers between nodes whose rules are identical
//! 2. **Markup emission** renders each page, referencing those identifiers
//!
//! The output is deterministic (same input, byte-identical bundle) and
//! all-or-nothing: any [`CompileError`] means no bundle.

mod animation;
mod bundle;
mod context;
mod css;
mod errors;
mod markup;
mod options;
mod slug;

pub use animation::{animation_value, keyframes_name};
pub use bundle::{Bundle, LinkTable, PageTree, Site};
pub use css::{
    base_identifier, node_declarations, to_kebab_case, CssRule, Identifiers, StyleExtractor,
    Stylesheet,
};
pub use errors::{CompileError, CompileResult};
pub use markup::{escape_html, render_page, tag_for};
pub use options::CompileOptions;
pub use slug::slugify;

use sitecraft_document::Node;
use tracing::{info, instrument};

/// Compile a site
#[instrument(skip(pages, options), fields(pages = pages.len()))]
pub fn compile_site(pages: &[PageTree], options: &CompileOptions) -> CompileResult<Bundle> {
    info!("Starting site compilation");

    let links = LinkTable::from_pages(pages)?;
    for page in pages {
        page.tree
            .validate()
            .map_err(|source| CompileError::InvalidTree {
                page_id: page.id.clone(),
                source,
            })?;
    }

    let mut extractor = StyleExtractor::new();
    for (index, page) in pages.iter().enumerate() {
        extractor.extract_page(index, &page.tree)?;
    }
    let (stylesheet, identifiers) = extractor.finish();

    let mut bundle = Bundle::new();
    for (index, page) in pages.iter().enumerate() {
        let html = render_page(page, index, &identifiers, &links, options)?;
        bundle.insert(format!("{}.html", page.slug()), html);
    }
    bundle.insert(options.stylesheet.clone(), stylesheet.to_css(options));

    info!(files = bundle.len(), rules = stylesheet.rules.len(), "Site compilation complete");
    Ok(bundle)
}

/// Compile a single tree as a one-page site
pub fn compile_page(name: &str, tree: &Node, options: &CompileOptions) -> CompileResult<Bundle> {
    compile_site(&[PageTree::new("page", name, tree.clone())], options)
}
