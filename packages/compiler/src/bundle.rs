//! Compiler input (pages, link table) and output (bundle).

use crate::errors::{CompileError, CompileResult};
use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use sitecraft_document::Node;
use std::collections::BTreeMap;

/// One finalized page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTree {
    pub id: String,
    pub name: String,
    /// File name override; defaults to the slug of `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub tree: Node,
}

impl PageTree {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tree: Node) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: None,
            tree,
        }
    }

    pub fn slug(&self) -> String {
        slugify(self.slug.as_deref().unwrap_or(&self.name))
    }
}

/// Contents of a `*.site.json` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub pages: Vec<PageTree>,
}

impl Site {
    pub fn from_json(json: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CompileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Page id → slug, used to resolve navigation links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkTable {
    slugs: BTreeMap<String, String>,
}

impl LinkTable {
    /// Derive slugs for every page, rejecting empty and duplicate ones
    pub fn from_pages(pages: &[PageTree]) -> CompileResult<Self> {
        let mut slugs = BTreeMap::new();
        let mut owners: BTreeMap<String, &str> = BTreeMap::new();

        for page in pages {
            let slug = page.slug();
            if slug.is_empty() {
                return Err(CompileError::InvalidPageSlug {
                    page_id: page.id.clone(),
                });
            }
            if let Some(first) = owners.insert(slug.clone(), &page.id) {
                return Err(CompileError::DuplicatePage {
                    slug,
                    first: first.to_string(),
                    second: page.id.clone(),
                });
            }
            slugs.insert(page.id.clone(), slug);
        }

        Ok(Self { slugs })
    }

    pub fn slug(&self, page_id: &str) -> Option<&str> {
        self.slugs.get(page_id).map(String::as_str)
    }

    /// Relative href of a page's HTML file
    pub fn href(&self, page_id: &str) -> Option<String> {
        self.slug(page_id).map(|slug| format!("{}.html", slug))
    }
}

/// Compiled site: relative path → file content, iterated in path order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bundle {
    files: BTreeMap<String, String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: impl Into<String>, content: String) {
        self.files.insert(path.into(), content);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
    }
}
