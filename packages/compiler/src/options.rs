use serde::{Deserialize, Serialize};

/// Options for site compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Pretty print HTML and CSS
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// File name of the shared stylesheet
    pub stylesheet: String,
    /// Text larger than this (px) becomes `h1`
    pub h1_threshold: f32,
    /// Text larger than this (px) becomes `h2`
    pub h2_threshold: f32,
    /// Prepend a small box-model reset to the stylesheet
    pub reset_css: bool,
    /// Appended to every page title
    pub title_suffix: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            stylesheet: "styles.css".to_string(),
            h1_threshold: 32.0,
            h2_threshold: 24.0,
            reset_css: false,
            title_suffix: String::new(),
        }
    }
}
