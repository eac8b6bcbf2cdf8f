//! Structured visual effects.
//!
//! Shadows, gradients and filters are stored as records and only turned into
//! CSS text when the document is compiled, so editing a slider never has to
//! parse a previously generated string.

use crate::units::format_number;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.shadow.is_none() && self.gradient.is_none() && self.filter.is_none()
    }

    /// CSS declarations as (camelCase property, value) pairs
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(shadow) = &self.shadow {
            out.push(("boxShadow", shadow.to_css()));
        }
        if let Some(gradient) = &self.gradient {
            if let Some(css) = gradient.to_css() {
                out.push(("backgroundImage", css));
            }
        }
        if let Some(filter) = &self.filter {
            if let Some(css) = filter.to_css() {
                out.push(("filter", css));
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    #[serde(default)]
    pub spread: f32,
    pub color: String,
    #[serde(default)]
    pub inset: bool,
}

impl Shadow {
    pub fn to_css(&self) -> String {
        let body = format!(
            "{} {} {} {} {}",
            px(self.x),
            px(self.y),
            px(self.blur),
            px(self.spread),
            self.color
        );
        if self.inset {
            format!("inset {}", body)
        } else {
            body
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    /// Degrees, CSS convention (0 = to top)
    pub angle: f32,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    /// 0..=100
    pub position: f32,
}

impl Gradient {
    /// `None` when there are fewer than two stops
    pub fn to_css(&self) -> Option<String> {
        if self.stops.len() < 2 {
            return None;
        }
        let stops = self
            .stops
            .iter()
            .map(|stop| format!("{} {}%", stop.color, format_number(stop.position)))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("linear-gradient({}deg, {})", format_number(self.angle), stops))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub blur: f32,
    #[serde(default = "one")]
    pub brightness: f32,
    #[serde(default = "one")]
    pub contrast: f32,
    #[serde(default)]
    pub grayscale: f32,
    #[serde(default = "one")]
    pub saturate: f32,
}

fn one() -> f32 {
    1.0
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            blur: 0.0,
            brightness: 1.0,
            contrast: 1.0,
            grayscale: 0.0,
            saturate: 1.0,
        }
    }
}

impl Filter {
    /// Only functions that differ from the identity are emitted
    pub fn to_css(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.blur != 0.0 {
            parts.push(format!("blur({})", px(self.blur)));
        }
        if self.brightness != 1.0 {
            parts.push(format!("brightness({})", format_number(self.brightness)));
        }
        if self.contrast != 1.0 {
            parts.push(format!("contrast({})", format_number(self.contrast)));
        }
        if self.grayscale != 0.0 {
            parts.push(format!("grayscale({})", format_number(self.grayscale)));
        }
        if self.saturate != 1.0 {
            parts.push(format!("saturate({})", format_number(self.saturate)));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

fn px(value: f32) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", format_number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_css() {
        let shadow = Shadow {
            x: 0.0,
            y: 4.0,
            blur: 12.5,
            spread: 0.0,
            color: "rgba(0,0,0,0.2)".to_string(),
            inset: false,
        };
        assert_eq!(shadow.to_css(), "0 4px 12.5px 0 rgba(0,0,0,0.2)");

        let inset = Shadow { inset: true, ..shadow };
        assert!(inset.to_css().starts_with("inset "));
    }

    #[test]
    fn test_gradient_needs_two_stops() {
        let mut gradient = Gradient {
            angle: 90.0,
            stops: vec![ColorStop {
                color: "#fff".to_string(),
                position: 0.0,
            }],
        };
        assert_eq!(gradient.to_css(), None);

        gradient.stops.push(ColorStop {
            color: "#000".to_string(),
            position: 100.0,
        });
        assert_eq!(
            gradient.to_css().as_deref(),
            Some("linear-gradient(90deg, #fff 0%, #000 100%)")
        );
    }

    #[test]
    fn test_identity_filter_is_omitted() {
        assert_eq!(Filter::default().to_css(), None);

        let filter = Filter {
            blur: 2.0,
            grayscale: 0.5,
            ..Filter::default()
        };
        assert_eq!(filter.to_css().as_deref(), Some("blur(2px) grayscale(0.5)"));
    }

    #[test]
    fn test_declarations_order() {
        let effects = Effects {
            shadow: Some(Shadow {
                x: 1.0,
                y: 1.0,
                blur: 0.0,
                spread: 0.0,
                color: "black".to_string(),
                inset: false,
            }),
            gradient: None,
            filter: Some(Filter {
                contrast: 1.2,
                ..Filter::default()
            }),
        };
        let names: Vec<_> = effects.declarations().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["boxShadow", "filter"]);
    }
}
