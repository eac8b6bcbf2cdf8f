//! Entrance animations. Each preset used anywhere in a site contributes one
//! `@keyframes` block to the stylesheet.

use sitecraft_document::{Animation, AnimationPreset};

type Step = (&'static str, &'static [(&'static str, &'static str)]);

/// Keyframes name for a preset
pub fn keyframes_name(preset: AnimationPreset) -> &'static str {
    match preset {
        AnimationPreset::FadeIn => "sc-fade-in",
        AnimationPreset::SlideUp => "sc-slide-up",
        AnimationPreset::SlideLeft => "sc-slide-left",
        AnimationPreset::ZoomIn => "sc-zoom-in",
        AnimationPreset::Bounce => "sc-bounce",
    }
}

/// Steps of a preset's `@keyframes` block
pub fn keyframe_steps(preset: AnimationPreset) -> &'static [Step] {
    match preset {
        AnimationPreset::FadeIn => &[("from", &[("opacity", "0")]), ("to", &[("opacity", "1")])],
        AnimationPreset::SlideUp => &[
            ("from", &[("opacity", "0"), ("transform", "translateY(24px)")]),
            ("to", &[("opacity", "1"), ("transform", "translateY(0)")]),
        ],
        AnimationPreset::SlideLeft => &[
            ("from", &[("opacity", "0"), ("transform", "translateX(24px)")]),
            ("to", &[("opacity", "1"), ("transform", "translateX(0)")]),
        ],
        AnimationPreset::ZoomIn => &[
            ("from", &[("opacity", "0"), ("transform", "scale(0.9)")]),
            ("to", &[("opacity", "1"), ("transform", "scale(1)")]),
        ],
        AnimationPreset::Bounce => &[
            ("0%, 100%", &[("transform", "translateY(0)")]),
            ("50%", &[("transform", "translateY(-12px)")]),
        ],
    }
}

/// Value of the `animation` shorthand for a node
pub fn animation_value(animation: &Animation) -> String {
    let easing = animation.easing.trim();
    // author text ends up inside a rule body
    let easing = if easing.is_empty() || easing.contains([';', '{', '}']) {
        "ease-out"
    } else {
        easing
    };
    format!(
        "{} {}ms {} {}ms both",
        keyframes_name(animation.preset),
        animation.duration_ms,
        easing,
        animation.delay_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_value() {
        let mut animation = Animation::new(AnimationPreset::SlideUp);
        animation.delay_ms = 150;
        assert_eq!(animation_value(&animation), "sc-slide-up 600ms ease-out 150ms both");
    }

    #[test]
    fn test_unsafe_easing_falls_back() {
        let mut animation = Animation::new(AnimationPreset::FadeIn);
        animation.easing = "linear; } body { display: none".to_string();
        assert_eq!(animation_value(&animation), "sc-fade-in 600ms ease-out 0ms both");
    }
}
