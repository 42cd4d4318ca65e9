//! Utility class classification.
//!
//! A token is a utility class when it matches one of a fixed, ordered list
//! of patterns. The list is the single source of truth for what the
//! optimizer treats as "recognized" utilities: a class that none of these
//! patterns accepts is never recorded as used, so its rules are dropped
//! from optimized output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Category of the first pattern that accepted a class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UtilityCategory {
    /// `flex`, `grid`, `block`, `hidden`, `absolute`, ...
    Layout,
    /// `p-4`, `mx-2`, `mt-8`, ...
    Spacing,
    /// `text-*`, `bg-*`, `border-*`
    Color,
    /// `w-full`, `h-12`, `max-w-auto`, ...
    Sizing,
    /// `font-*`, `leading-*`, `tracking-*`
    Typography,
    /// `rounded-*`, `shadow-*`, `opacity-*`
    Effect,
    /// `transition-*`, `transform-*`, `animate-*`
    Animation,
    /// `space-x-*`, `space-y-*`, `gap-*`, `divide-*`
    Gap,
    /// `top-*`, `inset-*`, ...
    Position,
    /// `z-*`, `order-*`
    Stacking,
}

impl UtilityCategory {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Spacing => "spacing",
            Self::Color => "color",
            Self::Sizing => "sizing",
            Self::Typography => "typography",
            Self::Effect => "effect",
            Self::Animation => "animation",
            Self::Gap => "gap",
            Self::Position => "position",
            Self::Stacking => "stacking",
        }
    }
}

impl std::fmt::Display for UtilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled entry of the utility pattern list.
#[derive(Debug)]
pub struct UtilityPattern {
    pub category: UtilityCategory,
    regex: Regex,
}

impl UtilityPattern {
    #[inline]
    pub fn is_match(&self, class_name: &str) -> bool {
        self.regex.is_match(class_name)
    }

    /// Source of the underlying regular expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

const PATTERN_SOURCES: &[(UtilityCategory, &str)] = &[
    (
        UtilityCategory::Layout,
        r"^(flex|grid|block|inline|hidden|relative|absolute|fixed|sticky)$",
    ),
    (
        UtilityCategory::Spacing,
        r"^(p|m|px|py|mx|my|pl|pr|pt|pb|ml|mr|mt|mb)-[0-9]+$",
    ),
    (UtilityCategory::Color, r"^(text|bg|border)-.+"),
    (
        UtilityCategory::Sizing,
        r"^(w|h|min-w|min-h|max-w|max-h)-(full|auto|[0-9]+)$",
    ),
    (UtilityCategory::Typography, r"^(font|text|leading|tracking)-.+"),
    (UtilityCategory::Effect, r"^(rounded|shadow|opacity)-.*"),
    (UtilityCategory::Animation, r"^(transition|transform|animate)-.*"),
    (UtilityCategory::Gap, r"^(space-[xy]|gap|divide)-.*"),
    (UtilityCategory::Position, r"^(top|right|bottom|left|inset)-.*"),
    (UtilityCategory::Stacking, r"^(z|order)-.*"),
];

static UTILITY_PATTERNS: Lazy<Vec<UtilityPattern>> = Lazy::new(|| {
    PATTERN_SOURCES
        .iter()
        .map(|&(category, source)| UtilityPattern {
            category,
            regex: Regex::new(source).expect("Invalid utility pattern"),
        })
        .collect()
});

/// The ordered utility pattern list.
pub fn utility_patterns() -> &'static [UtilityPattern] {
    &UTILITY_PATTERNS
}

/// Category of the first pattern accepting `class_name`.
pub fn classify(class_name: &str) -> Option<UtilityCategory> {
    if class_name.is_empty() {
        return None;
    }
    UTILITY_PATTERNS
        .iter()
        .find(|pattern| pattern.is_match(class_name))
        .map(|pattern| pattern.category)
}

/// Whether `class_name` looks like a utility class.
#[inline]
pub fn is_utility_class(class_name: &str) -> bool {
    classify(class_name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_keywords_match_exactly() {
        for name in [
            "flex", "grid", "block", "inline", "hidden", "relative", "absolute", "fixed", "sticky",
        ] {
            assert_eq!(classify(name), Some(UtilityCategory::Layout), "{name}");
        }
        assert!(!is_utility_class("flex-col"));
        assert!(!is_utility_class("inline-block"));
        assert!(!is_utility_class("flexbox"));
    }

    #[test]
    fn test_spacing_requires_digits() {
        assert_eq!(classify("p-4"), Some(UtilityCategory::Spacing));
        assert_eq!(classify("mb-12"), Some(UtilityCategory::Spacing));
        assert!(!is_utility_class("p-auto"));
        assert!(!is_utility_class("p-"));
        // Only ASCII digits count
        assert!(!is_utility_class("p-٤"));
    }

    #[test]
    fn test_color_wins_over_typography() {
        assert_eq!(classify("text-red-500"), Some(UtilityCategory::Color));
        assert_eq!(classify("text-lg"), Some(UtilityCategory::Color));
        assert_eq!(classify("font-bold"), Some(UtilityCategory::Typography));
        assert_eq!(classify("leading-tight"), Some(UtilityCategory::Typography));
    }

    #[test]
    fn test_sizing() {
        assert_eq!(classify("w-full"), Some(UtilityCategory::Sizing));
        assert_eq!(classify("max-h-auto"), Some(UtilityCategory::Sizing));
        assert_eq!(classify("h-16"), Some(UtilityCategory::Sizing));
        assert!(!is_utility_class("w-1/2"));
        assert!(!is_utility_class("w-screen"));
    }

    #[test]
    fn test_dash_prefixed_families() {
        assert_eq!(classify("rounded-lg"), Some(UtilityCategory::Effect));
        assert_eq!(classify("shadow-"), Some(UtilityCategory::Effect));
        assert_eq!(classify("animate-spin"), Some(UtilityCategory::Animation));
        assert_eq!(classify("space-x-4"), Some(UtilityCategory::Gap));
        assert_eq!(classify("gap-2"), Some(UtilityCategory::Gap));
        assert_eq!(classify("inset-0"), Some(UtilityCategory::Position));
        assert_eq!(classify("z-50"), Some(UtilityCategory::Stacking));
        assert_eq!(classify("order-first"), Some(UtilityCategory::Stacking));
    }

    #[test]
    fn test_bare_family_names_are_not_utilities() {
        assert!(!is_utility_class("rounded"));
        assert!(!is_utility_class("shadow"));
        assert!(!is_utility_class("transition"));
        assert!(!is_utility_class("space-z-4"));
    }

    #[test]
    fn test_rejects_non_utilities() {
        assert!(!is_utility_class(""));
        assert!(!is_utility_class("card"));
        assert!(!is_utility_class("hover:bg-blue-500"));
        assert!(!is_utility_class("btn-primary"));
    }

    #[test]
    fn test_pattern_list_is_ordered() {
        let patterns = utility_patterns();
        assert_eq!(patterns.len(), 10);
        assert_eq!(patterns[0].category, UtilityCategory::Layout);
        assert_eq!(patterns[9].category, UtilityCategory::Stacking);
        assert!(patterns[1].as_str().starts_with("^(p|m|px"));
    }
}
