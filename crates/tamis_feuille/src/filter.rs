//! Rule filters.
//!
//! Optimize, critical extraction and chunking are the same traversal with a
//! different keep-predicate. A [`RuleFilter`] decides per style rule from its
//! class selectors and selector text; [`apply_filter`] walks the parsed
//! rules in order and joins the kept rule texts with newlines.
//!
//! Group at-rules are decided by their children: the group is emitted when
//! at least one child is kept. Opaque at-rules are judged by their prelude
//! as a rule without class selectors.

use std::borrow::Cow;

use tamis_crible::UsedClasses;

use crate::selector::{class_names, has_base_marker};
use crate::sheet::{CssRule, Stylesheet};

/// Keep-predicate for one filtering pass.
pub trait RuleFilter {
    /// Whether a rule with these class selectors and selector text is kept.
    fn keep(&self, classes: &[Cow<'_, str>], selector: &str) -> bool;

    /// Whether the stylesheet preamble is prepended to the output.
    fn include_preamble(&self) -> bool {
        true
    }
}

/// Keeps rules for used classes and every rule without a class selector.
#[derive(Debug, Clone, Copy)]
pub struct UsedFilter<'s> {
    pub used: &'s UsedClasses,
}

impl RuleFilter for UsedFilter<'_> {
    fn keep(&self, classes: &[Cow<'_, str>], _selector: &str) -> bool {
        classes.is_empty() || classes.iter().any(|c| self.used.contains(c.as_ref()))
    }
}

/// Keeps rules for critical classes and class-free base styles.
#[derive(Debug, Clone, Copy)]
pub struct CriticalFilter<'s> {
    pub critical: &'s UsedClasses,
}

impl RuleFilter for CriticalFilter<'_> {
    fn keep(&self, classes: &[Cow<'_, str>], selector: &str) -> bool {
        if classes.is_empty() {
            return has_base_marker(selector);
        }
        classes.iter().any(|c| self.critical.contains(c.as_ref()))
    }
}

/// Keeps rules with a class selector matching one of the prefixes.
///
/// A class matches a prefix when it starts with it, or equals it with its
/// first `-` removed (`space-` also matches `space`). Rules without class
/// selectors never match, and the preamble is never included.
#[derive(Debug, Clone, Copy)]
pub struct ChunkFilter<'p> {
    pub prefixes: &'p [&'p str],
}

impl ChunkFilter<'_> {
    pub fn matches(&self, class: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| class.starts_with(prefix) || equals_without_first_dash(class, prefix))
    }
}

impl RuleFilter for ChunkFilter<'_> {
    fn keep(&self, classes: &[Cow<'_, str>], _selector: &str) -> bool {
        classes.iter().any(|c| self.matches(c))
    }

    fn include_preamble(&self) -> bool {
        false
    }
}

fn equals_without_first_dash(class: &str, prefix: &str) -> bool {
    match prefix.find('-') {
        None => class == prefix,
        Some(dash) => {
            class.len() + 1 == prefix.len()
                && class.starts_with(&prefix[..dash])
                && class[dash..] == prefix[dash + 1..]
        }
    }
}

/// Run `filter` over every rule of `sheet`.
pub fn apply_filter(sheet: &Stylesheet<'_>, filter: &impl RuleFilter) -> String {
    let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(sheet.rules.len() + 1);

    if filter.include_preamble() && !sheet.preamble.is_empty() {
        out.push(Cow::Borrowed(sheet.preamble.as_str()));
    }

    out.extend(
        sheet
            .rules
            .iter()
            .filter_map(|rule| filter_rule(rule, filter)),
    );

    out.join("\n")
}

fn filter_rule<'a>(rule: &CssRule<'a>, filter: &impl RuleFilter) -> Option<Cow<'a, str>> {
    match rule {
        CssRule::Style(style) => {
            let classes = class_names(style.selector);
            filter
                .keep(&classes, style.selector)
                .then_some(Cow::Borrowed(style.text))
        }
        CssRule::AtBlock(block) => filter
            .keep(&[], block.prelude)
            .then_some(Cow::Borrowed(block.text)),
        CssRule::Group(group) => {
            let kept: Vec<Cow<'a, str>> = group
                .children
                .iter()
                .filter_map(|child| filter_rule(child, filter))
                .collect();

            if kept.is_empty() {
                None
            } else if kept.len() == group.children.len() {
                Some(Cow::Borrowed(group.text))
            } else {
                let mut text = String::with_capacity(group.prelude.len() + 4);
                text.push_str(group.prelude);
                text.push_str(" {\n");
                text.push_str(&kept.join("\n"));
                text.push_str("\n}");
                Some(Cow::Owned(text))
            }
        }
    }
}

/// Rules for used classes plus every class-free rule, preamble first.
pub fn optimize_css(sheet: &Stylesheet<'_>, used: &UsedClasses) -> String {
    apply_filter(sheet, &UsedFilter { used })
}

/// Rules for critical classes plus base styles, preamble first.
pub fn extract_critical(sheet: &Stylesheet<'_>, critical: &UsedClasses) -> String {
    apply_filter(sheet, &CriticalFilter { critical })
}
