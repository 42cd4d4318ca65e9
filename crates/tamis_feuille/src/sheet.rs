//! Stylesheet splitting.
//!
//! [`Stylesheet::parse`] walks the source once, tracking brace depth while
//! skipping comments, strings and escapes, and produces the top-level rules
//! in source order. Everything at the top level that is not a block
//! (statement at-rules such as `@import`, and comments) is collected into
//! the preamble.
//!
//! Malformed input never fails the parse. A stray `}` is skipped and an
//! unterminated block keeps the rest of the input as its text; both are
//! reported as [`Diagnostic`]s.

use std::collections::BTreeSet;

use memchr::memmem;
use tamis_crible::is_utility_class;

use crate::selector::class_names;

/// At-rules whose body is a list of rules and is parsed one level deep.
const GROUP_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "container",
    "layer",
    "document",
    "-moz-document",
];

/// A plain `selector { declarations }` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule<'a> {
    /// Selector text, trimmed.
    pub selector: &'a str,
    /// Verbatim source from the selector start to the closing brace.
    pub text: &'a str,
}

/// A conditional group at-rule such as `@media` with its inner rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule<'a> {
    /// At-rule prelude, e.g. `@media (min-width: 768px)`.
    pub prelude: &'a str,
    /// Verbatim source of the whole block.
    pub text: &'a str,
    /// Rules inside the block. Never contains another `Group`.
    pub children: Vec<CssRule<'a>>,
}

/// A block at-rule kept as one opaque unit (`@keyframes`, `@font-face`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtBlock<'a> {
    pub prelude: &'a str,
    pub text: &'a str,
}

/// One rule of a parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule<'a> {
    Style(StyleRule<'a>),
    Group(GroupRule<'a>),
    AtBlock(AtBlock<'a>),
}

impl<'a> CssRule<'a> {
    /// Verbatim source text of the rule.
    pub fn text(&self) -> &'a str {
        match self {
            Self::Style(rule) => rule.text,
            Self::Group(rule) => rule.text,
            Self::AtBlock(rule) => rule.text,
        }
    }

    /// Selector of a style rule, prelude of an at-rule.
    pub fn prelude(&self) -> &'a str {
        match self {
            Self::Style(rule) => rule.selector,
            Self::Group(rule) => rule.prelude,
            Self::AtBlock(rule) => rule.prelude,
        }
    }
}

/// Kind of a splitter diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `}` with no open block.
    UnmatchedCloseBrace,
    /// A block still open at the end of its region.
    UnclosedBlock,
    /// A `/*` with no `*/`.
    UnclosedComment,
    /// A string ended by a newline or the end of input.
    UnclosedString,
}

impl DiagnosticKind {
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnmatchedCloseBrace => "closing brace has no matching selector",
            Self::UnclosedBlock => "block is never closed",
            Self::UnclosedComment => "comment is never closed",
            Self::UnclosedString => "string is never closed",
        }
    }
}

/// A problem found while splitting. Parsing continues after each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset into the source.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind.message())
    }
}

/// A stylesheet split into top-level rules.
#[derive(Debug, Clone)]
pub struct Stylesheet<'a> {
    source: &'a str,
    /// Non-block top-level text (imports, charset, comments), newline-joined.
    pub preamble: String,
    /// Top-level rules in source order.
    pub rules: Vec<CssRule<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Stylesheet<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut parser = Parser::new(source);
        let mut loose = Vec::new();
        let rules = parser.parse_region(0, source.len(), false, &mut loose);

        loose.retain(|s| !s.is_empty());
        let preamble = loose.join("\n");

        Self {
            source,
            preamble,
            rules,
            diagnostics: parser.diagnostics,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.preamble.is_empty()
    }

    /// Every style rule, including those inside group at-rules.
    pub fn style_rules(&self) -> Vec<&StyleRule<'a>> {
        let mut out = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            match rule {
                CssRule::Style(style) => out.push(style),
                CssRule::Group(group) => {
                    for child in &group.children {
                        if let CssRule::Style(style) = child {
                            out.push(style);
                        }
                    }
                }
                CssRule::AtBlock(_) => {}
            }
        }
        out
    }

    /// All utility classes this stylesheet defines a rule for, sorted.
    pub fn utility_classes(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for rule in self.style_rules() {
            for class in class_names(rule.selector) {
                if is_utility_class(&class) {
                    out.insert(class.into_owned());
                }
            }
        }
        out
    }
}

enum PreludeEnd {
    /// `{` at this offset.
    Block(usize),
    /// `;` at this offset.
    Statement(usize),
    /// Stray `}` at this offset.
    StrayClose(usize),
    /// Region ended first.
    Eof,
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        let line = memchr::memchr_iter(b'\n', &self.bytes[..offset]).count() + 1;
        self.diagnostics.push(Diagnostic { kind, offset, line });
    }

    /// Parse `[start, end)` into rules; non-block text goes to `loose`.
    fn parse_region(
        &mut self,
        start: usize,
        end: usize,
        nested: bool,
        loose: &mut Vec<&'a str>,
    ) -> Vec<CssRule<'a>> {
        let src = self.src;
        let mut rules = Vec::new();
        let mut pos = start;

        loop {
            while pos < end && self.bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos >= end {
                break;
            }

            if self.is_comment_start(pos, end) {
                match self.comment_end(pos, end) {
                    Some(after) => {
                        loose.push(&src[pos..after]);
                        pos = after;
                        continue;
                    }
                    None => {
                        loose.push(&src[pos..end]);
                        break;
                    }
                }
            }

            if self.bytes[pos] == b'}' {
                self.report(DiagnosticKind::UnmatchedCloseBrace, pos);
                pos += 1;
                continue;
            }

            match self.scan_prelude(pos, end) {
                PreludeEnd::Statement(semi) => {
                    loose.push(src[pos..=semi].trim());
                    pos = semi + 1;
                }
                PreludeEnd::StrayClose(brace) => {
                    loose.push(src[pos..brace].trim());
                    self.report(DiagnosticKind::UnmatchedCloseBrace, brace);
                    pos = brace + 1;
                }
                PreludeEnd::Eof => {
                    loose.push(src[pos..end].trim());
                    break;
                }
                PreludeEnd::Block(open) => {
                    let prelude = src[pos..open].trim();
                    let (body_end, text_end) = match self.block_end(open, end) {
                        Some(close) => (close, close + 1),
                        None => (end, end),
                    };
                    let text = &src[pos..text_end];

                    let rule = if prelude.starts_with('@') {
                        if !nested && is_group_at_rule(prelude) {
                            // Statements and comments inside a group are not preserved
                            // when the group is rebuilt from its children.
                            let mut inner_loose = Vec::new();
                            let children =
                                self.parse_region(open + 1, body_end, true, &mut inner_loose);
                            CssRule::Group(GroupRule {
                                prelude,
                                text,
                                children,
                            })
                        } else {
                            CssRule::AtBlock(AtBlock { prelude, text })
                        }
                    } else {
                        CssRule::Style(StyleRule {
                            selector: prelude,
                            text,
                        })
                    };

                    rules.push(rule);
                    pos = text_end;
                }
            }
        }

        rules
    }

    #[inline]
    fn is_comment_start(&self, pos: usize, end: usize) -> bool {
        pos + 1 < end && self.bytes[pos] == b'/' && self.bytes[pos + 1] == b'*'
    }

    /// Offset just past the `*/` closing the comment at `pos`.
    fn comment_end(&mut self, pos: usize, end: usize) -> Option<usize> {
        match memmem::find(&self.bytes[pos + 2..end], b"*/") {
            Some(rel) => Some(pos + 2 + rel + 2),
            None => {
                self.report(DiagnosticKind::UnclosedComment, pos);
                None
            }
        }
    }

    /// Offset just past the string opened at `pos`.
    ///
    /// An unescaped newline ends a broken string; parsing resumes there.
    fn string_end(&mut self, pos: usize, end: usize) -> Option<usize> {
        let quote = self.bytes[pos];
        let mut i = pos + 1;
        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => {
                    self.report(DiagnosticKind::UnclosedString, pos);
                    return Some(i);
                }
                b if b == quote => return Some(i + 1),
                _ => i += 1,
            }
        }
        self.report(DiagnosticKind::UnclosedString, pos);
        None
    }

    fn scan_prelude(&mut self, pos: usize, end: usize) -> PreludeEnd {
        let mut i = pos;
        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'"' | b'\'' => match self.string_end(i, end) {
                    Some(after) => i = after,
                    None => return PreludeEnd::Eof,
                },
                b'/' if self.is_comment_start(i, end) => match self.comment_end(i, end) {
                    Some(after) => i = after,
                    None => return PreludeEnd::Eof,
                },
                b'{' => return PreludeEnd::Block(i),
                b';' => return PreludeEnd::Statement(i),
                b'}' => return PreludeEnd::StrayClose(i),
                _ => i += 1,
            }
        }
        PreludeEnd::Eof
    }

    /// Offset of the `}` matching the `{` at `open`.
    fn block_end(&mut self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 1u32;
        let mut i = open + 1;
        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'"' | b'\'' => i = self.string_end(i, end)?,
                b'/' if self.is_comment_start(i, end) => i = self.comment_end(i, end)?,
                b'{' => {
                    depth += 1;
                    i += 1;
                }
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
        self.report(DiagnosticKind::UnclosedBlock, open);
        None
    }
}

fn is_group_at_rule(prelude: &str) -> bool {
    let name = prelude[1..]
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .next()
        .unwrap_or_default();
    GROUP_AT_RULES
        .iter()
        .any(|group| group.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(rules: &[CssRule<'a>]) -> Vec<&'a str> {
        rules.iter().map(CssRule::text).collect()
    }

    #[test]
    fn test_parse_minified_rules() {
        let sheet =
            Stylesheet::parse(":root{--x:1}\n.flex{display:flex}\n.unused-xyz{color:red}\n.p-4{padding:1rem}");
        assert_eq!(
            texts(&sheet.rules),
            [
                ":root{--x:1}",
                ".flex{display:flex}",
                ".unused-xyz{color:red}",
                ".p-4{padding:1rem}"
            ]
        );
        assert!(sheet.preamble.is_empty());
        assert!(sheet.diagnostics.is_empty());
        assert_eq!(sheet.rules[1].prelude(), ".flex");
    }

    #[test]
    fn test_preamble_collects_statements_and_comments() {
        let css = "@charset \"utf-8\";\n/*! banner */\n@import url(\"a;b.css\");\n.flex { display: flex; }\n@layer base, utilities;";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            sheet.preamble,
            "@charset \"utf-8\";\n/*! banner */\n@import url(\"a;b.css\");\n@layer base, utilities;"
        );
        assert_eq!(texts(&sheet.rules), [".flex { display: flex; }"]);
    }

    #[test]
    fn test_media_block_is_one_group() {
        let css = "@media (min-width: 768px) { .a { color: red; } .b { color: blue; } }\n.c{x:y}";
        let sheet = Stylesheet::parse(css);
        assert_eq!(sheet.rules.len(), 2);

        let CssRule::Group(group) = &sheet.rules[0] else {
            panic!("expected group, got {:?}", sheet.rules[0]);
        };
        assert_eq!(group.prelude, "@media (min-width: 768px)");
        assert_eq!(
            group.text,
            "@media (min-width: 768px) { .a { color: red; } .b { color: blue; } }"
        );
        assert_eq!(
            texts(&group.children),
            [".a { color: red; }", ".b { color: blue; }"]
        );
        assert_eq!(sheet.rules[1].text(), ".c{x:y}");
    }

    #[test]
    fn test_keyframes_are_opaque() {
        let css = "@keyframes spin { from { transform: rotate(0) } to { transform: rotate(360deg) } }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(sheet.rules.len(), 1);
        assert!(matches!(&sheet.rules[0], CssRule::AtBlock(block) if block.prelude == "@keyframes spin"));
        assert_eq!(sheet.rules[0].text(), css);
    }

    #[test]
    fn test_group_inside_group_is_opaque() {
        let css = "@supports (display: grid) { @media print { .a { x: y } } .b { x: y } }";
        let sheet = Stylesheet::parse(css);
        let CssRule::Group(group) = &sheet.rules[0] else {
            panic!("expected group");
        };
        assert!(matches!(group.children[0], CssRule::AtBlock(_)));
        assert!(matches!(group.children[1], CssRule::Style(_)));
    }

    #[test]
    fn test_braces_in_strings_and_comments_do_not_count() {
        let css = ".a::after { content: \"}\"; }\n.b { /* { */ color: red; }\n.c[title='{'] { x: y }";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            texts(&sheet.rules),
            [
                ".a::after { content: \"}\"; }",
                ".b { /* { */ color: red; }",
                ".c[title='{'] { x: y }"
            ]
        );
        assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn test_escaped_brace_in_selector() {
        let sheet = Stylesheet::parse(".w-\\{x\\} { width: 1px }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].prelude(), ".w-\\{x\\}");
    }

    #[test]
    fn test_nested_rule_body_stays_in_parent() {
        let css = ".card { color: red; &:hover { color: blue; } }\n.x{y:z}";
        let sheet = Stylesheet::parse(css);
        assert_eq!(
            texts(&sheet.rules),
            [".card { color: red; &:hover { color: blue; } }", ".x{y:z}"]
        );
    }

    #[test]
    fn test_stray_close_brace_is_reported() {
        let sheet = Stylesheet::parse(".a{x:y}}\n.b{x:y}");
        assert_eq!(texts(&sheet.rules), [".a{x:y}", ".b{x:y}"]);
        assert_eq!(sheet.diagnostics.len(), 1);
        assert_eq!(
            sheet.diagnostics[0].kind,
            DiagnosticKind::UnmatchedCloseBrace
        );
        assert_eq!(sheet.diagnostics[0].offset, 7);
        assert_eq!(sheet.diagnostics[0].line, 1);
    }

    #[test]
    fn test_unclosed_block_keeps_remainder() {
        let sheet = Stylesheet::parse(".a{x:y}\n.b{x:y");
        assert_eq!(texts(&sheet.rules), [".a{x:y}", ".b{x:y"]);
        assert_eq!(sheet.diagnostics.len(), 1);
        assert_eq!(sheet.diagnostics[0].kind, DiagnosticKind::UnclosedBlock);
        assert_eq!(sheet.diagnostics[0].line, 2);
        assert_eq!(
            sheet.diagnostics[0].to_string(),
            "line 2: block is never closed"
        );
    }

    #[test]
    fn test_unclosed_comment_is_reported() {
        let sheet = Stylesheet::parse(".a{x:y}\n/* trailing");
        assert_eq!(texts(&sheet.rules), [".a{x:y}"]);
        assert_eq!(sheet.preamble, "/* trailing");
        assert_eq!(sheet.diagnostics[0].kind, DiagnosticKind::UnclosedComment);
    }

    #[test]
    fn test_style_rules_include_group_children() {
        let sheet = Stylesheet::parse(".a{} @media print { .b{} } @font-face { font-family: x }");
        let selectors: Vec<&str> = sheet.style_rules().iter().map(|r| r.selector).collect();
        assert_eq!(selectors, [".a", ".b"]);
    }

    #[test]
    fn test_utility_classes() {
        let sheet = Stylesheet::parse(
            ".flex{} .card{} .p-4:hover{} @media (min-width: 1px) { .grid, .btn {} } .flex{}",
        );
        let classes: Vec<String> = sheet.utility_classes().into_iter().collect();
        assert_eq!(classes, ["flex", "grid", "p-4"]);
    }

    #[test]
    fn test_empty_input() {
        let sheet = Stylesheet::parse("  \n ");
        assert!(sheet.is_empty());
        assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn test_group_at_rule_names() {
        assert!(is_group_at_rule("@media screen"));
        assert!(is_group_at_rule("@MEDIA screen"));
        assert!(is_group_at_rule("@supports(display:grid)"));
        assert!(is_group_at_rule("@layer utilities"));
        assert!(!is_group_at_rule("@keyframes spin"));
        assert!(!is_group_at_rule("@font-face"));
        assert!(!is_group_at_rule("@"));
    }
}
