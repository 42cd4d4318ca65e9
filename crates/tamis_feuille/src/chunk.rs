//! Category chunks.
//!
//! A chunk is the slice of the stylesheet for one utility family, emitted
//! as its own file so pages can load only what they use. Chunks are purely
//! additive: they carry class rules only, never the preamble or base styles.

use serde::Serialize;

use crate::filter::{apply_filter, ChunkFilter};
use crate::sheet::Stylesheet;

/// The fixed chunk categories, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkCategory {
    Layout,
    Spacing,
    Typography,
    Colors,
    Borders,
    Effects,
    Animations,
}

impl ChunkCategory {
    pub const ALL: [ChunkCategory; 7] = [
        Self::Layout,
        Self::Spacing,
        Self::Typography,
        Self::Colors,
        Self::Borders,
        Self::Effects,
        Self::Animations,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Colors => "colors",
            Self::Borders => "borders",
            Self::Effects => "effects",
            Self::Animations => "animations",
        }
    }

    /// Class name prefixes selecting this chunk's rules.
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Layout => &[
                "flex", "grid", "block", "inline", "hidden", "relative", "absolute", "fixed",
                "sticky",
            ],
            Self::Spacing => &["p-", "m-", "px-", "py-", "mx-", "my-", "space-", "gap-"],
            Self::Typography => &[
                "text-",
                "font-",
                "leading-",
                "tracking-",
                "uppercase",
                "lowercase",
                "capitalize",
            ],
            Self::Colors => &["bg-", "text-", "border-", "ring-", "divide-"],
            Self::Borders => &["border", "rounded", "ring-", "divide-"],
            Self::Effects => &["shadow", "opacity-", "blur-", "brightness-", "contrast-"],
            Self::Animations => &["transition", "transform", "animate-", "duration-", "ease-"],
        }
    }

    pub fn filter(self) -> ChunkFilter<'static> {
        ChunkFilter {
            prefixes: self.prefixes(),
        }
    }

    /// Chunk that lazily provides `class`, or `None` for the general bundle.
    pub fn for_utility(class: &str) -> Option<Self> {
        const LOOKUP: &[(&str, ChunkCategory)] = &[
            ("flex", ChunkCategory::Layout),
            ("grid", ChunkCategory::Layout),
            ("p-", ChunkCategory::Spacing),
            ("m-", ChunkCategory::Spacing),
            ("text-", ChunkCategory::Typography),
            ("bg-", ChunkCategory::Colors),
            ("border-", ChunkCategory::Borders),
            ("rounded", ChunkCategory::Borders),
            ("shadow", ChunkCategory::Effects),
            ("transition", ChunkCategory::Animations),
        ];

        LOOKUP
            .iter()
            .find(|(prefix, _)| class.starts_with(prefix))
            .map(|&(_, category)| category)
    }
}

impl std::fmt::Display for ChunkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// CSS of one category chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub category: ChunkCategory,
    pub css: String,
}

impl Chunk {
    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    /// Output file name, e.g. `layout.css`.
    pub fn file_name(&self) -> String {
        let mut name = String::with_capacity(self.name().len() + 4);
        name.push_str(self.name());
        name.push_str(".css");
        name
    }
}

/// Rules of `sheet` belonging to `category`.
pub fn extract_chunk(sheet: &Stylesheet<'_>, category: ChunkCategory) -> String {
    apply_filter(sheet, &category.filter())
}

/// One chunk per category, in [`ChunkCategory::ALL`] order.
pub fn create_chunks(sheet: &Stylesheet<'_>) -> Vec<Chunk> {
    ChunkCategory::ALL
        .iter()
        .map(|&category| Chunk {
            category,
            css: extract_chunk(sheet, category),
        })
        .collect()
}
