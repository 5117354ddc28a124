use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Keys whose lines survive a migration. Everything else in the block is dropped.
const KEPT_KEYS: [&str; 2] = ["title:", "date:"];

fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // pandoc/jekyll-style metadata block, only at the very start of the file
        RegexBuilder::new(r"^---\s*\n(.*?)\n---")
            .dot_matches_new_line(true)
            .build()
            .expect("frontmatter block pattern is valid")
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"date:\s*['"]?(\d{4}-\d{2}-\d{2})"#).expect("date pattern is valid")
    })
}

/// A frontmatter block borrowed from the content of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frontmatter<'a> {
    /// lines between the delimiters, without the delimiters themselves
    body: &'a str,
    /// everything after the closing delimiter
    rest: &'a str,
}

impl<'a> Frontmatter<'a> {
    pub fn extract(content: &'a str) -> Option<Self> {
        let caps = block_pattern().captures(content)?;
        let block = caps.get(0)?;

        Some(Self {
            body: caps.get(1)?.as_str(),
            rest: &content[block.end()..],
        })
    }

    /// First `YYYY-MM-DD` following a `date:` key, quotes stripped.
    pub fn date(&self) -> Option<&'a str> {
        date_pattern()
            .captures(self.body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The kept `title`/`date` lines in their original order, followed by the layout line.
    pub fn reduced(&self, layout: &str) -> String {
        let layout_line = format!("layout: {layout}");
        let mut lines: Vec<&str> = self
            .body
            .split('\n')
            .filter(|line| {
                let line = line.trim();
                KEPT_KEYS.iter().any(|key| line.starts_with(key))
            })
            .collect();
        lines.push(&layout_line);

        lines.join("\n")
    }

    /// Whole post content with this block swapped for the reduced one.
    pub fn rewrite(&self, layout: &str) -> String {
        format!("---\n{}\n---{}", self.reduced(layout), self.rest)
    }
}
