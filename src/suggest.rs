use crate::fuzzy::{MatchResult, fuzzy_match};
use crate::loader::{LoadError, NameCache, NameSource};
use crate::names::{Identifier, NameIndex};
use std::collections::HashSet;
use std::sync::Arc;

/// Path prefix of a character page.
pub const CHAR_PATH: &str = "/char/";

/// One rendered suggestion link: the display name split around the
/// highlighted span, pointing at the character page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: Identifier,
    pub prefix: String,
    pub highlight: String,
    pub suffix: String,
}

impl Suggestion {
    // Offsets come from the matched key, which may be longer than the
    // canonical display name; the split is clamped to the display name.
    pub fn new(display: &str, id: Identifier, offset: usize, length: usize) -> Self {
        let chars: Vec<char> = display.chars().collect();
        let start = offset.min(chars.len());
        let end = offset.saturating_add(length).min(chars.len());
        Suggestion {
            id,
            prefix: chars[..start].iter().collect(),
            highlight: chars[start..end].iter().collect(),
            suffix: chars[end..].iter().collect(),
        }
    }

    pub fn display(&self) -> String {
        format!("{}{}{}", self.prefix, self.highlight, self.suffix)
    }

    pub fn href(&self) -> String {
        format!("{CHAR_PATH}{}", self.id)
    }

    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{CHAR_PATH}{}\">{}<span class='highlight'>{}</span>{}</a>",
            escape_html(&self.id.to_string()),
            escape_html(&self.prefix),
            escape_html(&self.highlight),
            escape_html(&self.suffix)
        )
    }

    // plain-text form with the span bracketed, used by the CLI
    pub fn to_plain(&self) -> String {
        format!(
            "{}[{}]{}  {}",
            self.prefix,
            self.highlight,
            self.suffix,
            self.href()
        )
    }
}

fn escape_html(s: &str) -> String {
    v_htmlescape::escape(s).to_string()
}

/// Keeps the first match per identifier, in ranked order.
pub fn dedup_by_identifier(found: Vec<MatchResult>, index: &NameIndex) -> Vec<(MatchResult, Identifier)> {
    let mut seen: HashSet<Identifier> = HashSet::new();
    found
        .into_iter()
        .filter_map(|m| {
            let id = index.get(&m.name)?.id.clone();
            if seen.insert(id.clone()) {
                Some((m, id))
            } else {
                None
            }
        })
        .collect()
}

/// Ranked, deduplicated suggestions for a non-empty query.
pub fn build_suggestions(query: &str, index: &NameIndex) -> Vec<Suggestion> {
    let found = fuzzy_match(query, index.names());
    dedup_by_identifier(found, index)
        .into_iter()
        .filter_map(|(m, _)| {
            let entry = index.get(&m.name)?;
            Some(Suggestion::new(&entry.display, entry.id.clone(), m.offset, m.length))
        })
        .collect()
}

/// The suggestions container.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBox {
    items: Vec<Suggestion>,
}

impl SuggestionBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the contents with the suggestions for `query`.
    pub fn fill(&mut self, query: &str, index: &NameIndex) {
        self.items = build_suggestions(query, index);
    }

    /// Clears on an empty query; otherwise loads the names (once) and fills.
    /// A failed load leaves the container untouched.
    pub fn render(&mut self, query: &str, cache: &NameCache, source: &dyn NameSource) -> Result<(), LoadError> {
        if query.is_empty() {
            self.clear();
            return Ok(());
        }
        cache.ensure_loaded(source, |index| self.fill(query, index))
    }

    pub fn to_html(&self) -> String {
        self.items.iter().map(Suggestion::to_html).collect()
    }

    /// One line per suggestion, as anchors or in the plain form.
    pub fn lines(&self, html: bool) -> Vec<String> {
        self.items
            .iter()
            .map(|s| if html { s.to_html() } else { s.to_plain() })
            .collect()
    }
}

/// The `suggest` command: renders `query` against a fresh cache. The names
/// are loaded on the blocking pool, so this is safe to await on the runtime.
pub async fn suggest_lines(query: &str, source: Arc<dyn NameSource>, html: bool) -> Result<Vec<String>, LoadError> {
    let query = query.to_string();
    tokio::task::spawn_blocking(move || -> Result<Vec<String>, LoadError> {
        let cache = NameCache::new();
        let mut suggestions = SuggestionBox::new();
        suggestions.render(&query, &cache, source.as_ref())?;
        Ok(suggestions.lines(html))
    })
    .await?
}
