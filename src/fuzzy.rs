//! Ordered-subsequence name matching.
//!
//! A query matches a candidate when every query character appears in the
//! candidate in order. The reported span starts at the leftmost position a
//! match can start from and ends at the earliest position completing the
//! query from there, i.e. the leftmost start and the shortest span for that
//! start. Offsets and lengths count chars, not bytes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub length: usize,
    pub offset: usize,
    pub name: String,
}

impl MatchResult {
    /// The matched substring of `name`.
    pub fn span(&self) -> String {
        self.name.chars().skip(self.offset).take(self.length).collect()
    }
}

/// Returns `(offset, length)` of the matched span of `query` in `candidate`.
pub fn find_span(query: &[char], candidate: &[char]) -> Option<(usize, usize)> {
    let Some((&first, rest)) = query.split_first() else {
        return Some((0, 0));
    };
    // the first occurrence of the leading char is the leftmost start that can
    // match at all: any later start only sees a suffix of what it sees
    let start = candidate.iter().position(|&c| c == first)?;
    let mut pos = start + 1;
    for &qc in rest {
        pos += candidate[pos..].iter().position(|&c| c == qc)? + 1;
    }
    Some((start, pos - start))
}

/// Matches `query` against every name, ranked by span length (shortest
/// first). The sort is stable, so equal lengths keep the order of `names`.
pub fn fuzzy_match<'a, I>(query: &str, names: I) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a str>,
{
    let query: Vec<char> = query.chars().collect();
    let mut found: Vec<MatchResult> = names
        .into_iter()
        .filter_map(|name| {
            let chars: Vec<char> = name.chars().collect();
            find_span(&query, &chars).map(|(offset, length)| MatchResult {
                length,
                offset,
                name: name.to_string(),
            })
        })
        .collect();
    found.sort_by_key(|m| m.length);
    found
}
