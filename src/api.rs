use crate::parse;

pub use crate::parse::Error;
pub use crate::summarize::RegexSummary;
pub use crate::trigrams::{QueryNode, TrigramQuery};

/// Ceilings on pattern complexity.
///
/// Repeat counts are never expanded during analysis (a repeat only gates a
/// binary "is it guaranteed present" decision), so these limits exist purely
/// to reject pathological input up front.
#[derive(Debug, Copy, Clone)]
pub struct Limits {
    /// Maximum length of a pattern, in bytes.
    pub max_pattern_bytes: usize,

    /// Maximum value accepted for a bounded repeat count like {2,500}.
    pub max_repeat: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_pattern_bytes: 4096,
            max_repeat: 1000,
        }
    }
}

/// Analyze a regex pattern, producing its full summary: whether it can match
/// the empty string, the exact strings it reduces to (when that set is small
/// and closed), and the compiled trigram query.
pub fn summarize(pattern: &str) -> Result<RegexSummary, Error> {
    summarize_with_limits(pattern, &Limits::default())
}

/// As [`summarize`], with caller-chosen complexity ceilings.
pub fn summarize_with_limits(pattern: &str, limits: &Limits) -> Result<RegexSummary, Error> {
    let tree = parse::try_parse(pattern, limits)?;
    Ok(crate::summarize::summarize(&tree))
}

/// Compile a regex pattern into a boolean trigram query satisfied by every
/// string the regex can match. The query may over-match; it never
/// under-matches.
pub fn trigram_query(pattern: &str) -> Result<TrigramQuery, Error> {
    trigram_query_with_limits(pattern, &Limits::default())
}

/// As [`trigram_query`], with caller-chosen complexity ceilings.
pub fn trigram_query_with_limits(pattern: &str, limits: &Limits) -> Result<TrigramQuery, Error> {
    Ok(summarize_with_limits(pattern, limits)?.query)
}
