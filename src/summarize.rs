//! Whole-regex analysis: the `RegexSummary`

use crate::ir::Node;
use crate::transform::substring_tree;
use crate::trigrams;
use crate::trigrams::TrigramQuery;
use crate::types::{MAX_EXACTS, MAX_EXACT_REPEAT};
use std::collections::BTreeSet;

/// The digested result of analyzing one regex. Built once per regex and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexSummary {
    /// Whether the regex can match the empty string. When true, nothing can
    /// be safely excluded and `query` is `Everything`.
    pub can_match_empty: bool,

    /// The set of exact strings which, unioned, exhaust the regex; for
    /// example /s?printf/ yields {"printf", "sprintf"}. None when the
    /// language is open-ended or larger than a small fixed bound.
    pub exacts: Option<BTreeSet<String>>,

    /// The boolean trigram query that any matching string satisfies.
    pub query: TrigramQuery,
}

/// \return whether a node can match the empty string.
fn can_match_empty(node: &Node) -> bool {
    match node {
        Node::Empty => true,
        Node::Char(..) | Node::MatchAny | Node::Bracket { .. } => false,
        Node::Anchor(..) => true,
        Node::Class(escape) => escape.is_zero_width(),
        Node::Cat(nodes) => nodes.iter().all(can_match_empty),
        Node::Alt(branches) => branches.iter().any(can_match_empty),
        Node::Group(contents) => can_match_empty(contents),
        Node::Loop { loopee, quant } => quant.min == 0 || can_match_empty(loopee),
    }
}

/// The language containing only the empty string.
fn empty_string_set() -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    set.insert(String::new());
    set
}

/// Concatenate every combination of prefixes and continuations, giving up
/// (None) when the result would exceed the exacts bound.
fn cross(prefixes: BTreeSet<String>, suffixes: &BTreeSet<String>) -> Option<BTreeSet<String>> {
    if prefixes.len().checked_mul(suffixes.len())? > MAX_EXACTS {
        return None;
    }
    let mut out = BTreeSet::new();
    for p in &prefixes {
        for s in suffixes {
            let mut combined = p.clone();
            combined.push_str(s);
            out.insert(combined);
        }
    }
    Some(out)
}

/// \return the finite set of exact strings a node can match, or None when
/// the language is open (dots, classes, unbounded or large repeats) or the
/// set grows past `MAX_EXACTS`.
fn exact_strings(node: &Node) -> Option<BTreeSet<String>> {
    let singleton = |s: String| {
        let mut set = BTreeSet::new();
        set.insert(s);
        Some(set)
    };
    match node {
        Node::Empty => singleton(String::new()),

        Node::Char(c) => singleton(c.to_string()),

        Node::MatchAny | Node::Bracket { .. } => None,

        // Zero-width atoms contribute nothing to the matched text. The
        // positional constraint of an anchor does not change which strings
        // the regex can reduce to.
        Node::Anchor(..) => singleton(String::new()),
        Node::Class(escape) if escape.is_zero_width() => singleton(String::new()),
        Node::Class(..) => None,

        Node::Cat(nodes) => {
            let mut result = empty_string_set();
            for n in nodes {
                result = cross(result, &exact_strings(n)?)?;
            }
            Some(result)
        }

        Node::Alt(branches) => {
            let mut result = BTreeSet::new();
            for branch in branches {
                result.extend(exact_strings(branch)?);
                if result.len() > MAX_EXACTS {
                    return None;
                }
            }
            Some(result)
        }

        Node::Group(contents) => exact_strings(contents),

        Node::Loop { loopee, quant } => {
            if quant.max > MAX_EXACT_REPEAT {
                return None;
            }
            let inner = exact_strings(loopee)?;
            let mut result = BTreeSet::new();
            let mut repeated = empty_string_set();
            for count in 0..=quant.max {
                if count >= quant.min {
                    result.extend(repeated.iter().cloned());
                    if result.len() > MAX_EXACTS {
                        return None;
                    }
                }
                if count < quant.max {
                    repeated = cross(repeated, &inner)?;
                }
            }
            Some(result)
        }
    }
}

/// Summarize a parsed regex: dispatch over the tree, pull the results back
/// up, and compile the final query.
pub fn summarize(node: &Node) -> RegexSummary {
    let can_match_empty = can_match_empty(node);
    let exacts = exact_strings(node);
    let query = if can_match_empty {
        // An empty match leaves no trigram behind; the posting-list step
        // must be bypassed entirely.
        TrigramQuery::Everything
    } else {
        trigrams::compile(&substring_tree(node).simplified())
    };
    RegexSummary {
        can_match_empty,
        exacts,
        query,
    }
}
