//! Compilation of substring trees into boolean trigram queries

use crate::substring::SubstringTree;
use crate::types::NGRAM_LENGTH;
use core::fmt;
use std::collections::BTreeSet;

/// A boolean combination of trigrams. Leaves are exact three-character
/// strings; a matching document must contain every trigram under an `And`
/// and at least one branch of an `Or`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Trigram(String),
    And(Vec<QueryNode>),
    Or(Vec<QueryNode>),
}

/// The compiled query handed to a posting-list index.
///
/// `Everything` means no constraint could be derived: every document is a
/// candidate and the posting-list step must be skipped. This is the fail-open
/// value; under-constraining merely costs re-verification work, while
/// over-constraining could wrongly exclude a true match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrigramQuery {
    Everything,
    Restricted(QueryNode),
}

/// Compile one literal run into the And of its overlapping trigram windows,
/// left to right. Runs shorter than a trigram yield None.
fn windows(s: &str) -> Option<QueryNode> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < NGRAM_LENGTH {
        return None;
    }
    let grams = chars
        .windows(NGRAM_LENGTH)
        .map(|w| QueryNode::Trigram(w.iter().collect()))
        .collect();
    Some(QueryNode::And(grams))
}

/// Compile a node, or None if no constraint can be derived from it.
///
/// A None child under an `And` is skipped (the remaining conjuncts still
/// hold); a None child under an `Or` forces the whole `Or` to None (one
/// unconstrained branch means no constraint is common to all branches).
fn compile_node(tree: &SubstringTree) -> Option<QueryNode> {
    match tree {
        SubstringTree::Useless => None,

        SubstringTree::Literal(s) => windows(s),

        SubstringTree::And(children) => {
            let compiled: Vec<QueryNode> =
                children.iter().filter_map(compile_node).collect();
            if compiled.is_empty() {
                None
            } else {
                Some(QueryNode::And(compiled))
            }
        }

        SubstringTree::Or(children) => {
            let mut compiled = Vec::with_capacity(children.len());
            for child in children {
                compiled.push(compile_node(child)?);
            }
            if compiled.is_empty() {
                None
            } else {
                Some(QueryNode::Or(compiled))
            }
        }
    }
}

/// Compile a substring tree into the final boolean trigram query.
pub fn compile(tree: &SubstringTree) -> TrigramQuery {
    match compile_node(tree) {
        Some(node) => TrigramQuery::Restricted(node),
        None => TrigramQuery::Everything,
    }
}

impl QueryNode {
    /// \return whether the given text satisfies this query. This is the
    /// same containment check a posting-list index performs per document,
    /// evaluated directly against one text.
    pub fn satisfied_by(&self, text: &str) -> bool {
        match self {
            QueryNode::Trigram(t) => {
                memchr::memmem::find(text.as_bytes(), t.as_bytes()).is_some()
            }
            QueryNode::And(children) => children.iter().all(|c| c.satisfied_by(text)),
            QueryNode::Or(children) => children.iter().any(|c| c.satisfied_by(text)),
        }
    }

    /// Collect every trigram mentioned in the query.
    pub fn trigrams(&self) -> BTreeSet<&str> {
        fn collect<'a>(node: &'a QueryNode, out: &mut BTreeSet<&'a str>) {
            match node {
                QueryNode::Trigram(t) => {
                    out.insert(t.as_str());
                }
                QueryNode::And(children) | QueryNode::Or(children) => {
                    for child in children {
                        collect(child, out);
                    }
                }
            }
        }
        let mut out = BTreeSet::new();
        collect(self, &mut out);
        out
    }
}

impl TrigramQuery {
    pub fn is_everything(&self) -> bool {
        matches!(self, TrigramQuery::Everything)
    }

    /// \return whether the given text satisfies this query.
    /// `Everything` is satisfied by any text.
    pub fn satisfied_by(&self, text: &str) -> bool {
        match self {
            TrigramQuery::Everything => true,
            TrigramQuery::Restricted(node) => node.satisfied_by(text),
        }
    }

    /// Collect every trigram mentioned in the query. Empty for `Everything`.
    pub fn trigrams(&self) -> BTreeSet<&str> {
        match self {
            TrigramQuery::Everything => BTreeSet::new(),
            TrigramQuery::Restricted(node) => node.trigrams(),
        }
    }
}

fn display_list(name: &str, children: &[QueryNode], f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}(", name)?;
    let mut first = true;
    for child in children {
        if !first {
            write!(f, ", ")?;
        }
        first = false;
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryNode::Trigram(t) => write!(f, "{:?}", t),
            QueryNode::And(children) => display_list("And", children, f),
            QueryNode::Or(children) => display_list("Or", children, f),
        }
    }
}

impl fmt::Display for TrigramQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrigramQuery::Everything => f.write_str("Everything"),
            TrigramQuery::Restricted(node) => write!(f, "{}", node),
        }
    }
}
