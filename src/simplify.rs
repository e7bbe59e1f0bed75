//! Rewrites a substring tree into an equivalent smaller tree

use crate::substring::SubstringTree;
use crate::types::NGRAM_LENGTH;

impl SubstringTree {
    /// Return a smaller but equivalent tree.
    ///
    /// Literal runs too short to yield a trigram become the empty literal.
    /// Containers drop vacuous children and are elided when a single child
    /// remains. An `Or` with any unconstrained branch constrains nothing at
    /// all and collapses to the empty literal: dropping such a branch
    /// instead would tighten the query and risk excluding true matches.
    /// `Useless` is meaningful (it breaks contiguity) and is left alone.
    ///
    /// Simplification is idempotent.
    pub fn simplified(self) -> SubstringTree {
        match self {
            SubstringTree::Literal(s) => {
                if s.chars().count() >= NGRAM_LENGTH {
                    SubstringTree::Literal(s)
                } else {
                    SubstringTree::empty_literal()
                }
            }

            SubstringTree::And(children) => {
                let mut simple: Vec<SubstringTree> = children
                    .into_iter()
                    .map(SubstringTree::simplified)
                    .filter(|c| !c.is_empty_literal())
                    .collect();
                match simple.len() {
                    0 => SubstringTree::empty_literal(),
                    1 => simple.pop().unwrap(),
                    _ => SubstringTree::And(simple),
                }
            }

            SubstringTree::Or(children) => {
                let mut simple: Vec<SubstringTree> = Vec::with_capacity(children.len());
                for child in children {
                    let child = child.simplified();
                    if child.is_empty_literal() {
                        return SubstringTree::empty_literal();
                    }
                    simple.push(child);
                }
                match simple.len() {
                    0 => SubstringTree::empty_literal(),
                    1 => simple.pop().unwrap(),
                    _ => SubstringTree::Or(simple),
                }
            }

            SubstringTree::Useless => SubstringTree::Useless,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> SubstringTree {
        SubstringTree::Literal(s.to_string())
    }

    #[test]
    fn short_literals_become_empty() {
        assert_eq!(lit("ab").simplified(), lit(""));
        assert_eq!(lit("abc").simplified(), lit("abc"));
    }

    #[test]
    fn trigram_length_counts_chars_not_bytes() {
        // Two characters, four bytes.
        assert_eq!(lit("\u{00e9}\u{00e9}").simplified(), lit(""));
        assert_eq!(
            lit("\u{00e9}\u{00e9}\u{00e9}").simplified(),
            lit("\u{00e9}\u{00e9}\u{00e9}")
        );
    }

    #[test]
    fn vacuous_and_children_are_dropped() {
        let tree = SubstringTree::And(vec![lit("colo"), lit("r")]);
        assert_eq!(tree.simplified(), lit("colo"));
    }

    #[test]
    fn singleton_containers_are_elided() {
        let tree = SubstringTree::Or(vec![SubstringTree::And(vec![lit("abc")])]);
        assert_eq!(tree.simplified(), lit("abc"));
    }

    #[test]
    fn empty_containers_become_the_empty_literal() {
        assert_eq!(SubstringTree::And(vec![]).simplified(), lit(""));
        assert_eq!(
            SubstringTree::And(vec![lit("a"), lit("b")]).simplified(),
            lit("")
        );
    }

    #[test]
    fn unconstrained_or_branch_unconstrains_the_whole_or() {
        // (ab|abc): the "ab" branch yields no trigram, so no trigram is
        // required across the alternation.
        let tree = SubstringTree::Or(vec![lit("ab"), lit("abc")]);
        assert_eq!(tree.simplified(), lit(""));
    }

    #[test]
    fn useless_survives_simplification() {
        assert_eq!(SubstringTree::Useless.simplified(), SubstringTree::Useless);
        let tree = SubstringTree::And(vec![lit("abcd"), SubstringTree::Useless]);
        assert_eq!(
            tree.simplified(),
            SubstringTree::And(vec![lit("abcd"), SubstringTree::Useless])
        );
    }

    #[test]
    fn simplification_is_idempotent() {
        let trees = vec![
            SubstringTree::And(vec![
                lit("colo"),
                lit("r"),
                SubstringTree::Or(vec![lit("ab"), lit("abcd")]),
            ]),
            SubstringTree::Or(vec![lit("foo"), lit("bar")]),
            SubstringTree::Useless,
            lit("xy"),
        ];
        for tree in trees {
            let once = tree.simplified();
            assert_eq!(once.clone().simplified(), once);
        }
    }
}
