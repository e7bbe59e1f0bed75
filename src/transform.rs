//! Transformation from the syntax tree to a substring tree

use crate::ir::Node;
use crate::substring::{AndBuilder, OrBuilder, SubstringTree};

/// The analysis result for one node: its substring tree, plus whether the
/// literal run must be broken on either side of the node.
///
/// A quantified atom that may iterate more than once fuses with what
/// precedes it (its first iteration is adjacent to the left context), but
/// not with what follows: no single iteration is adjacent to both sides, so
/// /ab+c/ guarantees the run "ab" and the run "c", never "abc".
///
/// The left flag matters when a catenation collapses to a single literal.
/// In /a(.b)c/ the group's tree is just the literal "b", but its left edge
/// is not adjacent to the surrounding run, and fusing would demand "ab" of
/// text that need not contain it.
struct Fragment {
    tree: SubstringTree,
    breaks_left: bool,
    breaks_right: bool,
}

impl Fragment {
    fn new(tree: SubstringTree) -> Fragment {
        Fragment {
            tree,
            breaks_left: false,
            breaks_right: false,
        }
    }

    fn useless() -> Fragment {
        Fragment {
            tree: SubstringTree::Useless,
            breaks_left: true,
            breaks_right: true,
        }
    }
}

fn analyze(node: &Node) -> Fragment {
    match node {
        Node::Empty => Fragment::new(SubstringTree::empty_literal()),

        Node::Char(c) => Fragment::new(SubstringTree::Literal(c.to_string())),

        // No matching string can be decomposed into a known contiguous
        // literal across these: `.` matches arbitrary content, and anchors
        // are zero-width but no text matches a^b or a$b the way a plain
        // catenation would. Classes are opaque in this version.
        Node::MatchAny | Node::Anchor(..) | Node::Class(..) | Node::Bracket { .. } => {
            Fragment::useless()
        }

        // A group's value splices into the parent exactly as any other atom
        // result; a one-branch group of literals has already collapsed to a
        // plain literal and so fuses with the enclosing run.
        Node::Group(contents) => analyze(contents),

        Node::Loop { loopee, quant } => {
            if quant.min == 0 {
                // The atom is not guaranteed to appear at all.
                return Fragment::useless();
            }
            // One occurrence is all that's certain; the repeat count never
            // duplicates the literal.
            let mut frag = analyze(loopee);
            if quant.max > 1 {
                frag.breaks_right = true;
            }
            frag
        }

        Node::Cat(nodes) => {
            let mut b = AndBuilder::new();
            let mut breaks_left = false;
            let mut breaks_right = false;
            for (i, node) in nodes.iter().enumerate() {
                let frag = analyze(node);
                if i == 0 {
                    breaks_left = frag.breaks_left;
                }
                if frag.breaks_left {
                    b.break_run();
                }
                b.push(frag.tree);
                breaks_right = frag.breaks_right;
                if frag.breaks_right {
                    b.break_run();
                }
            }
            Fragment {
                tree: b.finish(),
                breaks_left,
                breaks_right,
            }
        }

        Node::Alt(branches) => {
            let mut b = OrBuilder::new();
            for branch in branches {
                b.push(analyze(branch).tree);
            }
            let tree = b.finish();
            let opaque = !matches!(tree, SubstringTree::Literal(..));
            Fragment {
                tree,
                breaks_left: opaque,
                breaks_right: opaque,
            }
        }
    }
}

/// Convert a syntax tree into its substring tree.
pub fn substring_tree(node: &Node) -> SubstringTree {
    analyze(node).tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Limits;
    use crate::parse::try_parse;
    use crate::substring::SubstringTree as T;

    fn transform(pattern: &str) -> T {
        substring_tree(&try_parse(pattern, &Limits::default()).expect(pattern))
    }

    fn lit(s: &str) -> T {
        T::Literal(s.to_string())
    }

    #[test]
    fn literal_patterns_fuse_to_one_run() {
        assert_eq!(transform("printf"), lit("printf"));
        assert_eq!(transform(""), lit(""));
    }

    #[test]
    fn classes_and_dots_break_runs() {
        assert_eq!(transform("a[xyz]c"), T::And(vec![lit("a"), lit("c")]));
        assert_eq!(transform("a.c"), T::And(vec![lit("a"), lit("c")]));
        assert_eq!(transform("[xyz]"), T::Useless);
    }

    #[test]
    fn anchors_break_runs() {
        assert_eq!(transform("^abc$"), lit("abc"));
        assert_eq!(transform("ab^cd"), T::And(vec![lit("ab"), lit("cd")]));
    }

    #[test]
    fn groups_splice_into_the_run() {
        assert_eq!(transform("sp(rin)tf"), lit("sprintf"));
        assert_eq!(
            transform("a(b|c)d"),
            T::And(vec![lit("a"), T::Or(vec![lit("b"), lit("c")]), lit("d")])
        );
    }

    #[test]
    fn min_zero_quantifiers_are_useless() {
        assert_eq!(transform("ab*"), lit("a"));
        assert_eq!(transform("colou?r"), T::And(vec![lit("colo"), lit("r")]));
        assert_eq!(transform("a*"), T::Useless);
    }

    #[test]
    fn guaranteed_atoms_fuse_left_only() {
        assert_eq!(transform("abc+"), lit("abc"));
        assert_eq!(transform("ab+c"), T::And(vec![lit("ab"), lit("c")]));
        assert_eq!(transform("ab{2,3}c"), T::And(vec![lit("ab"), lit("c")]));
        // An exactly-once repeat stays contiguous on both sides.
        assert_eq!(transform("ab{1}c"), lit("abc"));
    }

    #[test]
    fn a_collapsed_group_keeps_its_broken_left_edge() {
        // The group's tree is the lone literal "b", but the dot at its left
        // edge means "b" is not adjacent to the preceding "a".
        assert_eq!(transform("a(.b)c"), T::And(vec![lit("a"), lit("bc")]));
        assert_eq!(transform("ab(.cd)ef"), T::And(vec![lit("ab"), lit("cdef")]));
        // The right edge mirrors it.
        assert_eq!(transform("a(b.)c"), T::And(vec![lit("ab"), lit("c")]));
    }

    #[test]
    fn a_quantified_group_keeps_its_broken_left_edge() {
        assert_eq!(transform("xy(.ab)+"), T::And(vec![lit("xy"), lit("ab")]));
        assert_eq!(transform("xy(.ab)+z"), T::And(vec![lit("xy"), lit("ab"), lit("z")]));
    }

    #[test]
    fn a_useless_branch_ruins_an_alternation() {
        assert_eq!(transform("foo|bar"), T::Or(vec![lit("foo"), lit("bar")]));
        assert_eq!(transform("foo|[xyz]"), T::Useless);
        assert_eq!(transform("foo|a*"), T::Useless);
        // A branch that still yields *some* structure does not ruin the Or.
        assert_eq!(
            transform("foo|b.r"),
            T::Or(vec![lit("foo"), T::And(vec![lit("b"), lit("r")])])
        );
    }
}
