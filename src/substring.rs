//! The substring-tree model: boolean trees of literal runs
//!
//! A `SubstringTree` records which literal runs are guaranteed to appear,
//! contiguously and in order, in any string matching a subpattern. It is the
//! intermediate form between the syntax tree and the compiled trigram query.

/// A node specifying a boolean operator over guaranteed literal runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstringTree {
    /// A contiguous run of characters guaranteed to appear together, in
    /// order, in any matching string.
    Literal(String),

    /// All children hold simultaneously. Children are *not* contiguous with
    /// each other; contiguous fragments have already been fused into a
    /// single `Literal`.
    And(Vec<SubstringTree>),

    /// Exactly one child holds.
    Or(Vec<SubstringTree>),

    /// An opaque subpattern from which nothing can be derived. Not the
    /// absence of information: a `Useless` breaks the contiguity of the
    /// literal runs on either side of it.
    Useless,
}

impl SubstringTree {
    /// The empty literal: constrains nothing but, unlike `Useless`, does not
    /// poison the surrounding structure.
    pub fn empty_literal() -> SubstringTree {
        SubstringTree::Literal(String::new())
    }

    pub fn is_useless(&self) -> bool {
        matches!(self, SubstringTree::Useless)
    }

    pub fn is_empty_literal(&self) -> bool {
        matches!(self, SubstringTree::Literal(s) if s.is_empty())
    }
}

/// Builds an `And`, fusing consecutive literals into single runs.
///
/// While appending, consecutive `Literal` values are concatenated into one
/// combined literal; any non-literal child sets a "run broken" state so the
/// next literal starts a new run. `Useless` children are dropped entirely
/// (they contribute no constraint) but still break the run.
#[derive(Debug)]
pub struct AndBuilder {
    children: Vec<SubstringTree>,
    run_broken: bool,
}

impl AndBuilder {
    pub fn new() -> AndBuilder {
        AndBuilder {
            children: Vec::new(),
            run_broken: true,
        }
    }

    /// Append a child, fusing it into the trailing literal run if possible.
    pub fn push(&mut self, child: SubstringTree) {
        match child {
            SubstringTree::Useless => {
                self.run_broken = true;
            }
            SubstringTree::Literal(s) => {
                if self.run_broken {
                    self.children.push(SubstringTree::Literal(s));
                    self.run_broken = false;
                } else {
                    // The run invariant: run_broken is false only directly
                    // after a literal was pushed.
                    match self.children.last_mut() {
                        Some(SubstringTree::Literal(run)) => run.push_str(&s),
                        _ => unreachable!("unbroken run must end in a literal"),
                    }
                }
            }
            child => {
                self.run_broken = true;
                self.children.push(child);
            }
        }
    }

    /// Force the next literal to start a new run.
    pub fn break_run(&mut self) {
        self.run_broken = true;
    }

    /// Freeze into a node. No children means the subpattern constrains only
    /// to the empty string; a single child needs no container.
    pub fn finish(mut self) -> SubstringTree {
        match self.children.len() {
            0 => SubstringTree::empty_literal(),
            1 => self.children.pop().unwrap(),
            _ => SubstringTree::And(self.children),
        }
    }
}

/// Builds an `Or`. A single `Useless` branch ruins the whole alternation:
/// if even one branch yields no guaranteed substring, no substring is common
/// to all branches.
#[derive(Debug)]
pub struct OrBuilder {
    children: Vec<SubstringTree>,
    ruined: bool,
}

impl OrBuilder {
    pub fn new() -> OrBuilder {
        OrBuilder {
            children: Vec::new(),
            ruined: false,
        }
    }

    pub fn push(&mut self, branch: SubstringTree) {
        if self.ruined {
            return;
        }
        if branch.is_useless() {
            self.ruined = true;
            self.children.clear();
        } else {
            self.children.push(branch);
        }
    }

    /// Freeze into a node. A single branch needs no container; this is what
    /// lets a one-branch group of literals splice back into an enclosing
    /// literal run.
    pub fn finish(mut self) -> SubstringTree {
        if self.ruined {
            return SubstringTree::Useless;
        }
        match self.children.len() {
            0 => SubstringTree::empty_literal(),
            1 => self.children.pop().unwrap(),
            _ => SubstringTree::Or(self.children),
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
    fn consecutive_literals_fuse() {
        let mut b = AndBuilder::new();
        b.push(lit("a"));
        b.push(lit("b"));
        b.push(lit("c"));
        assert_eq!(b.finish(), lit("abc"));
    }

    #[test]
    fn useless_breaks_the_run_and_is_dropped() {
        let mut b = AndBuilder::new();
        b.push(lit("ab"));
        b.push(SubstringTree::Useless);
        b.push(lit("cd"));
        assert_eq!(b.finish(), SubstringTree::And(vec![lit("ab"), lit("cd")]));
    }

    #[test]
    fn non_literal_children_break_the_run() {
        let inner = SubstringTree::Or(vec![lit("x"), lit("y")]);
        let mut b = AndBuilder::new();
        b.push(lit("a"));
        b.push(inner.clone());
        b.push(lit("b"));
        assert_eq!(
            b.finish(),
            SubstringTree::And(vec![lit("a"), inner, lit("b")])
        );
    }

    #[test]
    fn explicit_break_starts_a_new_run() {
        let mut b = AndBuilder::new();
        b.push(lit("ab"));
        b.break_run();
        b.push(lit("c"));
        assert_eq!(b.finish(), SubstringTree::And(vec![lit("ab"), lit("c")]));
    }

    #[test]
    fn empty_and_is_the_empty_literal() {
        assert_eq!(AndBuilder::new().finish(), SubstringTree::empty_literal());
    }

    #[test]
    fn useless_ruins_an_or() {
        let mut b = OrBuilder::new();
        b.push(lit("abc"));
        b.push(SubstringTree::Useless);
        b.push(lit("def"));
        assert_eq!(b.finish(), SubstringTree::Useless);
    }

    #[test]
    fn single_branch_or_collapses() {
        let mut b = OrBuilder::new();
        b.push(lit("abc"));
        assert_eq!(b.finish(), lit("abc"));
    }
}
