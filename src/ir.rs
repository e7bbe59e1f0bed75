//! Syntax tree for the supported regex subset

use core::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnchorType {
    StartOfText, // ^
    EndOfText,   // $
}

/// Escape abbreviations with no single-character equivalent, like `\d` or
/// `\b`. All of them are opaque to trigram extraction; the zero-width ones
/// matter when deciding whether a regex can match the empty string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClassEscape {
    Digits,          // \d
    NotDigits,       // \D
    Spaces,          // \s
    NotSpaces,       // \S
    Words,           // \w
    NotWords,        // \W
    WordBoundary,    // \b
    NotWordBoundary, // \B
    TextStart,       // \A
    TextEnd,         // \Z
}

impl ClassEscape {
    /// \return whether this escape matches the empty string.
    pub fn is_zero_width(self) -> bool {
        matches!(
            self,
            ClassEscape::WordBoundary
                | ClassEscape::NotWordBoundary
                | ClassEscape::TextStart
                | ClassEscape::TextEnd
        )
    }
}

/// A quantifier such as `*` or `{2,5}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quantifier {
    /// Minimum number of iterations, inclusive.
    pub min: usize,

    /// Maximum number of iterations, inclusive.
    /// `usize::MAX` represents an unbounded quantifier.
    pub max: usize,
}

/// The node types of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches the empty string.
    Empty,

    /// Match a literal character.
    Char(char),

    /// Match any character (`.`).
    MatchAny,

    /// Match an anchor like ^ or $.
    Anchor(AnchorType),

    /// An escape abbreviation like `\d` or `\b`.
    Class(ClassEscape),

    /// A bracket character class. Contents are scanned over but not
    /// retained; the class is opaque to trigram extraction.
    Bracket { invert: bool },

    /// Match the catenation of multiple nodes.
    Cat(Vec<Node>),

    /// Match an alternation like a|b|c. All branches of one alternation
    /// are siblings.
    Alt(Vec<Node>),

    /// A parenthesized group.
    Group(Box<Node>),

    /// A quantified node like /x*/ or /x{3,5}/.
    Loop { loopee: Box<Node>, quant: Quantifier },
}

pub type NodeList = Vec<Node>;

/// Catenate a list of nodes, collapsing the trivial cases.
pub fn make_cat(nodes: NodeList) -> Node {
    match nodes.len() {
        0 => Node::Empty,
        1 => nodes.into_iter().next().unwrap(),
        _ => Node::Cat(nodes),
    }
}

/// Alternate a list of branches, collapsing the trivial case.
pub fn make_alt(branches: NodeList) -> Node {
    match branches.len() {
        0 => Node::Empty,
        1 => branches.into_iter().next().unwrap(),
        _ => Node::Alt(branches),
    }
}

fn display_node(node: &Node, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "..")?;
    }
    match node {
        Node::Empty => writeln!(f, "Empty"),
        Node::Char(c) => writeln!(f, "'{}'", c),
        Node::MatchAny => writeln!(f, "MatchAny"),
        Node::Anchor(anchor_type) => writeln!(f, "Anchor {:?}", anchor_type),
        Node::Class(escape) => writeln!(f, "Class {:?}", escape),
        Node::Bracket { invert } => {
            writeln!(f, "Bracket{}", if *invert { " inverted" } else { "" })
        }
        Node::Cat(nodes) => {
            writeln!(f, "Cat")?;
            for node in nodes {
                display_node(node, depth + 1, f)?;
            }
            Ok(())
        }
        Node::Alt(branches) => {
            writeln!(f, "Alt")?;
            for branch in branches {
                display_node(branch, depth + 1, f)?;
            }
            Ok(())
        }
        Node::Group(contents) => {
            writeln!(f, "Group")?;
            display_node(contents, depth + 1, f)
        }
        Node::Loop { loopee, quant } => {
            if quant.max == usize::MAX {
                writeln!(f, "Loop {{{},}}", quant.min)?;
            } else {
                writeln!(f, "Loop {{{},{}}}", quant.min, quant.max)?;
            }
            display_node(loopee, depth + 1, f)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        display_node(self, 0, f)
    }
}
