//! Parser from regex patterns to the syntax tree

use crate::api::Limits;
use crate::ir;
use crate::ir::{make_alt, make_cat, AnchorType, ClassEscape, Quantifier};
use crate::types::{MAX_GROUPS, MAX_LOOPS};
use core::fmt;
use core::iter::Peekable;

/// Represents an error encountered during regex analysis.
/// The text contains a human-readable error message.
#[derive(Debug, Clone)]
pub struct Error {
    pub text: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::error::Error for Error {}

fn error<S, T>(text: S) -> Result<T, Error>
where
    S: ToString,
{
    Err(Error {
        text: text.to_string(),
    })
}

/// Represents the state used to parse a regex.
struct Parser<'a> {
    /// The remaining input.
    input: Peekable<core::str::Chars<'a>>,

    /// Ceilings on pattern complexity.
    limits: Limits,

    /// Number of quantifiers.
    loop_count: usize,

    /// Number of parenthesized groups.
    group_count: usize,
}

impl<'a> Parser<'a> {
    /// Consume a character, returning it.
    fn consume(&mut self, c: char) -> char {
        let nc = self.input.next();
        debug_assert!(nc == Some(c), "char was not next");
        nc.unwrap()
    }

    /// If our contents begin with the char c, consume it from our contents
    /// and return true. Otherwise return false.
    fn try_consume(&mut self, c: char) -> bool {
        let mut cursor = self.input.clone();
        if cursor.next() == Some(c) {
            self.input = cursor;
            true
        } else {
            false
        }
    }

    /// Peek at the next character.
    fn peek(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    /// \return the next character.
    fn next(&mut self) -> Option<char> {
        self.input.next()
    }

    fn try_parse(&mut self) -> Result<ir::Node, Error> {
        // Parse a disjunction. If we consume everything, it's success. If
        // there's something left, it's an error (for example, an excess
        // closing paren).
        let body = self.consume_disjunction()?;
        match self.peek() {
            Some(')') => error("Unbalanced parenthesis"),
            Some(c) => error(format!("Unexpected char: {}", c)),
            None => Ok(body),
        }
    }

    /// regexp := branch ("|" branch)*
    fn consume_disjunction(&mut self) -> Result<ir::Node, Error> {
        let mut branches = vec![self.consume_branch()?];
        while self.try_consume('|') {
            branches.push(self.consume_branch()?);
        }
        Ok(make_alt(branches))
    }

    /// branch := piece*, where piece := atom quantifier?
    fn consume_branch(&mut self) -> Result<ir::Node, Error> {
        let mut result: ir::NodeList = Vec::new();
        loop {
            let start_offset = result.len();

            let c = match self.peek() {
                None => break,
                Some(c) => c,
            };
            match c {
                // A branch is terminated by a closing paren or a vertical bar.
                ')' | '|' => break,

                '^' => {
                    self.consume('^');
                    result.push(ir::Node::Anchor(AnchorType::StartOfText));
                }

                '$' => {
                    self.consume('$');
                    result.push(ir::Node::Anchor(AnchorType::EndOfText));
                }

                '.' => {
                    self.consume('.');
                    result.push(ir::Node::MatchAny);
                }

                '\\' => {
                    self.consume('\\');
                    result.push(self.consume_atom_escape()?);
                }

                '(' => {
                    self.consume('(');
                    if self.peek() == Some('?') {
                        // Lookaround, non-capturing, and named groups all
                        // start with "(?".
                        return error("Unsupported group syntax");
                    }
                    if self.group_count >= MAX_GROUPS {
                        return error("Group count limit exceeded");
                    }
                    self.group_count += 1;
                    let contents = self.consume_disjunction()?;
                    if !self.try_consume(')') {
                        return error("Unbalanced parenthesis");
                    }
                    result.push(ir::Node::Group(Box::new(contents)));
                }

                '[' => {
                    result.push(self.consume_bracket()?);
                }

                ']' => {
                    return error("Unbalanced bracket");
                }

                // Reserved characters must be escaped; quantifier characters
                // here have nothing to repeat.
                '*' | '+' | '?' | '{' | '}' => {
                    return error("Invalid atom character");
                }

                c => {
                    self.consume(c);
                    result.push(ir::Node::Char(c));
                }
            }

            // We just parsed an atom; try parsing a quantifier.
            if let Some(quant) = self.try_consume_quantifier()? {
                if quant.min > quant.max {
                    return error("Invalid quantifier");
                }
                let bounded_max = if quant.max == usize::MAX { 0 } else { quant.max };
                if quant.min > self.limits.max_repeat || bounded_max > self.limits.max_repeat {
                    return error("Repeat count too large");
                }
                if self.loop_count >= MAX_LOOPS {
                    return error("Quantifier count limit exceeded");
                }
                self.loop_count += 1;
                let quantifee = result.split_off(start_offset);
                result.push(ir::Node::Loop {
                    loopee: Box::new(make_cat(quantifee)),
                    quant,
                });
            }
        }
        Ok(make_cat(result))
    }

    /// class := "[" "^"? initial-char class-char* "]"
    /// The contents are scanned over but not retained.
    fn consume_bracket(&mut self) -> Result<ir::Node, Error> {
        self.consume('[');
        let invert = self.try_consume('^');

        // An unescaped ] is a literal member when it is the first character
        // of the class; a class must have at least one member.
        match self.peek() {
            None => return error("Unbalanced bracket"),
            Some(']') => {
                self.consume(']');
            }
            Some(_) => self.consume_class_char()?,
        }

        loop {
            match self.peek() {
                None => return error("Unbalanced bracket"),
                Some(']') => {
                    self.consume(']');
                    return Ok(ir::Node::Bracket { invert });
                }
                Some(_) => self.consume_class_char()?,
            }
        }
    }

    /// class-char := "\" any-char | any-char-except-"]"
    fn consume_class_char(&mut self) -> Result<(), Error> {
        match self.next() {
            None => error("Unbalanced bracket"),
            Some('\\') => {
                if self.next().is_none() {
                    error("Incomplete escape")
                } else {
                    Ok(())
                }
            }
            Some(_) => Ok(()),
        }
    }

    fn try_consume_quantifier(&mut self) -> Result<Option<Quantifier>, Error> {
        if let Some(quant) = self.try_consume_quantifier_prefix()? {
            if self.try_consume('?') {
                return error("Non-greedy quantifiers are not supported");
            }
            Ok(Some(quant))
        } else {
            Ok(None)
        }
    }

    fn try_consume_quantifier_prefix(&mut self) -> Result<Option<Quantifier>, Error> {
        let c = match self.peek() {
            None => return Ok(None),
            Some(c) => c,
        };
        match c {
            '+' => {
                self.consume('+');
                Ok(Some(Quantifier {
                    min: 1,
                    max: usize::MAX,
                }))
            }
            '*' => {
                self.consume('*');
                Ok(Some(Quantifier {
                    min: 0,
                    max: usize::MAX,
                }))
            }
            '?' => {
                self.consume('?');
                Ok(Some(Quantifier { min: 0, max: 1 }))
            }
            '{' => {
                self.consume('{');
                let optmin = self.try_consume_decimal_integer_literal();
                if optmin.is_none() {
                    return error("Invalid quantifier");
                }
                let mut quant = Quantifier {
                    min: optmin.unwrap(),
                    max: optmin.unwrap(),
                };
                if self.try_consume(',') {
                    if let Some(max) = self.try_consume_decimal_integer_literal() {
                        // Like {3,4}
                        quant.max = max;
                    } else {
                        // Like {3,}
                        quant.max = usize::MAX;
                    }
                }
                if !self.try_consume('}') {
                    return error("Invalid quantifier");
                }
                Ok(Some(quant))
            }
            _ => Ok(None),
        }
    }

    /// If the value would overflow, usize::MAX is returned.
    /// All decimal digits are consumed regardless.
    fn try_consume_decimal_integer_literal(&mut self) -> Option<usize> {
        let mut result: usize = 0;
        let mut char_count = 0;
        while let Some(c) = self.peek() {
            if let Some(digit) = char::to_digit(c, 10) {
                self.consume(c);
                char_count += 1;
                result = result.saturating_mul(10);
                result = result.saturating_add(digit as usize);
            } else {
                break;
            }
        }
        if char_count > 0 {
            Some(result)
        } else {
            None
        }
    }

    /// char := "\" escape, with the backslash already consumed.
    /// escape is a fixed set of abbreviation letters, a two-digit hex
    /// escape, or a literal-escaped ordinary character.
    fn consume_atom_escape(&mut self) -> Result<ir::Node, Error> {
        let c = match self.peek() {
            None => return error("Incomplete escape"),
            Some(c) => c,
        };
        let class = |p: &mut Self, escape| {
            p.consume(c);
            Ok(ir::Node::Class(escape))
        };
        let char_node = |p: &mut Self, equivalent: char| {
            p.consume(c);
            Ok(ir::Node::Char(equivalent))
        };
        match c {
            // Abbreviations with no single-character equivalent.
            'A' => class(self, ClassEscape::TextStart),
            'Z' => class(self, ClassEscape::TextEnd),
            'b' => class(self, ClassEscape::WordBoundary),
            'B' => class(self, ClassEscape::NotWordBoundary),
            'd' => class(self, ClassEscape::Digits),
            'D' => class(self, ClassEscape::NotDigits),
            's' => class(self, ClassEscape::Spaces),
            'S' => class(self, ClassEscape::NotSpaces),
            'w' => class(self, ClassEscape::Words),
            'W' => class(self, ClassEscape::NotWords),

            // Untypeable characters.
            'a' => char_node(self, '\x07'),
            'e' => char_node(self, '\x1B'), // for PCRE compatibility
            'f' => char_node(self, '\x0C'),
            'n' => char_node(self, '\n'),
            'r' => char_node(self, '\r'),
            't' => char_node(self, '\t'),
            'v' => char_node(self, '\x0B'),

            'x' => {
                // HexEscapeSequence :: x HexDigit HexDigit
                let hex_to_digit = |c: char| c.to_digit(16);
                self.consume('x');
                let x1 = self.next().and_then(hex_to_digit);
                let x2 = self.next().and_then(hex_to_digit);
                match (x1, x2) {
                    (Some(x1), Some(x2)) => {
                        let cc = core::char::from_u32(x1 * 16 + x2).expect("Invalid char");
                        Ok(ir::Node::Char(cc))
                    }
                    _ => error("Invalid character escape"),
                }
            }

            // Any other escaped character is that literal character.
            c => {
                self.consume(c);
                Ok(ir::Node::Char(c))
            }
        }
    }
}

/// Try parsing a given pattern.
/// Return the resulting syntax tree, or an error.
pub fn try_parse(pattern: &str, limits: &Limits) -> Result<ir::Node, Error> {
    if pattern.len() > limits.max_pattern_bytes {
        return error("Pattern too long");
    }
    let mut p = Parser {
        input: pattern.chars().peekable(),
        limits: *limits,
        loop_count: 0,
        group_count: 0,
    };
    p.try_parse()
}
