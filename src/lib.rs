/*!

# trisieve - boolean trigram queries from regexes

This crate compiles a regular expression into a boolean formula over
three-character substrings ("trigrams") that is guaranteed to be satisfied by
every string the regex can match. A trigram posting-list index can evaluate
that formula to produce a *superset* of matching documents; the original
regex is then re-run only against that superset, avoiding a full corpus scan.

The reduction is sound, not complete: the compiled query may return extra
candidate documents, but it never excludes a document the regex would match.
Whenever no constraint can be derived (a bare character class, an anchor, a
regex that can match the empty string) the result is
[`TrigramQuery::Everything`] and the posting-list step must be skipped.

The technique follows Cho and Rajagopalan's "A fast regular expression
indexing engine", with Cox's trigram refinements as a future direction.

# Example: compiling a literal

```rust
use trisieve::trigram_query;

let query = trigram_query("printf").unwrap();
assert_eq!(query.to_string(), r#"And("pri", "rin", "int", "ntf")"#);
assert!(query.satisfied_by("int main() { printf(\"hi\"); }"));
assert!(!query.satisfied_by("int main() {}"));
```

# Example: alternations and fail-open patterns

```rust
use trisieve::{trigram_query, TrigramQuery};

let query = trigram_query("foo|bar").unwrap();
assert_eq!(query.to_string(), r#"Or(And("foo"), And("bar"))"#);

// A character class is opaque, and the literals around it are too short
// to yield a trigram: nothing can be required of matching documents.
let query = trigram_query("a[xyz]c").unwrap();
assert_eq!(query, TrigramQuery::Everything);
```

# Example: the full summary

```rust
use trisieve::summarize;

let summary = summarize("s?printf").unwrap();
assert!(!summary.can_match_empty);
let exacts = summary.exacts.unwrap();
assert!(exacts.contains("printf") && exacts.contains("sprintf"));
```

# Supported syntax

Alternation, catenation, parenthesized groups, the quantifiers `*` `+` `?`
`{m}` `{m,}` `{m,n}`, character classes (scanned but treated as opaque),
anchors `^` `$`, `.`, and escapes (`\n`-style equivalents, `\xHH`, the
opaque abbreviations `\A \b \B \d \D \s \S \w \W \Z`, and literal-escaped
ordinary characters). Lookaround, named and non-capturing groups, non-greedy
quantifiers, and backreferences are rejected at parse time.

# Architecture

trisieve is a small compiler pipeline: a recursive-descent parser producing
a syntax tree, a transform into a boundary-aware tree of guaranteed literal
runs, an idempotent simplifier, and a compiler that windows each surviving
run into overlapping trigrams mirrored through the tree's And/Or structure.
Analysis is a pure, synchronous computation with no shared state; separate
patterns may be compiled concurrently without coordination.

*/

#![warn(clippy::all)]

pub use crate::api::*;

mod api;
mod ir;
mod parse;
mod simplify;
mod substring;
mod summarize;
mod transform;
mod trigrams;
mod types;
