//! Shared constants.

/// The length, in characters, of an indexed n-gram.
pub const NGRAM_LENGTH: usize = 3;

/// The maximum number of parenthesized groups supported.
pub const MAX_GROUPS: usize = 65535;

/// The maximum number of quantifiers supported.
pub const MAX_LOOPS: usize = 65535;

/// The largest set of exact strings a summary will enumerate.
pub const MAX_EXACTS: usize = 32;

/// The largest bounded repeat count that exact-string enumeration expands.
pub const MAX_EXACT_REPEAT: usize = 4;
