//! Tests for compiled trigram queries over the public API

use trisieve::{summarize, trigram_query, TrigramQuery};

#[track_caller]
fn check_query(pattern: &str, expected: &str) {
    let query = trigram_query(pattern).unwrap_or_else(|err| {
        panic!("Pattern should have parsed: {}: {}", pattern, err);
    });
    assert_eq!(
        query.to_string(),
        expected,
        "Wrong query for pattern '{}'",
        pattern
    );
}

#[track_caller]
fn check_everything(pattern: &str) {
    let query = trigram_query(pattern).unwrap_or_else(|err| {
        panic!("Pattern should have parsed: {}: {}", pattern, err);
    });
    assert_eq!(
        query,
        TrigramQuery::Everything,
        "Pattern '{}' should compile to Everything",
        pattern
    );
}

#[test]
fn test_literal_windows() {
    check_query("printf", r#"And("pri", "rin", "int", "ntf")"#);
    check_query("abc", r#"And("abc")"#);
    check_query("abcd", r#"And("abc", "bcd")"#);
}

#[test]
fn test_alternation() {
    check_query("foo|bar", r#"Or(And("foo"), And("bar"))"#);
    check_query("foobar|quux", r#"Or(And("foo", "oob", "oba", "bar"), And("quu", "uux"))"#);
}

#[test]
fn test_character_classes_are_opaque() {
    check_everything("a[xyz]c");
    check_everything("[abc]");
    check_everything("[^abc]");
    // The class breaks the run but trigrams survive on either side.
    check_query("foo[xyz]bar", r#"And(And("foo"), And("bar"))"#);
}

#[test]
fn test_quantifier_boundaries() {
    check_everything("ab*");
    check_everything("ab+");
    check_query("abc+", r#"And("abc")"#);
    check_everything("abc*");
    check_query("abcd*", r#"And("abc")"#);
}

#[test]
fn test_optional_breaks_the_run() {
    // c,o,l,o fuse; the optional u breaks the run; the trailing r is too
    // short to contribute.
    check_query("colou?r", r#"And("col", "olo")"#);
}

#[test]
fn test_empty_patterns_fail_open() {
    check_everything("");
    check_everything("a*");
    check_everything("x?|abc");
    check_everything("^$");
    check_everything(".*");
}

#[test]
fn test_anchors_break_runs() {
    check_query("^printf", r#"And("pri", "rin", "int", "ntf")"#);
    check_query("printf$", r#"And("pri", "rin", "int", "ntf")"#);
    check_everything("^ab$");
}

#[test]
fn test_groups_splice_into_runs() {
    check_query("sp(rin)tf", r#"And("spr", "pri", "rin", "int", "ntf")"#);
    check_query("s(prin)(tf)", r#"And("spr", "pri", "rin", "int", "ntf")"#);
}

#[test]
fn test_dot_inside_a_group_breaks_the_run() {
    // The group collapses to the literal "b", but the dot at its left edge
    // keeps it from fusing with the "a" before the group. "axbc" matches,
    // so the query must not demand "abc".
    check_everything("a(.b)c");
    let query = trigram_query("a(.b)c").unwrap();
    assert!(query.satisfied_by("axbc"));

    check_query("ab(.cd)ef", r#"And("cde", "def")"#);
    let query = trigram_query("ab(.cd)ef").unwrap();
    assert!(query.satisfied_by("abXcdef"));

    check_everything("xy(.ab)+");
    let query = trigram_query("xy(.ab)+").unwrap();
    assert!(query.satisfied_by("xyQab"));
}

#[test]
fn test_escapes() {
    check_query(r"foo\.bar", r#"And("foo", "oo.", "o.b", ".ba", "bar")"#);
    check_query(r"a\x62c", r#"And("abc")"#);
    check_everything(r"\d\d\d");
    check_everything(r"a\wc");
}

#[test]
fn test_repeats_are_not_expanded() {
    // One occurrence is all that's guaranteed; b{2,3} does not contribute
    // "bb", and it breaks the run to its right.
    check_query("abcd{2,3}", r#"And("abc", "bcd")"#);
    check_everything("ab{2,3}c");
    check_query("abc{1}def", r#"And("abc", "bcd", "cde", "def")"#);
}

#[test]
fn test_short_or_branches_unconstrain_the_alternation() {
    // "ab" yields no trigram, so no trigram can be required of the
    // alternation as a whole.
    check_everything("ab|abc");
    let query = trigram_query("(ab|abc)def").unwrap();
    assert!(query.satisfied_by("xxabdefxx"));
}

#[test]
fn test_summary_can_match_empty() {
    assert!(summarize("").unwrap().can_match_empty);
    assert!(summarize("a*").unwrap().can_match_empty);
    assert!(!summarize("a+").unwrap().can_match_empty);
    assert!(!summarize("abc").unwrap().can_match_empty);
}

#[test]
fn test_summary_exacts() {
    let exacts = summarize("s?printf").unwrap().exacts.unwrap();
    assert_eq!(
        exacts.into_iter().collect::<Vec<_>>(),
        vec!["printf".to_string(), "sprintf".to_string()]
    );
    assert!(summarize("a+").unwrap().exacts.is_none());
    assert!(summarize(".").unwrap().exacts.is_none());
}

#[test]
fn test_trigram_collection() {
    let query = trigram_query("foo|bard").unwrap();
    let trigrams: Vec<&str> = query.trigrams().into_iter().collect();
    assert_eq!(trigrams, vec!["ard", "bar", "foo"]);
    assert!(trigram_query("ab").unwrap().trigrams().is_empty());
}

#[test]
fn test_unicode_literals_window_by_char() {
    check_query("héllo", r#"And("hél", "éll", "llo")"#);
    check_everything("éé");
}
