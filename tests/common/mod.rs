//! Shared helpers for integration tests

#![allow(dead_code)]

use proptest::prelude::*;

/// Start offsets where `pattern` matches `text`, `*` matching any character
pub fn brute_force(text: &str, pattern: &str) -> Vec<usize> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| {
            pattern
                .iter()
                .zip(&text[i..])
                .all(|(&p, &t)| p == '*' || p == t)
        })
        .collect()
}

/// Texts over a small alphabet so that repeats are common
pub fn small_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c')], 0..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Patterns over the same alphabet with up to `max_wildcards` wildcards
pub fn small_pattern(max_len: usize, max_wildcards: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c'), Just('*')], 1..=max_len)
        .prop_filter("too many wildcards", move |chars| {
            chars.iter().filter(|&&c| c == '*').count() <= max_wildcards
        })
        .prop_map(|chars| chars.into_iter().collect())
}
