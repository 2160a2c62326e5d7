//! proptest strategies for routing keys and method tables.
#![allow(dead_code)]

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

/// Non-blank ASCII routing keys
pub fn routing_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// CamelCase suffix that turns into a single lowercase word
pub fn handler_word_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10}"
}

/// Registration attempts: (key, index of the handler registering it)
pub fn registration_sequence_strategy() -> impl Strategy<Value = Vec<(String, usize)>> {
    vec((prop_oneof!["alpha", "beta", "gamma", "delta", routing_key_strategy()], 0usize..4), 1..40)
}

/// Distinct handler methods (`handleXxx`) mixed with non-handler methods, shuffled
pub fn method_table_strategy() -> impl Strategy<Value = (Vec<String>, usize)> {
    (
        btree_set(handler_word_strategy(), 0..8),
        btree_set("[a-z]{3,8}", 0..5),
    )
        .prop_flat_map(|(handlers, helpers)| {
            let handler_count = handlers.len();
            let names: Vec<String> = handlers
                .into_iter()
                .map(|word| format!("handle{word}"))
                .chain(helpers.into_iter().filter(|h| !h.starts_with("handle")))
                .collect();
            (Just(names).prop_shuffle(), Just(handler_count))
        })
}
