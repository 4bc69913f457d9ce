//! Named global sequences for unique attribute values.
//!
//! Sequences are monotonically increasing counters keyed by name. They back
//! attributes declared with a `{n}` format string, so that every
//! instantiation of a factory observes a fresh value.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global sequence counters.
static SEQUENCES: Lazy<RwLock<HashMap<String, u64>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the next value of the named sequence.
///
/// Counters start at 1 on first use.
pub fn next_value(name: &str) -> u64 {
	let mut sequences = SEQUENCES.write();
	let counter = sequences.entry(name.to_string()).or_insert(0);
	*counter += 1;
	*counter
}

/// Formats the next value of the named sequence.
///
/// Every `{n}` placeholder in `format` is replaced with the counter value.
///
/// # Example
///
/// ```
/// let first = grappelli::sequence::sequence("doc.codes", "code_{n}");
/// let second = grappelli::sequence::sequence("doc.codes", "code_{n}");
/// assert_eq!(first, "code_1");
/// assert_eq!(second, "code_2");
/// ```
pub fn sequence(name: &str, format: &str) -> String {
	let value = next_value(name);
	format.replace("{n}", &value.to_string())
}

/// Resets the named sequence to its initial state.
pub fn reset_sequence(name: &str) {
	SEQUENCES.write().remove(name);
}

/// Resets all sequences.
///
/// This is primarily useful for testing.
pub fn reset_sequences() {
	SEQUENCES.write().clear();
}
