//! Free-letter allocation.
//!
//! Given the set of names currently taken, produces one single-character
//! name guaranteed not to be among them. The scan order is fixed
//! (`a`..`z`, then `A`..`Z`), so the result is deterministic for a given
//! taken set; there is no fallback once the 52-letter alphabet is
//! exhausted.

use std::collections::HashSet;

use respell_foundation::{Error, Result};

/// Returns the first letter of the canonical alphabet not present in
/// `taken`.
///
/// # Errors
/// Returns `NoFreeNameAvailable` if all 52 letters are taken.
pub fn free_letter(taken: &HashSet<String>) -> Result<char> {
    ('a'..='z')
        .chain('A'..='Z')
        .find(|&c| !taken.contains(c.to_string().as_str()))
        .ok_or_else(Error::no_free_name)
}
