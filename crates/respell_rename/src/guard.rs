//! The global-collision guard.
//!
//! A single-character implicit global cannot be told apart from a local
//! about to be renamed onto the same letter: the write would silently
//! change which binding the global reads resolve to. The guard rejects
//! the whole operation before any mutation happens.

use respell_foundation::{Error, Result};

/// Fails if any single-character implicit global appears among the
/// target letters.
///
/// # Errors
/// Returns `UnsafeGlobalCollision` naming the first offending global.
pub fn check_global_collisions(implicit_globals: &[String], target: &[char]) -> Result<()> {
    for global in implicit_globals {
        let mut chars = global.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if target.contains(&c) {
                return Err(Error::unsafe_global_collision(global));
            }
        }
    }
    Ok(())
}
