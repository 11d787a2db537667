//! Short random identifiers

use rand::Rng;

/// Length of every generated id.
pub const ID_LENGTH: usize = 8;

/// How many fresh ids a store tries before giving up on a collision streak.
pub const MAX_ATTEMPTS: usize = 16;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate an 8 character id from the URL-safe alphabet.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate an id that `taken` rejects for none of the attempts.
pub fn generate_unique<F>(mut taken: F) -> crate::Result<String>
where
    F: FnMut(&str) -> bool,
{
    for _ in 0..MAX_ATTEMPTS {
        let id = generate();
        if !taken(&id) {
            return Ok(id);
        }
    }
    Err(crate::SnippetError::IdExhausted(MAX_ATTEMPTS))
}
