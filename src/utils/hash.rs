// src/utils/hash.rs

//! Content digests used as joke identifiers.

use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept in an identifier.
const DIGEST_BYTES: usize = 16;

/// Hex digest of a text, truncated to [`DIGEST_BYTES`] bytes.
///
/// Depends only on the UTF-8 bytes of `text`, never on process state, so the
/// same text yields the same digest in every run and on every machine.
pub fn content_digest(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("abc") = ba7816bf8f01cfea414140de5dae2223...
        assert_eq!(content_digest("abc"), "ba7816bf8f01cfea414140de5dae2223");
    }

    #[test]
    fn test_digest_is_deterministic() {
        let text = "Встречаются два программиста...";
        assert_eq!(content_digest(text), content_digest(&text.to_string()));
    }

    #[test]
    fn test_digest_shape() {
        let digest = content_digest("");
        assert_eq!(digest.len(), DIGEST_BYTES * 2);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_different_texts_differ() {
        assert_ne!(content_digest("joke one"), content_digest("joke two"));
        assert_ne!(content_digest("joke"), content_digest("joke "));
    }
}
