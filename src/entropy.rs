//! Randomness provider for simulated checksums, artifact filler, and hex
//! previews. Kept behind a trait so tests can substitute a deterministic
//! source and assert on format rather than entropy.

use rand::{Rng, RngCore};

pub trait EntropySource: Send + Sync {
    /// `n` lowercase hexadecimal characters.
    fn hex(&self, n: usize) -> String;

    /// `n` random bytes.
    fn bytes(&self, n: usize) -> Vec<u8>;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn hex(&self, n: usize) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut rng = rand::thread_rng();
        (0..n).map(|_| HEX[rng.gen_range(0..16)] as char).collect()
    }

    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        rand::thread_rng().fill_bytes(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_has_requested_length_and_charset() {
        let s = ThreadEntropy.hex(128);
        assert_eq!(s.len(), 128);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn bytes_has_requested_length() {
        assert_eq!(ThreadEntropy.bytes(48 * 1024).len(), 48 * 1024);
    }
}
