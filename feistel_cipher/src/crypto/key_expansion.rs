use crate::crypto::error::CipherResult;

/// Derives the ordered round keys for one master key.
pub trait KeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>>;
}
