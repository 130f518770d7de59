use crate::crypto::error::CipherResult;

/// Feistel round function: mixes one half-block with one round key.
pub trait EncryptionTransformation {
    fn transform(&self, input_block: &[u8], round_key: &[u8]) -> CipherResult<Vec<u8>>;
}
