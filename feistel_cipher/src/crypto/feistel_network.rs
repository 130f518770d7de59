use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::xor_in_place;
use std::sync::Arc;

/// Generic balanced Feistel network.
///
/// Each round maps `(L, R)` to `(R, F(R, K_i) ^ L)`; the halves are swapped
/// once more at the end, so decryption is the same loop over the reversed
/// key sequence.
pub struct FeistelNetwork {
    num_rounds: usize,
    block_size: usize,
    key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
    transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    encryption_keys: Vec<Vec<u8>>,
    decryption_keys: Vec<Vec<u8>>,
}

impl FeistelNetwork {
    pub fn new(
        num_rounds: usize,
        block_size: usize,
        key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
        transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    ) -> CipherResult<Self> {
        if num_rounds == 0 {
            return Err(CipherError::InvalidConfig("number of rounds must be positive"));
        }
        if block_size == 0 || block_size % 2 != 0 {
            return Err(CipherError::InvalidConfig("block size must be even and nonzero"));
        }

        Ok(Self {
            num_rounds,
            block_size,
            key_expansion,
            transformation,
            encryption_keys: Vec::new(),
            decryption_keys: Vec::new(),
        })
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        &self.encryption_keys
    }

    pub fn encrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> CipherResult<Vec<u8>> {
        self.run_rounds(block, round_keys.iter())
    }

    pub fn decrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> CipherResult<Vec<u8>> {
        let used = round_keys.len().min(self.num_rounds);
        self.run_rounds(block, round_keys[..used].iter().rev())
    }

    fn run_rounds<'k>(
        &self,
        block: &[u8],
        round_keys: impl ExactSizeIterator<Item = &'k Vec<u8>>,
    ) -> CipherResult<Vec<u8>> {
        if block.len() != self.block_size {
            return Err(CipherError::length("Feistel block", self.block_size, block.len()));
        }
        if round_keys.len() < self.num_rounds {
            return Err(CipherError::NotEnoughRoundKeys {
                produced: round_keys.len(),
                required: self.num_rounds,
            });
        }

        let (left, right) = block.split_at(self.block_size / 2);
        let mut left = left.to_vec();
        let mut right = right.to_vec();

        for round_key in round_keys.take(self.num_rounds) {
            let mut feistel_out = self.transformation.transform(&right, round_key)?;
            xor_in_place(&mut feistel_out, &left)?;
            left = std::mem::replace(&mut right, feistel_out);
        }

        Ok([right, left].concat())
    }

    fn ensure_key(&self) -> CipherResult<()> {
        if self.encryption_keys.is_empty() {
            return Err(CipherError::KeyNotSet);
        }
        Ok(())
    }
}

impl CipherAlgorithm for FeistelNetwork {
    fn encrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.ensure_key()?;
        self.run_rounds(block, self.encryption_keys.iter())
    }

    fn decrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.ensure_key()?;
        self.run_rounds(block, self.decryption_keys.iter())
    }

    fn block_size(&self) -> usize {
        self.block_size
    }
}

impl SymmetricCipher for FeistelNetwork {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        let mut round_keys = self.key_expansion.generate_round_keys(key)?;
        if round_keys.len() < self.num_rounds {
            return Err(CipherError::NotEnoughRoundKeys {
                produced: round_keys.len(),
                required: self.num_rounds,
            });
        }
        round_keys.truncate(self.num_rounds);

        self.decryption_keys = round_keys.iter().rev().cloned().collect();
        self.encryption_keys = round_keys;
        log::debug!(
            "Feistel network keyed: {} rounds, {}-byte block",
            self.num_rounds,
            self.block_size
        );
        Ok(())
    }
}
