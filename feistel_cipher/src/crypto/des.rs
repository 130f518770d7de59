use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_tables::{FP, IP};
use crate::crypto::des_transformation::DesTransformation;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::feistel_network::FeistelNetwork;
use crate::crypto::utils::permute_des;
use std::sync::Arc;

pub const DES_BLOCK_SIZE: usize = 8;
pub const DES_ROUNDS: usize = 16;

/// 16-round DES: the Feistel network wrapped in the IP / FP permutations.
pub struct DES {
    feistel_network: FeistelNetwork,
}

impl DES {
    pub fn new() -> CipherResult<Self> {
        let feistel_network = FeistelNetwork::new(
            DES_ROUNDS,
            DES_BLOCK_SIZE,
            Arc::new(DesKeyExpansion),
            Arc::new(DesTransformation),
        )?;

        Ok(DES { feistel_network })
    }

    pub fn with_key(key: &[u8]) -> CipherResult<Self> {
        let mut des = Self::new()?;
        des.set_key(key)?;
        Ok(des)
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        self.feistel_network.round_keys()
    }

    fn check_block(block: &[u8]) -> CipherResult<()> {
        if block.len() != DES_BLOCK_SIZE {
            return Err(CipherError::length("DES block", DES_BLOCK_SIZE, block.len()));
        }
        Ok(())
    }
}

impl CipherAlgorithm for DES {
    fn encrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        Self::check_block(block)?;
        let permuted = permute_des(block, &IP)?;
        let result = self.feistel_network.encrypt_block(&permuted)?;
        permute_des(&result, &FP)
    }

    fn decrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        Self::check_block(block)?;
        let permuted = permute_des(block, &IP)?;
        let result = self.feistel_network.decrypt_block(&permuted)?;
        permute_des(&result, &FP)
    }

    fn block_size(&self) -> usize {
        DES_BLOCK_SIZE
    }
}

impl SymmetricCipher for DES {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        self.feistel_network.set_key(key)
    }
}
