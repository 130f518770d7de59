use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
pub use crate::crypto::deal_key_expansion::{DealKeyExpansion, DealVariant};
use crate::crypto::des_adapter::DesAdapter;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::feistel_network::FeistelNetwork;
use std::sync::Arc;

pub const DEAL_BLOCK_SIZE: usize = 16;

/// DEAL: a 128-bit Feistel cipher whose round function is DES.
pub struct DEAL {
    feistel_network: FeistelNetwork,
    variant: DealVariant,
    adapter: Arc<DesAdapter>,
}

impl DEAL {
    pub fn new(variant: DealVariant) -> CipherResult<Self> {
        let adapter = Arc::new(DesAdapter::new());
        let feistel_network = FeistelNetwork::new(
            variant.rounds(),
            DEAL_BLOCK_SIZE,
            Arc::new(DealKeyExpansion::new(variant)),
            adapter.clone(),
        )?;

        Ok(DEAL {
            feistel_network,
            variant,
            adapter,
        })
    }

    /// Picks the variant from the key length and sets the key.
    pub fn with_key(key: &[u8]) -> CipherResult<Self> {
        let mut deal = Self::new(DealVariant::from_key_len(key.len())?)?;
        deal.set_key(key)?;
        Ok(deal)
    }

    pub fn variant(&self) -> DealVariant {
        self.variant
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        self.feistel_network.round_keys()
    }

    pub fn adapter(&self) -> &DesAdapter {
        &self.adapter
    }
}

impl CipherAlgorithm for DEAL {
    fn encrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.feistel_network.encrypt_block(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.feistel_network.decrypt_block(block)
    }

    fn block_size(&self) -> usize {
        DEAL_BLOCK_SIZE
    }
}

impl SymmetricCipher for DEAL {
    fn set_key(&mut self, key: &[u8]) -> CipherResult<()> {
        if key.len() != self.variant.key_size() {
            return Err(CipherError::length("DEAL key", self.variant.key_size(), key.len()));
        }
        self.feistel_network.set_key(key)?;
        // instances keyed by the previous schedule are never looked up again
        self.adapter.clear();
        Ok(())
    }
}
