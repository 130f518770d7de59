use crate::crypto::cipher_traits::CipherAlgorithm;
use crate::crypto::des::DES;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::utils::adjust_key_parity;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Uses a whole DES encryption as the round function of DEAL.
///
/// Keyed DES instances are cached per parity-adjusted round key; lookups share
/// a read lock and only a miss takes the write lock.
#[derive(Default)]
pub struct DesAdapter {
    cache: RwLock<HashMap<Vec<u8>, Arc<DES>>>,
}

impl DesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_instances(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every cached instance.
    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Returns the cached DES instance for `round_key`, building it on first use.
    pub fn instance_for(&self, round_key: &[u8]) -> CipherResult<Arc<DES>> {
        if round_key.len() != 8 {
            return Err(CipherError::length("DEAL round key", 8, round_key.len()));
        }
        let adjusted = adjust_key_parity(round_key);

        if let Some(des) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&adjusted)
        {
            return Ok(Arc::clone(des));
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // another caller may have inserted it while we waited for the write lock
        if let Some(des) = cache.get(&adjusted) {
            return Ok(Arc::clone(des));
        }

        log::trace!("DES adapter cache miss, {} instances cached", cache.len());
        let des = Arc::new(DES::with_key(&adjusted)?);
        cache.insert(adjusted, Arc::clone(&des));
        Ok(des)
    }
}

impl EncryptionTransformation for DesAdapter {
    fn transform(&self, data: &[u8], round_key: &[u8]) -> CipherResult<Vec<u8>> {
        if data.len() != 8 {
            return Err(CipherError::length("DEAL half-block", 8, data.len()));
        }
        self.instance_for(round_key)?.encrypt_block(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_differing_only_in_parity_share_an_instance() {
        let adapter = DesAdapter::new();
        let a = adapter.instance_for(&[0x12; 8]).unwrap();
        let b = adapter.instance_for(&[0x13; 8]).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(adapter.cached_instances(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let adapter = DesAdapter::new();
        adapter.transform(&[0; 8], &[0x40; 8]).unwrap();
        assert_eq!(adapter.cached_instances(), 1);

        adapter.clear();
        assert_eq!(adapter.cached_instances(), 0);
    }

    #[test]
    fn rejects_wrong_half_block() {
        let adapter = DesAdapter::new();
        assert!(adapter.transform(&[0; 4], &[0; 8]).is_err());
        assert!(adapter.transform(&[0; 8], &[0; 6]).is_err());
    }
}
