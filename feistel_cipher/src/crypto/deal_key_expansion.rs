use crate::crypto::cipher_traits::CipherAlgorithm;
use crate::crypto::des::DES;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{adjust_key_parity, xor_in_place};

const KEY_PART_SIZE: usize = 8;
const SCHEDULE_KEY_BYTE: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealVariant {
    Deal128,
    Deal192,
    Deal256,
}

impl DealVariant {
    pub fn from_key_len(key_len: usize) -> CipherResult<Self> {
        match key_len {
            16 => Ok(DealVariant::Deal128),
            24 => Ok(DealVariant::Deal192),
            32 => Ok(DealVariant::Deal256),
            _ => Err(CipherError::UnsupportedVariant { key_len }),
        }
    }

    /// Number of 8-byte parts in the master key.
    pub fn key_parts(self) -> usize {
        match self {
            DealVariant::Deal128 => 2,
            DealVariant::Deal192 => 3,
            DealVariant::Deal256 => 4,
        }
    }

    pub fn rounds(self) -> usize {
        match self {
            DealVariant::Deal128 | DealVariant::Deal192 => 6,
            DealVariant::Deal256 => 8,
        }
    }

    pub fn key_size(self) -> usize {
        self.key_parts() * KEY_PART_SIZE
    }
}

/// DEAL schedule: every round key is the DES encryption, under a fixed
/// parity-adjusted key, of a key part chained with the previous round key.
pub struct DealKeyExpansion {
    variant: DealVariant,
}

impl DealKeyExpansion {
    pub fn new(variant: DealVariant) -> Self {
        DealKeyExpansion { variant }
    }

    pub fn variant(&self) -> DealVariant {
        self.variant
    }
}

impl KeyExpansion for DealKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        let parts = self.variant.key_parts();
        let rounds = self.variant.rounds();
        if key.len() != self.variant.key_size() {
            return Err(CipherError::length("DEAL master key", self.variant.key_size(), key.len()));
        }

        let schedule_des = DES::with_key(&adjust_key_parity(&[SCHEDULE_KEY_BYTE; KEY_PART_SIZE]))?;
        let key_parts: Vec<&[u8]> = key.chunks_exact(KEY_PART_SIZE).collect();

        let mut round_keys: Vec<Vec<u8>> = Vec::with_capacity(rounds);
        round_keys.push(schedule_des.encrypt_block(key_parts[0])?);

        for i in 1..rounds {
            let mut tmp = key_parts[i % parts].to_vec();
            xor_in_place(&mut tmp, &round_keys[i - 1])?;
            if i >= parts {
                let constant = 1u64 << (i - parts);
                xor_in_place(&mut tmp, &constant.to_be_bytes())?;
            }
            round_keys.push(schedule_des.encrypt_block(&tmp)?);
        }

        Ok(round_keys)
    }
}
