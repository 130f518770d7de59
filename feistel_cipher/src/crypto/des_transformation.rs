use crate::crypto::des_tables::{E, P, S_BOXES};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::utils::{permute_des, xor_in_place};
use bitvec::prelude::*;

/// The DES F-function: E expansion, key mixing, S-boxes, P permutation.
pub struct DesTransformation;

impl EncryptionTransformation for DesTransformation {
    fn transform(&self, r_block: &[u8], round_key: &[u8]) -> CipherResult<Vec<u8>> {
        if r_block.len() != 4 {
            return Err(CipherError::length("DES half-block", 4, r_block.len()));
        }
        if round_key.len() != 6 {
            return Err(CipherError::length("DES round key", 6, round_key.len()));
        }

        // 1. Expansion + XOR
        let mut mixed = permute_des(r_block, &E)?;
        xor_in_place(&mut mixed, round_key)?;

        // 2. S-boxes: outer bits pick the row, inner four the column
        let mut s_result = [0u8; 4];
        let s_bits = s_result.view_bits_mut::<Msb0>();
        for (box_i, group) in mixed.view_bits::<Msb0>().chunks_exact(6).enumerate() {
            let row = (usize::from(group[0]) << 1) | usize::from(group[5]);
            let col = group[1..5]
                .iter()
                .by_vals()
                .fold(0usize, |acc, bit| (acc << 1) | usize::from(bit));
            let s_val = S_BOXES[box_i][row][col];
            for j in 0..4 {
                s_bits.set(box_i * 4 + j, (s_val >> (3 - j)) & 1 == 1);
            }
        }

        // 3. P-permutation
        permute_des(&s_result, &P)
    }
}
