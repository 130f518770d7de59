use crate::crypto::des_tables::{PC1, PC2, SHIFT_BITS};
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::{check_key_parity, permute_des};
use bitvec::prelude::*;

pub struct DesKeyExpansion;

impl KeyExpansion for DesKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        if key.len() != 8 {
            return Err(CipherError::length("DES key", 8, key.len()));
        }
        check_key_parity(key)?;

        // PC-1 drops the parity bits and leaves C0 || D0, 28 bits each
        let permuted = permute_des(key, &PC1)?;
        let bits = permuted.view_bits::<Msb0>();
        let mut c = bits[..28].to_bitvec();
        let mut d = bits[28..56].to_bitvec();

        let mut round_keys = Vec::with_capacity(SHIFT_BITS.len());
        for &shift in &SHIFT_BITS {
            c.rotate_left(shift);
            d.rotate_left(shift);

            let mut cd: BitVec<u8, Msb0> = BitVec::with_capacity(56);
            cd.extend_from_bitslice(c.as_bitslice());
            cd.extend_from_bitslice(d.as_bitslice());

            round_keys.push(permute_des(cd.as_raw_slice(), &PC2)?);
        }

        Ok(round_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_subkeys_match_reference_schedule() {
        let key = [0x13, 0x34, 0x57, 0x79, 0x9B, 0xBC, 0xDF, 0xF1];
        let keys = DesKeyExpansion.generate_round_keys(&key).unwrap();

        assert_eq!(keys.len(), 16);
        assert_eq!(keys[0], vec![0x1B, 0x02, 0xEF, 0xFC, 0x70, 0x72]);
        assert_eq!(keys[15], vec![0xCB, 0x3D, 0x8B, 0x0E, 0x17, 0xF5]);
    }

    #[test]
    fn rejects_bad_parity_and_length() {
        assert!(matches!(
            DesKeyExpansion.generate_round_keys(b"12345678"),
            Err(CipherError::Parity { index: 2 })
        ));
        assert!(matches!(
            DesKeyExpansion.generate_round_keys(&[1u8; 7]),
            Err(CipherError::InvalidLength { expected: 8, actual: 7, .. })
        ));
    }
}
