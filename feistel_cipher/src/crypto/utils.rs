use crate::crypto::error::{CipherError, CipherResult};
use bitvec::prelude::*;

/// Order in which bits are numbered inside each byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDirection {
    /// Bit 0 is the most significant bit of byte 0 (the FIPS 46 numbering).
    MsbFirst,
    /// Bit 0 is the least significant bit of byte 0.
    LsbFirst,
}

/// Whether permutation tables count source bits from 0 or from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

impl IndexBase {
    fn resolve(self, entry: usize) -> Option<usize> {
        match self {
            IndexBase::Zero => Some(entry),
            IndexBase::One => entry.checked_sub(1),
        }
    }
}

/// Builds `table.len() / 8` bytes where output bit `i` is input bit `table[i]`.
///
/// `direction` only selects how input bits are numbered; output bits are
/// always placed most significant bit first.
pub fn permute(
    input: &[u8],
    table: &[usize],
    direction: BitDirection,
    base: IndexBase,
) -> CipherResult<Vec<u8>> {
    if input.is_empty() || table.is_empty() {
        return Err(CipherError::EmptyPermutation);
    }
    if table.len() % 8 != 0 {
        return Err(CipherError::UnalignedTable(table.len()));
    }

    let mut output = vec![0u8; table.len() / 8];
    let target = output.view_bits_mut::<Msb0>();
    match direction {
        BitDirection::MsbFirst => permute_bits(input.view_bits::<Msb0>(), target, table, base)?,
        BitDirection::LsbFirst => permute_bits(input.view_bits::<Lsb0>(), target, table, base)?,
    }
    Ok(output)
}

fn permute_bits<O: BitOrder>(
    source: &BitSlice<u8, O>,
    target: &mut BitSlice<u8, Msb0>,
    table: &[usize],
    base: IndexBase,
) -> CipherResult<()> {
    for (position, &entry) in table.iter().enumerate() {
        let index = base
            .resolve(entry)
            .filter(|&index| index < source.len())
            .ok_or(CipherError::PermutationIndex {
                index: entry,
                bits: source.len(),
            })?;
        target.set(position, source[index]);
    }
    Ok(())
}

/// Shorthand for the FIPS 46 convention every DES table is written in.
pub(crate) fn permute_des(input: &[u8], table: &[usize]) -> CipherResult<Vec<u8>> {
    permute(input, table, BitDirection::MsbFirst, IndexBase::One)
}

pub fn xor_in_place(target: &mut [u8], other: &[u8]) -> CipherResult<()> {
    if target.len() != other.len() {
        return Err(CipherError::length("XOR operand", target.len(), other.len()));
    }
    target.iter_mut().zip(other).for_each(|(t, o)| *t ^= o);
    Ok(())
}

/// Sets the low bit of `byte` so the byte has an odd number of set bits.
pub fn adjust_parity(byte: u8) -> u8 {
    if (byte >> 1).count_ones() % 2 == 0 {
        byte | 1
    } else {
        byte & 0xFE
    }
}

pub fn adjust_key_parity(key: &[u8]) -> Vec<u8> {
    key.iter().map(|&b| adjust_parity(b)).collect()
}

pub fn has_valid_parity(key: &[u8]) -> bool {
    key.iter().all(|b| b.count_ones() % 2 == 1)
}

pub(crate) fn check_key_parity(key: &[u8]) -> CipherResult<()> {
    match key.iter().position(|b| b.count_ones() % 2 == 0) {
        Some(index) => Err(CipherError::Parity { index }),
        None => Ok(()),
    }
}
