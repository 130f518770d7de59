use crate::crypto::cipher_types::PaddingMode;
use crate::crypto::error::{CipherError, CipherResult};
use rand::RngCore;

/// Extends `data` to a multiple of `block_size`.
///
/// Zeros adds nothing to aligned input; the length-byte schemes always add
/// between 1 and `block_size` bytes so the last byte can be read back.
pub fn apply_padding(
    data: &mut Vec<u8>,
    block_size: usize,
    padding: PaddingMode,
    rng: &mut dyn RngCore,
) -> CipherResult<()> {
    if block_size == 0 || block_size > usize::from(u8::MAX) {
        return Err(CipherError::InvalidConfig("padding block size must be in 1..=255"));
    }

    let remainder = data.len() % block_size;
    let padding_length = block_size - remainder;

    match padding {
        PaddingMode::Zeros => {
            if remainder != 0 {
                data.resize(data.len() + padding_length, 0);
            }
        }
        PaddingMode::PKCS7 => {
            data.resize(data.len() + padding_length, padding_length as u8);
        }
        PaddingMode::ANSI_X923 => {
            data.resize(data.len() + padding_length - 1, 0);
            data.push(padding_length as u8);
        }
        PaddingMode::ISO10126 => {
            let start = data.len();
            data.resize(start + padding_length - 1, 0);
            rng.fill_bytes(&mut data[start..]);
            data.push(padding_length as u8);
        }
    }
    Ok(())
}

pub fn remove_padding(
    data: &mut Vec<u8>,
    block_size: usize,
    padding: PaddingMode,
) -> CipherResult<()> {
    let Some(&last_byte) = data.last() else {
        return Ok(());
    };

    if let PaddingMode::Zeros = padding {
        let kept = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        data.truncate(kept);
        return Ok(());
    }

    let pad_len = last_byte as usize;
    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return Err(CipherError::InvalidPadding(format!(
            "{padding:?} length byte {pad_len} outside 1..={}",
            block_size.min(data.len())
        )));
    }

    let fill = &data[data.len() - pad_len..data.len() - 1];
    let fill_ok = match padding {
        PaddingMode::PKCS7 => fill.iter().all(|&b| b == last_byte),
        PaddingMode::ANSI_X923 => fill.iter().all(|&b| b == 0),
        _ => true,
    };
    if !fill_ok {
        return Err(CipherError::InvalidPadding(format!(
            "{padding:?} fill bytes do not match length {pad_len}"
        )));
    }

    data.truncate(data.len() - pad_len);
    Ok(())
}
