use crate::crypto::cipher_io::{read_all, write_all};
use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::cipher_types::{CipherInput, CipherMode, CipherOutput, ExtraParams, PaddingMode};
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::padding::{apply_padding, remove_padding};
use crate::crypto::utils::xor_in_place;
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::ops::Range;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::available_parallelism;

type SharedRng = Arc<Mutex<dyn RngCore + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// A keyed block cipher bound to a mode of operation and a padding scheme.
///
/// Byte buffers are processed on the blocking pool; ECB and CTR blocks fan
/// out over rayon, the feedback modes run block by block. File input is
/// additionally split into block-aligned chunks (one task each) when the mode
/// has no inter-block dependency; feedback modes take a single pass, so file
/// and buffer results are always identical.
#[derive(Clone)]
pub struct CipherContext {
    algorithm: Arc<dyn SymmetricCipher + Send + Sync>,
    mode: CipherMode,
    padding: PaddingMode,
    iv: Option<Vec<u8>>,
    delta: Option<Vec<u8>>,
    workers: usize,
    rng: SharedRng,
}

impl CipherContext {
    pub fn new(
        mut algorithm: Box<dyn SymmetricCipher + Send + Sync>,
        key: &[u8],
        mode: CipherMode,
        padding: PaddingMode,
        iv: Option<Vec<u8>>,
        params: ExtraParams,
    ) -> CipherResult<Self> {
        let block_size = algorithm.block_size();
        if block_size == 0 || block_size % 2 != 0 {
            return Err(CipherError::InvalidConfig("block size must be even and nonzero"));
        }
        if block_size > usize::from(u8::MAX) {
            return Err(CipherError::InvalidConfig("block size does not fit a padding length byte"));
        }

        let iv = if mode.requires_iv() {
            let iv = iv.ok_or(CipherError::MissingIv(mode))?;
            if iv.len() != block_size {
                return Err(CipherError::length("IV", block_size, iv.len()));
            }
            Some(iv)
        } else {
            if iv.is_some() {
                log::warn!("IV supplied for {mode:?} is ignored");
            }
            None
        };

        let delta = match mode {
            CipherMode::RandomDelta => {
                let delta = params.delta.ok_or(CipherError::MissingParameter {
                    mode,
                    name: "delta",
                })?;
                if delta.len() != block_size {
                    return Err(CipherError::length("delta", block_size, delta.len()));
                }
                Some(delta)
            }
            _ => None,
        };

        algorithm.set_key(key)?;

        let workers = available_parallelism().map_or(1, |n| n.get());
        log::debug!(
            "Cipher context: {mode:?}/{padding:?}, {block_size}-byte block, {workers} workers"
        );

        Ok(Self {
            algorithm: Arc::from(algorithm),
            mode,
            padding,
            iv,
            delta,
            workers,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        })
    }

    /// Number of chunks a file is split into for ECB / CTR.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Replaces the source of ISO 10126 filler bytes.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn encrypt(&self, input: CipherInput, output: &mut CipherOutput) -> CipherResult<()> {
        let chunked = matches!(input, CipherInput::File(_));
        let data = read_all(input).await?;
        let encrypted = self.run(data, Direction::Encrypt, chunked).await?;
        write_all(output, encrypted).await
    }

    pub async fn decrypt(&self, input: CipherInput, output: &mut CipherOutput) -> CipherResult<()> {
        let chunked = matches!(input, CipherInput::File(_));
        let data = read_all(input).await?;
        let decrypted = self.run(data, Direction::Decrypt, chunked).await?;
        write_all(output, decrypted).await
    }

    pub async fn encrypt_bytes(&self, data: impl Into<Vec<u8>>) -> CipherResult<Vec<u8>> {
        self.run(data.into(), Direction::Encrypt, false).await
    }

    pub async fn decrypt_bytes(&self, data: impl Into<Vec<u8>>) -> CipherResult<Vec<u8>> {
        self.run(data.into(), Direction::Decrypt, false).await
    }

    pub async fn encrypt_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> CipherResult<()> {
        self.encrypt(
            CipherInput::File(input.as_ref().to_path_buf()),
            &mut CipherOutput::File(output.as_ref().to_path_buf()),
        )
        .await
    }

    pub async fn decrypt_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> CipherResult<()> {
        self.decrypt(
            CipherInput::File(input.as_ref().to_path_buf()),
            &mut CipherOutput::File(output.as_ref().to_path_buf()),
        )
        .await
    }

    async fn run(&self, mut data: Vec<u8>, direction: Direction, chunked: bool) -> CipherResult<Vec<u8>> {
        let block_size = self.algorithm.block_size();

        match direction {
            Direction::Encrypt => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                apply_padding(&mut data, block_size, self.padding, &mut *rng)?;
            }
            Direction::Decrypt => {
                if data.len() % block_size != 0 {
                    return Err(CipherError::Unaligned {
                        len: data.len(),
                        block_size,
                    });
                }
            }
        }

        let mut result = if chunked && self.mode.is_parallel() {
            self.process_chunks(data, direction).await?
        } else {
            let this = self.clone();
            tokio::task::spawn_blocking(move || this.process_blocks(&data, 0, direction)).await??
        };

        if direction == Direction::Decrypt {
            remove_padding(&mut result, block_size, self.padding)?;
        }
        Ok(result)
    }

    async fn process_chunks(&self, data: Vec<u8>, direction: Direction) -> CipherResult<Vec<u8>> {
        let block_size = self.algorithm.block_size();
        let ranges = chunk_ranges(data.len(), block_size, self.workers);
        log::debug!(
            "{:?} {} bytes in {} chunks ({:?})",
            direction,
            data.len(),
            ranges.len(),
            self.mode
        );

        let data = Arc::new(data);
        let tasks = ranges.into_iter().map(|range| {
            let this = self.clone();
            let data = Arc::clone(&data);
            let first_block = (range.start / block_size) as u64;
            tokio::task::spawn_blocking(move || this.process_blocks(&data[range], first_block, direction))
        });

        let chunks = try_join_all(tasks)
            .await?
            .into_iter()
            .collect::<CipherResult<Vec<_>>>()?;
        Ok(chunks.concat())
    }

    /// Runs the mode over block-aligned `data` whose first block has absolute
    /// index `first_block` within the message.
    fn process_blocks(&self, data: &[u8], first_block: u64, direction: Direction) -> CipherResult<Vec<u8>> {
        let block_size = self.algorithm.block_size();

        let blocks = if self.mode.is_parallel() {
            data.par_chunks(block_size)
                .enumerate()
                .map(|(i, block)| {
                    self.process_block(block, first_block + i as u64, &mut Vec::new(), direction)
                })
                .collect::<CipherResult<Vec<_>>>()?
        } else {
            let mut feedback = self.iv.clone().ok_or(CipherError::MissingIv(self.mode))?;
            data.chunks(block_size)
                .enumerate()
                .map(|(i, block)| self.process_block(block, first_block + i as u64, &mut feedback, direction))
                .collect::<CipherResult<Vec<_>>>()?
        };

        Ok(blocks.concat())
    }

    fn process_block(
        &self,
        block: &[u8],
        index: u64,
        feedback: &mut Vec<u8>,
        direction: Direction,
    ) -> CipherResult<Vec<u8>> {
        let algorithm = &self.algorithm;

        match (self.mode, direction) {
            (CipherMode::ECB, Direction::Encrypt) => algorithm.encrypt_block(block),
            (CipherMode::ECB, Direction::Decrypt) => algorithm.decrypt_block(block),

            (CipherMode::CTR, _) => {
                let counter = counter_block(self.iv()?, index);
                let mut out = algorithm.encrypt_block(&counter)?;
                xor_in_place(&mut out, block)?;
                Ok(out)
            }

            (CipherMode::CBC, Direction::Encrypt) => {
                let mut mixed = block.to_vec();
                xor_in_place(&mut mixed, feedback)?;
                let out = algorithm.encrypt_block(&mixed)?;
                feedback.clone_from(&out);
                Ok(out)
            }
            (CipherMode::CBC, Direction::Decrypt) => {
                let mut out = algorithm.decrypt_block(block)?;
                xor_in_place(&mut out, feedback)?;
                feedback.copy_from_slice(block);
                Ok(out)
            }

            (CipherMode::PCBC, Direction::Encrypt) => {
                let mut mixed = block.to_vec();
                xor_in_place(&mut mixed, feedback)?;
                let out = algorithm.encrypt_block(&mixed)?;
                feedback.clone_from(&out);
                xor_in_place(feedback, block)?;
                Ok(out)
            }
            (CipherMode::PCBC, Direction::Decrypt) => {
                let mut out = algorithm.decrypt_block(block)?;
                xor_in_place(&mut out, feedback)?;
                feedback.clone_from(&out);
                xor_in_place(feedback, block)?;
                Ok(out)
            }

            (CipherMode::CFB, Direction::Encrypt) => {
                let mut out = algorithm.encrypt_block(feedback)?;
                xor_in_place(&mut out, block)?;
                feedback.clone_from(&out);
                Ok(out)
            }
            (CipherMode::CFB, Direction::Decrypt) => {
                let mut out = algorithm.encrypt_block(feedback)?;
                xor_in_place(&mut out, block)?;
                feedback.copy_from_slice(block);
                Ok(out)
            }

            (CipherMode::OFB, _) => {
                *feedback = algorithm.encrypt_block(feedback)?;
                let mut out = block.to_vec();
                xor_in_place(&mut out, feedback)?;
                Ok(out)
            }

            (CipherMode::RandomDelta, Direction::Encrypt) => {
                let mut mixed = block.to_vec();
                xor_in_place(&mut mixed, feedback)?;
                let out = algorithm.encrypt_block(&mixed)?;
                feedback.clone_from(&out);
                xor_in_place(feedback, self.delta()?)?;
                Ok(out)
            }
            (CipherMode::RandomDelta, Direction::Decrypt) => {
                let mut out = algorithm.decrypt_block(block)?;
                xor_in_place(&mut out, feedback)?;
                feedback.copy_from_slice(block);
                xor_in_place(feedback, self.delta()?)?;
                Ok(out)
            }
        }
    }

    fn iv(&self) -> CipherResult<&[u8]> {
        self.iv.as_deref().ok_or(CipherError::MissingIv(self.mode))
    }

    fn delta(&self) -> CipherResult<&[u8]> {
        self.delta.as_deref().ok_or(CipherError::MissingParameter {
            mode: self.mode,
            name: "delta",
        })
    }
}

impl CipherAlgorithm for CipherContext {
    fn encrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.algorithm.encrypt_block(block)
    }

    fn decrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.algorithm.decrypt_block(block)
    }

    fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }
}

/// `iv + index` as a big-endian integer, wrapping at the IV width.
pub fn counter_block(iv: &[u8], index: u64) -> Vec<u8> {
    let mut counter = iv.to_vec();
    let mut carry = u128::from(index);
    for byte in counter.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = u128::from(*byte) + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
    counter
}

/// Splits `total` bytes into contiguous block-aligned ranges of about
/// `total / workers` bytes each, never smaller than one block.
/// `block_size` must be nonzero.
pub(crate) fn chunk_ranges(total: usize, block_size: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk_size = (total / workers.max(1) / block_size * block_size).max(block_size);
    (0..total)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total))
        .collect()
}
