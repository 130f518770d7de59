use crate::crypto::cipher_types::CipherMode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("{what} must be {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("DES key byte {index} has incorrect parity")]
    Parity { index: usize },

    #[error("permutation index {index} is out of range for a {bits}-bit input")]
    PermutationIndex { index: usize, bits: usize },

    #[error("permutation table length {0} is not a multiple of 8")]
    UnalignedTable(usize),

    #[error("permutation input and table must not be empty")]
    EmptyPermutation,

    #[error("input length {len} is not a multiple of the {block_size}-byte block")]
    Unaligned { len: usize, block_size: usize },

    #[error("invalid padding: {0}")]
    InvalidPadding(String),

    #[error("key is not set")]
    KeyNotSet,

    #[error("key expansion produced {produced} round keys, {required} required")]
    NotEnoughRoundKeys { produced: usize, required: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("mode {0:?} requires an initialization vector")]
    MissingIv(CipherMode),

    #[error("mode {mode:?} requires the `{name}` parameter")]
    MissingParameter {
        mode: CipherMode,
        name: &'static str,
    },

    #[error("no DEAL variant takes a {key_len}-byte key")]
    UnsupportedVariant { key_len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CipherError {
    pub(crate) fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        CipherError::InvalidLength {
            what,
            expected,
            actual,
        }
    }
}

pub type CipherResult<T> = Result<T, CipherError>;
