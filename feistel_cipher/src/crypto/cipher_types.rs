use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    ECB,
    CBC,
    PCBC,
    CFB,
    OFB,
    CTR,
    RandomDelta,
}

impl CipherMode {
    pub fn requires_iv(self) -> bool {
        !matches!(self, CipherMode::ECB)
    }

    /// Modes whose blocks do not depend on each other and may be fanned out.
    pub fn is_parallel(self) -> bool {
        matches!(self, CipherMode::ECB | CipherMode::CTR)
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    Zeros,
    ANSI_X923,
    PKCS7,
    ISO10126,
}

/// Named mode parameters.
#[derive(Debug, Clone, Default)]
pub struct ExtraParams {
    /// Constant XORed into the feedback block after every block in `RandomDelta`.
    pub delta: Option<Vec<u8>>,
}

impl ExtraParams {
    pub fn with_delta(delta: impl Into<Vec<u8>>) -> Self {
        Self {
            delta: Some(delta.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CipherInput {
    Bytes(Vec<u8>),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub enum CipherOutput {
    Buffer(Vec<u8>),
    File(PathBuf),
}

impl CipherOutput {
    pub fn buffer() -> Self {
        CipherOutput::Buffer(Vec::new())
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            CipherOutput::Buffer(buf) => Some(buf),
            CipherOutput::File(_) => None,
        }
    }

    pub fn into_buffer(self) -> Option<Vec<u8>> {
        match self {
            CipherOutput::Buffer(buf) => Some(buf),
            CipherOutput::File(_) => None,
        }
    }
}
