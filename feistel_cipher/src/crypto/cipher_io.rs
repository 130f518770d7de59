use crate::crypto::cipher_types::{CipherInput, CipherOutput};
use crate::crypto::error::CipherResult;

pub async fn read_all(input: CipherInput) -> CipherResult<Vec<u8>> {
    match input {
        CipherInput::Bytes(data) => Ok(data),
        CipherInput::File(path) => Ok(tokio::fs::read(path).await?),
    }
}

pub async fn write_all(output: &mut CipherOutput, data: Vec<u8>) -> CipherResult<()> {
    match output {
        CipherOutput::Buffer(buffer) => {
            *buffer = data;
            Ok(())
        }
        CipherOutput::File(path) => Ok(tokio::fs::write(path, data).await?),
    }
}
