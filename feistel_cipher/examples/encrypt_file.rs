use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use feistel_cipher::crypto::cipher_context::CipherContext;
use feistel_cipher::crypto::cipher_types::{CipherMode, ExtraParams, PaddingMode};
use feistel_cipher::crypto::deal::DEAL;
use feistel_cipher::crypto::des::DES;
use feistel_cipher::crypto::utils::adjust_key_parity;
use rand::RngCore;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    input.with_file_name(name)
}

/// Encrypts and decrypts a file with DES and DEAL-192 in every mode,
/// checking that each decryption restores the original bytes.
///
/// cargo run --example encrypt_file -- <path>
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let input: PathBuf = env::args()
        .nth(1)
        .ok_or("usage: encrypt_file <path>")?
        .into();
    let original = tokio::fs::read(&input).await?;
    println!("Read {} bytes from {}", original.len(), input.display());

    let modes = [
        CipherMode::ECB,
        CipherMode::CBC,
        CipherMode::PCBC,
        CipherMode::CFB,
        CipherMode::OFB,
        CipherMode::CTR,
        CipherMode::RandomDelta,
    ];

    let des_key = adjust_key_parity(&random_bytes(8));
    let deal_key = random_bytes(24);

    for mode in modes {
        let contexts = [
            (
                "des",
                CipherContext::new(
                    Box::new(DES::new()?),
                    &des_key,
                    mode,
                    PaddingMode::PKCS7,
                    Some(random_bytes(8)),
                    ExtraParams::with_delta(random_bytes(8)),
                )?,
            ),
            (
                "deal",
                CipherContext::new(
                    Box::new(DEAL::with_key(&deal_key)?),
                    &deal_key,
                    mode,
                    PaddingMode::ISO10126,
                    Some(random_bytes(16)),
                    ExtraParams::with_delta(random_bytes(16)),
                )?,
            ),
        ];

        for (name, ctx) in contexts {
            let tag = format!(".{}.{:?}", name, mode).to_lowercase();
            let encrypted = output_path(&input, &format!("{tag}.enc"));
            let decrypted = output_path(&input, &format!("{tag}.dec"));

            ctx.encrypt_file(&input, &encrypted).await?;
            ctx.decrypt_file(&encrypted, &decrypted).await?;

            let restored = tokio::fs::read(&decrypted).await?;
            let status = if restored == original { "OK" } else { "MISMATCH" };
            println!("{name} {mode:?}: {} -> {status}", encrypted.display());
        }
    }

    Ok(())
}
