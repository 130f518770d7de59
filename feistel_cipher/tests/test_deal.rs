use feistel_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use feistel_cipher::crypto::deal::{DEAL, DealKeyExpansion, DealVariant};
use feistel_cipher::crypto::des_adapter::DesAdapter;
use feistel_cipher::crypto::encryption_transformation::EncryptionTransformation;
use feistel_cipher::crypto::error::CipherError;
use feistel_cipher::crypto::key_expansion::KeyExpansion;
use feistel_cipher::crypto::utils::adjust_key_parity;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn master_key(len: usize) -> Vec<u8> {
    (0..len as u8).map(|i| i.wrapping_mul(17).wrapping_add(3)).collect()
}

fn distinct_adapter_keys(deal: &DEAL) -> usize {
    deal.round_keys()
        .iter()
        .map(|k| adjust_key_parity(k))
        .collect::<HashSet<_>>()
        .len()
}

#[test]
fn test_deal_encrypt_decrypt_all_variants() {
    let plaintext = hex_literal::hex!("01 23 45 67 89 AB CD EF FE DC BA 98 76 54 32 10");

    for variant in [DealVariant::Deal128, DealVariant::Deal192, DealVariant::Deal256] {
        let mut deal = DEAL::new(variant).unwrap();
        deal.set_key(&master_key(variant.key_size())).unwrap();

        let ciphertext = deal.encrypt_block(&plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        assert_eq!(deal.decrypt_block(&ciphertext).unwrap(), plaintext, "{variant:?}");
    }
}

#[test]
fn test_deal_round_key_counts() {
    for (len, variant, rounds) in [
        (16, DealVariant::Deal128, 6),
        (24, DealVariant::Deal192, 6),
        (32, DealVariant::Deal256, 8),
    ] {
        let deal = DEAL::with_key(&master_key(len)).unwrap();
        assert_eq!(deal.variant(), variant);
        assert_eq!(deal.round_keys().len(), rounds);
    }
}

#[test]
fn test_deal_key_schedule_avalanche() {
    for variant in [DealVariant::Deal128, DealVariant::Deal192, DealVariant::Deal256] {
        let expansion = DealKeyExpansion::new(variant);
        let key = master_key(variant.key_size());
        let baseline = expansion.generate_round_keys(&key).unwrap();

        for position in 0..key.len() {
            let mut changed = key.clone();
            changed[position] ^= 0x80;
            let round_keys = expansion.generate_round_keys(&changed).unwrap();
            assert_ne!(round_keys, baseline, "{variant:?} byte {position}");
        }
    }
}

#[test]
fn test_deal_uses_16_byte_blocks() {
    let deal = DEAL::with_key(&master_key(16)).unwrap();
    assert_eq!(deal.block_size(), 16);
    assert!(matches!(
        deal.encrypt_block(&[0; 8]),
        Err(CipherError::InvalidLength { expected: 16, actual: 8, .. })
    ));
}

#[test]
fn test_deal_rejects_mismatched_key() {
    let mut deal = DEAL::new(DealVariant::Deal256).unwrap();
    assert!(matches!(
        deal.set_key(&master_key(24)),
        Err(CipherError::InvalidLength { expected: 32, actual: 24, .. })
    ));
    assert!(matches!(
        DEAL::with_key(&master_key(8)),
        Err(CipherError::UnsupportedVariant { key_len: 8 })
    ));
}

#[test]
fn test_deal_caches_one_des_per_round_key() {
    let deal = DEAL::with_key(&master_key(32)).unwrap();
    let block = [0x5Au8; 16];
    deal.encrypt_block(&block).unwrap();
    let after_first = deal.adapter().cached_instances();
    assert_eq!(after_first, distinct_adapter_keys(&deal));

    deal.encrypt_block(&block).unwrap();
    deal.decrypt_block(&block).unwrap();
    assert_eq!(deal.adapter().cached_instances(), after_first);
}

#[test]
fn test_deal_rekey_drops_old_instances() {
    let mut deal = DEAL::with_key(&master_key(16)).unwrap();
    let block = [0xA5u8; 16];
    let first = deal.encrypt_block(&block).unwrap();

    let other_key: Vec<u8> = master_key(16).iter().map(|b| b ^ 0xFF).collect();
    for _ in 0..5 {
        deal.set_key(&other_key).unwrap();
        assert_eq!(deal.adapter().cached_instances(), 0);
        deal.encrypt_block(&block).unwrap();
        assert_eq!(deal.adapter().cached_instances(), distinct_adapter_keys(&deal));
    }

    deal.set_key(&master_key(16)).unwrap();
    assert_eq!(deal.encrypt_block(&block).unwrap(), first);
}

#[test]
fn test_des_adapter_concurrent_lookups_agree() {
    let adapter = Arc::new(DesAdapter::new());
    let round_key = [0x3C, 0x11, 0x98, 0x02, 0x7E, 0xA1, 0x44, 0xD0];
    let half_block = [1, 2, 3, 4, 5, 6, 7, 8];

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let adapter = Arc::clone(&adapter);
            thread::spawn(move || {
                (0..20)
                    .map(|_| adapter.transform(&half_block, &round_key).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let outputs: Vec<Vec<u8>> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(adapter.cached_instances(), 1);
    assert!(Arc::ptr_eq(
        &adapter.instance_for(&round_key).unwrap(),
        &adapter.instance_for(&round_key).unwrap()
    ));
}
