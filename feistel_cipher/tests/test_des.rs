#[cfg(test)]
mod tests {
    use feistel_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
    use feistel_cipher::crypto::des::DES;
    use feistel_cipher::crypto::error::CipherError;
    use feistel_cipher::crypto::utils::adjust_key_parity;
    use hex_literal::hex;

    #[test]
    fn test_des_known_answer_vector() {
        let key = hex!("13 34 57 79 9B BC DF F1");
        let plaintext = hex!("01 23 45 67 89 AB CD EF");
        let expected_ciphertext = hex!("85 E8 13 54 0F 0A B4 05");

        let des = DES::with_key(&key).unwrap();

        let ciphertext = des.encrypt_block(&plaintext).unwrap();
        assert_eq!(ciphertext, expected_ciphertext);

        let decrypted = des.decrypt_block(&ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_des_second_known_answer_vector() {
        let des = DES::with_key(&hex!("0E 32 92 32 EA 6D 0D 73")).unwrap();
        let ciphertext = des.encrypt_block(&hex!("87 87 87 87 87 87 87 87")).unwrap();
        assert_eq!(ciphertext, vec![0u8; 8]);
    }

    #[test]
    fn test_des_roundtrip_many_blocks() {
        let des = DES::with_key(&adjust_key_parity(b"k3y-des!")).unwrap();
        for seed in 0u8..64 {
            let block: Vec<u8> = (0..8).map(|i| seed.wrapping_mul(37).wrapping_add(i * 29)).collect();
            let encrypted = des.encrypt_block(&block).unwrap();
            assert_eq!(des.decrypt_block(&encrypted).unwrap(), block);
        }
    }

    #[test]
    fn test_des_produces_sixteen_round_keys() {
        let des = DES::with_key(&hex!("13 34 57 79 9B BC DF F1")).unwrap();
        assert_eq!(des.round_keys().len(), 16);
        assert!(des.round_keys().iter().all(|k| k.len() == 6));
    }

    #[test]
    fn test_des_rejects_invalid_keys() {
        let mut des = DES::new().unwrap();
        assert!(matches!(des.set_key(b"12345678"), Err(CipherError::Parity { index: 2 })));
        assert!(matches!(
            des.set_key(&[0x01; 16]),
            Err(CipherError::InvalidLength { expected: 8, actual: 16, .. })
        ));
        assert!(matches!(des.encrypt_block(&[0; 8]), Err(CipherError::KeyNotSet)));
    }

    #[test]
    fn test_des_rejects_wrong_block_size() {
        let des = DES::with_key(&hex!("13 34 57 79 9B BC DF F1")).unwrap();
        assert!(matches!(
            des.encrypt_block(&[0; 7]),
            Err(CipherError::InvalidLength { expected: 8, actual: 7, .. })
        ));
        assert!(des.decrypt_block(&[0; 9]).is_err());
    }
}
