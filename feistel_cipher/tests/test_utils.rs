#[cfg(test)]
mod tests {
    use feistel_cipher::crypto::error::CipherError;
    use feistel_cipher::crypto::utils::*;

    const EVEN_THEN_ODD: [usize; 16] = [2, 4, 6, 8, 10, 12, 14, 16, 1, 3, 5, 7, 9, 11, 13, 15];

    #[test]
    fn test_permute_msb_first() {
        let input = vec![0b10101010, 0b11001100];
        let result = permute(&input, &EVEN_THEN_ODD, BitDirection::MsbFirst, IndexBase::One).unwrap();
        assert_eq!(result, vec![0b00001010, 0b11111010]);
    }

    #[test]
    fn test_permute_lsb_first() {
        let input = vec![0b10101010, 0b11001100];
        let result = permute(&input, &EVEN_THEN_ODD, BitDirection::LsbFirst, IndexBase::One).unwrap();
        assert_eq!(result, vec![0b11110101, 0b00000101]);
    }

    #[test]
    fn test_permute_lsb_first_reads_input_only() {
        // identity table under LSB numbering mirrors every byte, output stays MSB-first
        let p_block: Vec<usize> = (1..=16).collect();
        let result = permute(&[0b1100_0001, 0x0F], &p_block, BitDirection::LsbFirst, IndexBase::One).unwrap();
        assert_eq!(result, vec![0b1000_0011, 0xF0]);

        let msb = permute(&[0b1100_0001, 0x0F], &p_block, BitDirection::MsbFirst, IndexBase::One).unwrap();
        assert_eq!(msb, vec![0b1100_0001, 0x0F]);
    }

    #[test]
    fn test_permute_reverse_table() {
        let input = vec![0b10101010, 0b11001100];
        let p_block: Vec<usize> = (1..=16).rev().collect();

        let result = permute(&input, &p_block, BitDirection::MsbFirst, IndexBase::One).unwrap();
        assert_eq!(result, vec![0b00110011, 0b01010101]);
    }

    #[test]
    fn test_permute_byte_swap_zero_based_lsb() {
        // LSB-numbered source, so each byte's indices run high to low
        let p_block: Vec<usize> = (8..16).rev().chain((0..8).rev()).collect();
        let result = permute(&[0x12, 0x34], &p_block, BitDirection::LsbFirst, IndexBase::Zero).unwrap();
        assert_eq!(result, vec![0x34, 0x12]);
    }

    #[test]
    fn test_permute_output_length_follows_table() {
        let p_block: Vec<usize> = (1..=8).chain(1..=8).chain(1..=8).collect();
        let result = permute(&[0xA5], &p_block, BitDirection::MsbFirst, IndexBase::One).unwrap();
        assert_eq!(result, vec![0xA5, 0xA5, 0xA5]);
    }

    #[test]
    fn test_permute_errors() {
        assert!(matches!(
            permute(&[], &[1; 8], BitDirection::MsbFirst, IndexBase::One),
            Err(CipherError::EmptyPermutation)
        ));
        assert!(matches!(
            permute(&[0xFF], &[], BitDirection::MsbFirst, IndexBase::One),
            Err(CipherError::EmptyPermutation)
        ));
        assert!(matches!(
            permute(&[0xFF], &[1, 2, 3], BitDirection::MsbFirst, IndexBase::One),
            Err(CipherError::UnalignedTable(3))
        ));
        assert!(matches!(
            permute(&[0xFF], &[1, 2, 3, 4, 5, 6, 7, 9], BitDirection::MsbFirst, IndexBase::One),
            Err(CipherError::PermutationIndex { index: 9, bits: 8 })
        ));
        assert!(matches!(
            permute(&[0xFF], &[0, 1, 2, 3, 4, 5, 6, 8], BitDirection::LsbFirst, IndexBase::Zero),
            Err(CipherError::PermutationIndex { index: 8, bits: 8 })
        ));
    }

    #[test]
    fn test_adjust_parity_all_bytes() {
        for byte in 0..=255u8 {
            let adjusted = adjust_parity(byte);
            assert_eq!(adjusted >> 1, byte >> 1, "high bits changed for {byte:#04x}");
            assert_eq!(adjusted.count_ones() % 2, 1, "even parity for {byte:#04x}");
        }
    }

    #[test]
    fn test_has_valid_parity() {
        let key = hex_literal::hex!("13 34 57 79 9B BC DF F1");
        assert!(has_valid_parity(&key));
        assert!(!has_valid_parity(b"12345678"));
        assert!(has_valid_parity(&adjust_key_parity(b"12345678")));
    }
}
