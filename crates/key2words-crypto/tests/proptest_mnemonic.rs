use proptest::prelude::*;

use key2words_crypto::mnemonic::{mnemonic_to_seed, seed_to_mnemonic, Mnemonic};
use key2words_types::Key2WordsError;

fn entropy() -> impl Strategy<Value = Vec<u8>> {
    prop::sample::select(vec![16usize, 20, 24, 28, 32])
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn entropy_roundtrip(bytes in entropy()) {
        let mnemonic = seed_to_mnemonic(&bytes).unwrap();
        prop_assert_eq!(mnemonic.word_count(), bytes.len() * 3 / 4);

        let decoded = mnemonic_to_seed(mnemonic.as_str()).unwrap();
        prop_assert_eq!(decoded.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn seed32_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        let mnemonic = seed_to_mnemonic(&seed).unwrap();
        prop_assert_eq!(mnemonic.word_count(), 24);

        let decoded = mnemonic_to_seed(mnemonic.as_str()).unwrap();
        prop_assert_eq!(decoded.as_seed32(), Some(&seed));
    }

    #[test]
    fn parse_is_canonical(bytes in entropy(), sep in "[ \t\n]{1,3}") {
        let mnemonic = seed_to_mnemonic(&bytes).unwrap();
        let messy = mnemonic.words().join(&sep);
        let parsed = Mnemonic::parse(&messy).unwrap();
        prop_assert_eq!(parsed.as_str(), mnemonic.as_str());
    }

    #[test]
    fn unsupported_lengths_rejected(len in 0usize..80) {
        prop_assume!(![16, 20, 24, 28, 32].contains(&len));
        let result = seed_to_mnemonic(&vec![0u8; len]);
        prop_assert_eq!(result.err(), Some(Key2WordsError::InvalidEntropyLength { len }));
    }
}
