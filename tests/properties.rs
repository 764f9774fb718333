//! Property tests over random keys and messages.
//!
//! - every encryption mode round-trips
//! - CTR and OFB are involutions
//! - MAC tags do not depend on how the message is split across updates
//! - ECB/CBC ciphertext length follows the padding procedure
//! - aligned input under procedure 2 gains one `80 00 .. 00` block

use gostcipher::{Algorithm, GostCipher, Mode, ModeOptions, PadMode};
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::Kuznechik), Just(Algorithm::Magma)]
}

fn cipher_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Ecb),
        Just(Mode::Cbc),
        Just(Mode::Cfb),
        Just(Mode::Ofb),
        Just(Mode::Ctr),
    ]
}

fn build(algorithm: Algorithm, key: &[u8], mode: Mode, options: ModeOptions) -> GostCipher {
    gostcipher::new(algorithm, key, mode, options).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Decrypting with a fresh instance recovers the plaintext, followed by
    /// padding in ECB/CBC.
    #[test]
    fn round_trip_every_mode(
        algorithm in algorithm(),
        mode in cipher_mode(),
        key in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let ct = build(algorithm, &key, mode, ModeOptions::new()).encrypt(&data).unwrap();
        let pt = build(algorithm, &key, mode, ModeOptions::new()).decrypt(&ct).unwrap();
        prop_assert_eq!(&pt[..data.len()], &data[..]);
        if matches!(mode, Mode::Ecb | Mode::Cbc) {
            prop_assert!(pt[data.len()..].iter().all(|&b| b == 0));
        } else {
            prop_assert_eq!(pt.len(), data.len());
        }
    }

    /// CTR and OFB apply the same transform in both directions.
    #[test]
    fn ctr_and_ofb_are_involutions(
        algorithm in algorithm(),
        use_ctr in any::<bool>(),
        key in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let mode = if use_ctr { Mode::Ctr } else { Mode::Ofb };
        let once = build(algorithm, &key, mode, ModeOptions::new()).encrypt(&data).unwrap();
        let twice = build(algorithm, &key, mode, ModeOptions::new()).encrypt(&once).unwrap();
        prop_assert_eq!(twice, data);
    }

    /// Splitting the message at arbitrary points leaves the tag unchanged.
    #[test]
    fn mac_split_invariance(
        algorithm in algorithm(),
        key in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..200),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut whole = build(algorithm, &key, Mode::Mac, ModeOptions::new());
        whole.update(&data).unwrap();

        let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
        points.sort_unstable();
        let mut pieces = build(algorithm, &key, Mode::Mac, ModeOptions::new());
        let mut start = 0;
        for point in points {
            pieces.update(&data[start..point]).unwrap();
            start = point;
        }
        pieces.update(&data[start..]).unwrap();

        let size = algorithm.block_size();
        prop_assert_eq!(whole.digest(size).unwrap(), pieces.digest(size).unwrap());
    }

    /// Block-aligned input under procedure 2 decrypts to the message
    /// followed by one whole marker block `80 00 .. 00`.
    #[test]
    fn iso7816_aligned_round_trip(
        algorithm in algorithm(),
        use_cbc in any::<bool>(),
        key in prop::array::uniform32(any::<u8>()),
        blocks in 0usize..6,
        seed in any::<u8>(),
    ) {
        let n = algorithm.block_size();
        let data: Vec<u8> = (0..blocks * n).map(|i| seed.wrapping_add(i as u8)).collect();
        let mode = if use_cbc { Mode::Cbc } else { Mode::Ecb };
        let options = ModeOptions::new().with_pad_mode(PadMode::Iso7816);

        let ct = build(algorithm, &key, mode, options.clone()).encrypt(&data).unwrap();
        let pt = build(algorithm, &key, mode, options).decrypt(&ct).unwrap();

        prop_assert_eq!(pt.len(), data.len() + n);
        prop_assert_eq!(&pt[..data.len()], &data[..]);
        prop_assert_eq!(pt[data.len()], 0x80);
        prop_assert!(pt[data.len() + 1..].iter().all(|&b| b == 0));
    }

    /// Procedure 1 rounds up to the block boundary; procedure 2 always adds
    /// at least one marker byte and rounds up past it.
    #[test]
    fn padded_length(
        algorithm in algorithm(),
        use_cbc in any::<bool>(),
        iso in any::<bool>(),
        data in prop::collection::vec(any::<u8>(), 1..100),
    ) {
        let mode = if use_cbc { Mode::Cbc } else { Mode::Ecb };
        let pad_mode = if iso { PadMode::Iso7816 } else { PadMode::Zero };
        let options = ModeOptions::new().with_pad_mode(pad_mode);
        let ct = build(algorithm, &[0x77u8; 32], mode, options).encrypt(&data).unwrap();

        let n = algorithm.block_size();
        let rounded = (data.len() + n - 1) / n * n;
        let expected = if iso { rounded + n } else { rounded };
        prop_assert_eq!(ct.len(), expected);
    }
}
