use mcf_envelope::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes_across_ciphers(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let aes = SymmetricEnvelope::<AesGcm>::new(SecretKey::generate(32).unwrap()).unwrap();
        let sealed = aes.encrypt(&data).unwrap();
        prop_assert_eq!(&aes.decrypt(&sealed).unwrap(), &data);

        let chacha = SymmetricEnvelope::<ChaCha>::new(SecretKey::generate(32).unwrap())
            .unwrap()
            .with_encoding(ByteEncoding::Hex);
        let sealed = chacha.encrypt(&data).unwrap();
        prop_assert_eq!(chacha.decrypt(&sealed).unwrap(), data);
    }

    #[test]
    fn signatures_verify_only_their_message(
        message in proptest::collection::vec(any::<u8>(), 0..512),
        other in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        prop_assume!(message != other);
        let signer: McfSigner = McfSigner::new(SecretKey::generate(32).unwrap());
        let signature = signer.sign(&message).unwrap();

        prop_assert!(signer.verify(&signature, &message).unwrap());
        prop_assert!(!signer.verify(&signature, &other).unwrap());
    }
}
