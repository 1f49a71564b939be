//! Property tests for the crypto adapters and encodings

use common::composite_key::CompositeKey;
use common::crypto::{
    aes256_decrypt, aes256_encrypt, CipherError, Curve25519PrivateKey, Ed25519PrivateKey, Key,
    PrivCKey, PrivKey, PrivateKey, PubKey, PublicKey,
};
use proptest::prelude::*;
use rand_core::OsRng;

proptest! {
    #[test]
    fn prop_sign_verify(msg in proptest::collection::vec(any::<u8>(), 0..512)) {
        let (private, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();
        let sig = private.sign(&msg);
        prop_assert!(public.verify(&msg, &sig).unwrap());
    }

    #[test]
    fn prop_bit_flip_fails(
        msg in proptest::collection::vec(any::<u8>(), 1..256),
        index in any::<proptest::sample::Index>(),
        bit in 0u8..8,
    ) {
        let (private, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();
        let sig = private.sign(&msg);

        let mut tampered = msg.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 1 << bit;
        prop_assert!(!public.verify(&tampered, &sig).unwrap());
    }

    #[test]
    fn prop_envelope_roundtrip(_seed in any::<u64>()) {
        let (private, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();

        let decoded = PrivateKey::from_envelope(&private.to_envelope().unwrap()).unwrap();
        prop_assert_eq!(decoded, PrivateKey::from(private));

        let decoded = PublicKey::from_envelope(&public.to_envelope().unwrap()).unwrap();
        prop_assert_eq!(decoded, PublicKey::from(public));
    }

    #[test]
    fn prop_aes_roundtrip(
        key in any::<[u8; 32]>(),
        plaintext in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let ciphertext = aes256_encrypt(&key, &plaintext).unwrap();
        prop_assert_eq!(aes256_decrypt(&key, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn prop_box_roundtrip(plaintext in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let (alice, alice_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let ciphertext = alice.encrypt(&bob_public, &plaintext).unwrap();
        prop_assert_eq!(bob.decrypt(&alice_public, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn prop_box_mismatched_key_fails(plaintext in proptest::collection::vec(any::<u8>(), 0..256)) {
        let (alice, _) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (_, stranger_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let ciphertext = alice.encrypt(&bob_public, &plaintext).unwrap();
        prop_assert_eq!(
            bob.decrypt(&stranger_public, &ciphertext),
            Err(CipherError::DecryptionFailed)
        );
    }

    #[test]
    fn prop_composite_key_url_safe(
        id in proptest::collection::vec(any::<u8>(), 0..64),
        parent in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    ) {
        let mut key = CompositeKey::new(id);
        if let Some(parent) = parent {
            key = key.with_parent(parent).unwrap();
        }
        let encoded = key.to_url_safe().unwrap();
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(CompositeKey::from_url_safe(&encoded).unwrap(), key);
    }
}
