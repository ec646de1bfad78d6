use std::collections::HashMap;

use revproof::crypto::SessionKey;
use revproof::error::PipelineError;
use revproof::prover::derive_mock_proof;
use revproof::traits::StorageBackend;
use revproof::types::{
    EvidenceBundle, MonthTag, PublicSignals, RevenueSample, VerifyingKey,
};
use revproof::vault::{self, BlackholeStore, MockStore};

fn test_bundle() -> EvidenceBundle {
    let signals = PublicSignals {
        is_qualified: true,
        commitment: [5u8; 32],
    };
    EvidenceBundle {
        revenue_data: vec![RevenueSample {
            period: MonthTag { year: 2025, month: 4 },
            amount_cents: 1_850_000,
        }],
        proof: derive_mock_proof(&VerifyingKey([1u8; 32]), &signals),
        timestamp: 1_750_000_000,
    }
}

fn hints() -> HashMap<String, String> {
    HashMap::from([("name".to_string(), "revproof_evidence_test".to_string())])
}

#[test]
fn test_seal_open_round_trip() {
    let key = SessionKey::generate();
    let bundle = test_bundle();

    let payload = vault::seal(&bundle, &key).unwrap();
    let opened = vault::open(&payload, &key).unwrap();
    assert_eq!(opened, bundle);
}

#[test]
fn test_seal_is_never_deterministic_in_ciphertext() {
    let key = SessionKey::generate();
    let bundle = test_bundle();

    let first = vault::seal(&bundle, &key).unwrap();
    let second = vault::seal(&bundle, &key).unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_upload_then_retrieve() {
    let key = SessionKey::generate();
    let store = MockStore::new();
    let payload = vault::seal(&test_bundle(), &key).unwrap();

    let handle = store.upload(&payload, &hints()).await.unwrap();
    let fetched = store.retrieve(&handle).await.unwrap();
    assert_eq!(fetched, payload);

    // And the round trip still decrypts.
    assert_eq!(vault::open(&fetched, &key).unwrap(), test_bundle());
}

#[tokio::test]
async fn test_retrieve_unknown_handle_is_not_found() {
    let store = MockStore::new();
    let err = store
        .retrieve(&revproof::types::StorageHandle("deadbeef".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
}

#[tokio::test]
async fn test_idempotent_retry_yields_identical_handle() {
    let key = SessionKey::generate();
    let payload = vault::seal(&test_bundle(), &key).unwrap();

    // Fails twice, then succeeds on the third attempt with the exact same
    // payload.
    let store = MockStore::new().failing(2);

    let first = store.upload(&payload, &hints()).await.unwrap_err();
    assert!(matches!(first, PipelineError::StorageUnavailable(_)));
    assert!(first.is_retryable());
    let second = store.upload(&payload, &hints()).await.unwrap_err();
    assert!(matches!(second, PipelineError::StorageUnavailable(_)));

    let handle = store.upload(&payload, &hints()).await.unwrap();

    // Content addressing: an untouched store maps the same bytes to the
    // same handle.
    let fresh = MockStore::new();
    let reference = fresh.upload(&payload, &hints()).await.unwrap();
    assert_eq!(handle, reference);
}

#[tokio::test]
async fn test_metadata_must_not_carry_key_material() {
    let key = SessionKey::generate();
    let payload = vault::seal(&test_bundle(), &key).unwrap();
    let store = MockStore::new();

    let mut leaky = hints();
    leaky.insert("Encryption_Key".to_string(), key.export());

    let err = store.upload(&payload, &leaky).await.unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
    assert_eq!(store.stored_count(), 0, "nothing leaves the client");
}

#[tokio::test]
async fn test_blackhole_acknowledges_with_correct_address() {
    let key = SessionKey::generate();
    let payload = vault::seal(&test_bundle(), &key).unwrap();

    let handle = BlackholeStore.upload(&payload, &hints()).await.unwrap();
    assert_eq!(handle, vault::content_address(&payload).unwrap());

    let err = BlackholeStore.retrieve(&handle).await.unwrap_err();
    assert!(matches!(err, PipelineError::NotFound(_)));
}
