use revproof::crypto::{cipher, SessionKey};
use revproof::error::PipelineError;
use revproof::types::{MonthTag, RevenueSample};

fn sample_evidence() -> Vec<RevenueSample> {
    (1..=6)
        .map(|month| RevenueSample {
            period: MonthTag { year: 2025, month },
            amount_cents: 1_250_000 + month as u64 * 10_000,
        })
        .collect()
}

#[test]
fn test_round_trip_law() {
    let key = SessionKey::generate();
    let evidence = sample_evidence();

    let payload = cipher::encrypt(&evidence, &key).unwrap();
    let recovered: Vec<RevenueSample> =
        cipher::decrypt(&payload.ciphertext, &payload.iv, &key).unwrap();

    assert_eq!(recovered, evidence);
}

#[test]
fn test_key_export_import_round_trip() {
    let key = SessionKey::generate();
    let exported = key.export();
    let imported = SessionKey::import(&exported).unwrap();
    assert_eq!(imported, key);

    // The re-imported key must actually decrypt.
    let payload = cipher::encrypt(&sample_evidence(), &key).unwrap();
    let recovered: Vec<RevenueSample> =
        cipher::decrypt(&payload.ciphertext, &payload.iv, &imported).unwrap();
    assert_eq!(recovered, sample_evidence());
}

#[test]
fn test_fresh_nonce_per_call() {
    let key = SessionKey::generate();
    let evidence = sample_evidence();

    let first = cipher::encrypt(&evidence, &key).unwrap();
    let second = cipher::encrypt(&evidence, &key).unwrap();

    assert_ne!(first.iv, second.iv, "nonce must never repeat under one key");
    assert_ne!(first.ciphertext, second.ciphertext);
}

#[test]
fn test_wrong_key_fails_closed() {
    let key = SessionKey::generate();
    let other = SessionKey::generate();
    let payload = cipher::encrypt(&sample_evidence(), &key).unwrap();

    let err = cipher::decrypt::<Vec<RevenueSample>>(&payload.ciphertext, &payload.iv, &other)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Decryption));
}

#[test]
fn test_tampered_ciphertext_fails_closed() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let key = SessionKey::generate();
    let payload = cipher::encrypt(&sample_evidence(), &key).unwrap();

    let mut raw = BASE64.decode(&payload.ciphertext).unwrap();
    raw[0] ^= 0x01;
    let tampered = BASE64.encode(raw);

    let err = cipher::decrypt::<Vec<RevenueSample>>(&tampered, &payload.iv, &key).unwrap_err();
    assert!(
        matches!(err, PipelineError::Decryption),
        "tampering must never yield corrupted plaintext silently"
    );
}

#[test]
fn test_malformed_base64_is_encoding_error() {
    let key = SessionKey::generate();

    let err =
        cipher::decrypt::<Vec<RevenueSample>>("not-base64!!!", "YWJjZGVmZ2hpamts", &key)
            .unwrap_err();
    assert!(matches!(err, PipelineError::Encoding(_)));

    let err = SessionKey::import("too-short").unwrap_err();
    assert!(matches!(err, PipelineError::Encoding(_)));
}
