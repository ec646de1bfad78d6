use revproof::prover::derive_mock_proof;
use revproof::settlement::{build_call_args, scale_to_token_units, MockSettlement};
use revproof::types::{
    G1Point, G2Point, Proof, PublicSignals, StorageHandle, VerifyingKey,
};

/// Fixed proof triple with recognizable bytes per coordinate, so any
/// ordering mistake is visible in the encoded output.
fn known_proof() -> Proof {
    Proof {
        a: G1Point {
            x: [0xA1; 32],
            y: [0xA2; 32],
        },
        b: G2Point {
            x: [[0xB1; 32], [0xB2; 32]],
            y: [[0xB3; 32], [0xB4; 32]],
        },
        c: G1Point {
            x: [0xC1; 32],
            y: [0xC2; 32],
        },
        protocol: "groth16".to_string(),
        curve: "bn128".to_string(),
    }
}

fn known_signals() -> PublicSignals {
    PublicSignals {
        is_qualified: true,
        commitment: [0xD1; 32],
    }
}

#[test]
fn test_calldata_matches_reference_vector() {
    let args = build_call_args(
        &known_proof(),
        &known_signals(),
        1_000_000, // $10,000.00
        &StorageHandle("abc123".to_string()),
        6,
    )
    .unwrap();

    // Reference vector captured from the verifier's expected calldata:
    // a.x, a.y, then G2 with components swapped within each coordinate
    // (x1, x0, y1, y0), then c, inputs, amount, handle.
    let mut expected = Vec::new();
    for fill in [0xA1u8, 0xA2, 0xB2, 0xB1, 0xB4, 0xB3, 0xC1, 0xC2] {
        expected.extend_from_slice(&[fill; 32]);
    }
    let mut qualified_word = [0u8; 32];
    qualified_word[31] = 1;
    expected.extend_from_slice(&qualified_word);
    expected.extend_from_slice(&[0xD1; 32]);
    let mut amount_word = [0u8; 32];
    amount_word[27..].copy_from_slice(&[0x02, 0x54, 0x0B, 0xE4, 0x00]);
    expected.extend_from_slice(&amount_word);
    expected.extend_from_slice(b"abc123");

    assert_eq!(args.encode_calldata(), expected);
}

#[test]
fn test_amount_scaling_is_exact() {
    // $10,000.00 at 6-decimal token precision.
    assert_eq!(scale_to_token_units(1_000_000, 6), 10_000_000_000);
    // Degenerate precisions.
    assert_eq!(scale_to_token_units(1_000_000, 2), 1_000_000);
    assert_eq!(scale_to_token_units(1_000_000, 0), 10_000);
    // No precision loss near u64 limits.
    assert_eq!(
        scale_to_token_units(u64::MAX, 6),
        u64::MAX as u128 * 10_000
    );
}

#[test]
fn test_rejects_foreign_proof_system() {
    let mut proof = known_proof();
    proof.curve = "bls12-381".to_string();

    let err = build_call_args(
        &proof,
        &known_signals(),
        1_000_000,
        &StorageHandle("abc123".to_string()),
        6,
    )
    .unwrap_err();
    assert!(matches!(err, revproof::error::PipelineError::InvalidInput(_)));
}

#[test]
fn test_swap_agrees_with_settlement_verifier() {
    let vkey = VerifyingKey([11u8; 32]);
    let signals = known_signals();
    let proof = derive_mock_proof(&vkey, &signals);
    let settlement = MockSettlement::new(vkey);

    let args = build_call_args(
        &proof,
        &signals,
        1_000_000,
        &StorageHandle("abc123".to_string()),
        6,
    )
    .unwrap();
    assert!(settlement.verify_args(&args));

    // The same arguments without the swap must fail verification - this is
    // the silent-failure mode the encoding test exists to prevent.
    let mut unswapped = args.clone();
    unswapped.b = [
        [proof.b.x[0], proof.b.x[1]],
        [proof.b.y[0], proof.b.y[1]],
    ];
    assert!(!settlement.verify_args(&unswapped));
}
