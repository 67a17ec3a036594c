//! End-to-end proof lifecycle: statement construction through
//! generation, serialization, verification, tampering, and cache
//! handoff — the flows the identity layer drives in production.

use std::collections::BTreeMap;
use std::sync::Arc;

use zkid_engine::{
    ConfigUpdate, EngineConfig, GenerateOptions, StatementType, ZkEngine, ZkProof, ZkStatement,
};
use zkid_proofs::testing::SeededProvider;

fn discrete_log_statement() -> ZkStatement {
    ZkStatement::new(StatementType::DiscreteLog, "controls the signing key")
        .with_public("keyId", "did:zkid:holder#key-1")
        .with_private("secret", "7")
        .with_relation("y = g^x")
}

#[test]
fn proof_survives_serialization_roundtrip() {
    let engine = ZkEngine::with_defaults();
    let proof = engine
        .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
        .unwrap();

    let json = serde_json::to_string_pretty(&proof).unwrap();
    let restored: ZkProof = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, proof);
    assert!(engine.verify_proof(&restored).is_valid);
}

#[test]
fn serialized_record_has_external_shape() {
    let engine = ZkEngine::with_defaults();
    let proof = engine
        .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
        .unwrap();

    let value = serde_json::to_value(&proof).unwrap();
    for key in [
        "id",
        "type",
        "statement",
        "proof",
        "publicInputs",
        "timestamp",
        "expiresAt",
        "verificationKey",
        "securityLevel",
        "algorithm",
        "keyLength",
        "quantumResistant",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["type"], "discrete_log");
    assert_eq!(value["algorithm"], "secp256k1");
    assert_eq!(value["quantumResistant"], false);
    // ISO-8601 timestamps with Z suffix.
    let ts = value["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'), "timestamp {ts:?} not UTC-suffixed");
    // Statement inside the record carries no private inputs.
    assert!(value["statement"].get("privateInputs").is_none());
}

#[test]
fn tampering_any_proof_type_after_serialization_fails() {
    let engine = ZkEngine::with_defaults();
    let statements = [
        discrete_log_statement(),
        ZkStatement::new(StatementType::PedersenCommitment, "committed field")
            .with_private("value", "21"),
        ZkStatement::new(StatementType::RangeProof, "within bound")
            .with_public("range", "16")
            .with_private("value", "5"),
        ZkStatement::new(StatementType::SetMembership, "approved value")
            .with_public("set", "18,21,25")
            .with_private("value", "21"),
    ];

    for statement in statements {
        let proof = engine
            .generate_proof(&statement, &GenerateOptions::default())
            .unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        assert!(engine.verify_proof(&proof).is_valid);

        // Flip one hex character inside the first response-looking field.
        let needle = "\"response";
        let start = json.find(needle).expect("proof has a response field");
        let colon = json[start..].find(':').unwrap() + start;
        let quote = json[colon..].find('"').unwrap() + colon + 1;
        let target = quote;
        let original = json.as_bytes()[target] as char;
        let replacement = if original == '0' { '1' } else { '0' };
        let mut tampered = json.clone();
        tampered.replace_range(target..=target, &replacement.to_string());

        let reparsed: ZkProof = serde_json::from_str(&tampered).unwrap();
        let outcome = engine.verify_proof(&reparsed);
        assert!(
            !outcome.is_valid,
            "tampered {} proof verified",
            proof.statement_type
        );
        assert!(outcome.reason.is_some());
    }
}

#[test]
fn exported_cache_verifies_on_a_fresh_engine() {
    let issuing = ZkEngine::new(EngineConfig::default(), Arc::new(SeededProvider::new(11)));
    let ids: Vec<_> = (0..5)
        .map(|_| {
            issuing
                .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
                .unwrap()
                .id
        })
        .collect();

    let consuming = ZkEngine::with_defaults();
    let imported = consuming
        .import_cache_data(issuing.export_cache_data())
        .unwrap();
    assert_eq!(imported, 5);

    for id in &ids {
        let proof = consuming.get_cached_proof(id).expect("restored proof");
        assert!(consuming.verify_proof(&proof).is_valid);
    }
    let stats = consuming.proof_stats();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.quantum_resistant_ratio, 0.0);
}

#[test]
fn concurrent_generation_is_self_contained() {
    // No ordering between concurrently generated proofs; each carries
    // fresh randomness and verifies independently.
    let engine = Arc::new(ZkEngine::with_defaults());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
                    .unwrap()
            })
        })
        .collect();

    let proofs: Vec<ZkProof> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let mut ids: Vec<_> = proofs.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), proofs.len(), "ids must be unique");
    for proof in &proofs {
        assert!(engine.verify_proof(proof).is_valid);
    }
    assert_eq!(engine.proof_stats().total, proofs.len());
}

#[test]
fn curve_switch_midstream_keeps_old_proofs_verifiable() {
    let engine = ZkEngine::with_defaults();
    let early = engine
        .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
        .unwrap();

    engine
        .update_config(&ConfigUpdate {
            curve: Some("P-521".to_string()),
            ..ConfigUpdate::default()
        })
        .unwrap();
    let late = engine
        .generate_proof(&discrete_log_statement(), &GenerateOptions::default())
        .unwrap();

    // Each proof names its own curve; both verify on the same engine.
    assert_ne!(early.algorithm, late.algorithm);
    assert!(engine.verify_proof(&early).is_valid);
    assert!(engine.verify_proof(&late).is_valid);
}

#[test]
fn age_claim_full_flow() {
    let engine = ZkEngine::with_defaults();
    let statement = engine.age_verification_statement(42, 18).unwrap();
    let proof = engine
        .generate_proof(&statement, &GenerateOptions::default())
        .unwrap();

    // The verifier only learns the claim and its bound.
    assert_eq!(
        proof.statement.public_inputs.get("minimumAge").map(String::as_str),
        Some("18")
    );
    assert!(engine.verify_proof(&proof).is_valid);

    // An underage holder cannot even construct the statement.
    assert!(engine.age_verification_statement(17, 18).is_err());
}

#[test]
fn selective_disclosure_full_flow() {
    let engine = ZkEngine::with_defaults();
    let attributes: BTreeMap<String, String> = [
        ("name".to_string(), "A. Holder".to_string()),
        ("nationality".to_string(), "NL".to_string()),
        ("passportNumber".to_string(), "X123456".to_string()),
    ]
    .into();

    let statement = engine
        .selective_disclosure_statement(&attributes, &["nationality"])
        .unwrap();
    let proof = engine
        .generate_proof(&statement, &GenerateOptions::default())
        .unwrap();
    assert!(engine.verify_proof(&proof).is_valid);

    let json = serde_json::to_string(&proof).unwrap();
    assert!(json.contains("NL"));
    assert!(!json.contains("X123456"));
    assert!(!json.contains("A. Holder"));
}
