/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Tests for the default ed25519 crypto provider: signing and verifying blocks and
//! transactions, tamper detection, and hash stability under signing.

mod common;

use common::fixtures;
use simulator_rs::crypto::{CryptoProvider, Ed25519Provider};
use simulator_rs::types::basic::{AccountId, BlockHeight, CryptoHash, Timestamp};
use simulator_rs::types::block::UnsignedBlock;

#[test]
fn sign_and_verify_transaction() {
    let provider = Ed25519Provider::new(fixtures::keypair());
    let mut transaction = fixtures::transaction("alice@wonderland", 1);

    provider.sign_transaction(&mut transaction).unwrap();
    assert!(provider.verify_transaction(&transaction));

    // Modifying the transaction's content invalidates the signature.
    transaction.creator = AccountId::new("mallory@nowhere");
    assert!(!provider.verify_transaction(&transaction));
}

#[test]
fn unsigned_transaction_does_not_verify() {
    let provider = Ed25519Provider::new(fixtures::keypair());
    let transaction = fixtures::transaction("alice@wonderland", 1);
    assert!(!provider.verify_transaction(&transaction));
}

#[test]
fn same_transaction_hash_after_sign() {
    let provider = Ed25519Provider::new(fixtures::keypair());
    let mut transaction = fixtures::transaction("alice@wonderland", 1);

    let hash = transaction.hash();
    provider.sign_transaction(&mut transaction).unwrap();
    assert_eq!(transaction.hash(), hash);
}

#[test]
fn sign_and_verify_block() {
    let provider = Ed25519Provider::new(fixtures::keypair());
    let unsigned_block = UnsignedBlock::new(
        BlockHeight::new(2),
        Timestamp::new(1_754_000_000_000),
        CryptoHash::new([0; 32]),
        vec![fixtures::transaction("alice@wonderland", 1)],
    );
    let hash = unsigned_block.hash();

    let mut block = provider.sign_block(unsigned_block).unwrap();
    assert_eq!(block.signatures.len(), 1);
    assert_eq!(block.hash, hash);
    assert!(provider.verify_block(&block));

    // Modifying the block's content invalidates it.
    block.height = BlockHeight::new(3);
    assert!(!provider.verify_block(&block));
}

#[test]
fn signatures_from_another_keypair_verify_by_embedded_key() {
    // Verification uses the public key carried by the signature, so any provider can check a
    // block signed by any other.
    let signer = Ed25519Provider::new(fixtures::keypair());
    let checker = Ed25519Provider::new(fixtures::keypair());

    let block = signer
        .sign_block(UnsignedBlock::new(
            BlockHeight::new(2),
            Timestamp::new(1_754_000_000_000),
            CryptoHash::new([0; 32]),
            Vec::new(),
        ))
        .unwrap();

    assert!(checker.verify_block(&block));
}
