/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The signing and verification capability, and its default ed25519 implementation.
//!
//! The simulation pipeline uses this capability only to sign candidate blocks; verification is
//! for downstream consumers (consensus checks candidate signatures, the gateway checks
//! transaction signatures). Signing is pure: it consumes an [`UnsignedBlock`] and returns a
//! [`Block`], so a block value with no signature cannot exist.

use std::fmt::Display;

use crate::types::basic::PublicKeyBytes;
use crate::types::block::{Block, UnsignedBlock};
use crate::types::crypto_primitives::{Keypair, Signature, Verifier, VerifyingKey};
use crate::types::transaction::{Transaction, TransactionSignature};

pub trait CryptoProvider: Send + 'static {
    /// Sign a candidate block, attaching exactly one signature over its hash.
    fn sign_block(&self, block: UnsignedBlock) -> Result<Block, SigningError>;

    /// Checks that the block's stored hashes match its contents and that it carries at least one
    /// signature, all of which verify against the block hash.
    fn verify_block(&self, block: &Block) -> bool;

    /// Sign a transaction in place, appending one signature over its content hash. The content
    /// hash is unchanged by signing.
    fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), SigningError>;

    /// Checks that the transaction carries at least one signature and that all of them verify
    /// against its content hash.
    fn verify_transaction(&self, transaction: &Transaction) -> bool;
}

/// Signing failed. The default provider never fails; providers backed by external key services
/// may.
#[derive(Clone, Debug)]
pub struct SigningError {
    pub reason: String,
}

impl Display for SigningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// The default crypto provider: ed25519 signatures from an in-process [`Keypair`].
#[derive(Clone)]
pub struct Ed25519Provider {
    keypair: Keypair,
}

impl Ed25519Provider {
    pub fn new(keypair: Keypair) -> Ed25519Provider {
        Ed25519Provider { keypair }
    }
}

impl CryptoProvider for Ed25519Provider {
    fn sign_block(&self, block: UnsignedBlock) -> Result<Block, SigningError> {
        Ok(block.sign(&self.keypair))
    }

    fn verify_block(&self, block: &Block) -> bool {
        if !block.is_correct() || block.signatures.is_empty() {
            return false;
        }
        block
            .signatures
            .iter()
            .all(|signature| verify(&signature.signer, &block.hash.bytes(), &signature.signature.bytes()))
    }

    fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), SigningError> {
        let signature = TransactionSignature {
            signer: PublicKeyBytes::new(self.keypair.public().to_bytes()),
            signature: self.keypair.sign(&transaction.hash().bytes()),
        };
        transaction.signatures.push(signature);
        Ok(())
    }

    fn verify_transaction(&self, transaction: &Transaction) -> bool {
        if transaction.signatures.is_empty() {
            return false;
        }
        let hash = transaction.hash();
        transaction
            .signatures
            .iter()
            .all(|signature| verify(&signature.signer, &hash.bytes(), &signature.signature.bytes()))
    }
}

fn verify(signer: &PublicKeyBytes, message: &[u8], signature_bytes: &[u8; 64]) -> bool {
    match VerifyingKey::from_bytes(&signer.bytes()) {
        Ok(verifying_key) => verifying_key
            .verify(message, &Signature::from_bytes(signature_bytes))
            .is_ok(),
        Err(_) => false,
    }
}
