/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the 'transaction' type and its methods.
//!
//! Transactions are content-addressable: [`Transaction::hash`] is computed over the creator,
//! counter, created-time, and commands, but **not** over the signatures, so signing a transaction
//! never changes its identity. Equality and std hashing delegate to the content hash.

use borsh::{BorshDeserialize, BorshSerialize};
use sha3::Digest;

use crate::types::basic::{AccountId, Command, CryptoHash, PublicKeyBytes, SignatureBytes, Timestamp};
use crate::types::crypto_primitives::CryptoHasher;

#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub struct Transaction {
    pub creator: AccountId,
    pub counter: u64,
    pub created_time: Timestamp,
    pub commands: Vec<Command>,
    pub signatures: Vec<TransactionSignature>,
}

impl Transaction {
    pub fn new(
        creator: AccountId,
        counter: u64,
        created_time: Timestamp,
        commands: Vec<Command>,
    ) -> Transaction {
        Transaction {
            creator,
            counter,
            created_time,
            commands,
            signatures: Vec::new(),
        }
    }

    /// The content hash of this transaction. Signatures are excluded, so the hash is stable
    /// across signing.
    pub fn hash(&self) -> CryptoHash {
        let mut hasher = CryptoHasher::new();
        hasher.update(&self.creator.try_to_vec().unwrap());
        hasher.update(&self.counter.try_to_vec().unwrap());
        hasher.update(&self.created_time.try_to_vec().unwrap());
        hasher.update(&self.commands.try_to_vec().unwrap());
        CryptoHash::new(hasher.finalize().into())
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for Transaction {}

impl std::hash::Hash for Transaction {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write(&Transaction::hash(self).bytes())
    }
}

/// A signature over a transaction's [content hash](Transaction::hash), together with the public
/// key of the signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransactionSignature {
    pub signer: PublicKeyBytes,
    pub signature: SignatureBytes,
}
