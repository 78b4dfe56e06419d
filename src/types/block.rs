/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the 'block' types and their methods.
//!
//! A candidate block progresses through exactly one transition: [`UnsignedBlock`] to
//! [`Block`]. The unsigned form is what the simulation pipeline assembles from a verified
//! proposal and the chain tip; [signing](UnsignedBlock::sign) consumes it and is the only way
//! this crate produces the signed form, so an unsigned block can never reach the candidate-block
//! stream.
//!
//! The block hash is SHA-3/256 over the Borsh encoding of the unsigned fields. Since signatures
//! do not exist before signing, they can never influence the hash, and attaching further
//! signatures downstream leaves the block's identity unchanged.

use borsh::{BorshDeserialize, BorshSerialize};
use sha3::Digest;

use crate::types::basic::{BlockHeight, CryptoHash, PublicKeyBytes, SignatureBytes, Timestamp};
use crate::types::crypto_primitives::{CryptoHasher, Keypair};
use crate::types::transaction::Transaction;

/// A candidate block that has not been signed yet. Not fit for emission.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub struct UnsignedBlock {
    pub height: BlockHeight,
    pub created_time: Timestamp,
    pub previous_hash: CryptoHash,
    pub transactions: Vec<Transaction>,
    pub transactions_hash: CryptoHash,
}

impl UnsignedBlock {
    pub fn new(
        height: BlockHeight,
        created_time: Timestamp,
        previous_hash: CryptoHash,
        transactions: Vec<Transaction>,
    ) -> UnsignedBlock {
        let transactions_hash = hash_transactions(&transactions);
        UnsignedBlock {
            height,
            created_time,
            previous_hash,
            transactions,
            transactions_hash,
        }
    }

    /// The hash that identifies the block, both before and after signing.
    pub fn hash(&self) -> CryptoHash {
        hash_block_contents(
            self.height,
            self.created_time,
            &self.previous_hash,
            &self.transactions,
            &self.transactions_hash,
        )
    }

    /// Attach a signature over the block hash, turning this into a [`Block`].
    pub fn sign(self, keypair: &Keypair) -> Block {
        let hash = self.hash();
        let signature = BlockSignature {
            signer: PublicKeyBytes::new(keypair.public().to_bytes()),
            signature: keypair.sign(&hash.bytes()),
        };
        Block {
            height: self.height,
            created_time: self.created_time,
            previous_hash: self.previous_hash,
            transactions: self.transactions,
            transactions_hash: self.transactions_hash,
            hash,
            signatures: vec![signature],
        }
    }
}

/// A signed, chain-linked record of transactions at a specific height.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub struct Block {
    pub height: BlockHeight,
    pub created_time: Timestamp,
    pub previous_hash: CryptoHash,
    pub transactions: Vec<Transaction>,
    pub transactions_hash: CryptoHash,
    pub hash: CryptoHash,
    pub signatures: Vec<BlockSignature>,
}

impl Block {
    /// Checks if the stored hash and transactions-hash match the block contents. Signature
    /// checking is the crypto provider's job.
    pub fn is_correct(&self) -> bool {
        self.transactions_hash == hash_transactions(&self.transactions)
            && self.hash
                == hash_block_contents(
                    self.height,
                    self.created_time,
                    &self.previous_hash,
                    &self.transactions,
                    &self.transactions_hash,
                )
    }
}

/// A signature over a block's [hash](UnsignedBlock::hash), together with the public key of the
/// signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockSignature {
    pub signer: PublicKeyBytes,
    pub signature: SignatureBytes,
}

// The digest over the ordered transaction content hashes.
fn hash_transactions(transactions: &Vec<Transaction>) -> CryptoHash {
    let mut hasher = CryptoHasher::new();
    for transaction in transactions {
        hasher.update(&transaction.hash().bytes());
    }
    CryptoHash::new(hasher.finalize().into())
}

fn hash_block_contents(
    height: BlockHeight,
    created_time: Timestamp,
    previous_hash: &CryptoHash,
    transactions: &Vec<Transaction>,
    transactions_hash: &CryptoHash,
) -> CryptoHash {
    let mut hasher = CryptoHasher::new();
    hasher.update(&height.try_to_vec().unwrap());
    hasher.update(&created_time.try_to_vec().unwrap());
    hasher.update(&previous_hash.try_to_vec().unwrap());
    hasher.update(&transactions.try_to_vec().unwrap());
    hasher.update(&transactions_hash.try_to_vec().unwrap());
    CryptoHash::new(hasher.finalize().into())
}
