use ed25519_dalek::SigningKey;
use rand_core::OsRng;

use simulator_rs::types::basic::{AccountId, BlockHeight, Command, CryptoHash, Timestamp};
use simulator_rs::types::block::{Block, UnsignedBlock};
use simulator_rs::types::crypto_primitives::Keypair;
use simulator_rs::types::proposal::Proposal;
use simulator_rs::types::transaction::Transaction;

pub(crate) fn keypair() -> Keypair {
    let mut csprg = OsRng {};
    Keypair::new(SigningKey::generate(&mut csprg))
}

pub(crate) fn transaction(creator: &str, counter: u64) -> Transaction {
    Transaction::new(
        AccountId::new(creator),
        counter,
        Timestamp::new(1_754_000_000_000 + counter),
        vec![Command::new(vec![counter as u8])],
    )
}

/// A signed block at the given height with no transactions and an all-zero previous hash,
/// standing in for the persisted chain tip.
pub(crate) fn block(height: u64, keypair: &Keypair) -> Block {
    UnsignedBlock::new(
        BlockHeight::new(height),
        Timestamp::new(1_754_000_000_000),
        CryptoHash::new([0; 32]),
        Vec::new(),
    )
    .sign(keypair)
}

pub(crate) fn proposal(height: u64, transactions: Vec<Transaction>) -> Proposal {
    Proposal::new(
        BlockHeight::new(height),
        Timestamp::new(1_754_000_000_500),
        transactions,
    )
}
