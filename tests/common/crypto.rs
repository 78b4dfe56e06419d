use simulator_rs::crypto::{CryptoProvider, SigningError};
use simulator_rs::types::block::{Block, UnsignedBlock};
use simulator_rs::types::transaction::Transaction;

/// A crypto provider standing in for an unreachable external key service: every signing attempt
/// fails.
pub(crate) struct FailingProvider;

impl CryptoProvider for FailingProvider {
    fn sign_block(&self, _block: UnsignedBlock) -> Result<Block, SigningError> {
        Err(SigningError {
            reason: "key service unreachable".to_string(),
        })
    }

    fn verify_block(&self, _block: &Block) -> bool {
        false
    }

    fn sign_transaction(&self, _transaction: &mut Transaction) -> Result<(), SigningError> {
        Err(SigningError {
            reason: "key service unreachable".to_string(),
        })
    }

    fn verify_transaction(&self, _transaction: &Transaction) -> bool {
        false
    }
}
