use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use simulator_rs::storage::{
    BlockQuery, TemporaryView, TemporaryViewFactory, TransactionRejection, WorldStateError,
};
use simulator_rs::types::basic::AccountId;
use simulator_rs::types::block::Block;
use simulator_rs::types::transaction::Transaction;

/// An in-memory world state which hands out temporary views that copy the committed map and
/// collect speculative writes on the side, and thus never leaves any artifacts.
#[derive(Clone)]
pub(crate) struct MemWorldState(Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>);

impl MemWorldState {
    pub(crate) fn new() -> MemWorldState {
        MemWorldState(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Register an account so that transactions created by it apply cleanly.
    pub(crate) fn insert_account(&self, account: &AccountId) {
        self.0
            .lock()
            .unwrap()
            .insert(account.as_str().as_bytes().to_vec(), Vec::new());
    }

    /// A canonical dump of the committed state, for byte-level comparisons.
    pub(crate) fn dump(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut entries: Vec<(Vec<u8>, Vec<u8>)> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl TemporaryViewFactory for MemWorldState {
    type View = MemView;

    fn create_view(&mut self) -> Result<MemView, WorldStateError> {
        Ok(MemView {
            committed: self.0.lock().unwrap().clone(),
            writes: HashMap::new(),
        })
    }
}

pub(crate) struct MemView {
    committed: HashMap<Vec<u8>, Vec<u8>>,
    writes: HashMap<Vec<u8>, Vec<u8>>,
}

impl TemporaryView for MemView {
    fn apply(&mut self, transaction: &Transaction) -> Result<(), TransactionRejection> {
        let creator_key = transaction.creator.as_str().as_bytes().to_vec();
        if !self.committed.contains_key(&creator_key) && !self.writes.contains_key(&creator_key) {
            return Err(TransactionRejection {
                reason: format!("unknown creator account: {}", transaction.creator),
            });
        }

        // The speculative effect stays inside the view.
        self.writes.insert(
            transaction.hash().bytes().to_vec(),
            transaction.counter.to_le_bytes().to_vec(),
        );
        Ok(())
    }
}

/// A view factory standing in for offline world-state storage.
pub(crate) struct UnavailableViewFactory;

impl TemporaryViewFactory for UnavailableViewFactory {
    type View = MemView;

    fn create_view(&mut self) -> Result<MemView, WorldStateError> {
        Err(WorldStateError::ViewUnavailable {
            reason: "storage offline".to_string(),
        })
    }
}

/// Block storage serving the top of a fixed, shared chain.
#[derive(Clone)]
pub(crate) struct MemBlockQuery {
    blocks: Arc<Mutex<Vec<Block>>>,
}

impl MemBlockQuery {
    pub(crate) fn new(blocks: Vec<Block>) -> MemBlockQuery {
        MemBlockQuery {
            blocks: Arc::new(Mutex::new(blocks)),
        }
    }

    pub(crate) fn empty() -> MemBlockQuery {
        MemBlockQuery::new(Vec::new())
    }

    pub(crate) fn push(&self, block: Block) {
        self.blocks.lock().unwrap().push(block);
    }
}

impl BlockQuery for MemBlockQuery {
    fn top_blocks(
        &mut self,
        count: usize,
    ) -> Result<Box<dyn Iterator<Item = Block> + '_>, WorldStateError> {
        let mut top: Vec<Block> = self.blocks.lock().unwrap().clone();
        top.sort_by_key(|block| std::cmp::Reverse(block.height));
        top.truncate(count);
        Ok(Box::new(top.into_iter()))
    }
}

/// A block query standing in for a corrupted block index.
pub(crate) struct FailingBlockQuery;

impl BlockQuery for FailingBlockQuery {
    fn top_blocks(
        &mut self,
        _count: usize,
    ) -> Result<Box<dyn Iterator<Item = Block> + '_>, WorldStateError> {
        Err(WorldStateError::QueryFailed {
            reason: "block index corrupted".to_string(),
        })
    }
}
