/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Capability traits for the world state and block storage provided by the user.
//!
//! The simulation pipeline never touches persistent state directly. It borrows a
//! [temporary view](TemporaryView) for speculative validation and reads the chain tip through
//! [`BlockQuery`]; both capabilities are implemented by the surrounding application over its
//! actual storage engine.

use std::fmt::Display;

use crate::types::block::Block;
use crate::types::transaction::Transaction;

/// A rollback-only, single-use snapshot of world state used for speculative validation.
///
/// A view is exclusively owned by one simulation attempt and is released when it goes out of
/// scope, on every exit path. The pipeline never commits a view; any effects of
/// [`apply`](Self::apply) must be invisible outside the view's lifetime.
pub trait TemporaryView {
    /// Speculatively apply a transaction to this view. An `Err` means the transaction would
    /// violate a world-state-dependent rule (balance, permission, and the like) and must be
    /// filtered out of the proposal under validation.
    fn apply(&mut self, transaction: &Transaction) -> Result<(), TransactionRejection>;
}

/// Hands out ephemeral world-state snapshots, one per simulation attempt.
pub trait TemporaryViewFactory: Send + 'static {
    type View: TemporaryView;

    /// Create a fresh view on top of the current committed world state. Failure means the
    /// proposal being processed is dropped.
    fn create_view(&mut self) -> Result<Self::View, WorldStateError>;
}

/// Read access to the top of the persisted chain.
pub trait BlockQuery: Send + 'static {
    /// The topmost `count` blocks of the chain, highest first, as a lazy, finite sequence of
    /// length at most `count`. The sequence is empty on a fresh chain. The simulation pipeline
    /// only ever asks for `count == 1`.
    fn top_blocks(
        &mut self,
        count: usize,
    ) -> Result<Box<dyn Iterator<Item = Block> + '_>, WorldStateError>;
}

/// The different ways the world-state capabilities can fail.
#[derive(Debug)]
pub enum WorldStateError {
    /// The factory could not hand out a temporary view.
    ViewUnavailable { reason: String },

    /// The block query could not be answered.
    QueryFailed { reason: String },
}

impl Display for WorldStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldStateError::ViewUnavailable { reason } => {
                write!(f, "temporary view unavailable: {}", reason)
            }
            WorldStateError::QueryFailed { reason } => write!(f, "block query failed: {}", reason),
        }
    }
}

/// Why a temporary view refused to apply a transaction.
#[derive(Debug)]
pub struct TransactionRejection {
    pub reason: String,
}

impl Display for TransactionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}
