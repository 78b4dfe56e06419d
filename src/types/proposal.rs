/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the 'proposal' type and its methods.
//!
//! A proposal is an ordered batch of transactions chosen by the ordering subsystem, targeted at
//! a specific block height (the chain tip's height plus one), but not yet validated against
//! world state. Proposals are not signed by the simulation pipeline.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::types::basic::{BlockHeight, Timestamp};
use crate::types::transaction::Transaction;

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Proposal {
    pub height: BlockHeight,
    pub created_time: Timestamp,
    pub transactions: Vec<Transaction>,
}

impl Proposal {
    pub fn new(
        height: BlockHeight,
        created_time: Timestamp,
        transactions: Vec<Transaction>,
    ) -> Proposal {
        Proposal {
            height,
            created_time,
            transactions,
        }
    }

    /// Checks whether this proposal is a valid refinement of `source`: same target height, and
    /// transactions that form a subsequence (subset with preserved order, compared by content
    /// hash) of the source's transactions.
    ///
    /// Stateful validation may only ever remove transactions, so every verified proposal must
    /// satisfy this with respect to the proposal it was derived from.
    pub fn is_subsequence_of(&self, source: &Proposal) -> bool {
        if self.height != source.height {
            return false;
        }

        let mut remaining = source.transactions.iter();
        self.transactions.iter().all(|transaction| {
            let hash = transaction.hash();
            remaining.by_ref().any(|candidate| candidate.hash() == hash)
        })
    }
}
