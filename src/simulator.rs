/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The core of the simulation pipeline: one end-to-end pass per proposal.
//!
//! Main type: [`Simulator`].
//!
//! # Usage
//!
//! The `Simulator` struct is meant to be used in an "event-oriented" fashion: its one
//! significant method, [`process_proposal`](Simulator::process_proposal), is called once for
//! every proposal the ordering gate emits. In the assembled
//! [service](crate::service::SimulatorSpec) this happens on a dedicated worker thread, which
//! serializes all invocations; the struct can equally be driven directly by a caller that
//! manages its own scheduling.
//!
//! # Outputs
//!
//! The simulator exclusively owns two hot broadcast streams: verified proposals
//! ([`on_verified_proposal`](Simulator::on_verified_proposal)) and signed candidate blocks
//! ([`on_block`](Simulator::on_block)). For every processed proposal there is at most one
//! emission on each stream, and the verified proposal is always published strictly before the
//! corresponding block. A failure at any step absorbs the proposal: `process_proposal` never
//! returns an error and never mutates persistent state.

use std::sync::mpsc::Sender;
use std::time::SystemTime;

use crate::crypto::CryptoProvider;
use crate::events::{
    DropProposalEvent, DropReason, Event, ProduceBlockEvent, ReceiveProposalEvent,
    SignBlockFailureEvent, VerifyProposalEvent,
};
use crate::storage::{BlockQuery, TemporaryViewFactory};
use crate::stream::{Publisher, Subscription};
use crate::types::block::{Block, UnsignedBlock};
use crate::types::proposal::Proposal;
use crate::validation::StatefulValidator;

/// Orchestrates the world state, block storage, stateful validation, and signing capabilities
/// to turn each incoming proposal into a verified proposal and a signed candidate block.
pub struct Simulator<F, Q, V, C>
where
    F: TemporaryViewFactory,
    Q: BlockQuery,
    V: StatefulValidator<F::View>,
    C: CryptoProvider,
{
    view_factory: F,
    block_query: Q,
    validator: V,
    crypto: C,
    verified_proposals: Publisher<Proposal>,
    blocks: Publisher<Block>,
    event_publisher: Option<Sender<Event>>,
}

impl<F, Q, V, C> Simulator<F, Q, V, C>
where
    F: TemporaryViewFactory,
    Q: BlockQuery,
    V: StatefulValidator<F::View>,
    C: CryptoProvider,
{
    pub fn new(
        view_factory: F,
        block_query: Q,
        validator: V,
        crypto: C,
        event_publisher: Option<Sender<Event>>,
    ) -> Self {
        Self {
            view_factory,
            block_query,
            validator,
            crypto,
            verified_proposals: Publisher::new(),
            blocks: Publisher::new(),
            event_publisher,
        }
    }

    /// The hot stream of proposals that passed stateful validation, possibly with some
    /// transactions filtered out.
    pub fn on_verified_proposal(&self) -> Subscription<Proposal> {
        self.verified_proposals.subscribe()
    }

    /// The hot stream of signed candidate blocks derived from verified proposals.
    pub fn on_block(&self) -> Subscription<Block> {
        self.blocks.subscribe()
    }

    // Handles to the producing sides, so the service can keep offering subscriptions after the
    // simulator has moved onto the worker thread.
    pub(crate) fn publisher_of_verified_proposals(&self) -> Publisher<Proposal> {
        self.verified_proposals.clone()
    }

    pub(crate) fn publisher_of_blocks(&self) -> Publisher<Block> {
        self.blocks.clone()
    }

    /// Drive one end-to-end pass for `proposal`.
    ///
    /// All failures are absorbed: a failed pass leaves both output streams without an emission
    /// for this proposal (except a signing failure, which occurs after the verified-proposal
    /// emission and skips only the block emission). Persistent state is never mutated.
    pub fn process_proposal(&mut self, proposal: Proposal) {
        Event::ReceiveProposal(ReceiveProposalEvent {
            timestamp: SystemTime::now(),
            proposal: proposal.clone(),
        })
        .publish(&self.event_publisher);

        // 1. Query the top of the chain, taking the first element of the lazy sequence.
        let top_block_result = self.block_query.top_blocks(1).map(|mut top_blocks| top_blocks.next());
        let top_block = match top_block_result {
            Ok(top_block) => top_block,
            Err(error) => {
                self.drop_proposal(&proposal, DropReason::BlockQueryFailure { error });
                return;
            }
        };

        // 2. Continuity check: the proposal must target the height directly above the tip.
        //    Computed as top + 1 == proposal so a height-0 proposal cannot underflow.
        let top_block = match top_block {
            Some(top_block) => top_block,
            None => {
                self.drop_proposal(&proposal, DropReason::EmptyChain);
                return;
            }
        };
        if top_block.height + 1 != proposal.height {
            self.drop_proposal(
                &proposal,
                DropReason::NonConsecutiveHeight {
                    proposal_height: proposal.height,
                    top_height: top_block.height,
                },
            );
            return;
        }

        // 3. Acquire a fresh temporary view. The view lives until the end of this scope and is
        //    released on every exit path; it is never committed.
        let mut view = match self.view_factory.create_view() {
            Ok(view) => view,
            Err(error) => {
                self.drop_proposal(&proposal, DropReason::ViewUnavailable { error });
                return;
            }
        };

        // 4. Stateful validation against the view, then release the view.
        let verified_proposal = match self.validator.validate(&proposal, &mut view) {
            Ok(verified_proposal) => verified_proposal,
            Err(error) => {
                self.drop_proposal(&proposal, DropReason::ValidationFailure { error });
                return;
            }
        };
        drop(view);

        // 5. Enforce the validator's contract before anything is emitted: same height,
        //    transactions a subsequence of the input's.
        if !verified_proposal.is_subsequence_of(&proposal) {
            self.drop_proposal(&proposal, DropReason::MalformedVerifiedProposal);
            return;
        }

        // 6. Publish the verified proposal.
        self.verified_proposals.publish(verified_proposal.clone());
        Event::VerifyProposal(VerifyProposalEvent {
            timestamp: SystemTime::now(),
            verified_proposal: verified_proposal.clone(),
        })
        .publish(&self.event_publisher);

        // 7. Assemble and sign the candidate block. The block's created-time is the proposal's,
        //    so every replica simulating this proposal derives the same unsigned block.
        let unsigned_block = UnsignedBlock::new(
            proposal.height,
            proposal.created_time,
            top_block.hash,
            verified_proposal.transactions,
        );
        let block = match self.crypto.sign_block(unsigned_block) {
            Ok(block) => block,
            Err(error) => {
                // The verified proposal is already out; only the block emission is skipped.
                Event::SignBlockFailure(SignBlockFailureEvent {
                    timestamp: SystemTime::now(),
                    height: proposal.height,
                    error,
                })
                .publish(&self.event_publisher);
                return;
            }
        };

        // 8. Publish the signed candidate block.
        self.blocks.publish(block.clone());
        Event::ProduceBlock(ProduceBlockEvent {
            timestamp: SystemTime::now(),
            block,
        })
        .publish(&self.event_publisher);
    }

    fn drop_proposal(&self, proposal: &Proposal, reason: DropReason) {
        Event::DropProposal(DropProposalEvent {
            timestamp: SystemTime::now(),
            height: proposal.height,
            reason,
        })
        .publish(&self.event_publisher);
    }
}
