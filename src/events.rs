/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Notifications that are emitted when significant things happen in the simulation pipeline.
//!
//! ## Event enum
//!
//! Significant occurrences are: receiving a proposal from the ordering gate, dropping a
//! proposal, emitting a verified proposal, emitting a signed candidate block, and failing to
//! sign a candidate block.
//!
//! Each of these corresponds to a variant of the [event enum](Event), whose inner struct stores
//! information summarizing the occurrence, always including a timestamp of when it happened.
//!
//! ## Registering event handlers
//!
//! Library users can register event handler closures on the
//! [spec](crate::service::SimulatorSpec), which are called by the
//! [event bus](crate::event_bus::start_event_bus) thread when the corresponding event happens.
//! Default handlers that log events are enabled through the
//! [configuration](crate::service::Configuration).
//!
//! ## Timing
//!
//! Events are emitted **after** the corresponding occurrence is completed. In particular,
//! [`VerifyProposalEvent`] and [`ProduceBlockEvent`] are only emitted after the value was
//! published on the corresponding output stream.

use std::fmt::Display;
use std::sync::mpsc::Sender;
use std::time::SystemTime;

use crate::crypto::SigningError;
use crate::storage::WorldStateError;
use crate::types::basic::BlockHeight;
use crate::types::block::Block;
use crate::types::proposal::Proposal;
use crate::validation::ValidationError;

/// Enumerates all events defined for the simulation pipeline.
pub enum Event {
    ReceiveProposal(ReceiveProposalEvent),
    DropProposal(DropProposalEvent),
    VerifyProposal(VerifyProposalEvent),
    ProduceBlock(ProduceBlockEvent),
    SignBlockFailure(SignBlockFailureEvent),
}

impl Event {
    /// Publishes a given instance of the [`Event`] enum on the event publisher channel (if the
    /// channel is defined).
    pub fn publish(self, event_publisher: &Option<Sender<Event>>) {
        if let Some(event_publisher) = event_publisher {
            let _ = event_publisher.send(self);
        }
    }
}

/// A proposal arrived from the ordering gate and entered processing.
pub struct ReceiveProposalEvent {
    pub timestamp: SystemTime,
    pub proposal: Proposal,
}

/// A proposal was dropped before producing any emission on the output streams.
pub struct DropProposalEvent {
    pub timestamp: SystemTime,
    pub height: BlockHeight,
    pub reason: DropReason,
}

/// A verified proposal was published on the verified-proposal stream.
pub struct VerifyProposalEvent {
    pub timestamp: SystemTime,
    pub verified_proposal: Proposal,
}

/// A signed candidate block was published on the candidate-block stream.
pub struct ProduceBlockEvent {
    pub timestamp: SystemTime,
    pub block: Block,
}

/// Signing a candidate block failed. The verified proposal for the same source proposal was
/// already published; downstream consumers observing a verified proposal without a matching
/// block must treat it as exactly this condition.
pub struct SignBlockFailureEvent {
    pub timestamp: SystemTime,
    pub height: BlockHeight,
    pub error: SigningError,
}

/// Why a proposal was dropped without any emission.
pub enum DropReason {
    /// The chain has no persisted block yet, so no proposal can have a consecutive height.
    EmptyChain,

    /// The proposal's height does not immediately follow the chain tip: the proposal is either
    /// stale or premature. Routine during catch-up.
    NonConsecutiveHeight {
        proposal_height: BlockHeight,
        top_height: BlockHeight,
    },

    /// The top-of-chain query failed.
    BlockQueryFailure { error: WorldStateError },

    /// The world state could not hand out a temporary view.
    ViewUnavailable { error: WorldStateError },

    /// The stateful validator failed to produce a verified proposal.
    ValidationFailure { error: ValidationError },

    /// The stateful validator returned a proposal that is not a height-preserving subsequence
    /// of its input, violating its contract.
    MalformedVerifiedProposal,
}

impl DropReason {
    /// Routine drops are expected during normal operation (catch-up, fresh chain) and are not
    /// collaborator failures.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            DropReason::EmptyChain | DropReason::NonConsecutiveHeight { .. }
        )
    }
}

impl Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::EmptyChain => write!(f, "empty chain"),
            DropReason::NonConsecutiveHeight {
                proposal_height,
                top_height,
            } => write!(
                f,
                "non-consecutive height (proposal: {}, top: {})",
                proposal_height, top_height
            ),
            DropReason::BlockQueryFailure { error } => write!(f, "block query failure: {}", error),
            DropReason::ViewUnavailable { error } => write!(f, "view unavailable: {}", error),
            DropReason::ValidationFailure { error } => write!(f, "validation failure: {}", error),
            DropReason::MalformedVerifiedProposal => write!(f, "malformed verified proposal"),
        }
    }
}
