/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that log out events.
//!
//! The logs defined in this module are printed if the user enabled them via the
//! [configuration](crate::service::Configuration).
//!
//! The pipeline logs using the [log](https://docs.rs/log/latest/log/) crate. To get these
//! messages printed onto a terminal or to a file, set up a
//! [logging implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
//!
//! ## Log message format
//!
//! Log messages are CSVs (Comma Separated Values) with at least two values. The first two values
//! are always:
//! 1. The name of the [event](crate::events) in PascalCase (defined in this module as constants).
//! 2. The time the event was emitted (as number of seconds since the Unix Epoch).
//!
//! The rest of the values differ depending on the kind of event. Hashes are rendered as the
//! first seven characters of their Base64 encoding.
//!
//! ## Log levels
//!
//! Routine proposal drops (empty chain, non-consecutive height) are logged at debug level:
//! they are normal during catch-up and are not errors from the system's perspective.
//! Collaborator failures are logged at warn level, and signing failures at error level, since a
//! verified proposal without a matching block has already been observed downstream by then.

use crate::events::*;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use log;
use std::time::SystemTime;

// Names of each event in PascalCase for printing:
pub const RECEIVE_PROPOSAL: &str = "ReceiveProposal";
pub const DROP_PROPOSAL: &str = "DropProposal";
pub const VERIFY_PROPOSAL: &str = "VerifyProposal";
pub const PRODUCE_BLOCK: &str = "ProduceBlock";
pub const SIGN_BLOCK_FAILURE: &str = "SignBlockFailure";

/// Implemented by event types. Used to get a closure that logs the event.
pub(crate) trait Logger {
    /// Returns a pointer to the default logging handler for a given event type.
    fn get_logger() -> Box<dyn Fn(&Self) + Send>;
}

impl Logger for ReceiveProposalEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |receive_proposal_event: &ReceiveProposalEvent| {
            log::debug!(
                "{}, {}, {}, {}",
                RECEIVE_PROPOSAL,
                secs_since_unix_epoch(receive_proposal_event.timestamp),
                receive_proposal_event.proposal.height,
                receive_proposal_event.proposal.transactions.len()
            )
        };
        Box::new(logger)
    }
}

impl Logger for DropProposalEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |drop_proposal_event: &DropProposalEvent| {
            if drop_proposal_event.reason.is_routine() {
                log::debug!(
                    "{}, {}, {}, {}",
                    DROP_PROPOSAL,
                    secs_since_unix_epoch(drop_proposal_event.timestamp),
                    drop_proposal_event.height,
                    drop_proposal_event.reason
                )
            } else {
                log::warn!(
                    "{}, {}, {}, {}",
                    DROP_PROPOSAL,
                    secs_since_unix_epoch(drop_proposal_event.timestamp),
                    drop_proposal_event.height,
                    drop_proposal_event.reason
                )
            }
        };
        Box::new(logger)
    }
}

impl Logger for VerifyProposalEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |verify_proposal_event: &VerifyProposalEvent| {
            log::info!(
                "{}, {}, {}, {}",
                VERIFY_PROPOSAL,
                secs_since_unix_epoch(verify_proposal_event.timestamp),
                verify_proposal_event.verified_proposal.height,
                verify_proposal_event.verified_proposal.transactions.len()
            )
        };
        Box::new(logger)
    }
}

impl Logger for ProduceBlockEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |produce_block_event: &ProduceBlockEvent| {
            log::info!(
                "{}, {}, {}, {}, {}",
                PRODUCE_BLOCK,
                secs_since_unix_epoch(produce_block_event.timestamp),
                first_seven_base64_chars(&produce_block_event.block.hash.bytes()),
                produce_block_event.block.height,
                produce_block_event.block.transactions.len()
            )
        };
        Box::new(logger)
    }
}

impl Logger for SignBlockFailureEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |sign_block_failure_event: &SignBlockFailureEvent| {
            log::error!(
                "{}, {}, {}, {}",
                SIGN_BLOCK_FAILURE,
                secs_since_unix_epoch(sign_block_failure_event.timestamp),
                sign_block_failure_event.height,
                sign_block_failure_event.error
            )
        };
        Box::new(logger)
    }
}

// Get a more readable representation of a byte sequence by base64-encoding it and taking the
// first 7 characters.
pub(crate) fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}

pub(crate) fn secs_since_unix_epoch(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("Event occured before the Unix Epoch.")
        .as_secs()
}
