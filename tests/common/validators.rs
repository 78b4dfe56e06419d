use simulator_rs::storage::TemporaryView;
use simulator_rs::types::proposal::Proposal;
use simulator_rs::validation::{StatefulValidator, ValidationError};

/// Applies each transaction of the proposal to the view in order and keeps the ones that apply
/// cleanly.
pub(crate) struct ApplyingValidator;

impl<V: TemporaryView> StatefulValidator<V> for ApplyingValidator {
    fn validate(&mut self, proposal: &Proposal, view: &mut V) -> Result<Proposal, ValidationError> {
        let transactions = proposal
            .transactions
            .iter()
            .filter(|transaction| view.apply(transaction).is_ok())
            .cloned()
            .collect();
        Ok(Proposal::new(
            proposal.height,
            proposal.created_time,
            transactions,
        ))
    }
}

/// Returns a fixed verified proposal regardless of the input, to exercise the contract check at
/// the validation boundary.
pub(crate) struct FixedValidator(pub(crate) Proposal);

impl<V: TemporaryView> StatefulValidator<V> for FixedValidator {
    fn validate(
        &mut self,
        _proposal: &Proposal,
        _view: &mut V,
    ) -> Result<Proposal, ValidationError> {
        Ok(self.0.clone())
    }
}

/// A validator that always fails.
pub(crate) struct FailingValidator;

impl<V: TemporaryView> StatefulValidator<V> for FailingValidator {
    fn validate(
        &mut self,
        _proposal: &Proposal,
        _view: &mut V,
    ) -> Result<Proposal, ValidationError> {
        Err(ValidationError {
            reason: "validation engine crashed".to_string(),
        })
    }
}
