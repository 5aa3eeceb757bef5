//! Manufacturing draft aggregation.
//!
//! The [`DraftAggregator`] owns the in-progress order across the six wizard
//! screens. It reads and writes the draft through an injected
//! [`DraftStore`], validates step completeness, and turns the finished draft
//! into one order-creation request.
//!
//! ```text
//! ┌──────────────┐  save_step   ┌─────────────────┐  get/set   ┌────────────┐
//! │ Wizard screen│─────────────▶│ DraftAggregator │───────────▶│ DraftStore │
//! └──────────────┘              └────────┬────────┘            └────────────┘
//!                                        │ submit
//!                                        ▼
//!                               ┌─────────────────┐
//!                               │ MarketplaceApi  │
//!                               └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use stitch_core::{
//!     draft::DraftAggregatorBuilder,
//!     models::{ProductStep, StepData, StepKey},
//! };
//!
//! let aggregator = DraftAggregatorBuilder::new().in_memory().build();
//! let draft = aggregator
//!     .save_step(StepData::Product(ProductStep {
//!         name: "Boxy tee".to_string(),
//!         season: "2025 SS".to_string(),
//!         target_customer_code: "W20".to_string(),
//!         concept: "Heavyweight basics".to_string(),
//!     }))
//!     .unwrap();
//! assert!(aggregator.is_step_valid(StepKey::Product, &draft));
//! ```

use jiff::{civil::Date, Timestamp, Zoned};
use log::{debug, info, warn};
use serde_json::Value;

use crate::{
    api::MarketplaceApi,
    error::{MarketError, Result},
    models::{DesignFile, Draft, DraftKey, StepData, StepKey, Submission, SubmissionPayload},
    store::{DraftStore, CURRENT_DRAFT_KEY},
};

pub mod builder;
pub mod payload;
pub mod resolve;
pub mod validation;

#[cfg(test)]
mod tests;

pub use builder::DraftAggregatorBuilder;
pub use payload::build_submission_payload;
pub use validation::{FieldProblem, MIN_LEAD_DAYS, MIN_TOTAL_QUANTITY};

/// Outcome of trying to leave a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The step is complete; continue to the returned step
    Next(StepKey),
    /// The review step is complete; the draft can be submitted
    Complete,
    /// The form is invalid; stay on `step`
    Invalid {
        step: StepKey,
        problems: Vec<FieldProblem>,
    },
}

/// Owns the in-progress draft for one session.
pub struct DraftAggregator<S = Box<dyn DraftStore>> {
    store: S,
    today: Option<Date>,
}

impl<S: DraftStore> DraftAggregator<S> {
    /// Creates an aggregator over `store`, using the system date for
    /// validation.
    pub fn new(store: S) -> Self {
        Self { store, today: None }
    }

    /// Pins "today" for due-date validation.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// The date used for due-date validation.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Retrieves the current draft.
    ///
    /// Never fails: a missing, unreadable or corrupt draft yields an empty
    /// one, and the problem is logged.
    pub fn load_draft(&self) -> Draft {
        match self.store.get(CURRENT_DRAFT_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Stored draft is not readable, starting fresh: {e}");
                Draft::default()
            }),
            Ok(None) => Draft::default(),
            Err(e) => {
                warn!("Could not read stored draft, starting fresh: {e}");
                Draft::default()
            }
        }
    }

    fn persist(&self, draft: &mut Draft) -> Result<()> {
        draft.updated_at = Some(Timestamp::now());
        let raw = serde_json::to_string(draft)?;
        self.store.set(CURRENT_DRAFT_KEY, &raw)
    }

    /// Merges one step into the stored draft and returns the result.
    ///
    /// Other steps are left untouched; saving the same step again replaces
    /// only that step's subtree.
    pub fn save_step(&self, data: StepData) -> Result<Draft> {
        let mut draft = self.load_draft();
        let step = data.key();
        draft.apply(data);
        self.persist(&mut draft)?;
        debug!("Saved step {step} of {}", draft.key);
        Ok(draft)
    }

    /// Schema-validated variant of [`save_step`](Self::save_step) for
    /// untyped input.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When `value` does not match the
    ///   schema of `step`; nothing is stored in that case
    pub fn save_step_json(&self, step: StepKey, value: Value) -> Result<Draft> {
        let data = StepData::from_json(step, value)?;
        self.save_step(data)
    }

    /// Stores an explicit top-level value for a submission field.
    ///
    /// Explicit values take precedence over the step data when the
    /// submission payload is built. `Value::Null` removes the override.
    ///
    /// # Errors
    ///
    /// * `MarketError::InvalidInput` - When `field` is not a submission field
    pub fn save_override(&self, field: &str, value: Value) -> Result<Draft> {
        if resolve::rule_for(field).is_none() {
            return Err(MarketError::invalid_input(field).with_reason("not a submission field"));
        }
        let mut draft = self.load_draft();
        if value.is_null() {
            draft.extra.remove(field);
        } else {
            draft.extra.insert(field.to_string(), value);
        }
        self.persist(&mut draft)?;
        Ok(draft)
    }

    /// Pure completeness predicate for `step`.
    pub fn is_step_valid(&self, step: StepKey, draft: &Draft) -> bool {
        validation::is_step_valid(step, draft, self.today())
    }

    /// Field problems keeping `step` from being complete.
    pub fn step_problems(&self, step: StepKey, draft: &Draft) -> Vec<FieldProblem> {
        validation::step_problems(step, draft, self.today())
    }

    /// Decides whether the wizard may move past `step`.
    pub fn advance(&self, step: StepKey) -> Navigation {
        let draft = self.load_draft();
        let problems = self.step_problems(step, &draft);
        if !problems.is_empty() {
            return Navigation::Invalid { step, problems };
        }
        match step.next() {
            Some(next) => Navigation::Next(next),
            None => Navigation::Complete,
        }
    }

    /// Builds the order-creation payload from `draft`.
    pub fn build_submission_payload(
        &self,
        draft: &Draft,
        design_files: &[DesignFile],
    ) -> Result<SubmissionPayload> {
        build_submission_payload(draft, design_files)
    }

    /// Sends `payload` to the order-creation endpoint.
    ///
    /// On success the assigned ids are recorded on the stored draft, which
    /// is kept (not cleared). On failure the draft is left exactly as it
    /// was so the user can retry.
    ///
    /// # Errors
    ///
    /// * `MarketError::SubmissionFailed` - Network, timeout, server or
    ///   validation rejection, distinguished by its `FailureKind`
    pub async fn submit<A>(&self, api: &A, payload: &SubmissionPayload) -> Result<Submission>
    where
        A: MarketplaceApi + ?Sized,
    {
        let submission = match api.create_order(payload).await {
            Ok(submission) => submission,
            Err(e) => {
                warn!("Order submission failed, draft kept for retry: {e}");
                return Err(e);
            }
        };

        info!(
            "Order submitted: product {}, order {}, request order {}",
            submission.product_id, submission.order_id, submission.request_order_id
        );

        let mut draft = self.load_draft();
        draft.key = DraftKey::Product(submission.product_id);
        draft.submission = Some(submission);
        if let Err(e) = self.persist(&mut draft) {
            warn!("Order was created but the draft could not record it: {e}");
        }

        Ok(submission)
    }

    /// Validates the whole draft, builds the payload and submits it.
    ///
    /// Validation problems, including explicit values that break the
    /// schedule rules, are reported before any network traffic.
    pub async fn submit_draft<A>(&self, api: &A, design_files: &[DesignFile]) -> Result<Submission>
    where
        A: MarketplaceApi + ?Sized,
    {
        let draft = self.load_draft();
        if let Some(problem) = self.step_problems(StepKey::Review, &draft).into_iter().next() {
            return Err(MarketError::invalid_input(problem.field).with_reason(problem.to_string()));
        }
        if let Some(expected) = payload::missing_design_files(&draft, design_files) {
            warn!("The draft records {expected} design file(s) but none were supplied; submitting without an attachment");
        }
        let payload = self.build_submission_payload(&draft, design_files)?;
        self.submit(api, &payload).await
    }

    /// Clears the stored draft.
    ///
    /// Never called implicitly, not even after a successful submission.
    pub fn reset(&self) -> Result<()> {
        self.store.clear(CURRENT_DRAFT_KEY)?;
        info!("Draft cleared");
        Ok(())
    }
}
