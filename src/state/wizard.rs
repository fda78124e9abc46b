//! Quote wizard state machine
//!
//! The wizard walks through five fixed steps. Every transition is synchronous
//! except leaving the address step, which needs both postal codes geocoded.
//! That transition is split in two: [`WizardState::advance`] hands out a
//! [`LookupRequest`] tagged with a ticket, and [`WizardState::complete_lookup`]
//! applies the outcome only if the ticket is still the one being waited on.
//! Resetting or going back invalidates the ticket, so late results are dropped.

use super::forms::{FieldId, MoveType, QuoteForm};
use crate::geo::{distance_km, Coordinate};
use crate::geocoding::GeocodeError;
use crate::pricing::{estimate_with, PriceInputs};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Position in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Contact,
    MoveDetails,
    Addresses,
    Review,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::Contact,
        Self::MoveDetails,
        Self::Addresses,
        Self::Review,
        Self::Confirmation,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position
    pub fn number(&self) -> usize {
        match self {
            Self::Contact => 1,
            Self::MoveDetails => 2,
            Self::Addresses => 3,
            Self::Review => 4,
            Self::Confirmation => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Contact => "Contact information",
            Self::MoveDetails => "Move details",
            Self::Addresses => "Addresses",
            Self::Review => "Review",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Following step, or None on the last one
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Contact => Some(Self::MoveDetails),
            Self::MoveDetails => Some(Self::Addresses),
            Self::Addresses => Some(Self::Review),
            Self::Review => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// Previous step, saturating at the first one
    pub fn prev(&self) -> Self {
        match self {
            Self::Contact | Self::MoveDetails => Self::Contact,
            Self::Addresses => Self::MoveDetails,
            Self::Review => Self::Addresses,
            Self::Confirmation => Self::Review,
        }
    }
}

/// Progress of the geocoding lookup behind the address step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Pending {
        ticket: u64,
    },
    Failed(String),
}

/// Work the shell must perform to finish the address step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub ticket: u64,
    pub origin_postal_code: String,
    pub destination_postal_code: String,
}

/// Result of calling [`WizardState::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step
    Moved(WizardStep),
    /// Validation failed; see the error map
    Invalid,
    /// Validation passed; the lookup must run before the step can change
    LookupStarted(LookupRequest),
    /// A lookup is already running
    LookupInFlight,
    /// Already on the confirmation step
    Finished,
}

/// Price computed when the address step completes
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteEstimate {
    pub distance_km: f64,
    pub inputs: PriceInputs,
    pub price: u64,
}

/// Local record of a confirmed quote request
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSubmission {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub estimate: Option<QuoteEstimate>,
}

/// Outcome of applying a finished lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResolution {
    Estimated(QuoteEstimate),
    Failed(String),
    /// Ticket no longer current; nothing changed
    Stale,
}

/// Full state of one quote wizard session
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: QuoteForm,
    pub errors: BTreeMap<FieldId, String>,
    pub estimate: Option<QuoteEstimate>,
    pub lookup: LookupStatus,
    pub submission: Option<QuoteSubmission>,
    /// Index into the current step's field list
    pub active_field_index: usize,
    /// Last ticket handed out; survives reset so old tickets never match again
    last_ticket: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lookup is running
    pub fn is_pending(&self) -> bool {
        matches!(self.lookup, LookupStatus::Pending { .. })
    }

    /// Error message to surface for a failed lookup
    pub fn lookup_error(&self) -> Option<&str> {
        match &self.lookup {
            LookupStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Fields of the current step in focus order
    pub fn step_fields(&self) -> &'static [FieldId] {
        QuoteForm::fields_for_step(self.step)
    }

    /// Field that receives keyboard input, if the step has any
    pub fn active_field(&self) -> Option<FieldId> {
        self.step_fields().get(self.active_field_index).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 {
            self.active_field_index = (self.active_field_index + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 {
            self.active_field_index = (self.active_field_index + count - 1) % count;
        }
    }

    /// Try to leave the current step.
    pub fn advance(&mut self) -> Advance {
        match self.lookup {
            LookupStatus::Pending { .. } => return Advance::LookupInFlight,
            LookupStatus::Failed(_) => self.lookup = LookupStatus::Idle,
            LookupStatus::Idle => {}
        }

        let Some(next) = self.step.next() else {
            return Advance::Finished;
        };

        let errors = self.form.validate_step(self.step);
        if !errors.is_empty() {
            tracing::debug!(
                step = self.step.number(),
                fields = ?errors.keys().map(FieldId::name).collect::<Vec<_>>(),
                "Step validation failed"
            );
            self.errors = errors;
            return Advance::Invalid;
        }
        self.errors.clear();

        match self.step {
            WizardStep::Addresses => {
                self.last_ticket += 1;
                let ticket = self.last_ticket;
                self.lookup = LookupStatus::Pending { ticket };
                Advance::LookupStarted(LookupRequest {
                    ticket,
                    origin_postal_code: self.form.origin_postal_code.as_text().to_string(),
                    destination_postal_code: self
                        .form
                        .destination_postal_code
                        .as_text()
                        .to_string(),
                })
            }
            WizardStep::Review => {
                let submission = QuoteSubmission {
                    reference: Uuid::new_v4(),
                    submitted_at: Utc::now(),
                    estimate: self.estimate.clone(),
                };
                tracing::debug!(reference = %submission.reference, "Quote request confirmed");
                self.submission = Some(submission);
                self.go_to(next);
                Advance::Moved(next)
            }
            _ => {
                self.go_to(next);
                Advance::Moved(next)
            }
        }
    }

    /// Apply the outcome of the lookup identified by `ticket`.
    pub fn complete_lookup(
        &mut self,
        ticket: u64,
        result: Result<(Coordinate, Coordinate), GeocodeError>,
    ) -> LookupResolution {
        if self.lookup != (LookupStatus::Pending { ticket }) {
            tracing::debug!(ticket, "Discarding stale lookup result");
            return LookupResolution::Stale;
        }

        match result {
            Ok((origin, destination)) => {
                let distance = distance_km(origin, destination);
                let inputs = PriceInputs::from_answers(
                    self.form.selected_move_type(),
                    self.form.description.as_text(),
                );
                let estimate = QuoteEstimate {
                    distance_km: distance,
                    inputs,
                    price: estimate_with(distance, inputs),
                };
                tracing::debug!(
                    distance_km = distance,
                    price = estimate.price,
                    "Estimate computed"
                );
                self.estimate = Some(estimate.clone());
                self.lookup = LookupStatus::Idle;
                self.go_to(WizardStep::Review);
                LookupResolution::Estimated(estimate)
            }
            Err(err) => {
                tracing::debug!(ticket, error = %err, "Address lookup failed");
                let message = err.to_string();
                self.lookup = LookupStatus::Failed(message.clone());
                LookupResolution::Failed(message)
            }
        }
    }

    /// Clear a failed lookup without retrying
    pub fn dismiss_lookup_error(&mut self) {
        if matches!(self.lookup, LookupStatus::Failed(_)) {
            self.lookup = LookupStatus::Idle;
        }
    }

    /// Go back one step without validating. Cancels a running lookup.
    pub fn retreat(&mut self) {
        self.lookup = LookupStatus::Idle;
        if self.step == WizardStep::Confirmation {
            self.submission = None;
        }
        self.go_to(self.step.prev());
    }

    /// Discard everything and start over on the first step.
    pub fn reset(&mut self) {
        *self = Self {
            last_ticket: self.last_ticket,
            ..Self::default()
        };
    }

    /// Replace a field's text and clear its error
    pub fn set_field(&mut self, id: FieldId, value: impl Into<String>) {
        self.form.field_mut(id).set_text(value.into());
        self.errors.remove(&id);
    }

    /// Choose a move type and clear its error
    pub fn set_move_type(&mut self, value: Option<MoveType>) {
        self.form.move_type.set_move_type(value);
        self.errors.remove(&FieldId::MoveType);
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) {
        if let Some(id) = self.editable_field() {
            if self.form.field_mut(id).push_char(c) {
                self.errors.remove(&id);
            }
        }
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        if let Some(id) = self.editable_field() {
            self.form.field_mut(id).pop_char();
            self.errors.remove(&id);
        }
    }

    /// Cycle the active selector forward
    pub fn select_next(&mut self) {
        if let Some(id) = self.editable_field() {
            self.form.field_mut(id).select_next();
            self.errors.remove(&id);
        }
    }

    /// Cycle the active selector backward
    pub fn select_prev(&mut self) {
        if let Some(id) = self.editable_field() {
            self.form.field_mut(id).select_prev();
            self.errors.remove(&id);
        }
    }

    /// Active field, unless a lookup has frozen the address inputs
    fn editable_field(&self) -> Option<FieldId> {
        if self.is_pending() {
            return None;
        }
        self.active_field()
    }

    fn go_to(&mut self, step: WizardStep) {
        self.step = step;
        self.errors.clear();
        self.active_field_index = 0;
    }
}
