//! The quote request form and its validation rules

use super::field::{FieldId, FormField};
use crate::state::WizardStep;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of digits in a postal code (CEP)
pub const POSTAL_CODE_LEN: usize = 8;

const REQUIRED: &str = "Required";
const INVALID_POSTAL_CODE: &str = "Invalid postal code";

/// Category of relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Residential,
    Commercial,
    Office,
}

impl MoveType {
    pub const ALL: [MoveType; 3] = [Self::Residential, Self::Commercial, Self::Office];

    pub fn next(&self) -> Self {
        match self {
            Self::Residential => Self::Commercial,
            Self::Commercial => Self::Office,
            Self::Office => Self::Residential,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Residential => Self::Office,
            Self::Commercial => Self::Residential,
            Self::Office => Self::Commercial,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Office => "Office",
        }
    }
}

/// True when `code` is exactly eight ASCII digits
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// All inputs collected by the quote wizard
#[derive(Debug, Clone)]
pub struct QuoteForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub date: FormField,
    pub move_type: FormField,
    pub description: FormField,
    pub origin_street: FormField,
    pub origin_city: FormField,
    pub origin_postal_code: FormField,
    pub destination_street: FormField,
    pub destination_city: FormField,
    pub destination_postal_code: FormField,
}

impl QuoteForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text(FieldId::Name, "Full name *", false),
            email: FormField::text(FieldId::Email, "E-mail *", false),
            phone: FormField::text(FieldId::Phone, "Phone *", false),
            date: FormField::text(FieldId::Date, "Desired date (YYYY-MM-DD) *", false),
            move_type: FormField::move_type(FieldId::MoveType, "Move type *"),
            description: FormField::text(FieldId::Description, "Additional details", true),
            origin_street: FormField::text(FieldId::OriginStreet, "Origin address *", false),
            origin_city: FormField::text(FieldId::OriginCity, "Origin city", false),
            origin_postal_code: FormField::digits(
                FieldId::OriginPostalCode,
                "Origin CEP *",
                POSTAL_CODE_LEN,
            ),
            destination_street: FormField::text(
                FieldId::DestinationStreet,
                "Destination address *",
                false,
            ),
            destination_city: FormField::text(FieldId::DestinationCity, "Destination city", false),
            destination_postal_code: FormField::digits(
                FieldId::DestinationPostalCode,
                "Destination CEP *",
                POSTAL_CODE_LEN,
            ),
        }
    }

    /// Inputs shown on a step, in focus order
    pub fn fields_for_step(step: WizardStep) -> &'static [FieldId] {
        match step {
            WizardStep::Contact => &[FieldId::Name, FieldId::Email, FieldId::Phone],
            WizardStep::MoveDetails => &[FieldId::Date, FieldId::MoveType, FieldId::Description],
            WizardStep::Addresses => &[
                FieldId::OriginStreet,
                FieldId::OriginCity,
                FieldId::OriginPostalCode,
                FieldId::DestinationStreet,
                FieldId::DestinationCity,
                FieldId::DestinationPostalCode,
            ],
            WizardStep::Review | WizardStep::Confirmation => &[],
        }
    }

    pub fn field(&self, id: FieldId) -> &FormField {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Date => &self.date,
            FieldId::MoveType => &self.move_type,
            FieldId::Description => &self.description,
            FieldId::OriginStreet => &self.origin_street,
            FieldId::OriginCity => &self.origin_city,
            FieldId::OriginPostalCode => &self.origin_postal_code,
            FieldId::DestinationStreet => &self.destination_street,
            FieldId::DestinationCity => &self.destination_city,
            FieldId::DestinationPostalCode => &self.destination_postal_code,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FormField {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::Date => &mut self.date,
            FieldId::MoveType => &mut self.move_type,
            FieldId::Description => &mut self.description,
            FieldId::OriginStreet => &mut self.origin_street,
            FieldId::OriginCity => &mut self.origin_city,
            FieldId::OriginPostalCode => &mut self.origin_postal_code,
            FieldId::DestinationStreet => &mut self.destination_street,
            FieldId::DestinationCity => &mut self.destination_city,
            FieldId::DestinationPostalCode => &mut self.destination_postal_code,
        }
    }

    /// Validate the inputs owned by `step`.
    ///
    /// Returns one message per failing field; an empty map means the step may
    /// be left.
    pub fn validate_step(&self, step: WizardStep) -> BTreeMap<FieldId, String> {
        let mut errors = BTreeMap::new();

        let required: &[FieldId] = match step {
            WizardStep::Contact => &[FieldId::Name, FieldId::Email, FieldId::Phone],
            WizardStep::MoveDetails => &[FieldId::Date, FieldId::MoveType],
            WizardStep::Addresses => &[FieldId::OriginStreet, FieldId::DestinationStreet],
            WizardStep::Review | WizardStep::Confirmation => &[],
        };
        for id in required {
            if self.field(*id).is_blank() {
                errors.insert(*id, REQUIRED.to_string());
            }
        }

        if step == WizardStep::Addresses {
            for id in [FieldId::OriginPostalCode, FieldId::DestinationPostalCode] {
                if !is_valid_postal_code(self.field(id).as_text()) {
                    errors.insert(id, INVALID_POSTAL_CODE.to_string());
                }
            }
        }

        errors
    }

    /// Selected move type, if any
    pub fn selected_move_type(&self) -> Option<MoveType> {
        self.move_type.as_move_type()
    }

    /// Street and city joined for display, skipping empty parts
    pub fn origin_display(&self) -> String {
        join_address(self.origin_street.as_text(), self.origin_city.as_text())
    }

    pub fn destination_display(&self) -> String {
        join_address(
            self.destination_street.as_text(),
            self.destination_city.as_text(),
        )
    }
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self::new()
    }
}

fn join_address(street: &str, city: &str) -> String {
    [street.trim(), city.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
