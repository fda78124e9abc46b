//! Form field value objects

use super::quote_form::MoveType;

/// Identifies every input of the quote form.
///
/// Used as the key of the validation error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Date,
    MoveType,
    Description,
    OriginStreet,
    OriginCity,
    OriginPostalCode,
    DestinationStreet,
    DestinationCity,
    DestinationPostalCode,
}

impl FieldId {
    /// Stable machine name of the field
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::MoveType => "move_type",
            Self::Description => "description",
            Self::OriginStreet => "origin_street",
            Self::OriginCity => "origin_city",
            Self::OriginPostalCode => "origin_postal_code",
            Self::DestinationStreet => "destination_street",
            Self::DestinationCity => "destination_city",
            Self::DestinationPostalCode => "destination_postal_code",
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    MoveType(Option<MoveType>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Which characters a text field accepts from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFilter {
    Any,
    /// Only ASCII digits, up to `max` of them
    Digits { max: usize },
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub filter: InputFilter,
}

impl FormField {
    /// Create a new text field
    pub fn text(id: FieldId, label: &'static str, is_multiline: bool) -> Self {
        Self {
            id,
            label,
            value: FieldValue::Text(String::new()),
            is_multiline,
            filter: InputFilter::Any,
        }
    }

    /// Create a new digits-only field
    pub fn digits(id: FieldId, label: &'static str, max: usize) -> Self {
        Self {
            filter: InputFilter::Digits { max },
            ..Self::text(id, label, false)
        }
    }

    /// Create a new move type selector
    pub fn move_type(id: FieldId, label: &'static str) -> Self {
        Self {
            id,
            label,
            value: FieldValue::MoveType(None),
            is_multiline: false,
            filter: InputFilter::Any,
        }
    }

    /// Get the text value (returns empty string for selector fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::MoveType(_) => "",
        }
    }

    /// Get the selected move type (None for text fields)
    pub fn as_move_type(&self) -> Option<MoveType> {
        match &self.value {
            FieldValue::MoveType(m) => *m,
            FieldValue::Text(_) => None,
        }
    }

    /// Whether the field has no meaningful content
    pub fn is_blank(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::MoveType(m) => m.is_none(),
        }
    }

    /// Set the text value verbatim, bypassing the input filter
    pub fn set_text(&mut self, value: String) {
        self.value = FieldValue::Text(value);
    }

    /// Set the selected move type
    pub fn set_move_type(&mut self, value: Option<MoveType>) {
        self.value = FieldValue::MoveType(value);
    }

    /// Push a character to the field value.
    ///
    /// Returns false when the character was rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        let filter = self.filter;
        match &mut self.value {
            FieldValue::Text(s) => match filter {
                InputFilter::Any => {
                    s.push(c);
                    true
                }
                InputFilter::Digits { max } => {
                    if c.is_ascii_digit() && s.chars().count() < max {
                        s.push(c);
                        true
                    } else {
                        false
                    }
                }
            },
            FieldValue::MoveType(m) => {
                // Typing the first letter of an option selects it
                let picked = MoveType::ALL
                    .into_iter()
                    .find(|t| t.label().starts_with(c.to_ascii_uppercase()));
                if picked.is_some() {
                    *m = picked;
                }
                picked.is_some()
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::MoveType(m) => *m = None,
        }
    }

    /// Cycle a selector forward (no-op for text fields)
    pub fn select_next(&mut self) {
        if let FieldValue::MoveType(m) = &mut self.value {
            *m = Some(m.map_or(MoveType::ALL[0], |t| t.next()));
        }
    }

    /// Cycle a selector backward (no-op for text fields)
    pub fn select_prev(&mut self) {
        if let FieldValue::MoveType(m) = &mut self.value {
            *m = Some(m.map_or(MoveType::ALL[MoveType::ALL.len() - 1], |t| t.prev()));
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::MoveType(m) => *m = None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::MoveType(None) => String::new(),
            FieldValue::MoveType(Some(m)) => format!("◀ {} ▶", m.label()),
        }
    }
}
