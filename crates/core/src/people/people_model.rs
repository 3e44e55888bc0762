//! Person domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::gifts::Gift;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a gift recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A person together with their gifts, newest gift first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithGifts {
    #[serde(flatten)]
    pub person: Person,
    pub gifts: Vec<Gift>,
}

/// Input model for creating a new person.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl NewPerson {
    /// Validates the new person data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing person.
///
/// Absent fields are left untouched (merge-patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PersonUpdate {
    /// Validates the person update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Person name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Applies the patch to an existing person in place.
    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
    }
}
