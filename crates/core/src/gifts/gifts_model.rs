//! Gift domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::people::Person;
use crate::{errors::ValidationError, Error, Result};

/// Lifecycle stage of a gift.
///
/// The declaration order is the lifecycle order and drives sorting:
/// an idea becomes ordered, then received, wrapped, and finally given.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftStatus {
    #[default]
    Idea,
    Ordered,
    Received,
    Wrapped,
    Given,
}

impl GiftStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [GiftStatus; 5] = [
        GiftStatus::Idea,
        GiftStatus::Ordered,
        GiftStatus::Received,
        GiftStatus::Wrapped,
        GiftStatus::Given,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GiftStatus::Idea => "IDEA",
            GiftStatus::Ordered => "ORDERED",
            GiftStatus::Received => "RECEIVED",
            GiftStatus::Wrapped => "WRAPPED",
            GiftStatus::Given => "GIVEN",
        }
    }
}

impl FromStr for GiftStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IDEA" => Ok(GiftStatus::Idea),
            "ORDERED" => Ok(GiftStatus::Ordered),
            "RECEIVED" => Ok(GiftStatus::Received),
            "WRAPPED" => Ok(GiftStatus::Wrapped),
            "GIVEN" => Ok(GiftStatus::Given),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown gift status '{}'",
                other
            )))),
        }
    }
}

impl std::fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a gift intended for a person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Amount in the single configured currency. `None` means "no price yet".
    pub price: Option<Decimal>,
    pub status: GiftStatus,
    /// Product link, stored as-is.
    pub url: Option<String>,
    /// Hiding place.
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Owning person; a gift may be unassigned.
    pub person_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A gift together with its owning person, when assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftWithPerson {
    #[serde(flatten)]
    pub gift: Gift,
    pub person: Option<Person>,
}

impl GiftWithPerson {
    /// The owning person's name, or an empty string when unassigned.
    /// Used as the derived `personName` sort key.
    pub fn person_name(&self) -> &str {
        self.person.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}

/// Input model for creating a new gift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGift {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Defaults to `IDEA` when absent.
    #[serde(default)]
    pub status: GiftStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub person_id: Option<String>,
}

impl NewGift {
    /// Validates the new gift data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        validate_price(self.price)?;
        Ok(())
    }
}

/// Input model for updating an existing gift.
///
/// This is an explicit merge-patch: only fields present in the request
/// overwrite the stored value. Clearable fields use a double `Option` so
/// that "clear this field" (`null`) and "leave untouched" (absent) are
/// distinct on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GiftStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub price: Option<Option<Decimal>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub location: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub person_id: Option<Option<String>>,
}

impl GiftUpdate {
    /// A patch that only reassigns the gift to another person (or to the
    /// unassigned lane). This is the payload drag-and-drop issues.
    pub fn reassign(person_id: Option<String>) -> Self {
        Self {
            person_id: Some(person_id),
            ..Default::default()
        }
    }

    /// Validates the gift update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Gift name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Applies the patch to an existing gift in place. Absent fields are
    /// left untouched.
    pub fn apply_to(&self, gift: &mut Gift) {
        if let Some(name) = &self.name {
            gift.name = name.clone();
        }
        if let Some(status) = self.status {
            gift.status = status;
        }
        if let Some(description) = &self.description {
            gift.description = description.clone();
        }
        if let Some(price) = self.price {
            gift.price = price;
        }
        if let Some(url) = &self.url {
            gift.url = url.clone();
        }
        if let Some(location) = &self.location {
            gift.location = location.clone();
        }
        if let Some(notes) = &self.notes {
            gift.notes = notes.clone();
        }
        if let Some(person_id) = &self.person_id {
            gift.person_id = person_id.clone();
        }
    }
}

/// Filter for listing gifts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftQuery {
    pub person_id: Option<String>,
    pub status: Option<GiftStatus>,
}

fn validate_price(price: Option<Decimal>) -> Result<()> {
    if let Some(value) = price {
        if value.is_sign_negative() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Gift price cannot be negative".to_string(),
            )));
        }
    }
    Ok(())
}
