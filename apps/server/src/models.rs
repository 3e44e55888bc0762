//! Wire DTOs for the REST API.
//!
//! These exist to keep the HTTP surface tolerant: browser forms post
//! prices as strings and statuses as plain text, and required-field
//! violations must surface as 400s rather than body-parse rejections. The
//! DTOs normalize all of that and convert into the strict core input
//! models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use giftwise_core::errors::{Result, ValidationError};
use giftwise_core::gifts::{GiftQuery, GiftStatus, GiftUpdate, NewGift};
use giftwise_core::people::NewPerson;

/// A price as submitted by a client: either a JSON number or a form
/// string. An empty/blank string normalizes to "no price", never to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(Decimal),
    Text(String),
}

impl PriceInput {
    fn normalize(self) -> Result<Option<Decimal>> {
        match self {
            PriceInput::Number(value) => Ok(Some(value)),
            PriceInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                let value = Decimal::from_str(trimmed).map_err(ValidationError::from)?;
                Ok(Some(value))
            }
        }
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_status(value: &str) -> Result<GiftStatus> {
    GiftStatus::from_str(value)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<CreatePersonRequest> for NewPerson {
    fn from(req: CreatePersonRequest) -> Self {
        NewPerson {
            id: None,
            // An absent name fails validation downstream as a missing field.
            name: req.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGiftRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub person_id: Option<String>,
}

impl CreateGiftRequest {
    pub fn into_new_gift(self) -> Result<NewGift> {
        let status = match self.status.as_deref() {
            None | Some("") => GiftStatus::default(),
            Some(value) => parse_status(value)?,
        };
        let price = match self.price {
            Some(input) => input.normalize()?,
            None => None,
        };
        Ok(NewGift {
            id: None,
            name: self.name.unwrap_or_default(),
            description: self.description,
            price,
            status,
            url: self.url,
            location: self.location,
            notes: self.notes,
            // An empty select value means "unassigned".
            person_id: none_if_empty(self.person_id),
        })
    }
}

/// Merge-patch body for PUT /gifts/{id}. Clearable fields distinguish
/// `null` (clear) from absence (leave untouched).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGiftRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
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
    pub price: Option<Option<PriceInput>>,
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

impl UpdateGiftRequest {
    pub fn into_update(self) -> Result<GiftUpdate> {
        // An empty status string means "leave untouched", matching the
        // empty-select behavior of form clients.
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(value) => Some(parse_status(value)?),
        };
        let price = match self.price {
            None => None,
            Some(None) => Some(None),
            Some(Some(input)) => Some(input.normalize()?),
        };
        // For the person link both `null` and an empty string mean
        // "unassign".
        let person_id = self.person_id.map(none_if_empty);
        Ok(GiftUpdate {
            name: self.name,
            status,
            description: self.description,
            price,
            url: self.url,
            location: self.location,
            notes: self.notes,
            person_id,
        })
    }
}

/// Query parameters for GET /gifts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGiftsParams {
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListGiftsParams {
    pub fn into_query(self) -> Result<GiftQuery> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(value) => Some(parse_status(value)?),
        };
        Ok(GiftQuery {
            person_id: none_if_empty(self.person_id),
            status,
        })
    }
}
