//! Database models for gifts.
//!
//! Prices are stored as TEXT and parsed into `Decimal` on load; statuses
//! are stored as their canonical uppercase string.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::people::PersonDB;
use giftwise_core::gifts::{Gift, GiftStatus};

/// Database model for gifts.
///
/// `treat_none_as_null` makes the changeset write NULLs for cleared
/// optional fields; updates always write the whole row after the
/// merge-patch has been applied in memory.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(PersonDB, foreign_key = person_id))]
#[diesel(table_name = crate::schema::gifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GiftDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub status: String,
    pub url: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub person_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Parses a stored price string into a Decimal, falling back through f64
/// and finally to ZERO for unparseable values rather than failing the
/// whole row.
fn parse_price_tolerant(value_str: &str, gift_id: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(decimal_err) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(d) => d,
                None => {
                    warn!(
                        "Failed to convert price '{}' (parsed as f64: {}) to Decimal for gift {}.",
                        value_str, f_val, gift_id
                    );
                    Decimal::ZERO
                }
            },
            Err(float_err) => {
                warn!(
                    "Failed to parse price '{}' for gift {}: as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    value_str, gift_id, decimal_err, float_err
                );
                Decimal::ZERO
            }
        },
    }
}

fn parse_status_tolerant(value_str: &str, gift_id: &str) -> GiftStatus {
    GiftStatus::from_str(value_str).unwrap_or_else(|_| {
        warn!(
            "Unknown status '{}' stored for gift {}; treating as IDEA.",
            value_str, gift_id
        );
        GiftStatus::Idea
    })
}

// Conversion to/from domain models
impl From<GiftDB> for Gift {
    fn from(db: GiftDB) -> Self {
        let price = db.price.as_deref().map(|p| parse_price_tolerant(p, &db.id));
        let status = parse_status_tolerant(&db.status, &db.id);
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            price,
            status,
            url: db.url,
            location: db.location,
            notes: db.notes,
            person_id: db.person_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Gift> for GiftDB {
    fn from(domain: Gift) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            price: domain.price.map(|p| p.to_string()),
            status: domain.status.as_str().to_string(),
            url: domain.url,
            location: domain.location,
            notes: domain.notes,
            person_id: domain.person_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
