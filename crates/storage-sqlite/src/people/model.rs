//! Database models for people.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for people.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::people)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PersonDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to/from domain models
impl From<PersonDB> for giftwise_core::people::Person {
    fn from(db: PersonDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<giftwise_core::people::Person> for PersonDB {
    fn from(domain: giftwise_core::people::Person) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
