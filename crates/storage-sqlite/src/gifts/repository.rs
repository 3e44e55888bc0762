use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use giftwise_core::errors::{DatabaseError, Error, Result};
use giftwise_core::gifts::{
    Gift, GiftQuery, GiftRepositoryTrait, GiftUpdate, GiftWithPerson, NewGift,
};
use giftwise_core::people::Person;

use super::model::GiftDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::people::PersonDB;
use crate::schema::{gifts, people};

/// Repository for managing gift records.
pub struct GiftRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GiftRepository {
    /// Creates a new GiftRepository instance.
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Loads the owning person for an embed, inside the writer's connection.
fn load_person(conn: &mut SqliteConnection, person_id: Option<&str>) -> Result<Option<Person>> {
    let Some(person_id) = person_id else {
        return Ok(None);
    };
    let person_db = people::table
        .find(person_id)
        .select(PersonDB::as_select())
        .first::<PersonDB>(conn)
        .optional()
        .map_err(StorageError::from)?;
    Ok(person_db.map(Person::from))
}

fn combine(gift_db: GiftDB, person_db: Option<PersonDB>) -> GiftWithPerson {
    GiftWithPerson {
        gift: gift_db.into(),
        person: person_db.map(Person::from),
    }
}

#[async_trait]
impl GiftRepositoryTrait for GiftRepository {
    /// Lists gifts matching the query with their people embedded, newest
    /// first.
    fn list(&self, query: &GiftQuery) -> Result<Vec<GiftWithPerson>> {
        let mut conn = get_connection(&self.pool)?;

        let mut sql = gifts::table.left_join(people::table).into_boxed();
        if let Some(person_id) = &query.person_id {
            sql = sql.filter(gifts::person_id.eq(person_id.clone()));
        }
        if let Some(status) = query.status {
            sql = sql.filter(gifts::status.eq(status.as_str()));
        }

        let rows = sql
            .select((GiftDB::as_select(), Option::<PersonDB>::as_select()))
            .order(gifts::created_at.desc())
            .load::<(GiftDB, Option<PersonDB>)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|(gift_db, person_db)| combine(gift_db, person_db))
            .collect())
    }

    fn get_by_id(&self, gift_id: &str) -> Result<GiftWithPerson> {
        let mut conn = get_connection(&self.pool)?;
        let (gift_db, person_db) = gifts::table
            .left_join(people::table)
            .filter(gifts::id.eq(gift_id))
            .select((GiftDB::as_select(), Option::<PersonDB>::as_select()))
            .first::<(GiftDB, Option<PersonDB>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(combine(gift_db, person_db))
    }

    async fn insert(&self, new_gift: NewGift) -> Result<GiftWithPerson> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GiftWithPerson> {
                let now = chrono::Utc::now().naive_utc();
                let gift_db = GiftDB {
                    id: new_gift
                        .id
                        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                    name: new_gift.name,
                    description: new_gift.description,
                    price: new_gift.price.map(|p| p.to_string()),
                    status: new_gift.status.as_str().to_string(),
                    url: new_gift.url,
                    location: new_gift.location,
                    notes: new_gift.notes,
                    person_id: new_gift.person_id,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(gifts::table)
                    .values(&gift_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let person = load_person(conn, gift_db.person_id.as_deref())?;
                Ok(GiftWithPerson {
                    gift: gift_db.into(),
                    person,
                })
            })
            .await
    }

    /// Applies a merge-patch: the stored row is loaded, patched in memory,
    /// and written back whole, so cleared fields become NULL and absent
    /// fields keep their stored value.
    async fn update(&self, gift_id: String, update: GiftUpdate) -> Result<GiftWithPerson> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GiftWithPerson> {
                let existing = gifts::table
                    .find(&gift_id)
                    .select(GiftDB::as_select())
                    .first::<GiftDB>(conn)
                    .map_err(StorageError::from)?;

                let mut gift: Gift = existing.into();
                update.apply_to(&mut gift);

                let mut gift_db: GiftDB = gift.into();
                gift_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(gifts::table.find(&gift_db.id))
                    .set(&gift_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let person = load_person(conn, gift_db.person_id.as_deref())?;
                Ok(GiftWithPerson {
                    gift: gift_db.into(),
                    person,
                })
            })
            .await
    }

    /// Deletes a single gift row; other rows are never touched.
    async fn delete(&self, gift_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected_rows = diesel::delete(gifts::table.find(&gift_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Gift {gift_id} not found"
                    ))));
                }
                Ok(affected_rows)
            })
            .await
    }
}
