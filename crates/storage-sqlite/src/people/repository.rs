use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use giftwise_core::errors::{DatabaseError, Error, Result};
use giftwise_core::gifts::Gift;
use giftwise_core::people::{NewPerson, Person, PersonRepositoryTrait, PersonUpdate, PersonWithGifts};

use super::model::PersonDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::gifts::GiftDB;
use crate::schema::{gifts, people};

/// Repository for managing person records.
pub struct PersonRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PersonRepository {
    /// Creates a new PersonRepository instance.
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PersonRepositoryTrait for PersonRepository {
    /// Lists all people ordered by name ascending.
    fn list(&self) -> Result<Vec<Person>> {
        let mut conn = get_connection(&self.pool)?;
        let people_db = people::table
            .select(PersonDB::as_select())
            .order(people::name.asc())
            .load::<PersonDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(people_db.into_iter().map(Person::from).collect())
    }

    fn get_by_id(&self, person_id: &str) -> Result<Person> {
        let mut conn = get_connection(&self.pool)?;
        let person_db = people::table
            .find(person_id)
            .select(PersonDB::as_select())
            .first::<PersonDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(person_db.into())
    }

    /// Retrieves a person with their gifts embedded, newest gift first.
    fn get_with_gifts(&self, person_id: &str) -> Result<PersonWithGifts> {
        let mut conn = get_connection(&self.pool)?;
        let person_db = people::table
            .find(person_id)
            .select(PersonDB::as_select())
            .first::<PersonDB>(&mut conn)
            .map_err(StorageError::from)?;
        let gifts_db = gifts::table
            .filter(gifts::person_id.eq(person_id))
            .select(GiftDB::as_select())
            .order(gifts::created_at.desc())
            .load::<GiftDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(PersonWithGifts {
            person: person_db.into(),
            gifts: gifts_db.into_iter().map(Gift::from).collect(),
        })
    }

    async fn insert(&self, new_person: NewPerson) -> Result<Person> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Person> {
                let now = chrono::Utc::now().naive_utc();
                let person_db = PersonDB {
                    id: new_person
                        .id
                        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                    name: new_person.name,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(people::table)
                    .values(&person_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(person_db.into())
            })
            .await
    }

    async fn update(&self, person_id: String, update: PersonUpdate) -> Result<Person> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Person> {
                let existing = people::table
                    .find(&person_id)
                    .select(PersonDB::as_select())
                    .first::<PersonDB>(conn)
                    .map_err(StorageError::from)?;

                let mut person: Person = existing.into();
                update.apply_to(&mut person);

                let mut person_db: PersonDB = person.into();
                person_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(people::table.find(&person_db.id))
                    .set(&person_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(person_db.into())
            })
            .await
    }

    /// Deletes the person and all of their gifts. The writer actor runs
    /// the job inside one immediate transaction, so both deletes commit or
    /// neither does.
    async fn delete_cascade(&self, person_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let removed_gifts =
                    diesel::delete(gifts::table.filter(gifts::person_id.eq(&person_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                let removed_people = diesel::delete(people::table.find(&person_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if removed_people == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Person {person_id} not found"
                    ))));
                }
                Ok(removed_gifts)
            })
            .await
    }
}
