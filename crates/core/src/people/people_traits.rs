use async_trait::async_trait;

use crate::board::PersonWithStats;
use crate::errors::Result;
use crate::people::people_model::{NewPerson, Person, PersonUpdate, PersonWithGifts};

/// Trait for person repository operations.
#[async_trait]
pub trait PersonRepositoryTrait: Send + Sync {
    /// Lists all people ordered by name ascending.
    fn list(&self) -> Result<Vec<Person>>;
    fn get_by_id(&self, person_id: &str) -> Result<Person>;
    fn get_with_gifts(&self, person_id: &str) -> Result<PersonWithGifts>;
    async fn insert(&self, new_person: NewPerson) -> Result<Person>;
    async fn update(&self, person_id: String, update: PersonUpdate) -> Result<Person>;
    /// Deletes the person and all of their gifts in a single transaction.
    /// Returns the number of gifts removed alongside the person.
    async fn delete_cascade(&self, person_id: String) -> Result<usize>;
}

/// Trait for person service operations.
#[async_trait]
pub trait PersonServiceTrait: Send + Sync {
    fn get_people(&self) -> Result<Vec<Person>>;
    fn get_people_with_stats(&self) -> Result<Vec<PersonWithStats>>;
    fn get_person(&self, person_id: &str) -> Result<PersonWithGifts>;
    async fn create_person(&self, new_person: NewPerson) -> Result<Person>;
    async fn update_person(&self, person_id: String, update: PersonUpdate) -> Result<Person>;
    async fn delete_person(&self, person_id: String) -> Result<usize>;
}
