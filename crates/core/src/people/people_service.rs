use log::debug;
use std::sync::Arc;

use super::people_model::{NewPerson, Person, PersonUpdate, PersonWithGifts};
use super::people_traits::{PersonRepositoryTrait, PersonServiceTrait};
use crate::board::{self, PersonWithStats};
use crate::errors::Result;
use crate::gifts::{GiftQuery, GiftRepositoryTrait};

/// Service for managing people.
pub struct PersonService {
    repository: Arc<dyn PersonRepositoryTrait>,
    gift_repository: Arc<dyn GiftRepositoryTrait>,
}

impl PersonService {
    /// Creates a new PersonService instance.
    pub fn new(
        repository: Arc<dyn PersonRepositoryTrait>,
        gift_repository: Arc<dyn GiftRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            gift_repository,
        }
    }
}

#[async_trait::async_trait]
impl PersonServiceTrait for PersonService {
    /// Lists all people ordered by name.
    fn get_people(&self) -> Result<Vec<Person>> {
        self.repository.list()
    }

    /// Lists all people with their derived gift statistics.
    ///
    /// This is the authoritative stats computation; clients treat the
    /// returned numbers as read-only.
    fn get_people_with_stats(&self) -> Result<Vec<PersonWithStats>> {
        let people = self.repository.list()?;
        let gifts = self.gift_repository.list(&GiftQuery::default())?;
        let gifts: Vec<_> = gifts.into_iter().map(|g| g.gift).collect();
        Ok(board::people_with_stats(&people, &gifts))
    }

    /// Retrieves a person with their gifts, newest gift first.
    fn get_person(&self, person_id: &str) -> Result<PersonWithGifts> {
        self.repository.get_with_gifts(person_id)
    }

    /// Creates a new person.
    async fn create_person(&self, new_person: NewPerson) -> Result<Person> {
        new_person.validate()?;
        self.repository.insert(new_person).await
    }

    /// Updates an existing person (merge-patch).
    async fn update_person(&self, person_id: String, update: PersonUpdate) -> Result<Person> {
        update.validate()?;
        self.repository.update(person_id, update).await
    }

    /// Deletes a person together with all of their gifts.
    async fn delete_person(&self, person_id: String) -> Result<usize> {
        let removed_gifts = self.repository.delete_cascade(person_id).await?;
        debug!("Deleted person and {} owned gifts", removed_gifts);
        Ok(removed_gifts)
    }
}
