use std::sync::Arc;

use super::gifts_model::{GiftQuery, GiftUpdate, GiftWithPerson, NewGift};
use super::gifts_traits::{GiftRepositoryTrait, GiftServiceTrait};
use crate::errors::Result;

/// Service for managing gifts.
pub struct GiftService {
    repository: Arc<dyn GiftRepositoryTrait>,
}

impl GiftService {
    /// Creates a new GiftService instance.
    pub fn new(repository: Arc<dyn GiftRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl GiftServiceTrait for GiftService {
    /// Lists gifts matching the query, newest first.
    fn get_gifts(&self, query: &GiftQuery) -> Result<Vec<GiftWithPerson>> {
        self.repository.list(query)
    }

    /// Retrieves a gift with its owning person embedded.
    fn get_gift(&self, gift_id: &str) -> Result<GiftWithPerson> {
        self.repository.get_by_id(gift_id)
    }

    /// Creates a new gift. The status defaults to `IDEA`; the person link
    /// is optional.
    async fn create_gift(&self, new_gift: NewGift) -> Result<GiftWithPerson> {
        new_gift.validate()?;
        self.repository.insert(new_gift).await
    }

    /// Applies a merge-patch to an existing gift. A patch carrying only
    /// `personId` is the reassignment command issued by drag-and-drop.
    async fn update_gift(&self, gift_id: String, update: GiftUpdate) -> Result<GiftWithPerson> {
        update.validate()?;
        self.repository.update(gift_id, update).await
    }

    /// Deletes a single gift. Never touches other rows.
    async fn delete_gift(&self, gift_id: String) -> Result<usize> {
        self.repository.delete(gift_id).await
    }
}
