use async_trait::async_trait;

use crate::errors::Result;
use crate::gifts::gifts_model::{GiftQuery, GiftUpdate, GiftWithPerson, NewGift};

/// Trait for gift repository operations.
#[async_trait]
pub trait GiftRepositoryTrait: Send + Sync {
    /// Lists gifts matching the query, newest first.
    fn list(&self, query: &GiftQuery) -> Result<Vec<GiftWithPerson>>;
    fn get_by_id(&self, gift_id: &str) -> Result<GiftWithPerson>;
    async fn insert(&self, new_gift: NewGift) -> Result<GiftWithPerson>;
    async fn update(&self, gift_id: String, update: GiftUpdate) -> Result<GiftWithPerson>;
    async fn delete(&self, gift_id: String) -> Result<usize>;
}

/// Trait for gift service operations.
#[async_trait]
pub trait GiftServiceTrait: Send + Sync {
    fn get_gifts(&self, query: &GiftQuery) -> Result<Vec<GiftWithPerson>>;
    fn get_gift(&self, gift_id: &str) -> Result<GiftWithPerson>;
    async fn create_gift(&self, new_gift: NewGift) -> Result<GiftWithPerson>;
    async fn update_gift(&self, gift_id: String, update: GiftUpdate) -> Result<GiftWithPerson>;
    async fn delete_gift(&self, gift_id: String) -> Result<usize>;
}
