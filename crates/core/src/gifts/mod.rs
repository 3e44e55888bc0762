//! Gifts module - domain models, services, and traits.

mod gifts_model;
mod gifts_service;
mod gifts_traits;


pub use gifts_model::{Gift, GiftQuery, GiftStatus, GiftUpdate, GiftWithPerson, NewGift};
pub use gifts_service::GiftService;
pub use gifts_traits::{GiftRepositoryTrait, GiftServiceTrait};
