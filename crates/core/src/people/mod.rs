//! People module - domain models, services, and traits.

mod people_model;
mod people_service;
mod people_traits;


pub use people_model::{NewPerson, Person, PersonUpdate, PersonWithGifts};
pub use people_service::PersonService;
pub use people_traits::{PersonRepositoryTrait, PersonServiceTrait};
