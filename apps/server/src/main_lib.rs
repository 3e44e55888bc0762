use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::SessionManager;
use crate::config::Config;
use giftwise_core::{
    gifts::{GiftRepositoryTrait, GiftService, GiftServiceTrait},
    people::{PersonRepositoryTrait, PersonService, PersonServiceTrait},
};
use giftwise_storage_sqlite::{
    db::{self, write_actor},
    gifts::GiftRepository,
    people::PersonRepository,
};

pub struct AppState {
    pub person_service: Arc<dyn PersonServiceTrait + Send + Sync>,
    pub gift_service: Arc<dyn GiftServiceTrait + Send + Sync>,
    pub sessions: Arc<SessionManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("GW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let person_repository: Arc<dyn PersonRepositoryTrait> =
        Arc::new(PersonRepository::new(pool.clone(), writer.clone()));
    let gift_repository: Arc<dyn GiftRepositoryTrait> =
        Arc::new(GiftRepository::new(pool.clone(), writer.clone()));

    let gift_service: Arc<dyn GiftServiceTrait + Send + Sync> =
        Arc::new(GiftService::new(gift_repository.clone()));
    let person_service: Arc<dyn PersonServiceTrait + Send + Sync> = Arc::new(PersonService::new(
        person_repository,
        gift_repository,
    ));

    let sessions = Arc::new(SessionManager::new(&config.auth)?);

    Ok(Arc::new(AppState {
        person_service,
        gift_service,
        sessions,
        db_path,
    }))
}
