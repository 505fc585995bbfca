use std::sync::Arc;

use crate::config::Config;
use crate::db::event_repository::EventRepository;
use crate::db::place_repository::PlaceRepository;
use crate::db::user_repository::UserRepository;
use crate::db::visit_repository::VisitRepository;
use crate::utils::jwt::TokenKeys;

/// Shared, read-only application context. Everything is behind an `Arc`, so
/// requests never share mutable in-process state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub places: Arc<dyn PlaceRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub token_keys: Arc<TokenKeys>,
    pub config: Arc<Config>,
}
