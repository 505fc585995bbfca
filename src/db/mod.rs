pub mod event_repository;
pub mod mock_db;
pub mod place_repository;
pub mod postgres_event_repository;
pub mod postgres_place_repository;
pub mod postgres_user_repository;
pub mod postgres_visit_repository;
pub mod user_repository;
pub mod visit_repository;
