pub mod auth;
pub mod events;
pub mod places;
pub mod users;
pub mod visits;
