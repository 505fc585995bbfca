pub mod exists;
pub mod jwt;
pub mod password;
pub mod validate;
