pub mod auth;
pub mod building;
