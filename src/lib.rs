//! Backend de gestão de condomínios: um schema do Postgres por prédio.

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;
