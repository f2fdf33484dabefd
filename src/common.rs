pub mod error;
pub mod db_utils;
pub mod query;
