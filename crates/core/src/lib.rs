pub mod config;
pub mod database;
pub mod datekey;
pub mod model;
pub mod reconcile;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use database::Database;
pub use datekey::{key_for, week_start_of, WeekWindow};
pub use model::*;
pub use services::WeekService;
pub use session::{CellRef, Session};
