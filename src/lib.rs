pub mod cli;
pub mod commands;

pub use weekgrid_core as core;
pub use weekgrid_core::config;
pub use weekgrid_core::database as db;
pub use weekgrid_core::datekey;
pub use weekgrid_core::model;
pub use weekgrid_core::services;
pub use weekgrid_core::session;
pub use weekgrid_core::AppConfig;
