mod check_card;
mod config;
mod model;
pub mod router;

pub use config::Config;
