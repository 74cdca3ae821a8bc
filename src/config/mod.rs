//! Configuration management for the arbitrage engine

pub mod settings;
pub mod engine;

pub use settings::*;
pub use engine::*;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref CONFIG: Config = Config::load();
}
