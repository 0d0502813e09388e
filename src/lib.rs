//! Weighted spinner wheel and coin flip engine.
//!
//! [`registry::EntryRegistry`] turns editor text into weighted entries,
//! validates them and picks winners; [`history::HistoryStore`] keeps per
//! entry-set win counts; [`coin::CoinFlip`] tallies coin tosses. The terminal
//! front end in `main.rs` only drives these types.

pub mod coin;
pub mod config;
pub mod entry;
pub mod error;
pub mod history;
pub mod logging;
pub mod registry;
pub mod selection;
pub mod store;
pub mod wheel;

pub use entry::{
    Entry,
    EntrySet,
};
pub use error::RegistryError;
pub use registry::{
    EntryRegistry,
    Modes,
    SpinResult,
};
pub use selection::Winner;
