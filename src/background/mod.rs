//! Work that runs off the UI thread.

pub mod worker;

pub use worker::{StoreCommand, StoreEvent, StoreWorker};
