//! # Adapters Module

pub mod memory;

pub use memory::InMemoryIntentStore;
