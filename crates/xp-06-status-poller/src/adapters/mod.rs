//! # Adapters Module

pub mod scripted;

pub use scripted::ScriptedStatusSource;
