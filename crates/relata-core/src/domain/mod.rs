//! Domain layer
//!
//! Contains the concept graph and the study scheduling logic built on it.

pub mod confidence;
pub mod graph;
pub mod history;
pub mod selection;
pub mod workbench;
