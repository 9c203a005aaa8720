//! HTTP handlers for the grid resources.

pub mod layout;
pub mod resource;
pub use resource::{GridColumnResource, GridConfigurationResource, GridToolbarItemResource, Resource};
