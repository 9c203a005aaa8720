//! Services: DTO translation and the transaction boundary around repositories.

mod entity;
mod layout;
mod validation;
pub use entity::EntityService;
pub use layout::LayoutService;
pub use validation::{rules_for, RequestValidator, ValidationRule};
