//! SQL text and bind values for the grid tables: identifiers from table descriptors, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
