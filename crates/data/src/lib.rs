//! Loading and validation for difficulty tables.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
