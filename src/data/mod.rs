//! Example records and their numeric description
//!
//! - [`Value`] / [`Record`] - raw field access on an example
//! - [`Descriptor`] - schema turning records into feature vectors and labels
//! - [`rows_from_frame`] - materializes a polars `DataFrame` into records

mod descriptor;
mod frame;
mod value;

pub use descriptor::{sanitize, Descriptor, Property, PropertyKind};
pub use frame::rows_from_frame;
pub use value::{Record, Row, Value};
