//! This is a library that provides the sample records of a limnology field
//! log and an in-memory store to keep track of them.

pub mod error;
pub mod sample;
pub mod store;

pub use error::Error;
pub use error::Result;
pub use sample::{Record, SchemaVariant};
pub use store::SampleStore;
