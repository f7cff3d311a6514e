//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `commit`: CommitRecord, one rendered line of `git log --graph`
//! - `repository`: RepositoryInfo for the header display
//! - `stats`: Statistics and AuthorCount derived from parsed records
//! - `api`: request bodies and the success envelope

pub mod api;
pub mod commit;
pub mod repository;
pub mod stats;

pub use api::*;
pub use commit::*;
pub use repository::*;
pub use stats::*;
