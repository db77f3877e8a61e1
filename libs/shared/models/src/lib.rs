pub mod error;
pub mod scheduling;

pub use error::{RepositoryError, RepositoryResult};
pub use scheduling::*;
