pub mod memory;
pub mod repository;

pub use memory::{InMemoryRepository, SeedData};
pub use repository::SchedulingRepository;
