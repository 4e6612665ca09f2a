pub mod job;
pub mod trend;
