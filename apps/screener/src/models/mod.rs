pub mod filter_result;
pub mod job;
pub mod resume;
