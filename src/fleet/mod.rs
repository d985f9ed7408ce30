pub mod query;
pub mod seed;
pub mod stats;
