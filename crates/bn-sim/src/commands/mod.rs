pub mod describe;
pub mod hash;
pub mod query;
