pub mod analysis;
pub mod client;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod storage;
