mod local_store;
mod memory_store;

pub use local_store::LocalReportStore;
pub use memory_store::InMemoryReportStore;
