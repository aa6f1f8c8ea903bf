mod in_memory_job_repository;

pub use in_memory_job_repository::InMemoryJobRepository;
