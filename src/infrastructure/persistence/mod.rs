mod in_memory_job_registry;

pub use in_memory_job_registry::InMemoryJobRegistry;
