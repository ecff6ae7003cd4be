mod pg_pool;
mod repositories;

pub use repositories::{
    InMemoryCategoryRepository, InMemoryContentRepository, InMemoryMediaRepository,
    PgCategoryRepository, PgContentRepository, PgMediaRepository,
};

pub use pg_pool::{create_pool, run_migrations};
