//! Database pool, migrations and first-run catalog seed

mod pool;
mod seed;

pub use pool::{create_pool, run_migrations};
pub use seed::seed_catalog;
