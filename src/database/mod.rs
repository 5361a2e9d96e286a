pub mod connection;
pub mod seed;

pub use connection::{DbPool, create_pool, run_migrations};
pub use seed::seed_all;
