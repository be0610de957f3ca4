//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! [`DieselListingStore`] implements every listing repository port over a
//! `bb8` pool of `diesel-async` connections.
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No listing rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One error vocabulary**: every Diesel and pool failure is mapped to
//!   [`crate::domain::ports::StoreError`].
//!
//! # Example
//!
//! ```ignore
//! use phongtro::outbound::persistence::{DbPool, DieselListingStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/phongtro")).await?;
//! let store = DieselListingStore::new(pool);
//! ```

mod diesel_engagement_repository;
mod diesel_listing_store;
mod diesel_post_repository;
mod diesel_wishlist_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_listing_store::DieselListingStore;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
