//! Database layer - connection pool, startup migrations, repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no shared mutable session
//! - List operations use JOINs with aggregate counts - no N+1 queries
//! - FK constraints enforce referential integrity - violations surface
//!   as store errors, never panics
//! - Explicit transactions around every write

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
