//! fyyur-server: the Fyyur web service
//!
//! Venues, artists, and shows over HTTP with form-encoded input and
//! JSON view-models. Split into a database layer (pool, startup
//! migrations, one repository per aggregate) and an HTTP layer (router
//! assembly, error mapping, per-resource route modules).

pub mod db;
pub mod http;

pub use db::create_pool;
pub use http::{run_server, ServerConfig};
