//! YieldLens HTTP surface.
//!
//! Endpoints:
//! - GET  /health — liveness
//! - POST /api/tools/apr — run the APR tool with a JSON `AprQuery`
//! - GET  /api/apr?chainName=..&account=.. — same, as a query string

pub mod routes;
pub mod state;
