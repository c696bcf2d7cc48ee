//! HTTP server module.
//!
//! Plain HTTP only. The server includes:
//! - Bind error reporting with the offending address
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{bind, listen, serve, start_server, ServerError};
