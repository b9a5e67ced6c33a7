//! Skiff - a small HTTP/1.1 file and echo server
//!
//! Core library for the HTTP protocol layer, routing and the listener.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
