//! TCP listener that accepts sockets and hands each one to its own
//! [`Connection`](crate::http::connection::Connection) task.

pub mod listener;
