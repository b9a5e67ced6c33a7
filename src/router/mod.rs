//! Request routing.
//!
//! Paths are matched by byte prefix, first match wins:
//!
//! | Path            | Handler                                   |
//! |-----------------|-------------------------------------------|
//! | `/`             | empty 200                                 |
//! | `/echo/{text}`  | echoes `{text}` as text/plain             |
//! | `/user-agent`   | echoes the `User-Agent` header            |
//! | `/files/{name}` | GET reads, POST writes the file store     |
//! | anything else   | 404                                       |

pub mod files;

use std::path::PathBuf;

use crate::http::request::{Method, Request};
use crate::http::response::Response;

pub use files::{FileStore, FileStoreError};

#[derive(Debug, Clone, Default)]
pub struct Router {
    files: Option<FileStore>,
}

impl Router {
    /// `directory` is the file-store root; `None` disables the `/files/`
    /// routes (they answer 404).
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            files: directory.map(FileStore::new),
        }
    }

    pub async fn route(&self, req: &Request) -> Response {
        let path = req.path.as_str();

        if path == "/" {
            return Response::ok();
        }

        if let Some(text) = path.strip_prefix("/echo/") {
            return Response::text(text, req.accepts_gzip());
        }

        if path.starts_with("/user-agent") {
            let agent = req.header("User-Agent").unwrap_or_default();
            return Response::text(agent, req.accepts_gzip());
        }

        if let Some(rest) = path.strip_prefix("/files") {
            // "/files" alone yields an empty name; "/filesfoo" is no match.
            let name = match rest.strip_prefix('/') {
                Some(name) => name,
                None if rest.is_empty() => "",
                None => return Response::not_found(),
            };
            return self.files_route(&req.method, name, &req.body).await;
        }

        Response::not_found()
    }

    async fn files_route(&self, method: &Method, name: &str, body: &[u8]) -> Response {
        match method {
            Method::GET => files::get_file(self.files.as_ref(), name).await,
            Method::POST => files::post_file(self.files.as_ref(), name, body).await,
            _ => Response::not_found(),
        }
    }
}
