//! Static Overrides
//!
//! Maps request paths onto the local override directory and serves files
//! found there.

use std::path::{Path, PathBuf};

use axum::{body::Body, extract::Request, response::Response};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Maps a URL path onto `root`.
///
/// Segments are percent-decoded; empty and `.` segments are skipped. Returns
/// `None` when a segment would leave `root` (`..`, embedded separators) or is
/// not valid UTF-8, in which case no override applies.
pub fn local_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in request_path.split('/') {
        let segment = percent_decode_str(segment).decode_utf8().ok()?;
        match &*segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(['/', '\\', '\0']) => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

/// Returns the override file for `request_path`, if a regular file exists.
pub async fn find_override(root: &Path, request_path: &str) -> Option<PathBuf> {
    let path = local_path(root, request_path)?;
    match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Some(path),
        _ => None,
    }
}

/// Serves `path` with content-type detection and conditional/range support.
pub async fn serve_file(path: PathBuf, req: Request) -> Response {
    match ServeFile::new(path).oneshot(req).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
