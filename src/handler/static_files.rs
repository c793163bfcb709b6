//! Static file serving module
//!
//! Maps request paths onto the site root, with index file fallback,
//! directory listings, and containment checks.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;

const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

// Bytes encoded in listing hrefs: URL-significant characters plus the
// HTML-sensitive ones; the encoded name needs no further escaping inside
// a quoted attribute. `/` stays raw to keep directory links slashed.
const HREF_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Outcome of mapping a request path onto the site root.
#[derive(Debug)]
pub enum Lookup {
    /// A regular file to serve.
    File(PathBuf),
    /// A directory with no index file; list its contents.
    Directory(PathBuf),
    /// A directory reached without a trailing slash.
    Redirect(String),
    /// Nothing under the root matches, or the path tried to escape it.
    NotFound,
}

/// Serve `ctx.path` from the site root.
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    match resolve_path(root, ctx.path) {
        Lookup::File(path) => serve_file(ctx, &path).await,
        Lookup::Directory(path) => serve_listing(ctx, &path),
        Lookup::Redirect(target) => http::build_redirect_response(&target),
        Lookup::NotFound => http::build_404_response(),
    }
}

/// Map `raw_path` onto `root`.
///
/// The path is percent-decoded first, so encoded traversal sequences hit
/// the same dot-dot segment gate as literal ones. File names that merely
/// contain dots (`notes..txt`) pass the gate. The resolved path is then
/// canonicalized and checked for containment; that second layer is what
/// catches symlinks pointing out of the root.
pub fn resolve_path(root: &Path, raw_path: &str) -> Lookup {
    let decoded = percent_decode_str(raw_path).decode_utf8_lossy();

    if decoded.split('/').any(|segment| segment == "..") {
        logger::log_warning(&format!("Path traversal attempt blocked: {raw_path}"));
        return Lookup::NotFound;
    }

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Site root '{}' not found or inaccessible: {e}",
                root.display()
            ));
            return Lookup::NotFound;
        }
    };

    let mut file_path = root_canonical.join(decoded.trim_start_matches('/'));

    if file_path.is_dir() {
        if !raw_path.ends_with('/') {
            // Rebuilt from a single leading slash: a doubled one would
            // read as a protocol-relative URL in Location.
            return Lookup::Redirect(format!("/{}/", raw_path.trim_start_matches('/')));
        }
        if let Some(index) = find_index_file(&file_path) {
            file_path = index;
        } else {
            return match file_path.canonicalize() {
                Ok(dir) if dir.starts_with(&root_canonical) => Lookup::Directory(dir),
                Ok(dir) => {
                    logger::log_warning(&format!(
                        "Path traversal attempt blocked: {raw_path} -> {}",
                        dir.display()
                    ));
                    Lookup::NotFound
                }
                Err(_) => Lookup::NotFound,
            };
        }
    }

    // Misses are common (404), not worth a warning
    let Ok(canonical) = file_path.canonicalize() else {
        return Lookup::NotFound;
    };
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return Lookup::NotFound;
    }

    if canonical.is_file() {
        Lookup::File(canonical)
    } else {
        Lookup::NotFound
    }
}

/// First index file present in `dir`, if any.
fn find_index_file(dir: &Path) -> Option<PathBuf> {
    INDEX_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}

fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match render_directory_listing(dir, ctx.path) {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_500_response()
        }
    }
}

/// Minimal HTML listing of `dir`, entries sorted by name with directories
/// carrying a trailing slash. Href values are percent-encoded; links stay
/// relative so they resolve under the listed path.
fn render_directory_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = escape_html(request_path);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Index of {title}</title></head>\n<body>\n<h1>Index of {title}</h1>\n<hr>\n<ul>\n"
    );
    for name in &names {
        let href = utf8_percent_encode(name, HREF_UNSAFE);
        let label = escape_html(name);
        html.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
