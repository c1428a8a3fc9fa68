//! HTTP response helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tiny_http::{Header, Request, Response};

/// Respond with a static file from the content tree.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime_for(path);
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send(request, 200, content_type, body)
}

/// Respond with a rendered HTML body.
pub fn respond_html(request: Request, status: u16, html: String) -> Result<()> {
    send(request, status, "text/html; charset=utf-8", html.into_bytes())
}

/// Respond with a plain-text body.
pub fn respond_text(request: Request, status: u16, text: &str) -> Result<()> {
    send(
        request,
        status,
        "text/plain; charset=utf-8",
        text.as_bytes().to_vec(),
    )
}

/// Respond with a redirect to `location`.
pub fn respond_redirect(request: Request, status: u16, location: &str) -> Result<()> {
    let response = Response::empty(status).with_header(
        Header::from_bytes("Location", location.as_bytes())
            .map_err(|_| anyhow::anyhow!("invalid redirect location: {location}"))?,
    );
    request.respond(response)?;
    Ok(())
}

fn send(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", content_type.as_bytes())
                .map_err(|_| anyhow::anyhow!("invalid content type: {content_type}"))?,
        );
    request.respond(response)?;
    Ok(())
}

/// MIME type from file extension, for the static asset path.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_for_common_types() {
        assert_eq!(mime_for(&PathBuf::from("site.css")), "text/css; charset=utf-8");
        assert_eq!(mime_for(&PathBuf::from("logo.PNG")), "image/png");
        assert_eq!(mime_for(&PathBuf::from("unknown.bin")), "application/octet-stream");
    }
}
