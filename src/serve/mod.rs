//! Documentation server with optional per-request live reload.

mod render;
mod response;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Request, Server};

use crate::config::Config;
use crate::content::{self, Record, RouteKey};
use crate::{debug, log};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind the HTTP server and run the request loop (blocking).
pub fn serve(config: Arc<Config>) -> Result<()> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    log!("serve"; "http://{}", addr);
    if config.serve.live_reload {
        debug!("serve"; "live reload: re-parsing content before each request");
    }
    run_request_loop(server, config);
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

fn run_request_loop(server: Server, config: Arc<Config>) {
    // Thread pool so a slow live-reload cycle cannot block every request
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &Config) -> Result<()> {
    // Live-reload mode reruns the full parse cycle first. A failed cycle
    // never touches the published model, so the prior content keeps
    // serving while the author fixes the file.
    if config.serve.live_reload
        && let Err(e) = content::reload(config)
    {
        log!("error"; "{e}");
    }

    // Static asset directories bypass route resolution entirely
    if let Some(path) = resolve_static(request.url(), config) {
        return response::respond_file(request, &path);
    }

    let model = content::model();
    let route = RouteKey::from_browser(request.url());

    if let Some(record) = model.resolve(route.as_str()) {
        // Redirect unclean URLs to their canonical route
        if decoded_path(request.url()) != route.as_str() {
            return response::respond_redirect(request, 301, route.as_str());
        }
        let html = match record {
            Record::Page(page) => render::render_page(page, &model),
            Record::Module(module) => render::render_module(module),
        };
        return response::respond_html(request, 200, html);
    }

    if route != "/" {
        debug!("serve"; "not found: {}", route);
        if let Some(Record::Page(page)) = model.resolve("/404") {
            return response::respond_html(request, 404, render::render_page(page, &model));
        }
        return response::respond_redirect(request, 303, "/");
    }

    response::respond_text(request, 200, "doctree: no content at /")
}

/// Decoded request path, query string and fragment stripped.
fn decoded_path(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let path = url.split(['?', '#']).next().unwrap_or(url);
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Resolve a static asset URL to a file under the content root.
///
/// Only configured asset directories are eligible; the resolved path is
/// canonicalized and checked to still live under the content root, which
/// rejects traversal via `..` or symlinks.
fn resolve_static(url: &str, config: &Config) -> Option<PathBuf> {
    let decoded = decoded_path(url);
    let relative = decoded.trim_start_matches('/');

    let eligible = config
        .content
        .static_dirs
        .iter()
        .any(|dir| relative.starts_with(&format!("{dir}/")));
    if !eligible || relative.contains("..") {
        return None;
    }

    let root = config.content_root();
    let local = root.join(relative);

    let canonical = local.canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}
