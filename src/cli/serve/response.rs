//! HTTP response handlers.

use super::listing::render_listing;
use crate::utils::mime::{self, types};
use anyhow::{Result, anyhow};
use std::{fs, io, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Local development: browsers always refetch textures and scripts.
const CACHE_CONTROL: &str = "no-store";

/// Respond with a static file.
///
/// Any error opening the file is reported as 404.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(_) => return respond_not_found(request),
    };
    let length = file.metadata()?.len();

    if is_head_request(&request) {
        return send_head(request, 200, content_type, length);
    }

    let response = Response::from_file(file)
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", CACHE_CONTROL)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with a generated directory listing.
pub fn respond_listing(request: Request, dir: &Path, url_path: &str) -> Result<()> {
    match render_listing(dir, url_path) {
        Ok(body) => send_body(request, 200, types::HTML, body.into_bytes()),
        Err(_) => send_body(
            request,
            404,
            types::PLAIN,
            b"404 No permission to list directory".to_vec(),
        ),
    }
}

/// Respond with 301 to the slash-terminated directory URL.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(301))
        .with_header(header("Location", location)?)
        .with_header(header("Cache-Control", CACHE_CONTROL)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 501 for methods other than GET and HEAD.
pub fn respond_not_implemented(request: Request) -> Result<()> {
    let body = format!("501 Unsupported method ({})", request.method());
    send_body(request, 501, types::PLAIN, body.into_bytes())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

/// Headers of a GET response with no body.
fn send_head(request: Request, status: u16, content_type: &str, length: u64) -> Result<()> {
    let response = Response::new(
        StatusCode(status),
        vec![
            header("Content-Type", content_type)?,
            header("Cache-Control", CACHE_CONTROL)?,
        ],
        io::empty(),
        usize::try_from(length).ok(),
        None,
    );
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type, body.len() as u64);
    }

    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", CACHE_CONTROL)?);
    request.respond(response)?;
    Ok(())
}

fn header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header {key}: {value}"))
}
