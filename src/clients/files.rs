//! WebDAV-style file-sync client (HTTP basic auth).

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Method;

use super::http::{build_client, join_url, validate_status};
use super::FileStore;
use crate::config::FileStoreConfig;

/// Path prefix of the WebDAV endpoint on the file-sync server.
const WEBDAV_PREFIX: &str = "remote.php/webdav";

pub struct HttpFileStore {
    client: Client,
    config: FileStoreConfig,
}

impl HttpFileStore {
    pub fn new(config: FileStoreConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    fn dav_url(&self, path: &str) -> String {
        join_url(
            &self.config.url,
            &format!("{WEBDAV_PREFIX}/{}", path.trim_start_matches('/')),
        )
    }
}

impl FileStore for HttpFileStore {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.dav_url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .with_context(|| format!("Failed to download file: {path}"))?;
        validate_status(&response, path)?;
        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read file body: {path}"))?;
        Ok(bytes.to_vec())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        let response = self
            .client
            .head(self.dav_url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .with_context(|| format!("Failed to probe file: {path}"))?;

        if response.status().as_u16() == 404 {
            return Ok(false);
        }
        validate_status(&response, path)?;
        Ok(true)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        let propfind = Method::from_bytes(b"PROPFIND").context("PROPFIND method")?;
        let response = self
            .client
            .request(propfind, self.dav_url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Depth", "1")
            .send()
            .with_context(|| format!("Failed to list directory: {path}"))?;
        validate_status(&response, path)?;

        let body = response
            .text()
            .with_context(|| format!("Failed to read listing body: {path}"))?;
        Ok(parse_propfind_entries(&body, path))
    }
}

/// Pull entry names out of a PROPFIND multistatus body.
///
/// The listing is only used for name-level assertions ("a report per
/// employee exists"), so hrefs are scanned textually rather than parsed as
/// XML. The first href in a Depth-1 response is the directory itself and is
/// skipped.
fn parse_propfind_entries(body: &str, _dir: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut seen_self = false;
    let mut rest = body;

    while let Some(start) = rest.find(":href>") {
        rest = &rest[start + ":href>".len()..];
        let Some(end) = rest.find("</") else { break };
        let href = rest[..end].trim_matches('/');
        rest = &rest[end..];

        if !seen_self {
            seen_self = true;
            continue;
        }

        let name = percent_decode(href.rsplit('/').next().unwrap_or(href));
        if !name.is_empty() && !entries.contains(&name) {
            entries.push(name);
        }
    }
    entries
}

/// Minimal percent-decoding for the characters that show up in office file
/// names. Decoding works on raw bytes so multi-byte escapes like `%C3%A9`
/// come out as one character; anything undecodable is kept verbatim.
fn percent_decode(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
