//! Branding image resolution.
//!
//! Images are referenced by path in CDN-free mode and inlined as base64 data
//! URIs when `embed_assets` is on, so the report opens from `file://` with no
//! companion files.

use crate::config::{Branding, ReportLimits};
use crate::error::{ReportError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::{debug, warn};

/// Resolved `src` values for the branding images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandAssets {
    /// Logo image source.
    pub logo: Option<String>,
    /// Signature image source.
    pub signature: Option<String>,
    /// Footer image source.
    pub footer: Option<String>,
}

impl BrandAssets {
    /// Resolve image sources from branding paths.
    ///
    /// Missing files are skipped with a warning. When embedding, the combined
    /// size of inlined images must stay under `limits.embed_size_limit_mb`.
    pub fn resolve(branding: &Branding, limits: &ReportLimits, embed: bool) -> Result<Self> {
        let mut total_bytes: u64 = 0;
        let mut load = |path: Option<&Path>| -> Result<Option<String>> {
            let Some(path) = path else {
                return Ok(None);
            };
            if !path.exists() {
                warn!(path = %path.display(), "Branding image not found; skipping");
                return Ok(None);
            }
            if !embed {
                return Ok(Some(path.display().to_string()));
            }

            let bytes = std::fs::read(path)?;
            total_bytes += bytes.len() as u64;
            debug!(path = %path.display(), bytes = bytes.len(), "Embedding image");
            Ok(Some(data_uri(path, &bytes)))
        };

        let assets = Self {
            logo: load(branding.logo_path.as_deref())?,
            signature: load(branding.signature_path.as_deref())?,
            footer: load(branding.footer_path.as_deref())?,
        };

        let limit_bytes = limits.embed_size_limit_mb.saturating_mul(1024 * 1024);
        if total_bytes > limit_bytes {
            return Err(ReportError::AssetSizeLimitExceeded {
                size_mb: total_bytes as f64 / (1024.0 * 1024.0),
                limit_mb: limits.embed_size_limit_mb,
            });
        }

        Ok(assets)
    }
}

/// MIME type from the file extension.
fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn data_uri(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes))
}
