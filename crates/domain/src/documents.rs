//! Document path resolution
//!
//! Uploaded documents come back from the backend as server-relative paths,
//! sometimes with Windows separators. Before a path is rendered as a link it
//! is normalised and resolved against the configured API base URL.

use url::Url;

use crate::errors::{CrmError, Result};

/// Resolve a server-relative document path against the API base URL.
///
/// Backslashes are normalised to forward slashes and a leading slash is
/// tolerated, so `uploads\\docs\\req.pdf` and `/uploads/docs/req.pdf` both
/// resolve to `<base>/uploads/docs/req.pdf`.
///
/// # Errors
/// Returns `CrmError::Config` when the base URL itself does not parse, and
/// `CrmError::InvalidInput` when the joined path is not a valid URL.
pub fn resolve_document_url(base_url: &str, path: &str) -> Result<String> {
    let normalized = path.replace('\\', "/");
    let relative = normalized.trim_start_matches('/');

    // A trailing slash on the base keeps the last path segment intact on join
    let mut base = base_url.trim_end_matches('/').to_string();
    base.push('/');

    let base = Url::parse(&base)
        .map_err(|e| CrmError::Config(format!("Invalid API base URL {}: {}", base_url, e)))?;
    let joined = base
        .join(relative)
        .map_err(|e| CrmError::InvalidInput(format!("Invalid document path {}: {}", path, e)))?;

    Ok(joined.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_path() {
        let url = resolve_document_url("https://crm.example.com", "uploads/req.pdf").unwrap();
        assert_eq!(url, "https://crm.example.com/uploads/req.pdf");
    }

    #[test]
    fn normalizes_windows_separators() {
        let url =
            resolve_document_url("https://crm.example.com/", "uploads\\docs\\req.pdf").unwrap();
        assert_eq!(url, "https://crm.example.com/uploads/docs/req.pdf");
    }

    #[test]
    fn tolerates_leading_slash() {
        let url = resolve_document_url("https://crm.example.com", "/uploads/req.pdf").unwrap();
        assert_eq!(url, "https://crm.example.com/uploads/req.pdf");
    }

    #[test]
    fn rejects_invalid_base() {
        let err = resolve_document_url("not a url", "uploads/req.pdf").unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));
    }
}
