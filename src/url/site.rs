use crate::UrlError;
use std::path::PathBuf;
use url::Url;

/// The seed URL and its derived local directory name, fixed for one crawl run
#[derive(Debug, Clone)]
pub struct SiteRoot {
    /// Normalized seed URL (explicit scheme, no trailing slash on the input)
    base: Url,

    /// Sanitized domain used as the local directory name
    dir_name: String,
}

impl SiteRoot {
    /// Builds a site root from a raw seed string
    ///
    /// The seed is accepted bare (`example.com/docs`) or scheme-qualified;
    /// a bare seed gets `https://` prepended and one trailing slash is
    /// stripped before parsing.
    ///
    /// # Arguments
    ///
    /// * `seed` - The raw seed URL string
    ///
    /// # Returns
    ///
    /// * `Ok(SiteRoot)` - Parsed and sanitized site root
    /// * `Err(UrlError)` - The seed is not a usable HTTP(S) URL
    pub fn from_seed(seed: &str) -> Result<Self, UrlError> {
        let normalized = normalize_seed(seed);

        let base = Url::parse(&normalized).map_err(|e| UrlError::Parse(e.to_string()))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UrlError::InvalidScheme(base.scheme().to_string()));
        }

        let dir_name = sanitize_dir_name(&base)?;

        Ok(Self { base, dir_name })
    }

    /// The normalized seed URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The sanitized domain directory name (dots replaced, `www.` stripped)
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Resolves an extracted reference to an absolute URL and a local path
    ///
    /// Absolute references are used as-is; relative references are coerced to
    /// root-relative and joined against the site base URL. The local path is
    /// the URL's path component (for absolute references) or the
    /// slash-stripped reference itself (for relative ones), joined under the
    /// site directory, with any trailing slash removed.
    pub fn resolve(&self, reference: &str) -> Result<ResolvedReference, UrlError> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let url = Url::parse(reference).map_err(|e| UrlError::Parse(e.to_string()))?;
            let local_path = self.local_path_for(url.path());
            Ok(ResolvedReference { url, local_path })
        } else {
            let root_relative = if reference.starts_with('/') {
                reference.to_string()
            } else {
                format!("/{}", reference)
            };
            let url = self
                .base
                .join(&root_relative)
                .map_err(|e| UrlError::Parse(e.to_string()))?;
            let local_path = self.local_path_for(reference);
            Ok(ResolvedReference { url, local_path })
        }
    }

    /// Joins a URL path or reference under the site directory
    fn local_path_for(&self, path: &str) -> PathBuf {
        let trimmed = path.trim_start_matches('/').trim_end_matches('/');
        let mut local = PathBuf::from(&self.dir_name);
        if !trimmed.is_empty() {
            local.push(trimmed);
        }
        local
    }
}

/// A reference resolved against a site root
#[derive(Debug, Clone)]
pub struct ResolvedReference {
    /// Absolute URL to fetch
    pub url: Url,

    /// Local storage path under the site directory
    pub local_path: PathBuf,
}

/// Normalizes a raw seed string: default the scheme and strip one trailing slash
fn normalize_seed(seed: &str) -> String {
    let mut seed = seed.trim().to_string();

    if !seed.starts_with("http://") && !seed.starts_with("https://") {
        seed = format!("https://{}", seed);
    }

    if seed.ends_with('/') {
        seed.pop();
    }

    seed
}

/// Derives the local directory name from the seed's host
///
/// `www.` is stripped, dots become underscores, and a port (mock servers in
/// tests run on one) is appended with an underscore.
fn sanitize_dir_name(url: &Url) -> Result<String, UrlError> {
    let host = url.host_str().ok_or(UrlError::MissingHost)?;

    let mut name = host.strip_prefix("www.").unwrap_or(host).replace('.', "_");

    if let Some(port) = url.port() {
        name.push('_');
        name.push_str(&port.to_string());
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_bare_domain_gets_https() {
        let root = SiteRoot::from_seed("example.com").unwrap();
        assert_eq!(root.base().as_str(), "https://example.com/");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let root = SiteRoot::from_seed("https://example.com/docs/").unwrap();
        assert_eq!(root.base().path(), "/docs");
    }

    #[test]
    fn test_dir_name_strips_www_and_dots() {
        let root = SiteRoot::from_seed("https://www.example.com").unwrap();
        assert_eq!(root.dir_name(), "example_com");
    }

    #[test]
    fn test_dir_name_includes_port() {
        let root = SiteRoot::from_seed("http://127.0.0.1:8080").unwrap();
        assert_eq!(root.dir_name(), "127_0_0_1_8080");
    }

    #[test]
    fn test_rejects_non_http_seed() {
        // Scheme defaulting prepends https:// to anything not already
        // http(s), so an ftp seed fails to parse rather than to validate
        let result = SiteRoot::from_seed("ftp://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_reference() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let resolved = root.resolve("css/site.css").unwrap();

        assert_eq!(resolved.url.as_str(), "https://example.com/css/site.css");
        assert_eq!(resolved.local_path, Path::new("example_com/css/site.css"));
    }

    #[test]
    fn test_resolve_root_relative_reference() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let resolved = root.resolve("/js/app.js").unwrap();

        assert_eq!(resolved.url.as_str(), "https://example.com/js/app.js");
        assert_eq!(resolved.local_path, Path::new("example_com/js/app.js"));
    }

    #[test]
    fn test_resolve_absolute_reference_uses_url_path() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let resolved = root.resolve("https://example.com/img/logo.png").unwrap();

        assert_eq!(resolved.url.as_str(), "https://example.com/img/logo.png");
        assert_eq!(resolved.local_path, Path::new("example_com/img/logo.png"));
    }

    #[test]
    fn test_resolve_strips_trailing_slash_from_local_path() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let resolved = root.resolve("blog/").unwrap();

        assert_eq!(resolved.local_path, Path::new("example_com/blog"));
    }

    #[test]
    fn test_two_urls_same_local_path() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let a = root.resolve("img/logo.png").unwrap();
        let b = root.resolve("https://example.com/img/logo.png").unwrap();

        assert_eq!(a.local_path, b.local_path);
    }

    #[test]
    fn test_resolve_malformed_absolute_reference() {
        let root = SiteRoot::from_seed("https://example.com").unwrap();
        let result = root.resolve("https://");
        assert!(result.is_err());
    }
}
