//! Resolution of raw media references into site-rooted public paths.
//!
//! References fall into three shapes: full URLs (kept as-is), site-absolute
//! paths (kept as-is), and bare filenames (routed into a base directory by
//! suffix class). All functions are total over `&str`.

const BASE_IMAGES: &str = "/images";
const BASE_VIDEOS: &str = "/videos";
const BASE_DOCUMENTS: &str = "/documents";
const BASE_ASSETS: &str = "/assets";

const VIDEO_PLACEHOLDER: &str = "/images/video-placeholder.png";

/// Resolve a reference to a site-rooted path. URLs and absolute paths pass
/// through; anything else gains a leading `/`.
pub fn resolve_media_path(source: &str) -> String {
    if source.starts_with("http://") || source.starts_with("https://") || source.starts_with('/') {
        return source.to_owned();
    }
    format!("/{source}")
}

/// Route a bare filename into its public base directory by suffix class.
///
/// URLs and already-rooted paths pass through unchanged, as does empty
/// input. Unrecognized suffixes land under `/assets`.
pub fn public_media_url(source: &str) -> String {
    if source.is_empty() || source.starts_with("http") || source.starts_with('/') {
        return source.to_owned();
    }
    let base = if has_suffix_in(source, &["mp4", "webm", "mov", "avi"]) {
        BASE_VIDEOS
    } else if has_suffix_in(source, &["jpg", "jpeg", "png", "gif", "svg", "webp"]) {
        BASE_IMAGES
    } else if has_suffix_in(source, &["pdf", "doc", "docx", "ppt", "pptx"]) {
        BASE_DOCUMENTS
    } else {
        BASE_ASSETS
    };
    format!("{base}/{source}")
}

/// Normalize a build-tree path into a public one: a leading `src/` becomes
/// `/`, and non-URL references are rooted with `/`.
pub fn normalize_asset_path(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("src/") {
        return format!("/{rest}");
    }
    if source.starts_with('/') || source.starts_with("http") {
        return source.to_owned();
    }
    format!("/{source}")
}

/// Derive a poster-frame path for a video reference by swapping its suffix
/// for `.jpg`. Non-video input yields a placeholder image.
pub fn video_thumbnail(source: &str) -> String {
    for suffix in ["mp4", "webm", "ogg", "mov"] {
        if let Some(stem) = strip_suffix_ci(source, suffix) {
            return format!("{stem}jpg");
        }
    }
    VIDEO_PLACEHOLDER.to_owned()
}

fn has_suffix_in(source: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| strip_suffix_ci(source, s).is_some())
}

/// Strips a case-insensitive `.suffix` from the end, returning the stem
/// including its trailing dot.
fn strip_suffix_ci<'a>(source: &'a str, suffix: &str) -> Option<&'a str> {
    let tail_len = suffix.len() + 1;
    if source.len() <= tail_len {
        return None;
    }
    let split = source.len() - tail_len;
    if !source.is_char_boundary(split) {
        return None;
    }
    let rest = source[split..].strip_prefix('.')?;
    rest.eq_ignore_ascii_case(suffix).then_some(&source[..=split])
}
