use serde::{Deserialize, Serialize};

/// Coarse media classification derived from a reference's file-extension-like
/// suffix.
///
/// Classification is deterministic and never fails: anything without a
/// recognizable suffix is [`MediaKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Raster or vector still image (jpg, jpeg, png, gif, webp, svg).
    Image,
    /// Video container (mp4, webm, mov, m4v, ogg).
    Video,
    /// PDF document.
    Pdf,
    /// 3D model (gltf, glb).
    Model,
    /// Unrecognized or absent suffix.
    Other,
}

impl MediaKind {
    /// Classify a reference string by its final `.suffix`, case-insensitively.
    pub fn from_source(source: &str) -> Self {
        match suffix_of(source).as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg") => Self::Image,
            Some("mp4" | "webm" | "mov" | "m4v" | "ogg") => Self::Video,
            Some("pdf") => Self::Pdf,
            Some("gltf" | "glb") => Self::Model,
            _ => Self::Other,
        }
    }

    /// True for [`MediaKind::Video`].
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }

    /// Stable lowercase tag, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Model => "model",
            Self::Other => "other",
        }
    }
}

/// True when the reference's suffix names a video container.
pub fn is_video(source: &str) -> bool {
    MediaKind::from_source(source).is_video()
}

/// The lowercased text after the last dot, if it looks like a file suffix.
/// A dot inside a directory component does not count.
fn suffix_of(source: &str) -> Option<String> {
    let (_, suffix) = source.rsplit_once('.')?;
    if suffix.is_empty() || suffix.contains('/') || suffix.contains('\\') {
        return None;
    }
    Some(suffix.to_ascii_lowercase())
}
