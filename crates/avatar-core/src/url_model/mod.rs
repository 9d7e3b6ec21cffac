//! Image extension detection from the requested URL.
//!
//! The extension ends up in a storage path, so only a fixed set of values is
//! ever returned; anything else falls back to [`DEFAULT_EXTENSION`].

mod path;

pub use path::last_path_segment;

/// Extensions kept as-is (matched case-insensitively, returned lowercase).
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "svg", "gif"];

/// Extension used when the URL names no recognised image type.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Picks the stored file extension for an image fetched from `url`.
///
/// # Examples
///
/// - `image_extension("http://images.example.com/pic.PNG")` → `"png"`
/// - `image_extension("http://images.example.com/pic.webp")` → `"jpg"`
/// - `image_extension("http://images.example.com/")` → `"jpg"`
pub fn image_extension(url: &str) -> &'static str {
    let Some(segment) = last_path_segment(url) else {
        return DEFAULT_EXTENSION;
    };
    let Some((_, ext)) = segment.rsplit_once('.') else {
        return DEFAULT_EXTENSION;
    };
    IMAGE_EXTENSIONS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(ext))
        .unwrap_or(DEFAULT_EXTENSION)
}
