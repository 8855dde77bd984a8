use std::path::Path;

use crate::raster::ImageRGBA;

/// True iff the file decodes cleanly and is specifically a PNG.
///
/// Every open/decode failure maps to `false`; nothing propagates. A decodable
/// file in another format (say JPEG renamed to `.png`) also fails.
pub fn is_valid_png(path: &Path) -> bool {
    let Ok(reader) = image::ImageReader::open(path) else {
        return false;
    };
    let Ok(reader) = reader.with_guessed_format() else {
        return false;
    };
    if reader.format() != Some(image::ImageFormat::Png) {
        return false;
    }
    reader.decode().is_ok()
}

/// Case-sensitive match against `<prefix>*.png`. The wildcard core may be empty.
pub fn is_valid_name(filename: &str, prefix: &str) -> bool {
    filename
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some()
}

/// Strip the prefix and `.png` extension, yielding the submission's identity.
///
/// Returns `None` when either is absent rather than silently falling back to
/// the full stem.
pub fn submission_name(filename: &str, prefix: &str) -> Option<String> {
    filename
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".png"))
        .map(str::to_string)
}

pub fn dimensions_match(a: &ImageRGBA, b: &ImageRGBA) -> bool {
    a.dimensions() == b.dimensions()
}
