//! Source image path resolution.
//!
//! Joins the configured image directory with a request filename and fills
//! in the configured default extension when the filename has none. Pure
//! path math; whether the file exists is the pipeline's concern.

use std::path::{Path, PathBuf};

/// Resolve a request filename against the image directory.
///
/// A filename without an extension gets `default_ext` appended (with or
/// without its leading dot):
///
/// ```
/// use imgpress::resolve::resolve_source;
/// use std::path::{Path, PathBuf};
///
/// let path = resolve_source(Path::new("/images"), "photo", ".jpg");
/// assert_eq!(path, PathBuf::from("/images/photo.jpg"));
///
/// let path = resolve_source(Path::new("/images"), "photo.png", ".jpg");
/// assert_eq!(path, PathBuf::from("/images/photo.png"));
/// ```
pub fn resolve_source(dir: &Path, filename: &str, default_ext: &str) -> PathBuf {
    let mut path = dir.join(filename);
    if path.extension().is_none() {
        path.set_extension(default_ext.trim_start_matches('.'));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_default_extension() {
        let path = resolve_source(Path::new("/images"), "photo", ".jpg");
        assert_eq!(path, PathBuf::from("/images/photo.jpg"));
    }

    #[test]
    fn keeps_existing_extension() {
        let path = resolve_source(Path::new("/images"), "photo.png", ".jpg");
        assert_eq!(path, PathBuf::from("/images/photo.png"));
    }

    #[test]
    fn default_extension_without_dot_also_works() {
        let path = resolve_source(Path::new("/images"), "photo", "webp");
        assert_eq!(path, PathBuf::from("/images/photo.webp"));
    }

    #[test]
    fn relative_directory_is_preserved() {
        let path = resolve_source(Path::new("./images"), "photo", ".jpg");
        assert_eq!(path, PathBuf::from("./images/photo.jpg"));
    }

    #[test]
    fn nested_filename_resolves_under_dir() {
        let path = resolve_source(Path::new("/images"), "travel/photo", ".jpg");
        assert_eq!(path, PathBuf::from("/images/travel/photo.jpg"));
    }
}
