/*!
 * Exclusion rules for files and directories
 */

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;

/// Name of the directory exports and logs are written to
pub const OUTPUT_DIR_NAME: &str = ".codestract";

/// Extensions (lowercase, without the dot) whose files are never exported
pub const EXCLUDED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "svg", "pyc"];

/// Directory names the traversal never descends into
pub static SKIPPED_DIRECTORIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Version control
        ".git",
        // Virtual environments
        ".env",
        ".venv",
        "venv",
        // IDE metadata
        ".idea",
        // Our own output
        OUTPUT_DIR_NAME,
        // Bytecode caches
        "__pycache__",
    ])
});

/// Whether a file must be skipped, either because its name is listed in
/// `excluded_names` or because its extension is blocklisted.
pub fn is_excluded(file_name: &str, excluded_names: &HashSet<String>) -> bool {
    excluded_names.contains(file_name) || has_excluded_extension(file_name)
}

/// Case-insensitive check against [`EXCLUDED_EXTENSIONS`]
pub fn has_excluded_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| EXCLUDED_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the traversal should enter a directory with this name
pub fn should_descend(dir_name: &str) -> bool {
    !SKIPPED_DIRECTORIES.contains(dir_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_excluded_by_name() {
        let excluded = names(&["secret.txt"]);
        assert!(is_excluded("secret.txt", &excluded));
        assert!(!is_excluded("notes.md", &excluded));
        // Exact match only
        assert!(!is_excluded("my_secret.txt", &excluded));
        assert!(!is_excluded("SECRET.txt", &excluded));
    }

    #[test]
    fn test_excluded_by_extension_ignores_case() {
        let excluded = HashSet::new();
        for name in ["logo.png", "photo.JPG", "a.Jpeg", "anim.gif", "x.bmp", "icon.SVG", "m.pyc"] {
            assert!(is_excluded(name, &excluded), "{name} should be excluded");
        }
        for name in ["main.rs", "png", ".png", "image.png.txt", "README"] {
            assert!(!is_excluded(name, &excluded), "{name} should be admitted");
        }
    }

    #[test]
    fn test_should_descend() {
        for dir in [".git", ".env", ".venv", "venv", ".idea", ".codestract", "__pycache__"] {
            assert!(!should_descend(dir), "{dir} should be pruned");
        }
        for dir in ["src", "git", "env", ".github", "Venv"] {
            assert!(should_descend(dir), "{dir} should be visited");
        }
    }
}
