//! Saving exported images to disk.

use super::types::{ExportError, ExportedImage, SavedImage};
use crate::config::ExportConfig;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Upper bound on `_N` suffixes tried before giving up on a unique name.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save images to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Scribepad"),
            filename_template: "sample_%Y-%m-%d_%H%M%S%.3f".to_string(),
        }
    }
}

impl From<&ExportConfig> for FileSaveConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
        }
    }
}

/// Returns whether every specifier in `template` is one chrono understands.
pub fn is_valid_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Generate a PNG filename based on the template and current time.
///
/// An optional label is appended after the timestamp, sanitized so it can
/// never escape the target directory.
///
/// # Errors
/// Returns [`ExportError::InvalidTemplate`] if the template contains a
/// specifier chrono cannot format.
pub fn generate_filename(template: &str, label: Option<&str>) -> Result<String, ExportError> {
    let mut stamp = String::new();
    write!(stamp, "{}", Local::now().format(template))
        .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    Ok(match label.map(sanitize_label).filter(|l| !l.is_empty()) {
        Some(label) => format!("{stamp}_{label}.png"),
        None => format!("{stamp}.png"),
    })
}

/// Replaces path separators and control characters in a label.
///
/// Labels are unconstrained strings (any length, any script); only characters
/// that are unsafe in a filename are substituted.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save an exported image into the configured directory.
///
/// # Returns
/// Where the file landed and how large it is
pub fn save_image(
    image: &ExportedImage,
    label: Option<&str>,
    config: &FileSaveConfig,
) -> Result<SavedImage, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let file_name = generate_filename(&config.filename_template, label)?;
    let file_path = write_new_png(&directory, &file_name, &image.png)?;
    let size_bytes = fs::metadata(&file_path)?.len();
    Ok(SavedImage {
        path: file_path,
        size_bytes,
    })
}

/// Write PNG bytes to an explicit path.
pub fn write_png(path: &Path, png: &[u8]) -> Result<(), ExportError> {
    log::info!("Saving image to: {} ({} bytes)", path.display(), png.len());

    fs::write(path, png)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    log::debug!("Image saved: {}", path.display());
    Ok(())
}

/// Write PNG bytes under `directory` without replacing any existing file.
///
/// `file_name` is tried first, then `<stem>_1.png`, `<stem>_2.png`, ... until
/// a name is free.
///
/// # Returns
/// The path that was actually written
pub fn write_new_png(directory: &Path, file_name: &str, png: &[u8]) -> Result<PathBuf, ExportError> {
    let stem = file_name.strip_suffix(".png").unwrap_or(file_name);

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = if attempt == 0 {
            file_name.to_string()
        } else {
            format!("{stem}_{attempt}.png")
        };
        let path = directory.join(candidate);
        match create_new(&path) {
            Ok(mut file) => {
                log::info!("Saving image to: {} ({} bytes)", path.display(), png.len());
                file.write_all(png)?;
                return Ok(path);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{} exists, trying next suffix", path.display());
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "no free name for {} in {}",
            file_name,
            directory.display()
        ),
    )
    .into())
}

fn create_new(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("test_%Y%m%d", None).unwrap();
        assert!(filename.starts_with("test_"));
        assert!(filename.ends_with(".png"));
        assert!(filename.contains("20"));
    }

    #[test]
    fn test_generate_filename_with_label() {
        let filename = generate_filename("s", Some("a/b")).unwrap();
        assert_eq!(filename, "s_a_b.png");
    }

    #[test]
    fn test_invalid_template_is_an_error() {
        assert!(!is_valid_template("sample_%Q"));
        assert!(is_valid_template("sample_%Y-%m-%d_%H%M%S%.3f"));
        let err = generate_filename("sample_%Q", Some("a")).unwrap_err();
        assert!(matches!(err, ExportError::InvalidTemplate(t) if t == "sample_%Q"));
    }

    #[test]
    fn test_save_image_rejects_invalid_template() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().to_path_buf(),
            filename_template: "bad_%Q".to_string(),
        };
        let image = ExportedImage {
            width: 1,
            height: 1,
            png: vec![1],
        };
        assert!(matches!(
            save_image(&image, None, &config),
            Err(ExportError::InvalidTemplate(_))
        ));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_new_png_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let first = write_new_png(temp.path(), "same.png", b"one").unwrap();
        let second = write_new_png(temp.path(), "same.png", b"two").unwrap();
        let third = write_new_png(temp.path(), "same.png", b"three").unwrap();

        assert!(first.ends_with("same.png"));
        assert!(second.ends_with("same_1.png"));
        assert!(third.ends_with("same_2.png"));
        assert_eq!(fs::read(first).unwrap(), b"one");
        assert_eq!(fs::read(second).unwrap(), b"two");
        assert_eq!(fs::read(third).unwrap(), b"three");
    }

    #[test]
    fn test_sanitize_label_keeps_unicode() {
        assert_eq!(sanitize_label("ä"), "ä");
        assert_eq!(sanitize_label("../x"), "_x");
        assert_eq!(sanitize_label("ab\ncd"), "ab_cd");
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_default_config() {
        let config = FileSaveConfig::default();
        assert!(config.save_directory.to_string_lossy().contains("Scribepad"));
    }

    #[test]
    fn test_save_image_creates_directory() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().join("nested"),
            filename_template: "x".to_string(),
        };
        let image = ExportedImage {
            width: 1,
            height: 1,
            png: vec![1, 2, 3],
        };

        let saved = save_image(&image, Some("k"), &config).unwrap();
        assert!(saved.path.ends_with("x_k.png"));
        assert_eq!(saved.size_bytes, 3);
        assert_eq!(fs::read(&saved.path).unwrap(), vec![1, 2, 3]);
    }
}
