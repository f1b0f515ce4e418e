use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use log::{debug, error, info, warn};

use crate::errors::WikiError;

const ENTRY_EXTENSION: &str = "md";

/// File-name limit shared by common file systems
const MAX_FILE_NAME_BYTES: usize = 255;

/// Title-keyed storage of raw Markdown entries
pub trait EntryStore: Send + Sync {
    /// All titles, in the order the store keeps them
    fn list_entries(&self) -> Result<Vec<String>, WikiError>;

    /// Raw content of `title`, `None` when there is no such entry
    fn get_entry(&self, title: &str) -> Result<Option<String>, WikiError>;

    /// Create or overwrite `title`
    fn save_entry(&self, title: &str, content: &str) -> Result<(), WikiError>;

    /// Store `content` under `to` and drop the entry `from`
    fn move_entry(&self, from: &str, to: &str, content: &str) -> Result<(), WikiError>;

    fn last_modified(&self, _title: &str) -> Option<SystemTime> {
        None
    }
}

/// Check that `title` can name an entry file.
///
/// Returns the trimmed title. Rejects empty titles, path separators, leading
/// dots, control characters and titles too long for a file name, so a title
/// always maps to one file directly inside the entries directory.
pub fn validate_title(title: &str) -> Result<&str, WikiError> {
    let trimmed = title.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() + ENTRY_EXTENSION.len() + 1 <= MAX_FILE_NAME_BYTES
        && !trimmed.starts_with('.')
        && !trimmed.contains(['/', '\\'])
        && !trimmed.chars().any(char::is_control);

    if valid {
        Ok(trimmed)
    } else {
        Err(WikiError::InvalidTitle(title.to_string()))
    }
}

/// Entry store keeping one `<title>.md` file per entry in a directory
#[derive(Clone)]
pub struct FileEntryStore {
    base_dir: PathBuf,
}

impl FileEntryStore {
    /// Open the store at `base_dir`, creating the directory if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, WikiError> {
        let base_dir = base_dir.into();
        debug!("Opening entry store at {:?}", base_dir);

        if base_dir.exists() && !base_dir.is_dir() {
            warn!("Entry store path is not a directory: {:?}", base_dir);
            return Err(WikiError::InvalidPath);
        }
        fs::create_dir_all(&base_dir).map_err(|e| {
            error!("Failed to create entry directory {:?}: {}", base_dir, e);
            WikiError::Io(e)
        })?;

        Ok(Self { base_dir })
    }

    fn entry_path(&self, title: &str) -> Result<PathBuf, WikiError> {
        let title = validate_title(title)?;
        Ok(self.base_dir.join(format!("{title}.{ENTRY_EXTENSION}")))
    }
}

impl EntryStore for FileEntryStore {
    fn list_entries(&self) -> Result<Vec<String>, WikiError> {
        debug!("Listing entries in {:?}", self.base_dir);

        let dir = fs::read_dir(&self.base_dir).map_err(|e| {
            error!("Failed to read entry directory {:?}: {}", self.base_dir, e);
            WikiError::Io(e)
        })?;

        let mut titles = Vec::new();
        for entry in dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            let path = entry.path();
            let is_entry = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == ENTRY_EXTENSION)
                .unwrap_or(false);
            if !is_file || !is_entry {
                continue;
            }

            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(title) if validate_title(title).is_ok() => titles.push(title.to_string()),
                _ => debug!("Skipping file that does not name an entry: {:?}", path),
            }
        }

        titles.sort();
        info!("Listed {} entries", titles.len());
        Ok(titles)
    }

    fn get_entry(&self, title: &str) -> Result<Option<String>, WikiError> {
        let Ok(path) = self.entry_path(title) else {
            debug!("Lookup of invalid title '{}'", title);
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read entry '{}', {} bytes", title, content.len());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read entry {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    fn save_entry(&self, title: &str, content: &str) -> Result<(), WikiError> {
        let path = self.entry_path(title)?;
        let content = content.replace("\r\n", "\n");

        fs::write(&path, content.as_bytes()).map_err(|e| {
            error!("Failed to write entry {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved entry '{}', {} bytes", title.trim(), content.len());
        Ok(())
    }

    fn move_entry(&self, from: &str, to: &str, content: &str) -> Result<(), WikiError> {
        let source = self.entry_path(from)?;
        let target = self.entry_path(to)?;

        if !source.is_file() {
            warn!("Cannot move missing entry '{}'", from);
            return Err(WikiError::NotFound);
        }

        // Case-only changes may name the same file on case-insensitive file systems
        if from.trim().to_lowercase() == to.trim().to_lowercase() {
            fs::rename(&source, &target).map_err(|e| {
                error!("Failed to rename {:?} to {:?}: {}", source, target, e);
                WikiError::Io(e)
            })?;
            self.save_entry(to, content)?;
        } else {
            self.save_entry(to, content)?;
            fs::remove_file(&source).map_err(|e| {
                error!("Failed to remove moved entry {:?}: {}", source, e);
                WikiError::Io(e)
            })?;
        }

        info!("Moved entry '{}' to '{}'", from.trim(), to.trim());
        Ok(())
    }

    fn last_modified(&self, title: &str) -> Option<SystemTime> {
        let path = self.entry_path(title).ok()?;
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}
