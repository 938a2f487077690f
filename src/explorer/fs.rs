use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the file backend. Propagated to the dialog/menu
/// trigger for reporting; the core never retries.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("no such path: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A file or directory creation request.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub is_dir: bool,
    /// Workspace-relative path of the new entry
    pub path: String,
    /// Initial contents; ignored for directories
    pub contents: Vec<u8>,
}

/// A rename request; both paths are workspace-relative.
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub path: String,
    pub new_path: String,
}

/// Asynchronous file operations against the workspace.
///
/// Callers run on the host UI thread; no `Send` bound on the futures.
#[allow(async_fn_in_trait)]
pub trait FileService {
    /// List a directory by workspace-relative path.
    async fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FileError>;

    /// Create a file or directory.
    async fn write_file(&self, request: WriteRequest) -> Result<(), FileError>;

    /// Rename a file or directory.
    async fn rename_file(&self, request: RenameRequest) -> Result<(), FileError>;
}

/// A [`FileService`] over a local workspace directory.
#[derive(Debug, Clone)]
pub struct LocalFileService {
    root: PathBuf,
}

impl LocalFileService {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in relative.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }
}

impl FileService for LocalFileService {
    async fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FileError> {
        let dir = self.resolve(path);
        if !dir.exists() {
            return Err(FileError::NotFound(path.to_string()));
        }

        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(DirEntry { name, is_dir });
        }

        // Directories first, then case-insensitive by name.
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(entries)
    }

    async fn write_file(&self, request: WriteRequest) -> Result<(), FileError> {
        let path = self.resolve(&request.path);
        if request.is_dir {
            tokio::fs::create_dir_all(&path).await?;
        } else {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &request.contents).await?;
        }
        Ok(())
    }

    async fn rename_file(&self, request: RenameRequest) -> Result<(), FileError> {
        let from = self.resolve(&request.path);
        if !from.exists() {
            return Err(FileError::NotFound(request.path.clone()));
        }
        let to = self.resolve(&request.new_path);
        tokio::fs::rename(&from, &to).await?;
        Ok(())
    }
}
