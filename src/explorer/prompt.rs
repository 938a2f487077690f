//! Create/rename prompts for explorer entries.
//!
//! Both flows share one validation policy: an ordered list of guards
//! evaluated top to bottom, the first applicable producing the verdict.
//! Sibling names are fetched lazily, once, when a guard first needs them.

use super::fs::{FileError, FileService, RenameRequest, WriteRequest};
use crate::utils::path;
use std::collections::HashSet;

/// Styling of the inline validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Invalid candidate; confirmation is blocked.
    Error,
    /// Highlighted notice (rename to the unchanged name).
    Primary,
    /// Plain preview of the outcome.
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn error(text: String) -> Self {
        Self {
            kind: MessageKind::Error,
            text,
        }
    }

    fn primary(text: String) -> Self {
        Self {
            kind: MessageKind::Primary,
            text,
        }
    }

    fn normal(text: String) -> Self {
        Self {
            kind: MessageKind::Normal,
            text,
        }
    }
}

/// Names already present in the target directory.
#[derive(Debug, Clone)]
pub enum SiblingNames {
    /// Not listed yet; fetched on first use.
    Unloaded,
    Loaded(HashSet<String>),
}

impl SiblingNames {
    pub fn loaded<I: IntoIterator<Item = String>>(names: I) -> Self {
        SiblingNames::Loaded(names.into_iter().collect())
    }

    /// From a node's `child_names` snapshot (`None` = not yet listed).
    pub fn from_children(names: Option<HashSet<String>>) -> Self {
        match names {
            Some(names) => SiblingNames::Loaded(names),
            None => SiblingNames::Unloaded,
        }
    }

    /// The loaded set, listing the directory once if necessary.
    async fn ensure<S: FileService>(
        &mut self,
        files: &S,
        directory: &str,
    ) -> Result<&HashSet<String>, FileError> {
        if let SiblingNames::Unloaded = self {
            let names = files
                .read_dir(directory)
                .await?
                .into_iter()
                .map(|entry| entry.name)
                .collect();
            *self = SiblingNames::Loaded(names);
        }
        match self {
            SiblingNames::Loaded(names) => Ok(names),
            SiblingNames::Unloaded => unreachable!(),
        }
    }
}

/// What the prompt does on confirmation.
#[derive(Debug, Clone)]
pub enum PromptKind {
    Create { is_folder: bool },
    Rename { old_name: String, is_folder: bool },
}

/// Result of confirming a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Invalid candidate: the dialog stays open, no request was issued.
    Rejected(Message),
    /// Rename to the unchanged name: accepted, no request issued.
    NoOp,
    /// The request was issued; refresh this directory's tree node.
    Applied { refresh: String },
}

/// A create or rename prompt over one directory.
#[derive(Debug, Clone)]
pub struct NamePrompt {
    kind: PromptKind,
    /// Workspace-relative path of the directory the name lives in.
    directory: String,
    siblings: SiblingNames,
}

impl NamePrompt {
    pub fn create(directory: &str, is_folder: bool, siblings: SiblingNames) -> Self {
        Self {
            kind: PromptKind::Create { is_folder },
            directory: directory.to_string(),
            siblings,
        }
    }

    pub fn rename(directory: &str, old_name: &str, is_folder: bool, siblings: SiblingNames) -> Self {
        Self {
            kind: PromptKind::Rename {
                old_name: old_name.to_string(),
                is_folder,
            },
            directory: directory.to_string(),
            siblings,
        }
    }

    /// Dialog title for this prompt.
    pub fn title(&self) -> &'static str {
        match &self.kind {
            PromptKind::Create { is_folder: false } => "New File",
            PromptKind::Create { is_folder: true } => "New Folder",
            PromptKind::Rename {
                is_folder: false, ..
            } => "Rename File",
            PromptKind::Rename { is_folder: true, .. } => "Rename Folder",
        }
    }

    /// Initial input value (the current name when renaming).
    pub fn initial_value(&self) -> &str {
        match &self.kind {
            PromptKind::Create { .. } => "",
            PromptKind::Rename { old_name, .. } => old_name,
        }
    }

    /// Validate a candidate name. Guards run top to bottom; the first
    /// applicable one decides.
    pub async fn check<S: FileService>(
        &mut self,
        value: &str,
        files: &S,
    ) -> Result<Message, FileError> {
        if value.is_empty() {
            return Ok(Message::error("A name is required".to_string()));
        }
        if !is_valid_name(value) {
            return Ok(Message::error(format!("`{value}` is not a valid name")));
        }
        if let PromptKind::Rename { old_name, .. } = &self.kind {
            if value == old_name {
                return Ok(Message::primary("The name is unchanged".to_string()));
            }
        }
        let names = self.siblings.ensure(files, &self.directory).await?;
        if names.contains(value) {
            return Ok(Message::error(format!(
                "`{}` already contains `{value}`",
                self.directory
            )));
        }
        Ok(match &self.kind {
            PromptKind::Create { .. } => Message::normal(format!(
                "Will be created as `{}`",
                path::join(&self.directory, value)
            )),
            PromptKind::Rename { old_name, .. } => {
                Message::normal(format!("`{old_name}` will be renamed to `{value}`"))
            }
        })
    }

    /// Confirm the prompt with a candidate name, issuing the matching file
    /// request when valid.
    pub async fn confirm<S: FileService>(
        &mut self,
        value: &str,
        files: &S,
    ) -> Result<Confirmation, FileError> {
        let message = self.check(value, files).await?;
        match message.kind {
            MessageKind::Error => Ok(Confirmation::Rejected(message)),
            MessageKind::Primary => Ok(Confirmation::NoOp),
            MessageKind::Normal => {
                match &self.kind {
                    PromptKind::Create { is_folder } => {
                        files
                            .write_file(WriteRequest {
                                is_dir: *is_folder,
                                path: path::join(&self.directory, value),
                                contents: Vec::new(),
                            })
                            .await?;
                    }
                    PromptKind::Rename { old_name, .. } => {
                        files
                            .rename_file(RenameRequest {
                                path: path::join(&self.directory, old_name),
                                new_path: path::join(&self.directory, value),
                            })
                            .await?;
                    }
                }
                Ok(Confirmation::Applied {
                    refresh: self.directory.clone(),
                })
            }
        }
    }
}

/// Whether `name` is usable as a file or directory name on the platforms
/// the workspace may be synced to.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return false;
    }
    if name
        .chars()
        .any(|c| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control())
    {
        return false;
    }
    // Windows reserved device names, with or without an extension.
    let stem = name.split('.').next().unwrap_or(name).to_ascii_uppercase();
    const RESERVED: [&str; 4] = ["CON", "PRN", "AUX", "NUL"];
    if RESERVED.contains(&stem.as_str()) {
        return false;
    }
    if let Some(digit) = stem.strip_prefix("COM").or_else(|| stem.strip_prefix("LPT")) {
        if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::super::fs::DirEntry;
    use super::*;
    use std::cell::RefCell;

    /// Scripted backend: a fixed listing plus recorded write/rename calls.
    #[derive(Default)]
    struct MockFiles {
        listing: Vec<DirEntry>,
        read_dir_calls: RefCell<usize>,
        writes: RefCell<Vec<WriteRequest>>,
        renames: RefCell<Vec<RenameRequest>>,
    }

    impl MockFiles {
        fn with_listing(names: &[&str]) -> Self {
            Self {
                listing: names
                    .iter()
                    .map(|name| DirEntry {
                        name: name.to_string(),
                        is_dir: false,
                    })
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl FileService for MockFiles {
        async fn read_dir(&self, _path: &str) -> Result<Vec<DirEntry>, FileError> {
            *self.read_dir_calls.borrow_mut() += 1;
            Ok(self.listing.clone())
        }

        async fn write_file(&self, request: WriteRequest) -> Result<(), FileError> {
            self.writes.borrow_mut().push(request);
            Ok(())
        }

        async fn rename_file(&self, request: RenameRequest) -> Result<(), FileError> {
            self.renames.borrow_mut().push(request);
            Ok(())
        }
    }

    fn loaded(names: &[&str]) -> SiblingNames {
        SiblingNames::loaded(names.iter().map(|s| s.to_string()))
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::create("data", false, loaded(&[]));
        let message = prompt.check("", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_invalid_name_is_rejected() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::create("data", false, loaded(&[]));
        let message = prompt.check("a/b.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("a/b.md"));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_rejected() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::create("data", false, loaded(&["a.md", "b.md"]));

        let message = prompt.check("a.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("already contains"));

        let message = prompt.check("c.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Normal);
        assert!(message.text.contains("data/c.md"));
    }

    #[tokio::test]
    async fn test_siblings_are_fetched_once() {
        let files = MockFiles::with_listing(&["a.md"]);
        let mut prompt = NamePrompt::create("data", false, SiblingNames::Unloaded);

        let message = prompt.check("a.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        let message = prompt.check("b.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Normal);
        assert_eq!(*files.read_dir_calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_confirm_create_issues_write_and_refresh() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::create("data/notes", true, loaded(&[]));

        let confirmation = prompt.confirm("drafts", &files).await.unwrap();
        assert_eq!(
            confirmation,
            Confirmation::Applied {
                refresh: "data/notes".to_string()
            }
        );

        let writes = files.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].is_dir);
        assert_eq!(writes[0].path, "data/notes/drafts");
    }

    #[tokio::test]
    async fn test_confirm_invalid_issues_nothing() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::create("data", false, loaded(&["a.md"]));

        let confirmation = prompt.confirm("a.md", &files).await.unwrap();
        assert!(matches!(confirmation, Confirmation::Rejected(_)));
        assert!(files.writes.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rename_unchanged_is_accepted_without_request() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::rename("data", "a.md", false, loaded(&["a.md", "b.md"]));

        let message = prompt.check("a.md", &files).await.unwrap();
        assert_eq!(message.kind, MessageKind::Primary);

        let confirmation = prompt.confirm("a.md", &files).await.unwrap();
        assert_eq!(confirmation, Confirmation::NoOp);
        assert!(files.renames.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rename_issues_request() {
        let files = MockFiles::default();
        let mut prompt = NamePrompt::rename("data", "a.md", false, loaded(&["a.md", "b.md"]));

        let confirmation = prompt.confirm("c.md", &files).await.unwrap();
        assert_eq!(
            confirmation,
            Confirmation::Applied {
                refresh: "data".to_string()
            }
        );

        let renames = files.renames.borrow();
        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].path, "data/a.md");
        assert_eq!(renames[0].new_path, "data/c.md");
    }

    #[test]
    fn test_name_validity() {
        assert!(is_valid_name("notes.md"));
        assert!(is_valid_name("My Folder"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("."));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("a:b"));
        assert!(!is_valid_name("a?b"));
        assert!(!is_valid_name("trailing."));
        assert!(!is_valid_name("trailing "));
        assert!(!is_valid_name("CON"));
        assert!(!is_valid_name("com1.txt"));
        assert!(is_valid_name("console.md"));
    }
}
