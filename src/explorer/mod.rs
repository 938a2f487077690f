pub mod fs;
pub mod items;
pub mod menu;
pub mod node;
pub mod prompt;

pub use fs::{DirEntry, FileError, FileService, LocalFileService, RenameRequest, WriteRequest};
pub use items::{context_menu, menu_items, MenuContext};
pub use menu::{Applies, MenuAction, MenuCommand, MenuEntry, MenuItem, OpenTarget};
pub use node::{FileTreeNode, NodeKind};
pub use prompt::{Confirmation, Message, MessageKind, NamePrompt, SiblingNames};

use crate::utils::clipboard::Clipboard;
use anyhow::Result;

/// Desktop shell integration, available on Electron-style hosts only.
pub trait ShellIntegration {
    /// Open a file with the platform's default program.
    fn open_path(&self, path: &str) -> Result<()>;

    /// Reveal a file or directory in the platform's file manager.
    fn show_in_folder(&self, path: &str) -> Result<()>;
}

/// Shell integration backed by the platform's opener command.
pub struct SystemShell;

impl ShellIntegration for SystemShell {
    fn open_path(&self, path: &str) -> Result<()> {
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "explorer"
        } else {
            "xdg-open"
        };
        std::process::Command::new(opener).arg(path).spawn()?;
        Ok(())
    }

    fn show_in_folder(&self, path: &str) -> Result<()> {
        let parent = std::path::Path::new(path)
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."));
        self.open_path(&parent.to_string_lossy())
    }
}

/// What the host should do after a menu action was dispatched.
#[derive(Debug)]
pub enum Outcome {
    /// Handled entirely inside the dispatcher.
    Done,
    /// Re-list this directory's tree node.
    Refresh { path: String, deep: bool },
    /// Open this file in the host's code editor.
    Open { path: String, target: OpenTarget },
    /// Run this interactive prompt in a dialog.
    Prompt(NamePrompt),
}

/// Executes context-menu actions against the file service, clipboard and
/// (when present) the desktop shell.
pub struct Explorer<S, Sh = SystemShell> {
    files: S,
    clipboard: Clipboard,
    shell: Option<Sh>,
    context: MenuContext,
}

impl<S: FileService, Sh: ShellIntegration> Explorer<S, Sh> {
    pub fn new(files: S, shell: Option<Sh>, context: MenuContext) -> Self {
        Self {
            files,
            clipboard: Clipboard::new(),
            shell,
            context,
        }
    }

    /// The file service, for dialog layers driving a [`NamePrompt`].
    pub fn files(&self) -> &S {
        &self.files
    }

    /// Build the renderable context menu for a node.
    pub fn menu(&self, node: &FileTreeNode) -> Vec<MenuEntry> {
        context_menu(node, &self.context)
    }

    /// Execute one menu action.
    pub fn dispatch(&mut self, action: MenuAction) -> Result<Outcome> {
        match action {
            MenuAction::CopyText { text } => {
                self.clipboard.set_text(&text)?;
                Ok(Outcome::Done)
            }
            MenuAction::RefreshDirectory { path, deep } => Ok(Outcome::Refresh { path, deep }),
            MenuAction::OpenFile { path, target } => Ok(Outcome::Open { path, target }),
            MenuAction::OpenWithDefaultProgram { path, is_file } => {
                let shell = self.require_shell()?;
                if is_file {
                    shell.open_path(&path)?;
                } else {
                    shell.show_in_folder(&path)?;
                }
                Ok(Outcome::Done)
            }
            MenuAction::RevealInFileManager { path } => {
                self.require_shell()?.show_in_folder(&path)?;
                Ok(Outcome::Done)
            }
            MenuAction::CreateFile { directory } => Ok(Outcome::Prompt(NamePrompt::create(
                &directory,
                false,
                SiblingNames::Unloaded,
            ))),
            MenuAction::CreateFolder { directory } => Ok(Outcome::Prompt(NamePrompt::create(
                &directory,
                true,
                SiblingNames::Unloaded,
            ))),
            MenuAction::Rename {
                directory,
                name,
                is_folder,
            } => Ok(Outcome::Prompt(NamePrompt::rename(
                &directory,
                &name,
                is_folder,
                SiblingNames::Unloaded,
            ))),
        }
    }

    fn require_shell(&self) -> Result<&Sh> {
        self.shell
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("desktop shell integration is not available"))
    }
}
