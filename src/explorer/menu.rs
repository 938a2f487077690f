//! The context-menu model for the explorer tree.
//!
//! A menu is declared as a tree of [`MenuItem`]s, each tagged with the node
//! kinds it applies to. Opening a menu filters that tree down to the
//! clicked node's kind ([`filter`]) and converts the survivors into the
//! renderable form the host menu API accepts ([`build`]).

use super::node::NodeKind;

/// Per-item applicability flags: which node kinds the item is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applies {
    pub root: bool,
    pub folder: bool,
    pub file: bool,
}

impl Applies {
    /// Valid everywhere.
    pub const ALL: Applies = Applies {
        root: true,
        folder: true,
        file: true,
    };
    /// Valid on the root and folders (directory operations).
    pub const DIRECTORIES: Applies = Applies {
        root: true,
        folder: true,
        file: false,
    };
    /// Valid on folders and files, but never the root.
    pub const NON_ROOT: Applies = Applies {
        root: false,
        folder: true,
        file: true,
    };
    /// Valid on files only.
    pub const FILES: Applies = Applies {
        root: false,
        folder: false,
        file: true,
    };

    pub fn allows(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Root => self.root,
            NodeKind::Folder => self.folder,
            NodeKind::File => self.file,
        }
    }
}

/// Where an "open file" command places the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    Tab,
    Dialog,
    Window,
}

/// A domain action carried by a leaf command. Payloads are resolved from
/// the node snapshot when the menu is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    CreateFile { directory: String },
    CreateFolder { directory: String },
    RefreshDirectory { path: String, deep: bool },
    OpenFile { path: String, target: OpenTarget },
    /// Open with the default program; directories are revealed instead.
    OpenWithDefaultProgram { path: String, is_file: bool },
    RevealInFileManager { path: String },
    CopyText { text: String },
    Rename {
        directory: String,
        name: String,
        is_folder: bool,
    },
}

/// A leaf command in the host's renderable menu form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand {
    pub icon: String,
    pub label: String,
    /// Secondary text shown right-aligned (the value being copied, ...).
    pub accelerator: Option<String>,
    pub action: Option<MenuAction>,
    /// Nested entries; empty for plain commands.
    pub submenu: Vec<MenuEntry>,
}

impl MenuCommand {
    pub fn new(icon: &str, label: &str, action: MenuAction) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            accelerator: None,
            action: Some(action),
            submenu: Vec::new(),
        }
    }

    pub fn with_accelerator(mut self, accelerator: &str) -> Self {
        self.accelerator = Some(accelerator.to_string());
        self
    }
}

/// One entry of the renderable menu accepted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Command(MenuCommand),
    Separator { index: Option<usize> },
}

/// An action leaf of the declarative menu tree.
#[derive(Debug, Clone)]
pub struct ActionItem {
    pub applies: Applies,
    pub command: MenuCommand,
}

/// A submenu node with its own filtered children.
#[derive(Debug, Clone)]
pub struct SubmenuItem {
    pub applies: Applies,
    pub icon: String,
    pub label: String,
    pub children: Vec<MenuItem>,
}

/// A divider, optionally with an explicit insertion index.
#[derive(Debug, Clone)]
pub struct SeparatorItem {
    pub applies: Applies,
    pub index: Option<usize>,
}

/// One node of the declarative menu tree.
#[derive(Debug, Clone)]
pub enum MenuItem {
    Action(ActionItem),
    Submenu(SubmenuItem),
    Separator(SeparatorItem),
}

impl MenuItem {
    pub fn action(applies: Applies, command: MenuCommand) -> Self {
        MenuItem::Action(ActionItem { applies, command })
    }

    pub fn submenu(applies: Applies, icon: &str, label: &str, children: Vec<MenuItem>) -> Self {
        MenuItem::Submenu(SubmenuItem {
            applies,
            icon: icon.to_string(),
            label: label.to_string(),
            children,
        })
    }

    pub fn separator(applies: Applies) -> Self {
        MenuItem::Separator(SeparatorItem {
            applies,
            index: None,
        })
    }

    pub fn applies(&self) -> Applies {
        match self {
            MenuItem::Action(item) => item.applies,
            MenuItem::Submenu(item) => item.applies,
            MenuItem::Separator(item) => item.applies,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator(_))
    }
}

/// Filter a menu tree down to the items valid for `kind`.
///
/// Pure transform over the declarative tree: the input is left untouched so
/// the same template can serve successive menu opens. The same function is
/// applied at every depth. The result has no leading/trailing separator, no
/// adjacent separators, and every surviving submenu keeps at least one
/// non-separator child; sibling order is preserved throughout.
pub fn filter(items: &[MenuItem], kind: NodeKind) -> Vec<MenuItem> {
    // Kind filter and submenu pruning in one pass: a submenu whose
    // recursively filtered children are empty or separator-only is dropped.
    let mut out: Vec<MenuItem> = items
        .iter()
        .filter(|item| item.applies().allows(kind))
        .filter_map(|item| match item {
            MenuItem::Submenu(sub) => {
                let children = filter(&sub.children, kind);
                if children.iter().any(|child| !child.is_separator()) {
                    Some(MenuItem::Submenu(SubmenuItem {
                        applies: sub.applies,
                        icon: sub.icon.clone(),
                        label: sub.label.clone(),
                        children,
                    }))
                } else {
                    None
                }
            }
            other => Some(other.clone()),
        })
        .collect();

    // Trim separators at both edges.
    while out.first().is_some_and(MenuItem::is_separator) {
        out.remove(0);
    }
    while out.last().is_some_and(MenuItem::is_separator) {
        out.pop();
    }

    // Collapse runs: drop any separator directly after another.
    let mut previous_was_separator = false;
    out.retain(|item| {
        let is_separator = item.is_separator();
        let keep = !(is_separator && previous_was_separator);
        previous_was_separator = is_separator;
        keep
    });

    out
}

/// Convert a filtered menu tree into the host's renderable form.
///
/// Assumes its input already satisfies the invariants of [`filter`] and
/// never re-filters.
pub fn build(items: &[MenuItem]) -> Vec<MenuEntry> {
    items
        .iter()
        .map(|item| match item {
            MenuItem::Action(action) => MenuEntry::Command(action.command.clone()),
            MenuItem::Submenu(sub) => MenuEntry::Command(MenuCommand {
                icon: sub.icon.clone(),
                label: sub.label.clone(),
                accelerator: None,
                action: None,
                submenu: build(&sub.children),
            }),
            MenuItem::Separator(sep) => MenuEntry::Separator { index: sep.index },
        })
        .collect()
}
