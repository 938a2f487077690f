//! Construction of the declarative context-menu tree for one explorer
//! node. Built fresh on every menu open; payloads are resolved from the
//! node snapshot here so the resulting actions are plain data.

use super::menu::{
    self, Applies, MenuAction, MenuCommand, MenuEntry, MenuItem, OpenTarget,
};
use super::node::FileTreeNode;
use crate::utils::path;

/// Ambient facts the menu needs beyond the node itself.
#[derive(Debug, Clone)]
pub struct MenuContext {
    /// Whether desktop shell integration (open externally, reveal in file
    /// manager) is available. Decided once at startup.
    pub desktop_shell: bool,
    /// Base URL of the host's web server, for copy-URL entries.
    pub base_url: String,
}

/// Build the renderable context menu for a node: construct the declarative
/// tree, filter it for the node's kind, convert to menu entries.
pub fn context_menu(node: &FileTreeNode, ctx: &MenuContext) -> Vec<MenuEntry> {
    menu::build(&menu::filter(&menu_items(node, ctx), node.kind))
}

/// The full declarative menu tree for a node, before filtering.
pub fn menu_items(node: &FileTreeNode, ctx: &MenuContext) -> Vec<MenuItem> {
    let mut items = Vec::new();

    // New file / new folder inside this directory.
    items.push(MenuItem::submenu(
        Applies::DIRECTORIES,
        "#iconAdd",
        "New",
        vec![
            MenuItem::action(
                Applies::DIRECTORIES,
                MenuCommand::new(
                    "#iconFile",
                    "New File",
                    MenuAction::CreateFile {
                        directory: node.relative.clone(),
                    },
                ),
            ),
            MenuItem::action(
                Applies::DIRECTORIES,
                MenuCommand::new(
                    "#iconFolder",
                    "New Folder",
                    MenuAction::CreateFolder {
                        directory: node.relative.clone(),
                    },
                ),
            ),
        ],
    ));

    items.push(MenuItem::separator(Applies::DIRECTORIES));

    items.push(MenuItem::submenu(
        Applies::DIRECTORIES,
        "#iconRefresh",
        "Refresh",
        vec![
            MenuItem::action(
                Applies::DIRECTORIES,
                MenuCommand::new(
                    "#iconRefresh",
                    "Refresh Directory",
                    MenuAction::RefreshDirectory {
                        path: node.relative.clone(),
                        deep: false,
                    },
                ),
            ),
            MenuItem::action(
                Applies::DIRECTORIES,
                MenuCommand::new(
                    "#iconRefresh",
                    "Refresh Directory Deeply",
                    MenuAction::RefreshDirectory {
                        path: node.relative.clone(),
                        deep: true,
                    },
                ),
            ),
        ],
    ));

    items.push(MenuItem::separator(Applies::DIRECTORIES));

    // Open in the code editor, with a static submenu of placements.
    items.push(MenuItem::action(
        Applies::FILES,
        MenuCommand {
            icon: "#iconCode".to_string(),
            label: "Open".to_string(),
            accelerator: None,
            action: None,
            submenu: open_submenu(&node.relative),
        },
    ));

    if ctx.desktop_shell {
        items.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconOpenWindow",
                "Open With Default Program",
                MenuAction::OpenWithDefaultProgram {
                    path: path::normalize(&node.path),
                    is_file: node.is_file(),
                },
            ),
        ));
        items.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconFolder",
                "Reveal In File Manager",
                MenuAction::RevealInFileManager {
                    path: path::normalize(&node.path),
                },
            ),
        ));
    }

    items.push(MenuItem::separator(Applies::ALL));

    items.push(MenuItem::submenu(
        Applies::ALL,
        "#iconCopy",
        "Copy",
        copy_submenu(node, ctx),
    ));

    items.push(MenuItem::separator(Applies::ALL));

    items.push(MenuItem::action(
        Applies::NON_ROOT,
        MenuCommand::new(
            "#iconEdit",
            "Rename",
            MenuAction::Rename {
                directory: node.directory.clone(),
                name: node.name.clone(),
                is_folder: !node.is_file(),
            },
        ),
    ));

    items
}

/// Static submenu of editor placements for opening a file.
fn open_submenu(relative: &str) -> Vec<MenuEntry> {
    [
        ("Open In Tab", OpenTarget::Tab),
        ("Open In Dialog", OpenTarget::Dialog),
        ("Open In Window", OpenTarget::Window),
    ]
    .into_iter()
    .map(|(label, target)| {
        MenuEntry::Command(MenuCommand::new(
            "#iconCode",
            label,
            MenuAction::OpenFile {
                path: relative.to_string(),
                target,
            },
        ))
    })
    .collect()
}

fn copy_submenu(node: &FileTreeNode, ctx: &MenuContext) -> Vec<MenuItem> {
    let mut children = vec![
        MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                &node.icon,
                "Copy Name",
                MenuAction::CopyText {
                    text: node.name.clone(),
                },
            )
            .with_accelerator(&node.name),
        ),
        MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconCopy",
                "Copy Relative Path",
                MenuAction::CopyText {
                    text: node.relative.clone(),
                },
            )
            .with_accelerator(&node.relative),
        ),
        MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconCopy",
                "Copy Full Path",
                MenuAction::CopyText {
                    text: node.path.clone(),
                },
            )
            .with_accelerator(&node.path),
        ),
    ];

    // Entries that only make sense for statically served files.
    if is_static_web_path(&node.relative) {
        let pathname = static_pathname(&node.relative);
        let url = format!("{}/{}", ctx.base_url.trim_end_matches('/'), pathname);
        let link_pathname = format!("[{}](<{}>)", node.name, pathname);
        let link_url = format!("[{}](<{}>)", node.name, url);

        children.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconLink",
                "Copy Reference Path",
                MenuAction::CopyText {
                    text: pathname.clone(),
                },
            )
            .with_accelerator(&pathname),
        ));
        children.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconLink",
                "Copy URL",
                MenuAction::CopyText { text: url.clone() },
            )
            .with_accelerator(&url),
        ));
        children.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconMarkdown",
                "Copy Markdown Hyperlink",
                MenuAction::CopyText {
                    text: link_pathname.clone(),
                },
            )
            .with_accelerator(&escape_angles(&link_pathname)),
        ));
        children.push(MenuItem::action(
            Applies::ALL,
            MenuCommand::new(
                "#iconMarkdown",
                "Copy Markdown Hyperlink",
                MenuAction::CopyText {
                    text: link_url.clone(),
                },
            )
            .with_accelerator(&escape_angles(&link_url)),
        ));
    }

    children
}

/// Workspace directories the host serves over its static web file service.
const STATIC_WEB_DIRS: [&str; 4] = [
    "data/assets",
    "data/emojis",
    "data/public",
    "data/snippets",
];

/// Whether a workspace-relative path is reachable through the static web
/// file service.
pub fn is_static_web_path(relative: &str) -> bool {
    STATIC_WEB_DIRS
        .iter()
        .any(|dir| relative == *dir || relative.starts_with(&format!("{dir}/")))
}

/// The served pathname for a statically reachable workspace path.
pub fn static_pathname(relative: &str) -> String {
    relative.strip_prefix("data/").unwrap_or(relative).to_string()
}

/// Accelerators render as host markup; keep literal angle brackets intact.
fn escape_angles(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::super::node::NodeKind;
    use super::*;

    fn ctx(desktop_shell: bool) -> MenuContext {
        MenuContext {
            desktop_shell,
            base_url: "http://127.0.0.1:6806/".to_string(),
        }
    }

    fn node(kind: NodeKind, relative: &str) -> FileTreeNode {
        let name = relative.rsplit('/').next().unwrap_or(relative).to_string();
        let directory = match relative.rfind('/') {
            Some(idx) => relative[..idx].to_string(),
            None => String::new(),
        };
        FileTreeNode {
            kind,
            name: name.clone(),
            path: format!("/workspace/{relative}"),
            relative: relative.to_string(),
            directory,
            children: None,
            icon: "#iconFile".to_string(),
            text: name,
        }
    }

    fn entry_labels(entries: &[MenuEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Command(command) => command.label.clone(),
                MenuEntry::Separator { .. } => "|".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_file_menu_shape() {
        let entries = context_menu(&node(NodeKind::File, "data/notes/a.md"), &ctx(false));
        assert_eq!(entry_labels(&entries), ["Open", "|", "Copy", "|", "Rename"]);
    }

    #[test]
    fn test_root_menu_has_no_rename() {
        let entries = context_menu(&node(NodeKind::Root, "data"), &ctx(false));
        let labels = entry_labels(&entries);
        assert!(labels.contains(&"New".to_string()));
        assert!(labels.contains(&"Refresh".to_string()));
        assert!(!labels.contains(&"Rename".to_string()));
        assert!(!labels.contains(&"Open".to_string()));
    }

    #[test]
    fn test_folder_menu_has_directory_operations() {
        let entries = context_menu(&node(NodeKind::Folder, "data/notes"), &ctx(false));
        let labels = entry_labels(&entries);
        assert_eq!(labels, ["New", "|", "Refresh", "|", "Copy", "|", "Rename"]);
    }

    #[test]
    fn test_shell_entries_are_capability_gated() {
        let file = node(NodeKind::File, "data/notes/a.md");

        let without = entry_labels(&context_menu(&file, &ctx(false)));
        assert!(!without.contains(&"Reveal In File Manager".to_string()));

        let with = entry_labels(&context_menu(&file, &ctx(true)));
        assert!(with.contains(&"Open With Default Program".to_string()));
        assert!(with.contains(&"Reveal In File Manager".to_string()));
    }

    #[test]
    fn test_no_separator_invariant_violations() {
        for kind in [NodeKind::Root, NodeKind::Folder, NodeKind::File] {
            let entries = context_menu(&node(kind, "data/assets/img.png"), &ctx(true));
            let labels = entry_labels(&entries);
            assert_ne!(labels.first().map(String::as_str), Some("|"));
            assert_ne!(labels.last().map(String::as_str), Some("|"));
            for pair in labels.windows(2) {
                assert!(pair != ["|", "|"], "adjacent separators in {labels:?}");
            }
        }
    }

    #[test]
    fn test_copy_extras_for_static_web_paths() {
        let items = menu_items(&node(NodeKind::File, "data/assets/img.png"), &ctx(false));
        let copy = items
            .iter()
            .find_map(|item| match item {
                MenuItem::Submenu(sub) if sub.label == "Copy" => Some(sub),
                _ => None,
            })
            .unwrap();
        assert_eq!(copy.children.len(), 7);

        // URL and pathname are derived from the served location.
        let urls: Vec<_> = copy
            .children
            .iter()
            .filter_map(|item| match item {
                MenuItem::Action(action) => match &action.command.action {
                    Some(MenuAction::CopyText { text }) => Some(text.clone()),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert!(urls.contains(&"assets/img.png".to_string()));
        assert!(urls.contains(&"http://127.0.0.1:6806/assets/img.png".to_string()));
        assert!(urls.contains(&"[img.png](<assets/img.png>)".to_string()));
    }

    #[test]
    fn test_copy_is_plain_outside_static_dirs() {
        let items = menu_items(&node(NodeKind::File, "data/notes/a.md"), &ctx(false));
        let copy = items
            .iter()
            .find_map(|item| match item {
                MenuItem::Submenu(sub) if sub.label == "Copy" => Some(sub),
                _ => None,
            })
            .unwrap();
        assert_eq!(copy.children.len(), 3);
    }

    #[test]
    fn test_static_web_paths() {
        assert!(is_static_web_path("data/assets/img.png"));
        assert!(is_static_web_path("data/public"));
        assert!(!is_static_web_path("data/notes/a.md"));
        assert!(!is_static_web_path("data/assetsx/img.png"));
        assert_eq!(static_pathname("data/assets/img.png"), "assets/img.png");
    }

    #[test]
    fn test_open_submenu_targets() {
        let items = menu_items(&node(NodeKind::File, "data/notes/a.md"), &ctx(false));
        let open = items
            .iter()
            .find_map(|item| match item {
                MenuItem::Action(action) if action.command.label == "Open" => {
                    Some(&action.command)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(open.submenu.len(), 3);
        match &open.submenu[0] {
            MenuEntry::Command(command) => assert_eq!(
                command.action,
                Some(MenuAction::OpenFile {
                    path: "data/notes/a.md".to_string(),
                    target: OpenTarget::Tab,
                })
            ),
            other => panic!("expected command, got {other:?}"),
        }
    }
}
