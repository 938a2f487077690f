use std::collections::HashSet;

/// Classification of an explorer-tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The workspace root.
    Root,
    Folder,
    File,
}

/// A read-only snapshot of one explorer-tree node.
///
/// The explorer UI owns the live tree; the menu layer derives everything it
/// needs from a snapshot taken when the menu opens and never mutates it.
#[derive(Debug, Clone)]
pub struct FileTreeNode {
    pub kind: NodeKind,
    /// The file/directory name
    pub name: String,
    /// Absolute path on disk
    pub path: String,
    /// Path relative to the workspace root
    pub relative: String,
    /// Relative path of the parent directory
    pub directory: String,
    /// Child snapshots; `None` until the directory has been listed
    pub children: Option<Vec<FileTreeNode>>,
    /// Icon shown for this node
    pub icon: String,
    /// Display text shown for this node
    pub text: String,
}

impl FileTreeNode {
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Names of the loaded children, or `None` when not yet listed.
    pub fn child_names(&self) -> Option<HashSet<String>> {
        self.children
            .as_ref()
            .map(|children| children.iter().map(|c| c.name.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn folder(name: &str, children: Option<Vec<FileTreeNode>>) -> FileTreeNode {
        FileTreeNode {
            kind: NodeKind::Folder,
            name: name.to_string(),
            path: format!("/workspace/data/{name}"),
            relative: format!("data/{name}"),
            directory: "data".to_string(),
            children,
            icon: "#iconFolder".to_string(),
            text: name.to_string(),
        }
    }

    pub(crate) fn file(name: &str) -> FileTreeNode {
        FileTreeNode {
            kind: NodeKind::File,
            name: name.to_string(),
            path: format!("/workspace/data/{name}"),
            relative: format!("data/{name}"),
            directory: "data".to_string(),
            children: None,
            icon: "#iconFile".to_string(),
            text: name.to_string(),
        }
    }

    #[test]
    fn test_child_names() {
        let node = folder("notes", Some(vec![file("a.md"), file("b.md")]));
        let names = node.child_names().unwrap();
        assert!(names.contains("a.md"));
        assert!(names.contains("b.md"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_unloaded_children() {
        let node = folder("notes", None);
        assert!(node.child_names().is_none());
    }
}
