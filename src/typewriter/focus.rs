use crate::config::TypewriterConfig;

/// A node in the host document tree, held by reference identity.
///
/// The host's DOM implements this; the core only ever compares nodes by
/// identity, walks parent links, and asks about the table-cell role.
pub trait DomNode: Clone {
    /// Reference-identity comparison (never structural).
    fn same(&self, other: &Self) -> bool;

    /// The parent node, or `None` at the top of the tree.
    fn parent(&self) -> Option<Self>;

    /// Whether this node plays the table-cell role (`td`/`th` equivalent).
    fn is_table_cell(&self) -> bool;
}

/// The structural kind of the block containing the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    CodeBlock,
    Table,
    /// Any other block kind (heading, list item, quote, ...).
    Other,
}

/// A snapshot of the caret position: the nearest enclosing block element,
/// its kind, and the live selection's focus node for sub-block targeting.
#[derive(Debug, Clone)]
pub struct CaretSnapshot<N> {
    pub block: N,
    pub kind: BlockKind,
    pub selection_focus: Option<N>,
}

/// Resolve the element that should be scrolled into view for this caret.
///
/// Pure and side-effect-free; performs no scrolling.
pub fn resolve<N: DomNode>(caret: &CaretSnapshot<N>, config: &TypewriterConfig) -> N {
    match caret.kind {
        BlockKind::Table if config.table.row => {
            table_cell_of(caret.selection_focus.clone()).unwrap_or_else(|| caret.block.clone())
        }
        BlockKind::CodeBlock if config.code.row => {
            // Line-level targeting inside code blocks is not supported yet;
            // the block itself is the target.
            caret.block.clone()
        }
        _ => caret.block.clone(),
    }
}

/// Walk upward from the selection focus node to the enclosing table cell.
///
/// Returns `None` when the chain exhausts without meeting a cell, including
/// when the anchor is already `None`.
fn table_cell_of<N: DomNode>(focus: Option<N>) -> Option<N> {
    let mut node = focus;
    while let Some(current) = node {
        if current.is_table_cell() {
            return Some(current);
        }
        node = current.parent();
    }
    None
}
