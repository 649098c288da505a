//! Plain-text dumps of an element tree for snapshot assertions.

use std::fmt::Write as _;

use crate::dom::{Element, ElementKind, ElementTree, NodeId};
use crate::style::Color;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the tree as one line per node, indented two spaces per level.
///
/// Each line holds the kind, the absolute rect and whatever optional state the
/// node carries. The last line has no trailing newline.
///
/// ```text
/// container [0,0 800,600]
///   container [0,0 800,600] bg=#ff0000ff text="Hi"
///     button [0,0 400,600] hovered
/// ```
pub fn tree_to_string(tree: &ElementTree) -> String {
    let mut lines = Vec::new();
    dump(tree, tree.root(), 0, &mut lines);
    lines.join("\n")
}

fn dump(tree: &ElementTree, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(element) = tree.get(id) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(element)));
    for &child in tree.children(id) {
        dump(tree, child, depth + 1, lines);
    }
}

fn describe(element: &Element) -> String {
    let r = element.absolute;
    let mut line = format!("{} [{},{} {},{}]", element.kind.name(), r.x0, r.y0, r.x1, r.y1);

    if let Some(color) = element.background {
        let _ = write!(line, " bg={}", hex(color));
    }
    if let Some(texture) = element.image {
        let _ = write!(line, " image={}", texture.0);
    }
    if let Some(aspect) = element.aspect {
        let _ = write!(line, " aspect={aspect:.3}");
    }
    match &element.kind {
        ElementKind::Container => {}
        ElementKind::Button(state) => {
            if state.hovered {
                line.push_str(" hovered");
            }
            if state.pressed {
                line.push_str(" pressed");
            }
        }
        ElementKind::Input(state) => {
            let _ = write!(line, " caret={}", state.caret);
            if state.focused {
                line.push_str(" focused");
            }
        }
        ElementKind::Inventory(grid) => {
            let _ = write!(line, " {}/{} {}x{}", grid.location, grid.list, grid.columns, grid.rows);
            if let Some(geometry) = &grid.geometry {
                let _ = write!(line, " cell={}", geometry.cell);
            }
        }
    }
    if let Some(run) = &element.text {
        let _ = write!(line, " text={:?}", run.text());
    }
    line
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
}

// ===========================================================================
// Tests
// ===========================================================================
