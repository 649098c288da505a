//! Absolute rect resolution.
//!
//! Pre-order: a node's absolute rect is its fractional rect projected into the
//! parent's absolute rect, then clamped to its aspect ratio. Children resolve
//! against the clamped rect. Text runs and inventory geometry are rebuilt
//! once the subtree below is done.

use tracing::trace;

use crate::dom::{ElementKind, ElementTree, NodeId};
use crate::geometry::Rect;

use super::grid::GridGeometry;

/// Relative tolerance below which a rect already matches its aspect ratio.
const ASPECT_TOLERANCE: f32 = 1e-4;

/// Resolve every node of `tree` against `viewport`.
///
/// Running it twice with the same viewport produces the same rects.
pub fn resolve(tree: &mut ElementTree, viewport: Rect) {
    let root = tree.root();
    resolve_node(tree, root, viewport);
}

fn resolve_node(tree: &mut ElementTree, id: NodeId, parent: Rect) {
    let Some(element) = tree.get_mut(id) else {
        return;
    };
    let mut rect = parent.project(element.rect);
    if let Some(aspect) = element.aspect {
        rect = clamp_aspect(rect, aspect);
    }
    element.absolute = rect;
    trace!(?id, ?rect, "resolved");

    let children = tree.children(id).to_vec();
    for child in children {
        resolve_node(tree, child, rect);
    }

    let Some(element) = tree.get_mut(id) else {
        return;
    };
    element.rebuild_text();
    if let ElementKind::Inventory(grid) = &mut element.kind {
        grid.geometry = GridGeometry::compute(rect, grid.columns, grid.rows);
    }
}

/// Shrink `rect` along one axis so `width / height == aspect`, keeping it
/// centered. Zero-height rects are returned unchanged.
pub fn clamp_aspect(rect: Rect, aspect: f32) -> Rect {
    let (width, height) = (rect.width(), rect.height());
    if height == 0 || !aspect.is_finite() || aspect <= 0.0 {
        return rect;
    }
    let actual = width as f32 / height as f32;
    if (actual - aspect).abs() <= ASPECT_TOLERANCE * aspect {
        return rect;
    }
    if actual > aspect {
        let new_width = (aspect * height as f32) as i32;
        let x0 = rect.x0 + (width - new_width) / 2;
        Rect::new(x0, rect.y0, x0 + new_width, rect.y1)
    } else {
        let new_height = (width as f32 / aspect) as i32;
        let y0 = rect.y0 + (height - new_height) / 2;
        Rect::new(rect.x0, y0, rect.x1, y0 + new_height)
    }
}
