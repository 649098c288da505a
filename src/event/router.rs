//! Hover, click and focus routing through the element tree.
//!
//! The router keeps three weak references as `Option<NodeId>`. A key that no
//! longer resolves in the tree is treated like `None`; [`EventRouter::reset`]
//! must be called whenever the tree is replaced.

use tracing::trace;

use crate::dom::{ElementTree, NodeId};
use crate::geometry::Point;

use super::input::{InputEvent, KeyEvent, MouseAction, MouseBtn, MouseEvent};

/// Pointer and keyboard routing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRouter {
    hovered: Option<NodeId>,
    clicked: Option<NodeId>,
    focused: Option<NodeId>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node currently under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Node the primary button went down on, until it is released.
    pub fn clicked(&self) -> Option<NodeId> {
        self.clicked
    }

    /// Node receiving key presses.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Forget every node. Call when the tree is rebuilt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Route one event. Key presses are always consumed; key releases and
    /// pointer events are left for the host.
    pub fn handle(&mut self, tree: &mut ElementTree, event: &InputEvent) -> bool {
        match event {
            InputEvent::Mouse(mouse) => {
                self.mouse(tree, mouse);
                false
            }
            InputEvent::Key(key) if !key.pressed => false,
            InputEvent::Key(key) => {
                self.key_down(tree, key);
                true
            }
            InputEvent::Paste(text) => {
                self.paste(tree, text);
                true
            }
            InputEvent::Resize { .. } | InputEvent::FocusGained | InputEvent::FocusLost => false,
        }
    }

    /// Every pointer event updates the hover target first.
    pub fn mouse(&mut self, tree: &mut ElementTree, event: &MouseEvent) {
        let target = hit_test(tree, event.position());
        self.hover(tree, target);
        match event.kind {
            MouseAction::Down(MouseBtn::Left) => self.press(tree),
            MouseAction::Up(MouseBtn::Left) => self.release(tree),
            _ => {}
        }
    }

    /// Move the hover target, notifying the old and new nodes.
    pub fn hover(&mut self, tree: &mut ElementTree, target: Option<NodeId>) {
        if target == self.hovered {
            return;
        }
        trace!(from = ?self.hovered, to = ?target, "hover");
        if let Some(old) = self.hovered.and_then(|id| tree.get_mut(id)) {
            old.hover(false);
        }
        if let Some(new) = target.and_then(|id| tree.get_mut(id)) {
            new.hover(true);
        }
        self.hovered = target;
    }

    /// Primary press: the hovered node becomes clicked and focused.
    pub fn press(&mut self, tree: &mut ElementTree) {
        // A release may have been missed.
        if let Some(stale) = self.clicked.take().and_then(|id| tree.get_mut(id)) {
            stale.release();
        }
        self.clicked = self.hovered;
        if let Some(node) = self.clicked.and_then(|id| tree.get_mut(id)) {
            node.press();
        }
        if let Some(old) = self.focused.and_then(|id| tree.get_mut(id)) {
            old.focus_change(false);
        }
        self.focused = self.clicked;
        if let Some(node) = self.focused.and_then(|id| tree.get_mut(id)) {
            node.focus_change(true);
        }
        trace!(clicked = ?self.clicked, focused = ?self.focused, "press");
    }

    /// Primary release.
    pub fn release(&mut self, tree: &mut ElementTree) {
        if let Some(node) = self.clicked.take().and_then(|id| tree.get_mut(id)) {
            node.release();
        }
    }

    /// Forward a key press to the focused node.
    pub fn key_down(&mut self, tree: &mut ElementTree, key: &KeyEvent) -> bool {
        self.focused
            .and_then(|id| tree.get_mut(id))
            .is_some_and(|node| node.key_down(key))
    }

    /// Forward pasted text to the focused node.
    pub fn paste(&mut self, tree: &mut ElementTree, text: &str) -> bool {
        self.focused
            .and_then(|id| tree.get_mut(id))
            .is_some_and(|node| node.paste(text))
    }
}

/// Topmost interactive node containing `point`.
///
/// Later children are drawn on top, so they are tested first. A node whose
/// rect misses the point hides its whole subtree.
pub fn hit_test(tree: &ElementTree, point: Point) -> Option<NodeId> {
    hit_node(tree, tree.root(), point)
}

fn hit_node(tree: &ElementTree, id: NodeId, point: Point) -> Option<NodeId> {
    let element = tree.get(id)?;
    if !element.absolute.contains(point) {
        return None;
    }
    tree.children(id)
        .iter()
        .rev()
        .find_map(|&child| hit_node(tree, child, point))
        .or_else(|| element.is_interactive().then_some(id))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::dom::{ButtonState, Element, ElementKind, InputState};
    use crate::event::input::{Key, Modifiers};
    use crate::geometry::{FracRect, Rect};
    use crate::layout::resolve;
    use crate::style::StyleSpec;
    use crate::testing::MonospaceFont;

    struct Fixture {
        tree: ElementTree,
        panel: NodeId,
        button: NodeId,
        input: NodeId,
    }

    /// 800x600 viewport:
    /// - panel: left half container
    ///   - button: top half of the panel
    /// - input: right half
    fn fixture() -> Fixture {
        let style = Rc::new(StyleSpec::new(Rc::new(MonospaceFont::new(10, 20))));
        let mut tree = ElementTree::new(Element::new(style.clone()));
        let root = tree.root();

        let panel = tree
            .insert_child(root, Element::new(style.clone()).with_rect(FracRect::new(0.0, 0.0, 0.5, 1.0)))
            .unwrap();
        let mut button = Element::new(style.clone()).with_rect(FracRect::new(0.0, 0.0, 1.0, 0.5));
        button.promote(ElementKind::Button(ButtonState::default())).unwrap();
        let button = tree.insert_child(panel, button).unwrap();

        let mut input = Element::new(style).with_rect(FracRect::new(0.5, 0.0, 1.0, 1.0));
        input.promote(ElementKind::Input(InputState::default())).unwrap();
        let input = tree.insert_child(root, input).unwrap();

        resolve(&mut tree, Rect::new(0, 0, 800, 600));
        Fixture { tree, panel, button, input }
    }

    fn mouse(kind: MouseAction, x: i32, y: i32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }

    fn button_state(tree: &ElementTree, id: NodeId) -> ButtonState {
        match tree.get(id).unwrap().kind {
            ElementKind::Button(state) => state,
            _ => panic!("expected button"),
        }
    }

    // ── Hit testing ──────────────────────────────────────────────────

    #[test]
    fn hit_test_finds_interactive_nodes() {
        let f = fixture();
        assert_eq!(hit_test(&f.tree, Point::new(100, 100)), Some(f.button));
        assert_eq!(hit_test(&f.tree, Point::new(600, 500)), Some(f.input));
    }

    #[test]
    fn containers_are_transparent() {
        let f = fixture();
        // Lower half of the panel has no interactive child.
        assert_eq!(hit_test(&f.tree, Point::new(100, 500)), None);
        assert_ne!(hit_test(&f.tree, Point::new(100, 100)), Some(f.panel));
    }

    #[test]
    fn outside_viewport_hits_nothing() {
        let f = fixture();
        assert_eq!(hit_test(&f.tree, Point::new(-1, 10)), None);
        assert_eq!(hit_test(&f.tree, Point::new(800, 10)), None);
    }

    #[test]
    fn later_siblings_win() {
        let mut f = fixture();
        let root = f.tree.root();
        let style = f.tree.get(root).unwrap().style.clone();
        let mut overlay = Element::new(style).with_rect(FracRect::new(0.0, 0.0, 1.0, 1.0));
        overlay.promote(ElementKind::Button(ButtonState::default())).unwrap();
        let overlay = f.tree.insert_child(root, overlay).unwrap();
        resolve(&mut f.tree, Rect::new(0, 0, 800, 600));
        assert_eq!(hit_test(&f.tree, Point::new(100, 100)), Some(overlay));
    }

    // ── Hover / press / release ──────────────────────────────────────

    #[test]
    fn hover_moves_between_nodes() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Moved, 100, 100));
        assert_eq!(router.hovered(), Some(f.button));
        assert!(button_state(&f.tree, f.button).hovered);

        router.handle(&mut f.tree, &mouse(MouseAction::Moved, 600, 100));
        assert_eq!(router.hovered(), Some(f.input));
        assert!(!button_state(&f.tree, f.button).hovered);
    }

    #[test]
    fn press_release_on_button() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 100, 100));
        assert_eq!(router.clicked(), Some(f.button));
        assert!(button_state(&f.tree, f.button).pressed);

        router.handle(&mut f.tree, &mouse(MouseAction::Up(MouseBtn::Left), 100, 100));
        assert_eq!(router.clicked(), None);
        assert_eq!(router.focused(), Some(f.button));
        assert!(!button_state(&f.tree, f.button).pressed);
    }

    #[test]
    fn press_on_empty_space_clears_focus() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 600, 100));
        assert_eq!(router.focused(), Some(f.input));
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 100, 500));
        assert_eq!(router.focused(), None);
        assert_eq!(
            f.tree.get(f.input).unwrap().kind,
            ElementKind::Input(InputState { caret: 0, focused: false })
        );
    }

    #[test]
    fn missed_release_is_recovered_on_next_press() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 100, 100));
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 600, 100));
        assert!(!button_state(&f.tree, f.button).pressed);
        assert_eq!(router.clicked(), Some(f.input));
    }

    #[test]
    fn right_button_only_hovers() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Right), 100, 100));
        assert_eq!(router.hovered(), Some(f.button));
        assert_eq!(router.clicked(), None);
    }

    // ── Keys ─────────────────────────────────────────────────────────

    #[test]
    fn keys_go_to_focused_input() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 600, 100));
        for ch in "hi".chars() {
            let consumed = router.handle(&mut f.tree, &InputEvent::Key(KeyEvent::plain(Key::Char(ch))));
            assert!(consumed);
        }
        router.handle(&mut f.tree, &InputEvent::Paste("!".into()));
        let input = f.tree.get(f.input).unwrap();
        assert_eq!(input.text_str(), "hi!");
        assert!(input.text.as_ref().unwrap().caret().is_some());
    }

    #[test]
    fn keys_without_focus_are_still_consumed() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        let key = InputEvent::Key(KeyEvent::new(Key::Char('x'), Modifiers::NONE));
        assert!(router.handle(&mut f.tree, &key));
        assert_eq!(f.tree.get(f.input).unwrap().text_str(), "");
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 600, 100));
        router.handle(&mut f.tree, &InputEvent::Key(KeyEvent::plain(Key::Char('a'))));
        let release = InputEvent::Key(KeyEvent::release(Key::Char('a'), Modifiers::NONE));
        assert!(!router.handle(&mut f.tree, &release));
        assert_eq!(f.tree.get(f.input).unwrap().text_str(), "a");
    }

    #[test]
    fn reset_forgets_everything() {
        let mut f = fixture();
        let mut router = EventRouter::new();
        router.handle(&mut f.tree, &mouse(MouseAction::Down(MouseBtn::Left), 100, 100));
        router.reset();
        assert_eq!(router, EventRouter::default());
    }
}
