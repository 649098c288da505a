//! The menu: source text in, laid-out tree, drawing and event routing out.
//!
//! [`FormspecMenu`] owns everything a single open formspec needs. Setting a
//! new source only marks the tree dirty; the parse happens on the next
//! [`regenerate`](FormspecMenu::regenerate), which is also where layout runs.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, error, trace};

use crate::assets::{InventorySource, TextureSource};
use crate::dom::ElementTree;
use crate::event::{DoubleClickDetector, EventRouter, InputEvent, Key, KeyEvent, MouseAction, MouseBtn};
use crate::geometry::{Rect, Size};
use crate::layout::resolve;
use crate::parse::{self, ParseContext, ParseWarning};
use crate::render::{draw_tree, Palette, Renderer};
use crate::style::{Color, StyleSpec};
use crate::text::FontMetrics;

// ---------------------------------------------------------------------------
// MenuConfig
// ---------------------------------------------------------------------------

/// Menu behavior switches.
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Turn a double press of the primary button into Escape.
    pub remap_double_click: bool,
    /// Longest time from the first press to the release, in milliseconds.
    pub double_click_ms: u64,
    /// Largest distance between the two presses, in pixels.
    pub double_click_radius: i32,
    /// Whether Escape closes the menu.
    pub allow_close: bool,
    pub text_color: Color,
    pub caret_color: Color,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            remap_double_click: true,
            double_click_ms: 400,
            double_click_radius: 30,
            allow_close: true,
            text_color: Color::WHITE,
            caret_color: Color::RED,
        }
    }
}

impl MenuConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable double-press remapping (builder).
    pub fn with_remap_double_click(mut self, remap: bool) -> Self {
        self.remap_double_click = remap;
        self
    }

    /// Set the double-press window and radius (builder).
    pub fn with_double_click(mut self, window_ms: u64, radius: i32) -> Self {
        self.double_click_ms = window_ms;
        self.double_click_radius = radius;
        self
    }

    /// Set whether Escape closes the menu (builder).
    pub fn with_allow_close(mut self, allow: bool) -> Self {
        self.allow_close = allow;
        self
    }

    /// Set the text color (builder).
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set the caret color (builder).
    pub fn with_caret_color(mut self, color: Color) -> Self {
        self.caret_color = color;
        self
    }

    pub fn palette(&self) -> Palette {
        Palette { text: self.text_color, caret: self.caret_color }
    }

    /// A fresh detector using this config's window and radius.
    pub fn detector(&self) -> DoubleClickDetector {
        DoubleClickDetector::new(Duration::from_millis(self.double_click_ms), self.double_click_radius)
    }
}

// ---------------------------------------------------------------------------
// FormspecMenu
// ---------------------------------------------------------------------------

/// An open formspec.
pub struct FormspecMenu {
    config: MenuConfig,
    textures: Box<dyn TextureSource>,
    default_style: Rc<StyleSpec>,
    source: String,
    needs_reparse: bool,
    tree: Option<ElementTree>,
    warnings: Vec<ParseWarning>,
    router: EventRouter,
    double_click: DoubleClickDetector,
    viewport: Rect,
    open: bool,
}

impl FormspecMenu {
    /// Create an open menu for `source`. Nothing is parsed until the first
    /// [`regenerate`](Self::regenerate).
    pub fn new(source: impl Into<String>, font: Rc<dyn FontMetrics>, textures: Box<dyn TextureSource>) -> Self {
        let config = MenuConfig::default();
        Self {
            double_click: config.detector(),
            config,
            textures,
            default_style: Rc::new(StyleSpec::new(font)),
            source: source.into(),
            needs_reparse: true,
            tree: None,
            warnings: Vec::new(),
            router: EventRouter::new(),
            viewport: Rect::EMPTY,
            open: true,
        }
    }

    /// Replace the config (builder).
    pub fn with_config(mut self, config: MenuConfig) -> Self {
        self.double_click = config.detector();
        self.config = config;
        self
    }

    /// Record a new source. It is parsed on the next regenerate.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.needs_reparse = true;
    }

    /// Reparse if the source changed, then lay the tree out in a viewport of
    /// `size` pixels. An empty size is ignored.
    ///
    /// A fatal parse error drops the tree and closes the menu.
    pub fn regenerate(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        if self.needs_reparse {
            self.needs_reparse = false;
            self.reparse();
        }
        self.viewport = size.to_rect();
        if let Some(tree) = &mut self.tree {
            resolve(tree, self.viewport);
            debug!(viewport = ?self.viewport, "layout resolved");
        }
    }

    fn reparse(&mut self) {
        let ctx = ParseContext::new(&*self.textures, self.default_style.clone());
        self.router.reset();
        self.double_click.reset();
        match parse::parse(&self.source, &ctx) {
            Ok(parsed) => {
                debug!(nodes = parsed.tree.len(), warnings = parsed.warnings.len(), "formspec parsed");
                self.tree = Some(parsed.tree);
                self.warnings = parsed.warnings;
            }
            Err(err) => {
                error!(error = %err, "dropping formspec");
                self.tree = None;
                self.warnings.clear();
                self.open = false;
            }
        }
    }

    /// Draw the menu. Does nothing once closed or before the first
    /// successful regenerate.
    pub fn draw(&self, renderer: &mut dyn Renderer, inventory: &dyn InventorySource) {
        if !self.open {
            return;
        }
        if let Some(tree) = &self.tree {
            draw_tree(tree, renderer, inventory, &self.config.palette());
        }
    }

    /// Route an input event. Returns whether the menu consumed it.
    pub fn route_event(&mut self, event: &InputEvent) -> bool {
        self.route_event_at(event, Instant::now())
    }

    /// [`route_event`](Self::route_event) with an explicit timestamp for
    /// double-press detection.
    pub fn route_event_at(&mut self, event: &InputEvent, now: Instant) -> bool {
        if !self.open {
            return false;
        }
        match event {
            InputEvent::Key(KeyEvent { code: Key::Escape, pressed: true, .. }) => {
                self.try_close();
                return true;
            }
            InputEvent::Resize { width, height } => {
                self.regenerate(Size::new(*width, *height));
                return false;
            }
            _ => {}
        }

        let double = self.config.remap_double_click && self.track_double_click(event, now);
        let consumed = match &mut self.tree {
            Some(tree) => self.router.handle(tree, event),
            None => false,
        };
        if double {
            trace!("double press remapped to escape");
            return self.route_event_at(&InputEvent::Key(KeyEvent::plain(Key::Escape)), now);
        }
        consumed
    }

    fn track_double_click(&mut self, event: &InputEvent, now: Instant) -> bool {
        let InputEvent::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseAction::Down(MouseBtn::Left) => {
                self.double_click.on_press(mouse.position(), now);
                false
            }
            MouseAction::Up(MouseBtn::Left) => self.double_click.on_release(now),
            _ => false,
        }
    }

    fn try_close(&mut self) {
        if self.config.allow_close {
            debug!("menu closed");
            self.open = false;
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current tree, if the last parse succeeded.
    pub fn tree(&self) -> Option<&ElementTree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut ElementTree> {
        self.tree.as_mut()
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Warnings from the last parse.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the source changed since the last parse.
    pub fn needs_reparse(&self) -> bool {
        self.needs_reparse
    }

    /// Viewport of the last regenerate.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }
}

impl std::fmt::Debug for FormspecMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormspecMenu")
            .field("config", &self.config)
            .field("needs_reparse", &self.needs_reparse)
            .field("nodes", &self.tree.as_ref().map(ElementTree::len))
            .field("router", &self.router)
            .field("viewport", &self.viewport)
            .field("open", &self.open)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, MouseEvent};
    use crate::testing::{MonospaceFont, TextureMap};

    const PANEL: &str = "beginrect[0,0,1,1]bgcolor[#202020]\
                           beginrect[0,0,0.5,1]button[]text[OK]endrect[]\
                           beginrect[0.5,0,1,1]input[]endrect[]\
                         endrect[]";

    fn menu(source: &str) -> FormspecMenu {
        FormspecMenu::new(source, Rc::new(MonospaceFont::new(10, 20)), Box::new(TextureMap::new()))
    }

    fn key(code: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(code))
    }

    fn mouse(kind: MouseAction, x: i32, y: i32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }

    // ── MenuConfig ───────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = MenuConfig::default();
        assert!(config.remap_double_click);
        assert_eq!(config.double_click_ms, 400);
        assert_eq!(config.double_click_radius, 30);
        assert!(config.allow_close);
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn config_builder() {
        let config = MenuConfig::new()
            .with_remap_double_click(false)
            .with_double_click(250, 5)
            .with_allow_close(false)
            .with_text_color(Color::BLACK)
            .with_caret_color(Color::WHITE);
        assert!(!config.remap_double_click);
        assert_eq!((config.double_click_ms, config.double_click_radius), (250, 5));
        assert!(!config.allow_close);
        assert_eq!(config.palette(), Palette { text: Color::BLACK, caret: Color::WHITE });
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MenuConfig =
            serde_json::from_str(r#"{"allow_close": false, "caret_color": "lime"}"#).unwrap();
        assert!(!config.allow_close);
        assert_eq!(config.caret_color, Color::rgb(0, 255, 0));
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.double_click_ms, 400);
    }

    #[test]
    fn config_rejects_bad_color() {
        assert!(serde_json::from_str::<MenuConfig>(r#"{"text_color": "nope"}"#).is_err());
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn parse_is_deferred_to_regenerate() {
        let mut menu = menu(PANEL);
        assert!(menu.needs_reparse());
        assert!(menu.tree().is_none());

        menu.regenerate(Size::new(800, 600));
        assert!(!menu.needs_reparse());
        assert_eq!(menu.tree().map(ElementTree::len), Some(4));
        assert_eq!(menu.viewport(), Rect::new(0, 0, 800, 600));
    }

    #[test]
    fn set_source_marks_dirty() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        menu.set_source("beginrect[0,0,1,1]endrect[]");
        assert!(menu.needs_reparse());
        assert_eq!(menu.tree().map(ElementTree::len), Some(4));

        menu.regenerate(Size::new(800, 600));
        assert_eq!(menu.tree().map(ElementTree::len), Some(2));
    }

    #[test]
    fn empty_viewport_is_ignored() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(0, 600));
        assert!(menu.needs_reparse());
        assert!(menu.tree().is_none());
    }

    #[test]
    fn fatal_error_closes_menu() {
        let mut menu = menu("beginrect[0,0,1,1]");
        menu.regenerate(Size::new(800, 600));
        assert!(menu.tree().is_none());
        assert!(!menu.is_open());
        assert!(!menu.route_event(&key(Key::Char('a'))));
    }

    #[test]
    fn warnings_are_kept() {
        let mut menu = menu("beginrect[0,0,1,1]sparkle[]endrect[]");
        menu.regenerate(Size::new(800, 600));
        assert_eq!(menu.warnings(), &[ParseWarning::UnknownTag("sparkle".into())]);
    }

    #[test]
    fn reparse_resets_router() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        menu.route_event(&mouse(MouseAction::Moved, 100, 100));
        assert!(menu.router().hovered().is_some());

        menu.set_source(PANEL);
        menu.regenerate(Size::new(800, 600));
        assert_eq!(menu.router(), &EventRouter::default());
    }

    #[test]
    fn resize_relays_out() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        assert!(!menu.route_event(&InputEvent::Resize { width: 400, height: 300 }));
        let tree = menu.tree().unwrap();
        let panel = tree.children(tree.root())[0];
        let button = tree.children(panel)[0];
        assert_eq!(tree.get(button).unwrap().absolute, Rect::new(0, 0, 200, 300));
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn escape_closes() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        assert!(menu.route_event(&key(Key::Escape)));
        assert!(!menu.is_open());
    }

    #[test]
    fn escape_is_consumed_when_closing_is_not_allowed() {
        let mut menu = menu(PANEL).with_config(MenuConfig::new().with_allow_close(false));
        menu.regenerate(Size::new(800, 600));
        assert!(menu.route_event(&InputEvent::Key(KeyEvent::new(Key::Escape, Modifiers::SHIFT))));
        assert!(menu.is_open());
    }

    #[test]
    fn typing_into_focused_input() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        assert!(!menu.route_event(&mouse(MouseAction::Down(MouseBtn::Left), 600, 300)));
        menu.route_event(&mouse(MouseAction::Up(MouseBtn::Left), 600, 300));
        for ch in "hi".chars() {
            assert!(menu.route_event(&key(Key::Char(ch))));
        }
        let tree = menu.tree().unwrap();
        let focused = menu.router().focused().and_then(|id| tree.get(id)).unwrap();
        assert_eq!(focused.text_str(), "hi");
    }

    #[test]
    fn key_releases_neither_type_nor_close() {
        let mut menu = menu(PANEL);
        menu.regenerate(Size::new(800, 600));
        menu.route_event(&mouse(MouseAction::Down(MouseBtn::Left), 600, 300));
        menu.route_event(&mouse(MouseAction::Up(MouseBtn::Left), 600, 300));
        assert!(menu.route_event(&key(Key::Char('a'))));
        assert!(!menu.route_event(&InputEvent::Key(KeyEvent::release(Key::Char('a'), Modifiers::NONE))));
        assert!(!menu.route_event(&InputEvent::Key(KeyEvent::release(Key::Escape, Modifiers::NONE))));
        assert!(menu.is_open());
        let tree = menu.tree().unwrap();
        let focused = menu.router().focused().and_then(|id| tree.get(id)).unwrap();
        assert_eq!(focused.text_str(), "a");
    }

    #[test]
    fn double_press_remap_can_be_disabled() {
        let mut menu = menu(PANEL).with_config(MenuConfig::new().with_remap_double_click(false));
        menu.regenerate(Size::new(800, 600));
        let start = Instant::now();
        for ms in [0, 50] {
            let at = start + Duration::from_millis(ms);
            menu.route_event_at(&mouse(MouseAction::Down(MouseBtn::Left), 100, 100), at);
            menu.route_event_at(&mouse(MouseAction::Up(MouseBtn::Left), 100, 100), at);
        }
        assert!(menu.is_open());
    }
}
