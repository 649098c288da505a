//! # formspec
//!
//! Declarative dialog trees for game menus: nested rectangles carrying
//! backgrounds, images, text, buttons, text inputs and inventory grids.
//!
//! A formspec arrives either as a compact tag stream
//! (`beginrect[0,0,1,1]bgcolor[#000]text[Hi]endrect[]`) or as a JSON document.
//! Either way it becomes an [`ElementTree`](dom::ElementTree) of typed
//! elements with inherited style, is laid out from fractional parent-relative
//! rects into absolute pixels, and is then drawn through a host [`Renderer`]
//! and driven by routed input events.
//!
//! ## Core Systems
//!
//! - **[`parse`]**: tag-stream and JSON front ends, warnings vs fatal errors
//! - **[`dom`]**: slotmap-backed element arena with typed element kinds
//! - **[`style`]**: copy-on-write style records, colors, text alignment
//! - **[`layout`]**: fractional to absolute rects, aspect clamping, inventory grids
//! - **[`text`]**: word wrapping into line rects with caret placement
//! - **[`event`]**: input vocabulary, hit testing, hover/click/focus routing
//! - **[`render`]**: painter's-order traversal over the [`Renderer`] trait
//! - **[`menu`]**: [`FormspecMenu`] and [`MenuConfig`] tying it all together
//! - **[`testing`]**: fakes, tree dumps and a [`Pilot`](testing::Pilot)
//!
//! The host supplies fonts ([`FontMetrics`](text::FontMetrics)), textures
//! ([`TextureSource`](assets::TextureSource)), inventories
//! ([`InventorySource`](assets::InventorySource)) and the renderer.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use formspec::geometry::Size;
//! use formspec::testing::{MonospaceFont, RecordingRenderer, MemoryInventory, TextureMap};
//! use formspec::FormspecMenu;
//!
//! let mut menu = FormspecMenu::new(
//!     "beginrect[0,0,0.5,1]button[]text[OK]endrect[]",
//!     Rc::new(MonospaceFont::default()),
//!     Box::new(TextureMap::new()),
//! );
//! menu.regenerate(Size::new(800, 600));
//!
//! let mut renderer = RecordingRenderer::new();
//! menu.draw(&mut renderer, &MemoryInventory::new());
//! assert_eq!(renderer.texts(), vec!["OK"]);
//! ```

// Foundation
pub mod geometry;
pub mod assets;

// Model
pub mod style;
pub mod text;
pub mod dom;

// Front ends and layout
pub mod parse;
pub mod layout;

// Interaction and drawing
pub mod event;
pub mod render;

// Menu
pub mod menu;

// Test support
pub mod testing;

pub use menu::{FormspecMenu, MenuConfig};
pub use parse::{parse, ParseError, ParseWarning, Parsed};
pub use render::Renderer;
