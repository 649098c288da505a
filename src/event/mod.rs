//! Events: input vocabulary, double-press detection and tree routing.

pub mod double_click;
pub mod input;
pub mod router;

pub use double_click::DoubleClickDetector;
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use router::{hit_test, EventRouter};
