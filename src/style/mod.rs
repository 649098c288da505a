//! Style records inherited down the element tree.
//!
//! [`StyleSpec`] is shared through `Rc` and replaced copy-on-write by
//! [`restyle`] whenever a node overrides a property.

pub mod align;
pub mod color;
pub mod property;
pub mod spec;

pub use align::TextAlign;
pub use color::{Color, ColorError};
pub use property::{apply_property, restyle, Applied, PropertyError};
pub use spec::StyleSpec;
