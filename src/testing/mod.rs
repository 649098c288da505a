//! Headless testing kit: fakes for every host collaborator, a tree dump for
//! snapshots, and a [`Pilot`] that drives a menu with simulated input.
//!
//! Nothing here touches a window or a real font, so tests run anywhere.

pub mod fakes;
pub mod pilot;
pub mod snapshot;

pub use fakes::{DrawCommand, MemoryInventory, MonospaceFont, RecordingRenderer, TextureMap};
pub use pilot::Pilot;
pub use snapshot::tree_to_string;
