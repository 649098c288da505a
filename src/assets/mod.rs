//! Host-provided resources: textures and inventories.
//!
//! Both are consumed through narrow traits so the crate never loads images or
//! stores items itself.

pub mod inventory;
pub mod texture;

pub use inventory::{InventoryLocation, InventorySource, ItemStack, LocationError, LookupError};
pub use texture::{TextureId, TextureSource};
