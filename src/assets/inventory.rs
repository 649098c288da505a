//! Inventory locations, item stacks and the lookup trait used by inventory grids.
//!
//! An [`InventoryLocation`] is parsed from the serialized string form used in
//! formspecs (`current_player`, `player:<name>`, `nodemeta:<x>,<y>,<z>`,
//! `detached:<name>`). Lookups happen at draw time, every frame, because
//! inventories change underneath an open menu.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ItemStack
// ---------------------------------------------------------------------------

/// A stack of items occupying one inventory slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStack {
    /// Item name. Empty for an empty slot.
    pub name: String,
    /// Number of items in the stack.
    pub count: u16,
}

impl ItemStack {
    /// Create a stack of `count` items named `name`.
    pub fn new(name: impl Into<String>, count: u16) -> Self {
        Self { name: name.into(), count }
    }

    /// An empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() || self.count == 0
    }
}

// ---------------------------------------------------------------------------
// InventoryLocation
// ---------------------------------------------------------------------------

/// Where an inventory lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InventoryLocation {
    Undefined,
    CurrentPlayer,
    Player(String),
    NodeMeta { x: i16, y: i16, z: i16 },
    Detached(String),
}

/// Errors from parsing a serialized inventory location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("unknown inventory location '{0}'")]
    Unknown(String),
    #[error("invalid node position '{0}'")]
    InvalidPosition(String),
}

impl FromStr for InventoryLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "undefined" {
            return Ok(InventoryLocation::Undefined);
        }
        if s == "current_player" {
            return Ok(InventoryLocation::CurrentPlayer);
        }
        if let Some(name) = s.strip_prefix("player:") {
            return Ok(InventoryLocation::Player(name.to_owned()));
        }
        if let Some(name) = s.strip_prefix("detached:") {
            return Ok(InventoryLocation::Detached(name.to_owned()));
        }
        if let Some(pos) = s.strip_prefix("nodemeta:") {
            let coords: Vec<i16> = pos
                .split(',')
                .map(|c| c.trim().parse::<i16>())
                .collect::<Result<_, _>>()
                .map_err(|_| LocationError::InvalidPosition(pos.to_owned()))?;
            return match coords.as_slice() {
                [x, y, z] => Ok(InventoryLocation::NodeMeta { x: *x, y: *y, z: *z }),
                _ => Err(LocationError::InvalidPosition(pos.to_owned())),
            };
        }
        Err(LocationError::Unknown(s.to_owned()))
    }
}

impl fmt::Display for InventoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryLocation::Undefined => f.write_str("undefined"),
            InventoryLocation::CurrentPlayer => f.write_str("current_player"),
            InventoryLocation::Player(name) => write!(f, "player:{name}"),
            InventoryLocation::NodeMeta { x, y, z } => write!(f, "nodemeta:{x},{y},{z}"),
            InventoryLocation::Detached(name) => write!(f, "detached:{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// InventorySource
// ---------------------------------------------------------------------------

/// Runtime lookup failures. Never fatal: the affected grid draws no slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("the inventory location \"{0}\" doesn't exist")]
    LocationNotFound(InventoryLocation),
    #[error("the inventory list \"{0}\" doesn't exist")]
    ListNotFound(String),
}

/// Host-side inventory storage.
pub trait InventorySource {
    /// Return the items of list `name` at `location`, in slot order.
    fn list(&self, location: &InventoryLocation, name: &str) -> Result<&[ItemStack], LookupError>;
}

// ===========================================================================
// Tests
// ===========================================================================
