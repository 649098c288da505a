//! Style properties: key/value pairs applied to a [`StyleSpec`].
//!
//! Both formspec syntaxes share this table:
//!
//! | key | value |
//! |---|---|
//! | `button_standard`, `button_hover`, `button_pressed` | texture name, empty clears |
//! | `text_align` | `top`, `topright`, `right`, `bottomright`, `bottom`, `bottomleft`, `left`, `topleft`, `center` |
//! | `inventory_background_color`, `inventory_border_color` | CSS color |
//! | `inventory_border_width` | non-negative integer pixels |

use std::rc::Rc;

use crate::assets::{TextureId, TextureSource};

use super::align::TextAlign;
use super::spec::StyleSpec;

/// Errors from applying a style property.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown style property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

/// Side effects of a property that was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// A texture name that did not resolve. The skin it was meant for is
    /// cleared so the button falls back to the default pane.
    pub missing_texture: Option<String>,
}

impl PropertyError {
    fn invalid(property: &str, message: impl Into<String>) -> Self {
        PropertyError::InvalidValue { property: property.to_owned(), message: message.into() }
    }
}

fn lookup_texture(value: &str, textures: &dyn TextureSource, applied: &mut Applied) -> Option<TextureId> {
    let name = value.trim();
    if name.is_empty() {
        return None;
    }
    let texture = textures.texture(name);
    if texture.is_none() {
        applied.missing_texture = Some(name.to_owned());
    }
    texture
}

/// Apply a single property to `style` in place.
///
/// On error `style` is left untouched. An unknown texture is not an error:
/// the skin is cleared and the name reported in [`Applied`].
pub fn apply_property(
    style: &mut StyleSpec,
    key: &str,
    value: &str,
    textures: &dyn TextureSource,
) -> Result<Applied, PropertyError> {
    let key = key.trim();
    let mut applied = Applied::default();
    match key {
        "button_standard" => style.button_standard = lookup_texture(value, textures, &mut applied),
        "button_hover" => style.button_hover = lookup_texture(value, textures, &mut applied),
        "button_pressed" => style.button_pressed = lookup_texture(value, textures, &mut applied),
        "text_align" => {
            style.text_align = TextAlign::from_keyword(value)
                .ok_or_else(|| PropertyError::invalid(key, format!("unknown alignment '{value}'")))?;
        }
        "inventory_background_color" => {
            style.inventory_background =
                value.parse().map_err(|e| PropertyError::invalid(key, format!("{e}")))?;
        }
        "inventory_border_color" => {
            style.inventory_border =
                value.parse().map_err(|e| PropertyError::invalid(key, format!("{e}")))?;
        }
        "inventory_border_width" => {
            style.border_width = value
                .trim()
                .parse::<u16>()
                .map(i32::from)
                .map_err(|_| PropertyError::invalid(key, format!("expected pixel count, got '{value}'")))?;
        }
        other => return Err(PropertyError::UnknownProperty(other.to_owned())),
    }
    Ok(applied)
}

/// Copy-on-write restyle: returns a new record with the property applied, or
/// `current` itself when the property leaves the style unchanged.
pub fn restyle(
    current: &Rc<StyleSpec>,
    key: &str,
    value: &str,
    textures: &dyn TextureSource,
) -> Result<(Rc<StyleSpec>, Applied), PropertyError> {
    let mut next = StyleSpec::clone(current);
    let applied = apply_property(&mut next, key, value, textures)?;
    let style = if next.same_as(current) { Rc::clone(current) } else { Rc::new(next) };
    Ok((style, applied))
}
