//! Texture handles and the lookup trait that resolves them by name.

/// Opaque handle to a texture owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Resolves texture names found in a formspec into handles.
pub trait TextureSource {
    /// Look up a texture by name. Returns `None` if the texture is unknown.
    fn texture(&self, name: &str) -> Option<TextureId>;
}

impl<T: TextureSource + ?Sized> TextureSource for &T {
    fn texture(&self, name: &str) -> Option<TextureId> {
        (**self).texture(name)
    }
}
