//! Texture references and the texture lookup collaborator

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single frame of a texture or texture sheet, referenced by identifier.
///
/// The core never decodes images. A `TextureRef` only becomes drawable when a
/// [`TextureProvider`] resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    /// Texture or texture sheet ID
    pub texture: Uuid,
    /// Frame index within the sheet (0 for plain textures)
    #[serde(default)]
    pub frame: u32,
}

impl TextureRef {
    pub fn new(texture: Uuid, frame: u32) -> Self {
        Self { texture, frame }
    }

    /// Reference the whole of a single-frame texture
    pub fn whole(texture: Uuid) -> Self {
        Self { texture, frame: 0 }
    }
}

/// Turns texture references into something a renderer can draw.
///
/// Implemented by the asset layer; grid correctness never depends on it.
pub trait TextureProvider {
    /// Renderer-specific drawable handle
    type Handle;

    /// Resolve a reference, or `None` if the texture is not loaded
    fn resolve(&self, texture: &TextureRef) -> Option<Self::Handle>;
}
