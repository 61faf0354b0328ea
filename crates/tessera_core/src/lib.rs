//! Core data structures for tessera
//!
//! This crate provides the small value types shared by the autotile and grid
//! crates:
//! - `GridCoord` - A cell position on the logically infinite grid
//! - `BlockSize` - Macro-tile dimensions and the block alignment transform
//! - `TextureRef` - A frame inside a texture or texture sheet, by identifier
//! - `TextureProvider` - Lookup collaborator turning a `TextureRef` into a drawable handle
//! - `TileTransform` - World-space placement handed to a renderer

mod coord;
mod texture;
mod transform;

pub use coord::{BlockSize, GridCoord};
pub use texture::{TextureProvider, TextureRef};
pub use transform::TileTransform;
