//! Destination of finished lookup tables

use std::collections::HashMap;

use crate::color::RGBA;

/// Opaque id of uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub u32);

/// Receives tables produced by curves
///
/// Typically a GPU texture layer. Curves never read texels back.
pub trait TextureSink {
    fn upload_1d(&mut self, width: usize, texels: &[RGBA]) -> TextureHandle;

    /// `texels` are stored with x as the fast axis
    fn upload_2d(&mut self, width: usize, height: usize, texels: &[RGBA]) -> TextureHandle;

    /// Texture was superseded by a newer upload
    fn release(&mut self, _handle: TextureHandle) {}
}

/// Uploaded texture kept in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: usize,
    /// 1 for 1D textures
    pub height: usize,
    pub texels: Vec<RGBA>,
}

/// Sink storing copies of uploaded tables
#[derive(Debug, Default)]
pub struct MemoryTextures {
    next: u32,
    textures: HashMap<TextureHandle, Texture>,
}

impl MemoryTextures {
    pub fn new() -> MemoryTextures {
        Default::default()
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle)
    }

    /// Number of live textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn insert(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.textures.insert(handle, texture);
        handle
    }
}

impl TextureSink for MemoryTextures {
    fn upload_1d(&mut self, width: usize, texels: &[RGBA]) -> TextureHandle {
        self.insert(Texture {
            width,
            height: 1,
            texels: texels.to_vec(),
        })
    }

    fn upload_2d(&mut self, width: usize, height: usize, texels: &[RGBA]) -> TextureHandle {
        self.insert(Texture {
            width,
            height,
            texels: texels.to_vec(),
        })
    }

    fn release(&mut self, handle: TextureHandle) {
        self.textures.remove(&handle);
    }
}
