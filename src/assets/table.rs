use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::{decode::decode_image, raster::RasterImage},
    foundation::{
        error::{TilescopeError, TilescopeResult},
        math::{Fnv1a64, mul_div255_u8},
    },
};

/// Logical names of the images the renderer itself needs.
pub mod names {
    pub const BORDER_TOP_LEFT: &str = "border/top_left";
    pub const BORDER_TOP_RIGHT: &str = "border/top_right";
    pub const BORDER_BOTTOM_LEFT: &str = "border/bottom_left";
    pub const BORDER_BOTTOM_RIGHT: &str = "border/bottom_right";
    pub const BORDER_TOP: &str = "border/top";
    pub const BORDER_BOTTOM: &str = "border/bottom";
    pub const BORDER_LEFT: &str = "border/left";
    pub const BORDER_RIGHT: &str = "border/right";
    pub const VOID_TEXTURE: &str = "void";

    /// Every name [`super::ChromeAssets::resolve`] looks up.
    pub const CHROME: [&str; 9] = [
        BORDER_TOP_LEFT,
        BORDER_TOP_RIGHT,
        BORDER_BOTTOM_LEFT,
        BORDER_BOTTOM_RIGHT,
        BORDER_TOP,
        BORDER_BOTTOM,
        BORDER_LEFT,
        BORDER_RIGHT,
        VOID_TEXTURE,
    ];
}

/// Pre-decoded raster assets addressed by logical name.
///
/// The table is built up front and handed to the renderer; nothing is loaded lazily while a frame
/// is being drawn.
#[derive(Clone, Debug, Default)]
pub struct AssetTable {
    images: BTreeMap<String, Arc<RasterImage>>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with generated border shadows and void texture.
    pub fn with_builtin_chrome() -> TilescopeResult<Self> {
        let mut table = Self::new();
        table.insert_builtin_chrome()?;
        Ok(table)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        image: RasterImage,
    ) -> Option<Arc<RasterImage>> {
        self.images.insert(name.into(), Arc::new(image))
    }

    pub fn get(&self, name: &str) -> TilescopeResult<Arc<RasterImage>> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| TilescopeError::asset(format!("unknown asset '{name}'")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Load `<root>/<name>.png` for every requested logical name.
    pub fn load_files<'a>(
        &mut self,
        root: impl AsRef<Path>,
        names: impl IntoIterator<Item = &'a str>,
    ) -> TilescopeResult<()> {
        let root = root.as_ref();
        for name in names {
            let path = asset_path(root, name);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read asset '{}'", path.display()))?;
            let image = decode_image(&bytes)
                .map_err(|e| TilescopeError::asset(format!("{}: {e}", path.display())))?;
            self.insert(name, image);
        }
        Ok(())
    }

    /// Fill in generated chrome for every chrome name not already present.
    pub fn insert_builtin_chrome(&mut self) -> TilescopeResult<()> {
        for name in names::CHROME {
            if self.contains(name) {
                continue;
            }
            let image = if name == names::VOID_TEXTURE {
                void_texture()?
            } else {
                border_shadow(name)?
            };
            self.images.insert(name.to_string(), Arc::new(image));
        }
        Ok(())
    }
}

fn asset_path(root: &Path, name: &str) -> PathBuf {
    let mut p = root.to_path_buf();
    for part in name.split('/') {
        p.push(part);
    }
    p.set_extension("png");
    p
}

/// Border images and void texture resolved once at renderer construction.
#[derive(Clone, Debug)]
pub struct ChromeAssets {
    pub top_left: Arc<RasterImage>,
    pub top_right: Arc<RasterImage>,
    pub bottom_left: Arc<RasterImage>,
    pub bottom_right: Arc<RasterImage>,
    pub top: Arc<RasterImage>,
    pub bottom: Arc<RasterImage>,
    pub left: Arc<RasterImage>,
    pub right: Arc<RasterImage>,
    pub void_texture: Arc<RasterImage>,
}

impl ChromeAssets {
    pub fn resolve(table: &AssetTable) -> TilescopeResult<Self> {
        Ok(Self {
            top_left: table.get(names::BORDER_TOP_LEFT)?,
            top_right: table.get(names::BORDER_TOP_RIGHT)?,
            bottom_left: table.get(names::BORDER_BOTTOM_LEFT)?,
            bottom_right: table.get(names::BORDER_BOTTOM_RIGHT)?,
            top: table.get(names::BORDER_TOP)?,
            bottom: table.get(names::BORDER_BOTTOM)?,
            left: table.get(names::BORDER_LEFT)?,
            right: table.get(names::BORDER_RIGHT)?,
            void_texture: table.get(names::VOID_TEXTURE)?,
        })
    }
}

const SHADOW_DEPTH: u32 = 10;
const SHADOW_MAX_ALPHA: u16 = 160;

fn shadow_alpha(distance_from_edge: u32) -> u8 {
    let d = distance_from_edge.min(SHADOW_DEPTH);
    let falloff = u16::try_from(((SHADOW_DEPTH - d) * 255) / SHADOW_DEPTH).unwrap_or(255);
    let eased = mul_div255_u8(falloff, falloff);
    mul_div255_u8(u16::from(eased), SHADOW_MAX_ALPHA)
}

fn border_shadow(name: &str) -> TilescopeResult<RasterImage> {
    let n = SHADOW_DEPTH;
    let last = n - 1;
    let (w, h) = match name {
        names::BORDER_TOP | names::BORDER_BOTTOM => (1, n),
        names::BORDER_LEFT | names::BORDER_RIGHT => (n, 1),
        _ => (n, n),
    };
    let distance = |x: u32, y: u32| -> u32 {
        match name {
            names::BORDER_TOP_LEFT => x.min(y),
            names::BORDER_TOP_RIGHT => (last - x).min(y),
            names::BORDER_BOTTOM_LEFT => x.min(last - y),
            names::BORDER_BOTTOM_RIGHT => (last - x).min(last - y),
            names::BORDER_TOP => y,
            names::BORDER_BOTTOM => last - y,
            names::BORDER_LEFT => x,
            _ => last - x,
        }
    };

    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[0, 0, 0, shadow_alpha(distance(x, y))]);
        }
    }
    RasterImage::from_premul_rgba8(w, h, data)
}

const VOID_SIZE: u32 = 16;

fn void_texture() -> TilescopeResult<RasterImage> {
    let mut data = Vec::with_capacity((VOID_SIZE * VOID_SIZE * 4) as usize);
    for y in 0..VOID_SIZE {
        for x in 0..VOID_SIZE {
            let mut h = Fnv1a64::new_default();
            h.write_u32(x);
            h.write_u32(y);
            let speck = h.finish();
            let base = 14 + (speck % 6) as u8;
            let (r, g, b) = if speck % 23 == 0 {
                (180, 170, 200)
            } else {
                (base, base - 4, base + 10)
            };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    RasterImage::from_premul_rgba8(VOID_SIZE, VOID_SIZE, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/table.rs"]
mod tests;
