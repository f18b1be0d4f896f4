//! Tilescope renders a scrollable, zoomable map made of independently loaded square tiles.
//!
//! Each frame is produced by a [`FrameRenderer`]:
//!
//! - the view controllers ([`ZoomController`], [`PanController`]) advance by the elapsed time
//! - the [`ViewportTranslator`] places the [`TileGrid`] on screen
//! - every enabled [`Layer`] is drawn tile by tile in grid space
//! - the [`Border`] and the overlay [`Widget`]s are drawn in screen space
//!
//! Drawing goes through the [`Surface`] trait. [`CpuSurface`] rasterizes with `vello_cpu`;
//! [`RecordingSurface`] records calls for inspection. Every surface call reports whether it took
//! the accelerated path, and the renderer turns batches of those reports into an acceleration
//! ratio shown to widgets.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod render;
mod settings;
mod tile;
mod view;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8Premul, Transform2D, Vec2, Viewport};
pub use crate::foundation::error::{TilescopeError, TilescopeResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::raster::{ImageId, RasterImage};
pub use crate::assets::table::{AssetTable, ChromeAssets, names as asset_names};
pub use crate::assets::text::{
    FixedAdvanceMetrics, ParleyTextMetrics, TextBrushRgba8, TextExtent, TextLayoutEngine,
    TextMetrics,
};
pub use crate::config::{
    ENV_MAX_FRAME_DELTA_MS, ENV_SAMPLE_THRESHOLD, PanOpts, RendererOpts, ZoomOpts,
};
pub use crate::render::accel::{AccelerationSampler, DrawPath};
pub use crate::render::border::Border;
pub use crate::render::cpu::{CpuSurface, ENV_IMAGE_CACHE_CAPACITY, FrameRGBA};
pub use crate::render::frame::{
    Clock, FrameInput, FrameRenderer, FrameStats, ManualClock, SystemClock, TileCursor,
    clamp_frame_delta,
};
pub use crate::render::layer::{FadeInLayer, GridLayer, Layer, TileImageLayer};
pub use crate::render::surface::{DrawCall, DrawKind, Interpolation, RecordingSurface, Surface};
pub use crate::render::widget::{
    AccelerationWidget, Anchor, CursorWidget, FpsWidget, ScaleWidget, TextPanel, Widget,
    WidgetContext, WidgetFade,
};
pub use crate::settings::{Dimension, Setting, SettingAction, bind_toggle, bind_value};
pub use crate::tile::grid::{
    GridItem, GridIter, GridLayout, Resolution, TILE_SIZE, Tile, TileCoord, TileGrid,
};
pub use crate::tile::synthetic::{synthetic_grid, synthetic_tile_image};
pub use crate::view::pan::PanController;
pub use crate::view::translator::ViewportTranslator;
pub use crate::view::zoom::ZoomController;
