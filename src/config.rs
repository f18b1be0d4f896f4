use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{TilescopeError, TilescopeResult};

/// Environment variable overriding [`RendererOpts::sample_threshold`].
pub const ENV_SAMPLE_THRESHOLD: &str = "TILESCOPE_SAMPLE_THRESHOLD";
/// Environment variable overriding [`RendererOpts::max_frame_delta_ms`].
pub const ENV_MAX_FRAME_DELTA_MS: &str = "TILESCOPE_MAX_FRAME_DELTA_MS";

/// Options controlling frame rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendererOpts {
    /// Operations that must be observed before a new acceleration ratio is published.
    pub sample_threshold: u64,
    /// Upper bound for the per-frame elapsed time, in milliseconds.
    pub max_frame_delta_ms: u64,
    /// Scale applied to the void texture before tiling it over the grid.
    pub void_texture_scale: f64,
    /// Corner size of the border decoration in pixels.
    pub border_inset_px: u32,
    /// Straight RGBA colour used to clear the surface each frame.
    pub clear_rgba: [u8; 4],
    pub zoom: ZoomOpts,
    pub pan: PanOpts,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            sample_threshold: 500,
            max_frame_delta_ms: 100,
            void_texture_scale: 4.0,
            border_inset_px: 10,
            clear_rgba: [0, 0, 0, 255],
            zoom: ZoomOpts::default(),
            pan: PanOpts::default(),
        }
    }
}

/// Zoom smoothing and bounds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomOpts {
    /// Zoom factor (screen pixels per world unit) at startup.
    pub initial: f64,
    pub min: f64,
    pub max: f64,
    /// Multiplicative change per wheel notch; must be > 1.
    pub step: f64,
    /// Exponential approach rate toward the target, per second.
    pub rate_per_sec: f64,
}

impl Default for ZoomOpts {
    fn default() -> Self {
        Self {
            initial: 0.25,
            min: 1.0 / 64.0,
            max: 4.0,
            step: 1.1,
            rate_per_sec: 12.0,
        }
    }
}

/// Panning inertia.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanOpts {
    /// Keep gliding after a drag is released.
    pub smooth: bool,
    /// Exponential velocity decay, per second.
    pub friction_per_sec: f64,
    /// Glide stops below this speed, in screen pixels per second.
    pub stop_speed: f64,
}

impl Default for PanOpts {
    fn default() -> Self {
        Self {
            smooth: true,
            friction_per_sec: 3.0,
            stop_speed: 1.0,
        }
    }
}

impl RendererOpts {
    pub fn from_json_str(s: &str) -> TilescopeResult<Self> {
        let opts: Self =
            serde_json::from_str(s).map_err(|e| TilescopeError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TilescopeResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read renderer options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string(&self) -> TilescopeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TilescopeError::serde(e.to_string()))
    }

    /// Apply `TILESCOPE_*` environment overrides. Unparseable values are ignored with a warning.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_SAMPLE_THRESHOLD) {
            match v.trim().parse::<u64>() {
                Ok(n) => self.sample_threshold = n,
                Err(_) => {
                    tracing::warn!(key = ENV_SAMPLE_THRESHOLD, value = %v, "ignoring override")
                }
            }
        }
        if let Some(v) = lookup(ENV_MAX_FRAME_DELTA_MS) {
            match v.trim().parse::<u64>() {
                Ok(n) => self.max_frame_delta_ms = n,
                Err(_) => {
                    tracing::warn!(key = ENV_MAX_FRAME_DELTA_MS, value = %v, "ignoring override")
                }
            }
        }
        self
    }

    pub fn validate(&self) -> TilescopeResult<()> {
        let z = &self.zoom;
        for (name, v) in [
            ("zoom.initial", z.initial),
            ("zoom.min", z.min),
            ("zoom.max", z.max),
            ("zoom.step", z.step),
            ("zoom.rate_per_sec", z.rate_per_sec),
            ("pan.friction_per_sec", self.pan.friction_per_sec),
            ("pan.stop_speed", self.pan.stop_speed),
            ("void_texture_scale", self.void_texture_scale),
        ] {
            if !v.is_finite() {
                return Err(TilescopeError::validation(format!("{name} must be finite")));
            }
        }
        if z.min <= 0.0 || z.max <= 0.0 {
            return Err(TilescopeError::validation("zoom bounds must be > 0"));
        }
        if z.min > z.max {
            return Err(TilescopeError::validation("zoom.min must be <= zoom.max"));
        }
        if z.step <= 1.0 {
            return Err(TilescopeError::validation("zoom.step must be > 1"));
        }
        if z.rate_per_sec <= 0.0 {
            return Err(TilescopeError::validation("zoom.rate_per_sec must be > 0"));
        }
        if self.pan.friction_per_sec < 0.0 || self.pan.stop_speed < 0.0 {
            return Err(TilescopeError::validation("pan options must be >= 0"));
        }
        if self.void_texture_scale <= 0.0 {
            return Err(TilescopeError::validation("void_texture_scale must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
