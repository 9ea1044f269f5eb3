use crate::error::{TfError, TfResult};

use super::defaults;

/// Per curve settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveOptions {
    /// Number of samples in every function array, tables are `resolution^2`
    pub resolution: usize,
    /// Keep Bezier handles inside `[0;1]^2` when their point moves
    pub clamp_controls: bool,
}

impl CurveOptions {
    pub fn new(resolution: usize, clamp_controls: bool) -> CurveOptions {
        CurveOptions {
            resolution,
            clamp_controls,
        }
    }

    pub fn builder() -> CurveOptionsBuilder {
        CurveOptionsBuilder {
            opts: CurveOptions::default(),
        }
    }
}

impl Default for CurveOptions {
    fn default() -> Self {
        CurveOptions::new(defaults::TEXTURE_RESOLUTION, defaults::CLAMP_CONTROL_POINTS)
    }
}

pub struct CurveOptionsBuilder {
    opts: CurveOptions,
}

impl CurveOptionsBuilder {
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.opts.resolution = resolution;
        self
    }

    pub fn clamp_controls(mut self, clamp_controls: bool) -> Self {
        self.opts.clamp_controls = clamp_controls;
        self
    }

    /// Fails on resolution smaller than 2
    pub fn build(self) -> TfResult<CurveOptions> {
        if self.opts.resolution < 2 {
            return Err(TfError::InvalidCurve(format!(
                "resolution {} too small",
                self.opts.resolution
            )));
        }
        Ok(self.opts)
    }

    pub fn build_unchecked(self) -> CurveOptions {
        self.opts
    }
}
