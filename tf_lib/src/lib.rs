//! Transfer function curves for volume ray casting
//!
//! A [`Curve`] maps normalized sample intensity to color, opacity and material
//! parameters. It is edited through its control points and baked into
//! function arrays and preintegration tables, which are handed to a [`TextureSink`].

pub mod baked;
pub mod color;
pub mod common;
pub mod error;
pub mod registry;
pub mod storage;
pub mod test_helpers;
pub mod texture;
pub mod transfer;

pub use error::{TfError, TfResult};
pub use registry::{CurveId, CurveRegistry, SharedCurve};
pub use storage::{CurveData, PointRecord, TfLibrary};
pub use texture::{MemoryTextures, TextureHandle, TextureSink};
pub use transfer::{
    ControlPoint, Curve, CurveOptions, FunctionArrays, Location, PointHandle, PointValue,
    PreintegrationTable, PreintegrationTables, Table,
};
