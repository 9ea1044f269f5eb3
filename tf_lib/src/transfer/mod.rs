//! Control points, the curve through them and the tables built from it

pub mod bezier;
mod curve;
pub mod defaults;
mod function;
mod options;
mod point;
mod preintegration;
mod value;

pub use curve::{Curve, CurveTextures};
pub use function::{FunctionArrays, Table};
pub use options::{CurveOptions, CurveOptionsBuilder};
pub use point::{ControlPoint, Location, PointHandle};
pub use preintegration::{PreintegrationTable, PreintegrationTables};
pub use value::PointValue;
