//! Persistence of curves
//!
//! Curves are exchanged as plain data ([`CurveData`]), the library
//! maps curve names to XML files in one directory.

use nalgebra::Point2;

use crate::transfer::{Location, PointValue};

mod library;
pub mod xml;

pub use library::TfLibrary;

/// Serializable snapshot of one control point
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub location: Location,
    pub position: Point2<f32>,
    /// Missing for left end point
    pub left_control: Option<Point2<f32>>,
    /// Missing for right end point
    pub right_control: Option<Point2<f32>>,
    pub linked: bool,
    pub value: PointValue,
}

/// Serializable snapshot of a curve, points in curve order
#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    pub name: String,
    pub points: Vec<PointRecord>,
}
