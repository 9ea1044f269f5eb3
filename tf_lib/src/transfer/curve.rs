use std::collections::BTreeSet;

use log::{debug, error, warn};
use nalgebra::{point, vector, Point2, Vector2};

use crate::{
    color::RGBA,
    common::Domain,
    error::{TfError, TfResult},
    storage::{CurveData, PointRecord},
    texture::{TextureHandle, TextureSink},
};

use super::{
    bezier::build_polyline, defaults, ControlPoint, CurveOptions, FunctionArrays, Location,
    PointHandle, PointValue, PreintegrationTables, Table,
};

/// Texture handles of the last uploaded tables, indexed by [`Table::id`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurveTextures {
    pub function: [Option<TextureHandle>; 3],
    pub preintegration: [Option<TextureHandle>; 3],
}

impl CurveTextures {
    pub fn function(&self, table: Table) -> Option<TextureHandle> {
        self.function[table.id() as usize]
    }

    pub fn preintegration(&self, table: Table) -> Option<TextureHandle> {
        self.preintegration[table.id() as usize]
    }
}

/// Transfer function curve
///
/// Owns control points sorted by x, the first one is always the left end point
/// and the last one the right end point.
/// Edits only mark derived tables dirty, [`Curve::rebuild_if_needed`] brings them up to date.
#[derive(Debug)]
pub struct Curve {
    name: String,
    options: CurveOptions,
    domain: Domain,
    points: Vec<ControlPoint>,
    next_handle: u32,
    function: FunctionArrays,
    preintegration: PreintegrationTables,
    textures: CurveTextures,
    function_dirty: bool,
    preintegration_dirty: bool,
}

impl Curve {
    /// Curve from black transparent to white opaque
    pub fn new(name: impl Into<String>, options: CurveOptions) -> Curve {
        let mut left = ControlPoint::new(PointHandle(0), Location::LeftEnd, point![0.0, 0.0]);
        left.set_value(PointValue::with_color(vector![0.0, 0.0, 0.0]));

        let mut right = ControlPoint::new(PointHandle(1), Location::RightEnd, point![1.0, 1.0]);
        right.set_value(PointValue::with_color(vector![1.0, 1.0, 1.0]));

        Curve::with_points(name.into(), options, vec![left, right], 2)
    }

    fn with_points(
        name: String,
        mut options: CurveOptions,
        points: Vec<ControlPoint>,
        next_handle: u32,
    ) -> Curve {
        if options.resolution < defaults::MIN_RESOLUTION {
            warn!(
                "Resolution {} of '{}' raised to {}",
                options.resolution,
                name,
                defaults::MIN_RESOLUTION
            );
            options.resolution = defaults::MIN_RESOLUTION;
        }

        let function = FunctionArrays::empty(options.resolution);
        let preintegration = PreintegrationTables::new(&function);
        let mut curve = Curve {
            name,
            options,
            domain: Domain::unit(),
            points,
            next_handle,
            function,
            preintegration,
            textures: CurveTextures::default(),
            function_dirty: true,
            preintegration_dirty: true,
        };
        curve.sort_points();
        curve
    }

    //
    // Structure
    //

    /// Add normal point, returns its handle
    ///
    /// Point takes the value the curve currently has at `coord.x`.
    pub fn add(&mut self, coord: Point2<f32>) -> PointHandle {
        let (coord, _) = self.domain.clamp(coord);

        let value = if self.function_dirty {
            let fresh = self.fresh_function();
            fresh.value_at(fresh.index_of(coord.x))
        } else {
            self.function.value_at(self.function.index_of(coord.x))
        };

        let handle = self.new_handle();
        let mut cp = ControlPoint::new(handle, Location::Normal, coord);
        cp.set_value(value);
        self.points.push(cp);

        self.sort_points();
        self.function_dirty = true;
        handle
    }

    /// Remove normal point, end points are kept and `false` is returned
    pub fn delete(&mut self, handle: PointHandle) -> TfResult<bool> {
        let index = self.index_of(handle)?;
        if self.points[index].is_end() {
            return Ok(false);
        }

        self.points.remove(index);
        self.sort_points();
        self.function_dirty = true;
        Ok(true)
    }

    /// Copy point in place, then shift the original slightly to the right
    ///
    /// Returns handle of the copy.
    pub fn duplicate(&mut self, handle: PointHandle) -> TfResult<PointHandle> {
        let index = self.index_of(handle)?;
        let new_handle = self.new_handle();
        let copy = self.points[index].copy_as(new_handle);
        self.points.push(copy);

        self.move_point(handle, vector![defaults::DUPLICATE_OFFSET, 0.0])?;
        Ok(new_handle)
    }

    //
    // Geometry
    //

    /// Move point to `coord` together with its handles
    ///
    /// Returns `true` if the position had to be clamped into the domain.
    /// End points stay on their border, that alone is not reported as clamping.
    pub fn set_position(&mut self, handle: PointHandle, coord: Point2<f32>) -> TfResult<bool> {
        let domain = self.domain;
        let clamp_controls = self.options.clamp_controls;
        let index = self.index_of(handle)?;
        let cp = &mut self.points[index];

        let coord = match cp.location() {
            Location::LeftEnd => point![domain.lower.x, coord.y],
            Location::RightEnd => point![domain.upper.x, coord.y],
            Location::Normal => coord,
        };
        let (target, clamped) = domain.clamp(coord);

        let delta = target - cp.position();
        let mut left = cp.left_control() + delta;
        let mut right = cp.right_control() + delta;
        if clamp_controls {
            left = domain.clamp(left).0;
            right = domain.clamp(right).0;
        }

        cp.set_position(target);
        cp.set_left_control(left);
        cp.set_right_control(right);

        self.sort_points();
        self.function_dirty = true;
        Ok(clamped)
    }

    /// Relative variant of [`Curve::set_position`]
    pub fn move_point(&mut self, handle: PointHandle, delta: Vector2<f32>) -> TfResult<bool> {
        let position = self.position(handle)?;
        self.set_position(handle, position + delta)
    }

    pub fn set_left_control(&mut self, handle: PointHandle, coord: Point2<f32>) -> TfResult<()> {
        let coord = self.clamp_control(coord);
        let index = self.index_of(handle)?;
        self.points[index].set_left_control(coord);
        self.function_dirty = true;
        Ok(())
    }

    pub fn set_right_control(&mut self, handle: PointHandle, coord: Point2<f32>) -> TfResult<()> {
        let coord = self.clamp_control(coord);
        let index = self.index_of(handle)?;
        self.points[index].set_right_control(coord);
        self.function_dirty = true;
        Ok(())
    }

    pub fn position(&self, handle: PointHandle) -> TfResult<Point2<f32>> {
        Ok(self.point(handle)?.position())
    }

    pub fn left_control(&self, handle: PointHandle) -> TfResult<Point2<f32>> {
        Ok(self.point(handle)?.left_control())
    }

    pub fn right_control(&self, handle: PointHandle) -> TfResult<Point2<f32>> {
        Ok(self.point(handle)?.right_control())
    }

    pub fn location(&self, handle: PointHandle) -> TfResult<Location> {
        Ok(self.point(handle)?.location())
    }

    //
    // Value
    //

    pub fn value(&self, handle: PointHandle) -> TfResult<PointValue> {
        Ok(*self.point(handle)?.value())
    }

    /// Only function is marked dirty, preintegration is requested separately
    pub fn set_value(&mut self, handle: PointHandle, value: PointValue) -> TfResult<()> {
        let index = self.index_of(handle)?;
        self.points[index].set_value(value);
        self.function_dirty = true;
        Ok(())
    }

    //
    // Linking
    //

    pub fn is_linked(&self, handle: PointHandle) -> TfResult<bool> {
        Ok(self.point(handle)?.is_linked())
    }

    /// Returns whether link state changed
    pub fn set_linked(&mut self, handle: PointHandle, linked: bool) -> TfResult<bool> {
        let index = self.index_of(handle)?;
        let cp = &mut self.points[index];
        let before = cp.is_linked();
        let changed = cp.set_linked(linked) != before;
        if changed {
            self.mark_dirty();
        }
        Ok(changed)
    }

    /// Returns new link state
    pub fn toggle_linked(&mut self, handle: PointHandle) -> TfResult<bool> {
        let index = self.index_of(handle)?;
        let linked = self.points[index].toggle_linked();
        if linked {
            self.mark_dirty();
        }
        Ok(linked)
    }

    //
    // Picking
    //

    /// Find point under `coord`, returns its handle and offset of `coord` from it
    ///
    /// With overlapping points the one stored last wins.
    pub fn select(
        &self,
        coord: Point2<f32>,
        scale: f32,
        aspect_ratio: f32,
    ) -> Option<(PointHandle, Vector2<f32>)> {
        let mut hit = None;
        for cp in &self.points {
            if cp.intersects_point(&coord, scale, aspect_ratio) {
                hit = Some((cp.handle(), coord - cp.position()));
            }
        }
        hit
    }

    /// Hit test of left handle, offset is reported even on miss
    pub fn intersect_left_control(
        &self,
        handle: PointHandle,
        coord: Point2<f32>,
        scale: f32,
        aspect_ratio: f32,
    ) -> TfResult<(bool, Vector2<f32>)> {
        let cp = self.point(handle)?;
        Ok((
            cp.intersects_left_control(&coord, scale, aspect_ratio),
            coord - cp.left_control(),
        ))
    }

    /// Hit test of right handle, offset is reported even on miss
    pub fn intersect_right_control(
        &self,
        handle: PointHandle,
        coord: Point2<f32>,
        scale: f32,
        aspect_ratio: f32,
    ) -> TfResult<(bool, Vector2<f32>)> {
        let cp = self.point(handle)?;
        Ok((
            cp.intersects_right_control(&coord, scale, aspect_ratio),
            coord - cp.right_control(),
        ))
    }

    pub fn inside_borders(&self, coord: Point2<f32>) -> bool {
        self.domain.contains(&coord)
    }

    /// Handles of all points stored between `start` and `end`, both included
    pub fn row_of_handles(
        &self,
        start: PointHandle,
        end: PointHandle,
    ) -> TfResult<BTreeSet<PointHandle>> {
        let from = self.index_of(start)?;
        let to = self.index_of(end)?;
        let (low, high) = if from <= to { (from, to) } else { (to, from) };

        Ok(self.points[low..=high].iter().map(|cp| cp.handle()).collect())
    }

    //
    // Tables
    //

    pub fn is_function_dirty(&self) -> bool {
        self.function_dirty
    }

    pub fn is_preintegration_dirty(&self) -> bool {
        self.preintegration_dirty
    }

    /// Preintegration tables get rebuilt with the next [`Curve::rebuild_if_needed`]
    pub fn request_preintegration(&mut self) {
        self.preintegration_dirty = true;
    }

    /// Resample curve into function arrays and upload them
    pub fn rebuild_function<S>(&mut self, sink: &mut S)
    where
        S: TextureSink + ?Sized,
    {
        self.function = self.fresh_function();

        let res = self.function.resolution();
        for table in Table::ALL {
            let handle = sink.upload_1d(res, self.function.table(table));
            if let Some(old) = self.textures.function[table.id() as usize].replace(handle) {
                sink.release(old);
            }
        }

        self.function_dirty = false;
    }

    /// Preintegrate current function arrays and upload the tables
    pub fn rebuild_preintegration<S>(&mut self, sink: &mut S)
    where
        S: TextureSink + ?Sized,
    {
        debug!(
            "Preintegrating '{}', resolution {}",
            self.name,
            self.function.resolution()
        );
        self.preintegration = PreintegrationTables::new(&self.function);

        for table in Table::ALL {
            let t = self.preintegration.table(table);
            let res = t.resolution();
            let handle = sink.upload_2d(res, res, t.data());
            if let Some(old) = self.textures.preintegration[table.id() as usize].replace(handle) {
                sink.release(old);
            }
        }

        self.preintegration_dirty = false;
    }

    /// Rebuild whatever is dirty, returns `true` if anything was rebuilt
    pub fn rebuild_if_needed<S>(&mut self, sink: &mut S) -> bool
    where
        S: TextureSink + ?Sized,
    {
        let mut rebuilt = false;
        if self.function_dirty {
            self.rebuild_function(sink);
            rebuilt = true;
        }
        if self.preintegration_dirty {
            self.rebuild_preintegration(sink);
            rebuilt = true;
        }
        rebuilt
    }

    /// Function arrays as of the last rebuild
    pub fn function_arrays(&self) -> &FunctionArrays {
        &self.function
    }

    /// Preintegration tables as of the last rebuild
    pub fn preintegration_tables(&self) -> &PreintegrationTables {
        &self.preintegration
    }

    pub fn textures(&self) -> CurveTextures {
        self.textures
    }

    /// Give all uploaded textures back to the sink
    pub fn release_textures<S>(&mut self, sink: &mut S)
    where
        S: TextureSink + ?Sized,
    {
        let textures = std::mem::take(&mut self.textures);
        for handle in textures
            .function
            .into_iter()
            .chain(textures.preintegration)
            .flatten()
        {
            sink.release(handle);
        }
    }

    /// Texels of the three function arrays at normalized position `x`
    pub fn sample(&self, x: f32) -> (RGBA, RGBA, RGBA) {
        self.function.at(self.function.index_of(x))
    }

    //
    // Misc
    //

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// Number of points, at least 2
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points sorted by x
    pub fn points(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter()
    }

    pub fn handles(&self) -> Vec<PointHandle> {
        self.points.iter().map(|cp| cp.handle()).collect()
    }

    /// Handle of the point at `x = 0`
    pub fn left_end(&self) -> PointHandle {
        self.points[0].handle()
    }

    /// Handle of the point at `x = 1`
    pub fn right_end(&self) -> PointHandle {
        self.points[self.points.len() - 1].handle()
    }

    //
    // Persistence
    //

    pub fn export(&self) -> CurveData {
        let points = self
            .points
            .iter()
            .map(|cp| PointRecord {
                location: cp.location(),
                position: cp.position(),
                left_control: (cp.location() != Location::LeftEnd).then(|| cp.left_control()),
                right_control: (cp.location() != Location::RightEnd).then(|| cp.right_control()),
                linked: cp.is_linked(),
                value: *cp.value(),
            })
            .collect();

        CurveData {
            name: self.name.clone(),
            points,
        }
    }

    /// Build curve from stored data
    ///
    /// Handles are assigned in record order. Values outside of their ranges are clamped.
    /// Fails unless there is exactly one left and one right end point.
    pub fn import(data: CurveData, options: CurveOptions) -> TfResult<Curve> {
        let count = |loc: Location| data.points.iter().filter(|p| p.location == loc).count();
        if count(Location::LeftEnd) != 1 || count(Location::RightEnd) != 1 {
            return Err(TfError::InvalidCurve(format!(
                "'{}' needs exactly one left and one right end point",
                data.name
            )));
        }

        let domain = Domain::unit();
        let mut points = Vec::with_capacity(data.points.len());

        for (i, record) in data.points.iter().enumerate() {
            let coord = match record.location {
                Location::LeftEnd => point![domain.lower.x, record.position.y],
                Location::RightEnd => point![domain.upper.x, record.position.y],
                Location::Normal => record.position,
            };
            let (position, clamped) = domain.clamp(coord);
            if clamped {
                warn!("Point {} of '{}' clamped into domain", i, data.name);
            }

            let value = record.value.clamped();
            if value != record.value {
                warn!("Value of point {} of '{}' clamped", i, data.name);
            }

            let mut cp = ControlPoint::new(PointHandle(i as u32), record.location, position);
            cp.set_value(value);
            let left = record.left_control.map(|c| domain.finite(c));
            let right = record.right_control.map(|c| domain.finite(c));
            if let Some(left) = left {
                cp.set_left_control(left);
            }
            if let Some(right) = right {
                cp.set_right_control(right);
            }
            // Linking symmetrizes, restore the stored right handle afterwards
            if cp.set_linked(record.linked) {
                if let Some(right) = right {
                    cp.set_right_control(right);
                }
            }

            points.push(cp);
        }

        let next_handle = points.len() as u32;
        Ok(Curve::with_points(data.name, options, points, next_handle))
    }

    //
    // Helpers
    //

    fn new_handle(&mut self) -> PointHandle {
        let handle = PointHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn index_of(&self, handle: PointHandle) -> TfResult<usize> {
        match self.points.iter().position(|cp| cp.handle() == handle) {
            Some(index) => Ok(index),
            None => {
                error!("Curve '{}' has no point {}", self.name, handle);
                Err(TfError::PointNotFound(handle))
            }
        }
    }

    fn point(&self, handle: PointHandle) -> TfResult<&ControlPoint> {
        let index = self.index_of(handle)?;
        Ok(&self.points[index])
    }

    // End points stay outermost even when a normal point shares their x
    fn sort_points(&mut self) {
        let rank = |cp: &ControlPoint| match cp.location() {
            Location::LeftEnd => 0,
            Location::Normal => 1,
            Location::RightEnd => 2,
        };
        self.points
            .sort_by(|a, b| a.cmp_x(b).then_with(|| rank(a).cmp(&rank(b))));
    }

    fn mark_dirty(&mut self) {
        self.function_dirty = true;
        self.preintegration_dirty = true;
    }

    fn clamp_control(&self, coord: Point2<f32>) -> Point2<f32> {
        if self.options.clamp_controls {
            self.domain.clamp(coord).0
        } else {
            self.domain.finite(coord)
        }
    }

    fn fresh_function(&self) -> FunctionArrays {
        let polyline = build_polyline(&self.points);
        debug!(
            "Sampling '{}': {} points, {} curve samples, resolution {}",
            self.name,
            self.points.len(),
            polyline.len(),
            self.options.resolution
        );
        FunctionArrays::sample(&self.points, &polyline, self.options.resolution)
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::new(defaults::NEW_CURVE_NAME, CurveOptions::default())
    }
}
