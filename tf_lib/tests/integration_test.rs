use nalgebra::{point, vector};
use tf_lib::{
    baked::{lut_parser, LutKind},
    storage::xml::write_curve_xml,
    test_helpers, Curve, CurveOptions, CurveRegistry, Location, MemoryTextures, PointHandle,
    Table, TextureSink, TfError, TfLibrary,
};

const EPS: f32 = 1e-5;

fn assert_sorted(curve: &Curve) {
    let xs: Vec<f32> = curve.points().map(|cp| cp.position().x).collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1]), "{:?}", xs);
    assert_eq!(xs.first(), Some(&0.0));
    assert_eq!(xs.last(), Some(&1.0));
}

#[test]
fn editing_session() {
    let mut curve = Curve::default();
    let mut sink = MemoryTextures::new();
    curve.rebuild_if_needed(&mut sink);
    let gray = curve.sample(0.5).0;

    // Add in the middle, the point takes the gray the curve had there
    let h = curve.add(point![0.5, 0.8]);
    assert_eq!(curve.len(), 3);
    assert_eq!(curve.position(h).unwrap().x, 0.5);
    assert!((curve.value(h).unwrap().color - gray.xyz()).abs().max() < EPS);

    // End points can not be deleted
    assert!(!curve.delete(curve.left_end()).unwrap());
    assert!(curve.delete(h).unwrap());
    assert_eq!(curve.len(), 2);

    // Duplicate moves the original
    let h = curve.add(point![0.3, 0.5]);
    let value = curve.value(h).unwrap();
    let copy = curve.duplicate(h).unwrap();
    assert!((curve.position(copy).unwrap().x - 0.3).abs() < EPS);
    assert!((curve.position(h).unwrap().x - 0.31).abs() < EPS);
    assert_eq!(curve.value(copy).unwrap(), value);

    // Clamped move
    assert!(curve.set_position(h, point![-0.2, 0.5]).unwrap());
    assert_eq!(curve.position(h).unwrap().x, 0.0);

    assert_sorted(&curve);
}

#[test]
fn random_walk_keeps_invariants() {
    let mut curve = Curve::default();
    let mut handles = Vec::new();

    let rng = fastrand::Rng::with_seed(17);

    for step in 0..200 {
        match step % 5 {
            0 | 1 => handles.push(curve.add(point![rng.f32(), rng.f32()])),
            2 if !handles.is_empty() => {
                let h = handles[rng.usize(..handles.len())];
                curve
                    .move_point(h, vector![rng.f32() - 0.5, rng.f32() - 0.5])
                    .unwrap();
            }
            3 if !handles.is_empty() => {
                let h = handles.remove(rng.usize(..handles.len()));
                assert!(curve.delete(h).unwrap());
            }
            4 if !handles.is_empty() => {
                let h = handles[rng.usize(..handles.len())];
                handles.push(curve.duplicate(h).unwrap());
                curve.toggle_linked(h).unwrap();
            }
            _ => {}
        }

        assert_sorted(&curve);
        assert_eq!(curve.len(), handles.len() + 2);
        for cp in curve.points() {
            assert!(cp.left_control().x <= cp.position().x);
            assert!(cp.position().x <= cp.right_control().x);
            if cp.is_linked() {
                let mirrored = cp.position() + (cp.position() - cp.left_control());
                assert!((cp.right_control() - mirrored).abs().max() < 1e-4);
            }
        }
    }

    let mut sink = MemoryTextures::new();
    curve.rebuild_if_needed(&mut sink);
    for texel in &curve.function_arrays().color_alpha {
        assert!((0.0..=1.0).contains(&texel.w));
    }
}

#[test]
fn preintegration_tables() {
    let (mut curve, _, _) = test_helpers::bump_curve(CurveOptions::new(64, false));
    let mut sink = MemoryTextures::new();
    curve.rebuild_if_needed(&mut sink);

    let function = curve.function_arrays().clone();
    let tables = curve.preintegration_tables();

    for table in Table::ALL {
        let f = function.table(table);
        let t = tables.table(table);
        assert_eq!(t.resolution(), 64);
        for x in 0..64 {
            assert_eq!(t.get(x, x), f[x]);
            for y in 0..x {
                assert_eq!(t.get(x, y), t.get(y, x));
            }
        }
    }

    let handle = curve
        .textures()
        .preintegration(Table::Advanced)
        .unwrap();
    let texture = sink.get(handle).unwrap();
    assert_eq!(texture.texels, tables.advanced.data());
}

#[test]
fn library_round_trip() {
    let dir = test_helpers::temp_library_dir("round_trip");
    let library = TfLibrary::new(&dir);

    let (curve, peak, _) = test_helpers::bump_curve(CurveOptions::default());
    let path = library.save(&curve, false).unwrap();
    assert!(path.ends_with("bump.xml"));

    let loaded = library.load("bump").unwrap();
    assert_eq!(loaded.name(), "bump");
    assert_eq!(loaded.export(), curve.export());
    assert_eq!(loaded.len(), 4);
    // Handles are renumbered in file order: left end, normal points, right end
    assert_eq!(
        loaded.value(PointHandle(1)).unwrap(),
        curve.value(peak).unwrap()
    );
    assert_eq!(loaded.location(PointHandle(3)).unwrap(), Location::RightEnd);

    assert!(matches!(
        library.save(&curve, false),
        Err(TfError::AlreadyExists(_))
    ));
    library.save(&curve, true).unwrap();

    assert!(matches!(library.load("missing"), Err(TfError::NotFound(_))));
    assert_eq!(library.names().unwrap(), vec!["bump".to_string()]);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn clamped_import() {
    let dir = test_helpers::temp_library_dir("clamped");
    let library = TfLibrary::new(&dir);

    let mut data = Curve::new("wild", CurveOptions::default()).export();
    data.points[0].position = point![0.3, 1.5];
    data.points[1].value.specular_power = 500.0;
    std::fs::write(library.path_of("wild"), write_curve_xml(&data)).unwrap();

    let curve = library.load("wild").unwrap();
    assert_eq!(curve.position(curve.left_end()).unwrap(), point![0.0, 1.0]);
    assert_eq!(curve.value(curve.right_end()).unwrap().specular_power, 128.0);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn load_without_right_end() {
    let dir = test_helpers::temp_library_dir("no_right_end");
    let library = TfLibrary::new(&dir);

    let mut data = Curve::new("half", CurveOptions::default()).export();
    data.points.pop();
    let xml = write_curve_xml(&data);
    assert_eq!(xml.matches("<tfPoint").count(), 1);
    std::fs::write(library.path_of("half"), xml).unwrap();

    assert!(matches!(library.load("half"), Err(TfError::Format(_))));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn registry_with_library() {
    let dir = test_helpers::temp_library_dir("registry");
    let library = TfLibrary::new(&dir);
    let mut registry = CurveRegistry::new(CurveOptions::default());

    let id = registry.create();
    let shared = registry.get(id).unwrap();
    let name = shared.read().name().to_string();

    // Nothing stored yet
    assert!(!registry.reload(id, &library).unwrap());

    registry.save(id, &library, false).unwrap();
    let h = shared.write().add(point![0.5, 0.5]);
    assert_eq!(shared.read().len(), 3);

    // Reload drops unsaved edits, shared handle sees it
    assert!(registry.reload(id, &library).unwrap());
    assert_eq!(shared.read().len(), 2);
    assert!(shared.read().position(h).is_err());

    let loaded = registry.load(&library, &name).unwrap();
    assert_ne!(loaded, id);
    assert_eq!(registry.latest(), Some(loaded));
    assert!(registry.load(&library, "missing").is_err());

    registry.remove(id);
    assert!(registry.get(id).is_none());
    assert_eq!(registry.len(), 1);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn baked_function_parses() {
    let (mut curve, _, _) = test_helpers::bump_curve(CurveOptions::new(32, false));
    let mut sink = MemoryTextures::new();
    curve.rebuild_if_needed(&mut sink);

    let texels = &curve.function_arrays().color_alpha;
    let mut bytes = Vec::new();
    for v in [32_u32, 1, 4] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.push(LutKind::Function.id());
    bytes.push(Table::ColorAlpha.id());
    for texel in texels {
        for c in texel.iter() {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
    }

    let lut = lut_parser(&bytes).unwrap();
    assert_eq!(lut.meta.width, 32);
    assert_eq!(lut.meta.table, Table::ColorAlpha);
    assert_eq!(&lut.texels, texels);
}

/// Sink counting uploads, checks the curve is usable through a trait object
#[derive(Default)]
struct CountingSink {
    uploads: usize,
    released: usize,
}

impl TextureSink for CountingSink {
    fn upload_1d(&mut self, _width: usize, _texels: &[tf_lib::color::RGBA]) -> tf_lib::TextureHandle {
        self.uploads += 1;
        tf_lib::TextureHandle(self.uploads as u32)
    }

    fn upload_2d(
        &mut self,
        _width: usize,
        _height: usize,
        _texels: &[tf_lib::color::RGBA],
    ) -> tf_lib::TextureHandle {
        self.uploads += 1;
        tf_lib::TextureHandle(self.uploads as u32)
    }

    fn release(&mut self, _handle: tf_lib::TextureHandle) {
        self.released += 1;
    }
}

#[test]
fn dynamic_sink() {
    let mut curve = Curve::default();
    let mut counting = CountingSink::default();
    let sink: &mut dyn TextureSink = &mut counting;

    curve.rebuild_if_needed(sink);
    curve.set_value(curve.left_end(), Default::default()).unwrap();
    curve.rebuild_if_needed(sink);

    assert_eq!(counting.uploads, 9);
    assert_eq!(counting.released, 3);
}
