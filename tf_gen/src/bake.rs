use std::{
    error::Error,
    io::{BufWriter, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};
use log::info;
use tf_lib::{baked::LutKind, Curve, MemoryTextures, TfLibrary};

use crate::{config::Config, file::open_create_file, header::generate_header};

/// Create or load curve and apply added points
///
/// New curves are stored right away, loaded ones only with `overwrite`.
pub fn prepare_curve(cfg: &Config, library: &TfLibrary) -> Result<Curve, Box<dyn Error>> {
    let mut curve = if cfg.create {
        Curve::new(cfg.name.clone(), cfg.options)
    } else {
        library.load_with(&cfg.name, cfg.options)?
    };

    for &p in &cfg.added_points {
        let handle = curve.add(p);
        info!("Added point {} at ({}, {})", handle, p.x, p.y);
    }

    if cfg.create || (cfg.overwrite && !cfg.added_points.is_empty()) {
        let path = library.save(&curve, cfg.overwrite)?;
        info!("Stored transfer function in {}", path.display());
    }

    Ok(curve)
}

/// Rebuild curve and write the selected table
pub fn bake(cfg: &Config) -> Result<(), Box<dyn Error>> {
    let library = TfLibrary::new(&cfg.library);
    let mut curve = prepare_curve(cfg, &library)?;

    let mut sink = MemoryTextures::new();
    if cfg.kind == LutKind::Preintegrated {
        curve.request_preintegration();
    }
    curve.rebuild_if_needed(&mut sink);

    let textures = curve.textures();
    let handle = match cfg.kind {
        LutKind::Function => textures.function(cfg.table),
        LutKind::Preintegrated => textures.preintegration(cfg.table),
    }
    .ok_or("Table was not built")?;
    let texture = sink.get(handle).ok_or("Table was not uploaded")?;

    let file = open_create_file(&cfg.file_name)?;
    let mut writer = BufWriter::new(file);

    // Write header
    let header = generate_header(cfg, texture.width as u32, texture.height as u32);
    writer.write_all(&header)?;

    // Write samples
    for texel in &texture.texels {
        for &channel in texel.iter() {
            writer.write_f32::<LittleEndian>(channel)?;
        }
    }
    writer.flush()?;

    info!(
        "Baked {:?} {:?} table {}x{} into {:?}",
        cfg.kind, cfg.table, texture.width, texture.height, cfg.file_name
    );
    Ok(())
}
