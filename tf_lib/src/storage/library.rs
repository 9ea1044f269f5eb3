use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use super::xml::{parse_curve_xml, write_curve_xml};
use crate::{
    error::{TfError, TfResult},
    transfer::{Curve, CurveOptions},
};

/// Directory of stored transfer functions, one `<name>.xml` file per curve
#[derive(Debug, Clone)]
pub struct TfLibrary {
    root: PathBuf,
}

impl TfLibrary {
    pub fn new<P>(root: P) -> TfLibrary
    where
        P: AsRef<Path>,
    {
        TfLibrary {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.xml", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    /// Load curve with default options
    pub fn load(&self, name: &str) -> TfResult<Curve> {
        self.load_with(name, CurveOptions::default())
    }

    pub fn load_with(&self, name: &str, options: CurveOptions) -> TfResult<Curve> {
        let path = self.path_of(name);
        if !path.is_file() {
            warn!("'{}' was not found", path.display());
            return Err(TfError::NotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        let data = parse_curve_xml(name, &content)?;
        let curve = Curve::import(data, options)?;

        info!("Loaded '{}' ({} points)", path.display(), curve.len());
        Ok(curve)
    }

    /// Store curve under its name
    ///
    /// Existing file is replaced only with `overwrite`.
    pub fn save(&self, curve: &Curve, overwrite: bool) -> TfResult<PathBuf> {
        let path = self.path_of(curve.name());
        if !overwrite && path.exists() {
            return Err(TfError::AlreadyExists(path));
        }

        fs::create_dir_all(&self.root)?;
        fs::write(&path, write_curve_xml(&curve.export()))?;

        info!("Saved '{}'", path.display());
        Ok(path)
    }

    /// Names of all stored curves, sorted
    pub fn names(&self) -> TfResult<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "xml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
