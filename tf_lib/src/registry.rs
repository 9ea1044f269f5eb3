//! Shared ownership of open curves

use std::{collections::BTreeMap, fmt, sync::Arc};

use log::info;
use parking_lot::RwLock;

use crate::{
    error::{TfError, TfResult},
    storage::TfLibrary,
    transfer::{defaults, Curve, CurveOptions},
};

pub type SharedCurve = Arc<RwLock<Curve>>;

/// Id of curve in registry, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurveId(pub u32);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tf{}", self.0)
    }
}

/// Keeps every open curve behind its own lock
///
/// Editors and renderers hold clones of [`SharedCurve`], removing
/// a curve from the registry only drops the registry's reference.
#[derive(Debug, Default)]
pub struct CurveRegistry {
    options: CurveOptions,
    curves: BTreeMap<CurveId, SharedCurve>,
    next_id: u32,
    created: u32,
}

impl CurveRegistry {
    pub fn new(options: CurveOptions) -> CurveRegistry {
        CurveRegistry {
            options,
            ..Default::default()
        }
    }

    /// New default curve, named `newTf<k>`
    pub fn create(&mut self) -> CurveId {
        let name = format!("{}{}", defaults::NEW_CURVE_NAME, self.created);
        self.created += 1;
        let id = self.insert(Curve::new(name, self.options));
        info!("Created curve {}", id);
        id
    }

    /// Load curve from library under a new id
    pub fn load(&mut self, library: &TfLibrary, name: &str) -> TfResult<CurveId> {
        let curve = library.load_with(name, self.options)?;
        let id = self.insert(curve);
        info!("Registered '{}' as {}", name, id);
        Ok(id)
    }

    /// Replace curve content with its stored version, id and shared handles stay valid
    ///
    /// Returns `false` when there is nothing stored under the curve's name.
    pub fn reload(&self, id: CurveId, library: &TfLibrary) -> TfResult<bool> {
        let shared = self.get_or_err(id)?;
        let name = shared.read().name().to_string();
        if !library.exists(&name) {
            return Ok(false);
        }

        let fresh = library.load_with(&name, self.options)?;
        *shared.write() = fresh;
        info!("Reloaded {} from '{}'", id, name);
        Ok(true)
    }

    pub fn save(&self, id: CurveId, library: &TfLibrary, overwrite: bool) -> TfResult<()> {
        let shared = self.get_or_err(id)?;
        let curve = shared.read();
        library.save(&curve, overwrite)?;
        Ok(())
    }

    pub fn get(&self, id: CurveId) -> Option<SharedCurve> {
        self.curves.get(&id).cloned()
    }

    /// Returns the removed curve, if it was registered
    pub fn remove(&mut self, id: CurveId) -> Option<SharedCurve> {
        let removed = self.curves.remove(&id);
        if removed.is_some() {
            info!("Removed curve {}", id);
        }
        removed
    }

    /// Most recently registered curve still present
    pub fn latest(&self) -> Option<CurveId> {
        self.curves.keys().next_back().copied()
    }

    pub fn ids(&self) -> Vec<CurveId> {
        self.curves.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    fn insert(&mut self, curve: Curve) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        self.curves.insert(id, Arc::new(RwLock::new(curve)));
        id
    }

    fn get_or_err(&self, id: CurveId) -> TfResult<SharedCurve> {
        self.get(id).ok_or(TfError::CurveNotFound(id))
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use nalgebra::point;

    #[test]
    fn ids_not_reused() {
        let mut registry = CurveRegistry::default();

        let a = registry.create();
        let b = registry.create();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.latest(), Some(b));

        assert!(registry.remove(b).is_some());
        assert!(registry.get(b).is_none());
        assert!(registry.remove(b).is_none());
        assert_eq!(registry.latest(), Some(a));

        let c = registry.create();
        assert!(c > b);
        assert_eq!(registry.ids(), vec![a, c]);
    }

    #[test]
    fn default_names() {
        let mut registry = CurveRegistry::default();
        let a = registry.create();
        let b = registry.create();

        assert_eq!(registry.get(a).unwrap().read().name(), "newTf0");
        assert_eq!(registry.get(b).unwrap().read().name(), "newTf1");
    }

    #[test]
    fn shared_edits_visible() {
        let mut registry = CurveRegistry::default();
        let id = registry.create();

        let editor = registry.get(id).unwrap();
        editor.write().add(point![0.5, 0.5]);

        assert_eq!(registry.get(id).unwrap().read().len(), 3);

        // Editor keeps its curve alive after removal
        registry.remove(id);
        assert_eq!(editor.read().len(), 3);
    }

    #[test]
    fn unknown_id() {
        let registry = CurveRegistry::default();
        let library = TfLibrary::new(std::env::temp_dir());
        assert!(matches!(
            registry.save(CurveId(7), &library, false),
            Err(TfError::CurveNotFound(CurveId(7)))
        ));
        assert!(matches!(
            registry.reload(CurveId(7), &library),
            Err(TfError::CurveNotFound(CurveId(7)))
        ));
    }
}
