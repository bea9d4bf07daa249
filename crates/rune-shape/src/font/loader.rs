use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use hashbrown::HashMap;
use tracing::debug;

use crate::font::{FontError, FontFace, Result};

/// Key for identifying a font within the cache.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    /// Path to the font file on disk.
    pub path: PathBuf,
    /// Font index within the file (for collections).
    pub index: u32,
}

impl FontKey {
    pub fn new(path: impl AsRef<Path>, index: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            index: index as u32,
        }
    }
}

/// In-memory font face cache keyed by file path and index.
#[derive(Debug, Default)]
pub struct FontCache {
    faces: HashMap<FontKey, Arc<FontFace>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a font face from the cache or load it from disk.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>, index: usize) -> Result<Arc<FontFace>> {
        let key = FontKey::new(&path, index);
        if let Some(face) = self.faces.get(&key) {
            return Ok(face.clone());
        }

        let face = Arc::new(FontFace::from_path(&key.path, index)?);
        self.faces.insert(key, face.clone());
        Ok(face)
    }

    /// Retrieve a font by key if it exists.
    pub fn get(&self, key: &FontKey) -> Option<Arc<FontFace>> {
        self.faces.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Load a font face directly from disk without caching.
pub fn load_font(path: impl AsRef<Path>, index: usize) -> Result<FontFace> {
    FontFace::from_path(path, index)
}

/// Pick a regular sans-serif face from the system font database.
pub fn load_system_default_font() -> Result<FontFace> {
    let mut db = Database::new();
    db.load_system_fonts();

    let id = db
        .query(&Query {
            families: &[
                Family::SansSerif,
                Family::Name("DejaVu Sans"),
                Family::Name("Noto Sans"),
                Family::Name("Arial"),
            ],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
            ..Query::default()
        })
        .ok_or(FontError::NoSystemFont)?;
    let face = db.face(id).ok_or(FontError::NoSystemFont)?;

    let bytes: Vec<u8> = match &face.source {
        Source::File(path) => std::fs::read(path)?,
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
    };
    debug!(family = ?face.families.first(), index = face.index, "loaded system font");
    FontFace::from_vec(bytes, face.index as usize)
}
