mod browse;
mod sections;

pub use browse::{CatalogQuery, GenreFilter, SortKey, StatusFilter, ViewMode};
pub use sections::{HomeSections, build_home_sections};

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{Title, TitleId};

/// The read-only catalog: an ordered sequence of titles supplied by an
/// external static data source. This crate only ever reads from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        Self { titles }
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let titles: Vec<Title> =
            serde_json::from_reader(reader).context("Failed to parse catalog data")?;
        info!("Loaded catalog with {} titles", titles.len());
        Ok(Self::new(titles))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open catalog at {:?}", path.as_ref()))?;
        Self::from_reader(file)
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn title(&self, id: &TitleId) -> Option<&Title> {
        self.titles.iter().find(|t| &t.id == id)
    }

    /// Every genre appearing in the catalog, deduplicated, in first-seen order.
    pub fn genres(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for title in &self.titles {
            for genre in &title.genres {
                if !seen.contains(genre) {
                    seen.push(genre.clone());
                }
            }
        }
        seen
    }
}
