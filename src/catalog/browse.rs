use crate::models::{Title, TitleStatus};

/// How the browsable grid is rendered. The core only carries the selection;
/// rendering belongs to the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Grid,
    List,
    #[default]
    Carousel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(TitleStatus),
}

/// Sort order for catalog results. Closed set, so an unrecognized selection
/// is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order (the data source already lists newest additions first)
    #[default]
    Recent,
    Name,
    Year,
    EpisodeCount,
}

/// A complete browse selection: search term, filters, and sort.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: String,
    pub genre: GenreFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    /// True when nothing narrows the catalog, in which case the home page
    /// shows curated sections instead of a flat result list.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.genre == GenreFilter::All
            && self.status == StatusFilter::All
    }

    pub fn matches(&self, title: &Title) -> bool {
        if !self.search.is_empty()
            && !title
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        match &self.genre {
            GenreFilter::All => {}
            GenreFilter::Genre(genre) => {
                if !title.genres.iter().any(|g| g == genre) {
                    return false;
                }
            }
        }

        match self.status {
            StatusFilter::All => {}
            StatusFilter::Status(status) => {
                if title.status != status {
                    return false;
                }
            }
        }

        true
    }

    /// Filter and sort the catalog. Returns references in result order.
    pub fn apply<'a>(&self, titles: &'a [Title]) -> Vec<&'a Title> {
        let mut results: Vec<&Title> = titles.iter().filter(|t| self.matches(t)).collect();

        match self.sort {
            SortKey::Recent => {}
            SortKey::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Year => results.sort_by(|a, b| b.release_year.cmp(&a.release_year)),
            SortKey::EpisodeCount => {
                results.sort_by(|a, b| b.episodes.len().cmp(&a.episodes.len()))
            }
        }

        results
    }
}
