//! Catalog loader.
//!
//! Reads the two files that make up a catalog: a 2-D `.npy` embedding
//! matrix and a CSV metadata table with one row per matrix row. Loading
//! only parses; consistency between the two is checked when the
//! [`SearchEngine`] is built.

use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{read_npy, ReadNpyError};
use timbre_core::Album;
use timbre_search::SearchEngine;

use crate::config::Config;
use crate::error::{LoadError, LoadResult};

/// A loaded but not yet validated catalog.
#[derive(Debug)]
pub struct Catalog {
    pub embeddings: Array2<f32>,
    pub albums: Vec<Album>,
}

impl Catalog {
    /// Read the embedding matrix and the metadata table.
    pub fn load(embeddings_path: &Path, metadata_path: &Path) -> LoadResult<Self> {
        let embeddings = load_embeddings(embeddings_path)?;
        let albums = load_metadata(metadata_path)?;
        Ok(Self { embeddings, albums })
    }

    /// Validate and normalize into a search engine.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Integrity`] if the matrix and metadata do not
    /// describe the same albums.
    pub fn into_engine(self) -> LoadResult<SearchEngine> {
        Ok(SearchEngine::new(self.embeddings, self.albums)?)
    }
}

/// Load the catalog named by `config` and build a search engine from it.
pub fn load_engine(config: &Config) -> LoadResult<SearchEngine> {
    Catalog::load(&config.embeddings_path, &config.metadata_path)?.into_engine()
}

fn ensure_readable(path: &Path) -> LoadResult<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read an N x D embedding matrix from a `.npy` file.
///
/// `f32` arrays load as-is; `f64` arrays are narrowed to `f32`.
#[allow(clippy::cast_possible_truncation)]
pub fn load_embeddings(path: &Path) -> LoadResult<Array2<f32>> {
    ensure_readable(path)?;

    let npy_error = |source| LoadError::Npy {
        path: path.to_path_buf(),
        source,
    };

    let embeddings = match read_npy::<_, Array2<f32>>(path) {
        Ok(embeddings) => embeddings,
        Err(ReadNpyError::WrongDescriptor(_)) => {
            log::debug!("{} is not f32, reading as f64", path.display());
            read_npy::<_, Array2<f64>>(path)
                .map_err(npy_error)?
                .mapv(|v| v as f32)
        }
        Err(e) => return Err(npy_error(e)),
    };

    log::info!(
        "Loaded embeddings of shape {:?} from {}",
        embeddings.dim(),
        path.display()
    );
    Ok(embeddings)
}

/// Read album metadata rows from a CSV file, in file order.
///
/// The file must have a header row containing at least `album_id`. The
/// `artist`, `title`, `genre`, `year_released` and `review` columns are
/// read when present; other columns are ignored.
///
/// `album_id` must be a non-negative integer written without a fraction.
/// A `-1` placeholder or a float-formatted id such as `3.0` fails the whole
/// load with [`LoadError::Csv`].
pub fn load_metadata(path: &Path) -> LoadResult<Vec<Album>> {
    ensure_readable(path)?;

    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;

    let albums = reader
        .deserialize::<Album>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    log::info!("Loaded {} album records from {}", albums.len(), path.display());
    Ok(albums)
}
