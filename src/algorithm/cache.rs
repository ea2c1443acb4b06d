use crate::algorithm::constraints::{
    ConstraintIndex, ConstraintKey, WordId, build_constraint_index,
};
use crate::io::configuration::{CACHE_EXTENSION, CACHE_HASH_PREFIX_LEN, DEFAULT_CACHE_DIR};
use crate::io::error::{CrosswordError, Result, WithPath};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Serialized form of a constraint index
///
/// The content hash of the indexed words is stored alongside the index so a
/// blob built from a different word list is never mistaken for a match.
#[derive(Serialize, Deserialize)]
struct IndexBlob {
    content_hash: String,
    word_length: usize,
    words: Vec<String>,
    entries: Vec<(ConstraintKey, Vec<WordId>)>,
}

/// How a cache lookup was satisfied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLookup {
    /// A valid blob was read from disk
    Hit,
    /// No blob existed; the index was built and stored
    Miss,
    /// A blob existed but was unreadable or mismatched; it was rebuilt
    Stale,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of stale or corrupt blobs replaced
    pub stale: usize,
}

impl CacheStats {
    /// Tally one lookup outcome
    pub const fn record(&mut self, lookup: CacheLookup) {
        match lookup {
            CacheLookup::Hit => self.hits += 1,
            CacheLookup::Miss => self.misses += 1,
            CacheLookup::Stale => self.stale += 1,
        }
    }
}

/// SHA-256 of a word bucket, hex encoded
///
/// Words are hashed in the order given; callers pass sorted buckets.
pub fn content_hash<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for word in words {
        hasher.update(word.as_ref().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

/// On-disk store of constraint indices, one file per word list and length
///
/// File names carry a prefix of the content hash, so editing the word list
/// produces new file names instead of silently reusing old indices. Writes
/// go through a temporary file in the same directory and an atomic rename,
/// so concurrent readers never observe a half-written blob.
#[derive(Clone, Debug)]
pub struct IndexCache {
    directory: PathBuf,
    source_stem: String,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR, None)
    }
}

impl IndexCache {
    /// Create a cache rooted at `directory` for the given word list
    pub fn new(directory: impl Into<PathBuf>, source: Option<&Path>) -> Self {
        let source_stem = source
            .and_then(Path::file_stem)
            .map_or_else(|| "corpus".to_string(), |stem| stem.to_string_lossy().into_owned());

        Self {
            directory: directory.into(),
            source_stem,
        }
    }

    /// Directory holding the cache files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the blob for a word length and content hash
    pub fn path_for(&self, word_length: usize, hash: &str) -> PathBuf {
        let prefix = hash.get(..CACHE_HASH_PREFIX_LEN).unwrap_or(hash);
        self.directory.join(format!(
            "{}_{prefix}_{word_length}.{CACHE_EXTENSION}",
            self.source_stem
        ))
    }

    /// Read a cached index, returning `None` when absent, unreadable or stale
    ///
    /// # Errors
    ///
    /// Returns an error only when an existing file cannot be opened
    pub fn load(&self, word_length: usize, hash: &str) -> Result<Option<ConstraintIndex>> {
        let path = self.path_for(word_length, hash);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CrosswordError::FileSystem {
                    path,
                    operation: "open constraint cache",
                    source: e,
                });
            }
        };

        let blob: IndexBlob = match serde_json::from_reader(BufReader::new(file)) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Ignoring corrupt constraint cache '{}': {e}", path.display());
                return Ok(None);
            }
        };

        if blob.content_hash != hash || blob.word_length != word_length {
            log::warn!(
                "Ignoring constraint cache '{}' built from different words",
                path.display()
            );
            return Ok(None);
        }

        // The header alone proves nothing about the stored words
        if content_hash(&blob.words) != hash {
            log::warn!(
                "Ignoring constraint cache '{}' whose words do not match its hash",
                path.display()
            );
            return Ok(None);
        }

        match ConstraintIndex::from_parts(blob.word_length, blob.words, blob.entries) {
            Ok(index) => Ok(Some(index)),
            Err(e) => {
                log::warn!("Ignoring inconsistent constraint cache '{}': {e}", path.display());
                Ok(None)
            }
        }
    }

    /// Write an index to the cache
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or temporary file cannot be created,
    /// serialization fails, or the final rename fails
    pub fn store(&self, index: &ConstraintIndex, hash: &str) -> Result<PathBuf> {
        let path = self.path_for(index.word_length(), hash);
        std::fs::create_dir_all(&self.directory)
            .with_path(&self.directory, "create cache directory")?;

        let blob = IndexBlob {
            content_hash: hash.to_string(),
            word_length: index.word_length(),
            words: index.words().to_vec(),
            entries: index.sorted_entries(),
        };

        let mut temp = NamedTempFile::new_in(&self.directory)
            .with_path(&self.directory, "create temporary cache file")?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, &blob).map_err(|e| {
                CrosswordError::CacheSerialization {
                    path: path.clone(),
                    source: e,
                }
            })?;
            writer.flush().with_path(&path, "write constraint cache")?;
        }
        temp.persist(&path)
            .map_err(|e| e.error)
            .with_path(&path, "rename constraint cache")?;

        log::debug!("Stored constraint index at '{}'", path.display());
        Ok(path)
    }

    /// Load the index for a word bucket, building and storing it on a miss
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be built or the cache cannot be written
    pub fn get_or_build<I, S>(&self, words: I) -> Result<(ConstraintIndex, CacheLookup)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words.into_iter().map(|w| w.as_ref().to_owned()).collect();
        words.sort_unstable();
        words.dedup();

        let word_length = words.first().map_or(0, |w| w.chars().count());
        let hash = content_hash(&words);
        let existed = self.path_for(word_length, &hash).exists();

        if let Some(index) = self.load(word_length, &hash)? {
            log::debug!("Constraint cache hit for length {word_length}");
            return Ok((index, CacheLookup::Hit));
        }

        let index = build_constraint_index(&words)?;
        self.store(&index, &hash)?;

        let lookup = if existed {
            CacheLookup::Stale
        } else {
            CacheLookup::Miss
        };
        log::debug!("Constraint cache {lookup:?} for length {word_length}");
        Ok((index, lookup))
    }
}
