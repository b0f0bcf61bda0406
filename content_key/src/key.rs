use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::OnceLock;

use ahash::RandomState;
use itertools::Itertools;

use crate::error::Error;

/// A row of `f64` values used as a map or set key, identified purely by its content.
///
/// A key is either *present* (it owns a backing row, possibly of zero length) or
/// *empty*, the sentinel state with no row at all. Presence is fixed at
/// construction. Two keys are equal when both are empty or when their rows match
/// element for element under [`canonical_bits`].
///
/// The hash is computed lazily and memoized. Mutating the row through
/// [`ContentKey::data_mut`] does not invalidate it; callers that mutate in place
/// must call [`ContentKey::reset_hash`] before the key is hashed again.
#[derive(Debug, Default)]
pub struct ContentKey {
    values: Option<Vec<f64>>,
    hash: OnceLock<u64>,
}

impl ContentKey {
    /// The sentinel empty key. Hashes to `0` and only equals other empty keys.
    pub const fn empty() -> Self {
        Self {
            values: None,
            hash: OnceLock::new(),
        }
    }

    /// Takes ownership of `values` without copying them.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: Some(values),
            hash: OnceLock::new(),
        }
    }

    /// Deep copies `source` into freshly allocated storage.
    ///
    /// Fails with [`Error::EmptyCopySource`] if `source` is the empty sentinel.
    #[tracing::instrument(skip_all)]
    pub fn try_copy(source: &ContentKey) -> Result<Self, Error> {
        match source.values.as_deref() {
            Some(values) => Ok(Self::new(values.to_vec())),
            None => {
                tracing::debug!("Refusing to deep copy an empty key");
                Err(Error::EmptyCopySource)
            }
        }
    }

    pub fn data(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    /// Mutable view over the backing row. The cached hash is left untouched.
    pub fn data_mut(&mut self) -> Option<&mut [f64]> {
        self.values.as_deref_mut()
    }

    /// Overwrites the row with `row`, reusing the existing allocation, and
    /// clears the cached hash. Lets one scratch key probe a map row after row.
    pub fn refill(&mut self, row: &[f64]) -> Result<(), Error> {
        let values = self.values.as_mut().ok_or(Error::EmptyRefillTarget)?;
        values.clear();
        values.extend_from_slice(row);
        self.reset_hash();
        Ok(())
    }

    pub fn reset_hash(&mut self) {
        self.hash.take();
    }

    pub fn is_hash_cached(&self) -> bool {
        self.hash.get().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_none()
    }

    /// Width of the row, `None` for the empty sentinel.
    pub fn len(&self) -> Option<usize> {
        self.values.as_ref().map(Vec::len)
    }

    pub fn into_inner(self) -> Option<Vec<f64>> {
        self.values
    }

    /// Order and length sensitive hash of the row, computed on first use and
    /// then returned from the cache until [`ContentKey::reset_hash`].
    pub fn hash_code(&self) -> u64 {
        let Some(values) = self.values.as_deref() else {
            return 0;
        };
        let cached = *self.hash.get_or_init(|| content_hash(values));
        #[cfg(feature = "stale-hash-check")]
        debug_assert_eq!(
            cached,
            content_hash(values),
            "key content changed after hashing, reset_hash was not called"
        );
        cached
    }
}

/// Bit pattern used for both equality and hashing. All NaNs collapse to a single
/// pattern; `0.0` and `-0.0` stay distinct.
pub fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

#[tracing::instrument(skip_all)]
fn content_hash(values: &[f64]) -> u64 {
    // Fixed seeds so the same row hashes identically in every process.
    let mut hasher = RandomState::with_seeds(0, 0, 0, 0).build_hasher();
    hasher.write_usize(values.len());
    for &value in values {
        hasher.write_u64(canonical_bits(value));
    }
    hasher.finish()
}

/// True when `key` holds no row at all. A row of zeros is not absent.
pub fn is_absent(key: &ContentKey) -> bool {
    key.is_empty()
}

#[deprecated(note = "tests for a missing row, not numeric zero; use `is_absent`")]
pub fn is_zero(key: &ContentKey) -> bool {
    is_absent(key)
}

impl PartialEq for ContentKey {
    fn eq(&self, other: &Self) -> bool {
        match (self.data(), other.data()) {
            (None, None) => true,
            (Some(first), Some(second)) => {
                first.len() == second.len()
                    && first
                        .iter()
                        .zip(second)
                        .all(|(&a, &b)| canonical_bits(a) == canonical_bits(b))
            }
            _ => false,
        }
    }
}

impl Eq for ContentKey {}

impl Hash for ContentKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Some(values) => write!(f, "[{:?}]", values.iter().format(", ")),
            None => f.write_str("null"),
        }
    }
}

impl From<Vec<f64>> for ContentKey {
    fn from(v: Vec<f64>) -> Self {
        Self::new(v)
    }
}
