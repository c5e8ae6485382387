//! Hourly selection
//!
//! Holds today's samples as an indexable sequence and a cursor pointing at
//! the sample currently displayed. The cursor is always valid for the bucket
//! it indexes, or the bucket is empty.

use domain::Sample;
use tracing::warn;

/// Today's hourly samples plus a selection cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySelector {
    bucket: Vec<Sample>,
    cursor: usize,
}

impl HourlySelector {
    /// Create a selector over a bucket with the cursor at 0
    #[must_use]
    pub fn new(bucket: Vec<Sample>) -> Self {
        Self { bucket, cursor: 0 }
    }

    /// Replace the bucket and reset the cursor to 0
    ///
    /// Called after every successful refresh, even when city and units did
    /// not change.
    pub fn install(&mut self, bucket: Vec<Sample>) {
        self.bucket = bucket;
        self.cursor = 0;
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.install(Vec::new());
    }

    /// Move the cursor, clamping out-of-range values to the last index
    ///
    /// Returns the cursor actually applied. On an empty bucket the cursor
    /// stays at 0.
    pub fn set_cursor(&mut self, index: usize) -> usize {
        let clamped = index.min(self.max_index().unwrap_or(0));
        if clamped != index {
            warn!(
                requested = index,
                applied = clamped,
                len = self.bucket.len(),
                "Hourly cursor out of range, clamping"
            );
        }
        self.cursor = clamped;
        clamped
    }

    /// Current cursor
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Largest valid cursor, `None` for an empty bucket
    #[must_use]
    pub fn max_index(&self) -> Option<usize> {
        self.bucket.len().checked_sub(1)
    }

    /// The hourly samples
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.bucket
    }

    /// Number of hourly samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.bucket.len()
    }

    /// Whether there is no hourly data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bucket.is_empty()
    }

    /// The sample under the cursor, if any
    #[must_use]
    pub fn selected(&self) -> Option<&Sample> {
        self.bucket.get(self.cursor)
    }

    /// The sample under the cursor, or `fallback` when there is no hourly data
    #[must_use]
    pub fn selected_or<'a>(&'a self, fallback: Option<&'a Sample>) -> Option<&'a Sample> {
        self.selected().or(fallback)
    }
}
