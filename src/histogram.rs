use crate::{
    quantizer::{quantize, Bucket},
    sampler::Sampler,
};
use std::collections::HashMap;

/// Occurrence statistics for one bucket.
///
/// The bucket is fixed on first occurrence; later occurrences only bump the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketStats {
    bucket: Bucket,
    count: u64,
    first_seen: usize,
}

impl BucketStats {
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.bucket.rgb()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Pixel index of the bucket's first occurrence in the buffer.
    pub fn first_seen(&self) -> usize {
        self.first_seen
    }
}

/// A frequency table of buckets, keyed by their packed channel value.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    slots: HashMap<u32, usize>,
    stats: Vec<BucketStats>,
    total: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample and quantize the whole buffer in one sequential pass.
    pub fn from_sampler(sampler: Sampler<'_>) -> Self {
        let mut hist = Self::new();

        for (index, rgb) in sampler.indexed() {
            hist.record(index, quantize(rgb));
        }

        hist
    }

    /// Build the histogram across the rayon thread pool, one partial histogram per split of the sample range.
    ///
    /// Produces the same counts and first-seen indices as [`Histogram::from_sampler`].
    #[cfg(feature = "rayon")]
    pub fn from_buffer_parallel(buffer: crate::PixelBuffer<'_>, stride: usize) -> crate::Result<Self> {
        use rayon::prelude::*;

        // validates the stride the same way the sequential path does
        let stride = Sampler::new(buffer, stride)?.stride();
        let positions = crate::sampler::sample_positions(&buffer, stride);

        let hist = (0..positions)
            .into_par_iter()
            .fold(Histogram::new, |mut hist, position| {
                let index = position * stride;

                if let Some(rgb) = crate::sampler::sample_at(&buffer, index) {
                    hist.record(index, quantize(rgb));
                }

                hist
            })
            .reduce(Histogram::new, Histogram::merge);

        Ok(hist)
    }

    /// Count one occurrence of `bucket`, sampled at pixel `index`.
    pub fn record(&mut self, index: usize, bucket: Bucket) {
        self.total += 1;

        match self.slots.get(&bucket.key()) {
            Some(&slot) => {
                let stats = &mut self.stats[slot];
                stats.count += 1;
                stats.first_seen = stats.first_seen.min(index);
            }
            None => {
                self.slots.insert(bucket.key(), self.stats.len());
                self.stats.push(BucketStats {
                    bucket,
                    count: 1,
                    first_seen: index,
                });
            }
        }
    }

    /// Combine two histograms built over disjoint parts of the same buffer.
    ///
    /// Counts of equal buckets are summed and the earliest first-seen index wins, so the merge order never
    /// affects the ranking.
    pub fn merge(mut self, other: Histogram) -> Histogram {
        self.total += other.total;

        for incoming in other.stats {
            match self.slots.get(&incoming.bucket.key()) {
                Some(&slot) => {
                    let stats = &mut self.stats[slot];
                    stats.count += incoming.count;
                    stats.first_seen = stats.first_seen.min(incoming.first_seen);
                }
                None => {
                    self.slots.insert(incoming.bucket.key(), self.stats.len());
                    self.stats.push(incoming);
                }
            }
        }

        self
    }

    /// Total number of samples recorded across all buckets.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, bucket: Bucket) -> Option<&BucketStats> {
        self.slots.get(&bucket.key()).map(|&slot| &self.stats[slot])
    }

    /// Rank the buckets by count, highest first, and keep at most `max_colors` of them.
    pub fn rank(self, max_colors: usize) -> Vec<BucketStats> {
        rank(self.stats, max_colors)
    }
}

/// Sort buckets by count descending, breaking ties by earliest first occurrence, and truncate to `max_colors`.
pub fn rank(mut stats: Vec<BucketStats>, max_colors: usize) -> Vec<BucketStats> {
    stats.sort_by(|lhs, rhs| {
        rhs.count
            .cmp(&lhs.count)
            .then_with(|| lhs.first_seen.cmp(&rhs.first_seen))
    });
    stats.truncate(max_colors);

    stats
}
