//! Partitioning of a stack of images into height-bounded groups.

use std::ops::Range;

/// How a stack taller than the limit is divided into output files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SplitPolicy {
    /// Smallest number of groups with an equal image count per group (the last
    /// group takes the remainder) such that no group exceeds the limit.
    #[default]
    Balanced,
    /// Fill each group in order until the next image would not fit.
    Greedy,
}

/// Contiguous run of images written to a single output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGroup {
    /// First image index (inclusive).
    pub start: usize,
    /// Last image index (exclusive).
    pub end: usize,
    /// Sum of the member heights.
    pub height: u64,
}

impl SplitGroup {
    fn new(heights: &[u32], range: Range<usize>) -> Self {
        let height = heights[range.clone()].iter().copied().map(u64::from).sum();
        Self {
            start: range.start,
            end: range.end,
            height,
        }
    }

    /// Index range into the image sequence.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Partition images of the given `heights` into contiguous groups no taller
/// than `limit`.
///
/// Every index lands in exactly one group and groups are returned in order.
/// A single image taller than `limit` cannot be split and ends up in an
/// over-limit group of its own. Returns an empty plan for empty input.
#[must_use]
pub fn plan_groups(heights: &[u32], limit: u32, policy: SplitPolicy) -> Vec<SplitGroup> {
    if heights.is_empty() {
        return Vec::new();
    }

    let groups = match policy {
        SplitPolicy::Balanced => balanced(heights, u64::from(limit)),
        SplitPolicy::Greedy => greedy(heights, u64::from(limit)),
    };

    tracing::debug!(
        "Planned {} group(s) with {policy:?} policy: {:?}",
        groups.len(),
        groups
            .iter()
            .map(|g| (g.range(), g.height))
            .collect::<Vec<_>>()
    );

    groups
}

fn balanced(heights: &[u32], limit: u64) -> Vec<SplitGroup> {
    let n = heights.len();
    let whole = SplitGroup::new(heights, 0..n);
    if whole.height <= limit || n == 1 {
        return vec![whole];
    }

    let mut k = 2;
    loop {
        let groups = even_partition(heights, k);
        let worst = groups.iter().map(|g| g.height).max().unwrap_or(0);

        // Once every image stands alone there is nothing left to split.
        if worst <= limit || k >= n {
            return groups;
        }
        k += 1;
    }
}

/// `k` groups of `n / k` images each, the last one taking the remainder.
fn even_partition(heights: &[u32], k: usize) -> Vec<SplitGroup> {
    let n = heights.len();
    let per_group = (n / k).max(1);

    let mut groups = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let end = if i == k - 1 { n } else { start + per_group };
        groups.push(SplitGroup::new(heights, start..end));
        start = end;
    }

    groups
}

fn greedy(heights: &[u32], limit: u64) -> Vec<SplitGroup> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut current = 0u64;

    for (i, &h) in heights.iter().enumerate() {
        let h = u64::from(h);
        if current + h > limit && i > start {
            groups.push(SplitGroup {
                start,
                end: i,
                height: current,
            });
            start = i;
            current = 0;
        }
        current += h;
    }

    groups.push(SplitGroup {
        start,
        end: heights.len(),
        height: current,
    });

    groups
}
