//! Tick model shared by both rulers.
//!
//! Ticks are produced in page space on a fixed grid. The tier of a tick depends only on its
//! coordinate, its label only on its coordinate and the page origin, so a tick list can be
//! computed and tested without any rendering surface.

use std::ops::RangeInclusive;

use crate::config::TickSpacing;

/// Graduation tier of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickTier {
    /// Plain graduation.
    Minor,
    /// Graduation on a multiple of the labeled interval.
    Labeled,
    /// Graduation on a multiple of the major interval (always labeled too).
    Major,
}

impl TickTier {
    /// Returns `true` for tiers that carry a label when inside the page.
    pub fn is_labeled(self) -> bool {
        self >= TickTier::Labeled
    }
}

/// How a labeled tick turns its coordinate into a displayed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Distance from the page origin divided by the minor interval.
    MinorUnits,
    /// Distance from the page origin in pixels.
    Pixels,
}

/// A single graduation mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Coordinate in page space (a multiple of the minor interval).
    pub coordinate: i64,
    /// Graduation tier.
    pub tier: TickTier,
    /// Whether the coordinate falls on the page (edges included).
    pub inside_page: bool,
    /// Displayed number, present iff the tick is labeled and inside the page.
    pub label: Option<i64>,
}

/// Upper bound on the number of ticks in one strip.
pub const MAX_TICKS: i64 = 1 << 16;

/// Classify a coordinate into its tier.
///
/// A zero interval never matches, so such a tier is simply never produced.
pub fn classify(coordinate: i64, spacing: &TickSpacing) -> TickTier {
    if coordinate.checked_rem_euclid(spacing.major) == Some(0) {
        TickTier::Major
    } else if coordinate.checked_rem_euclid(spacing.labeled) == Some(0) {
        TickTier::Labeled
    } else {
        TickTier::Minor
    }
}

/// Grid-snapped coordinate range covering `[low - margin, high + margin]`.
///
/// The start is floored and the end ceiled to the minor interval, and the range is cut off
/// after [`MAX_TICKS`] steps. Non-finite or unrepresentable bounds and a non-positive minor
/// interval yield an empty range.
pub fn visible_range(low: f64, high: f64, spacing: &TickSpacing) -> RangeInclusive<i64> {
    if spacing.minor <= 0 {
        return 1..=0;
    }
    let step = spacing.minor as f64;
    let margin = spacing.margin as f64;
    let (Some(first), Some(last)) = (
        grid_index(((low - margin) / step).floor()),
        grid_index(((high + margin) / step).ceil()),
    ) else {
        return 1..=0;
    };
    let last = last.min(first.saturating_add(MAX_TICKS - 1));

    match (
        first.checked_mul(spacing.minor),
        last.checked_mul(spacing.minor),
    ) {
        (Some(start), Some(end)) => start..=end,
        _ => 1..=0,
    }
}

fn grid_index(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    (value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64)
        .then(|| value as i64)
}

/// Iterates the ticks of a strip whose page spans `[page_start, page_start + page_len]`.
pub struct TickIter<'a> {
    next: Option<i64>,
    end: i64,
    page_start: f64,
    page_len: f64,
    rule: LabelRule,
    spacing: &'a TickSpacing,
}

impl<'a> TickIter<'a> {
    /// Create an iterator over `range`, stepping by the minor interval.
    pub fn new(
        range: RangeInclusive<i64>,
        page_start: f64,
        page_len: f64,
        rule: LabelRule,
        spacing: &'a TickSpacing,
    ) -> Self {
        Self {
            next: (spacing.minor > 0).then_some(*range.start()),
            end: *range.end(),
            page_start,
            page_len,
            rule,
            spacing,
        }
    }

    fn label_for(&self, coordinate: i64) -> i64 {
        let distance = coordinate as f64 - self.page_start;
        let value = match self.rule {
            LabelRule::MinorUnits => distance / self.spacing.minor as f64,
            LabelRule::Pixels => distance,
        };
        value.round() as i64
    }
}

impl Iterator for TickIter<'_> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let coordinate = self.next.filter(|next| *next <= self.end)?;
        self.next = coordinate.checked_add(self.spacing.minor);

        let x = coordinate as f64;
        let inside_page = x >= self.page_start && x <= self.page_start + self.page_len;
        let tier = classify(coordinate, self.spacing);
        let label = (tier.is_labeled() && inside_page).then(|| self.label_for(coordinate));

        Some(Tick {
            coordinate,
            tier,
            inside_page,
            label,
        })
    }
}
