//! Scheduling of recurring (replacement) costs over the analysis horizon.
use serde::Serialize;

/// A single cash or carbon impact occurring in a given analysis year.
///
/// Year 0 is the first cost (commissioning) year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyCostEvent<T> {
    /// The amount of money or carbon
    pub amount: T,
    /// The analysis year in which the event occurs
    pub year: u32,
}

impl<T> YearlyCostEvent<T> {
    /// Create a new [`YearlyCostEvent`]
    pub fn new(amount: T, year: u32) -> Self {
        Self { amount, year }
    }
}

/// Iterate over the analysis years in which an item is (re)installed.
///
/// An item is installed in year 0 and then replaced at every multiple of its lifetime which falls
/// within the analysis horizon. A lifetime of zero means the item is never replaced.
pub fn replacement_years(lifetime_years: u32, analysis_duration: u32) -> impl Iterator<Item = u32> {
    let step = if lifetime_years == 0 {
        // Never replaced: only the first cost
        analysis_duration.max(1)
    } else {
        lifetime_years
    };

    // The first cost is always included, even for a degenerate horizon
    (0..analysis_duration.max(1)).step_by(step as usize)
}

/// Expand an item's cost into the events for its installation and replacements.
pub fn recurring_schedule<T: Copy>(
    amount: T,
    lifetime_years: u32,
    analysis_duration: u32,
) -> Vec<YearlyCostEvent<T>> {
    replacement_years(lifetime_years, analysis_duration)
        .map(|year| YearlyCostEvent::new(amount, year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Money;
    use itertools::Itertools;
    use rstest::rstest;

    #[rstest]
    #[case(10, 35, &[0, 10, 20, 30])]
    #[case(10, 30, &[0, 10, 20])] // Year 30 is outside the horizon
    #[case(0, 35, &[0])] // Never replaced
    #[case(1, 3, &[0, 1, 2])]
    #[case(50, 30, &[0])] // Outlives the horizon
    #[case(10, 0, &[0])] // First cost is always included
    fn test_replacement_years(
        #[case] lifetime_years: u32,
        #[case] analysis_duration: u32,
        #[case] expected: &[u32],
    ) {
        assert_eq!(
            replacement_years(lifetime_years, analysis_duration).collect_vec(),
            expected
        );
    }

    #[test]
    fn test_recurring_schedule() {
        let events = recurring_schedule(Money(100.0), 10, 35);
        assert_eq!(
            events,
            [0, 10, 20, 30].map(|year| YearlyCostEvent::new(Money(100.0), year))
        );
    }

    #[test]
    fn test_recurring_schedule_no_lifetime() {
        let events = recurring_schedule(Money(100.0), 0, 35);
        assert_eq!(events, [YearlyCostEvent::new(Money(100.0), 0)]);
    }
}
