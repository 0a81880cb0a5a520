//! Static calendar geometry for the seasonality x-axis.
//!
//! The detail plot's x-axis is week-of-year (0..N). Month ticks are derived
//! once from average month lengths expressed in weeks: a cumulative-sum
//! partition of the 52-week year, with each month's tick at the midpoint of
//! its week range. February uses 28.25 days to absorb leap years.

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_DAYS: [f64; 12] = [
    31.0, 28.25, 31.0, 30.0, 31.0, 30.0, 31.0, 31.0, 30.0, 31.0, 30.0, 31.0,
];

/// Tick position per month: midpoint of the month's week-of-year range.
pub fn month_ticks() -> Vec<f64> {
    let mut ticks = Vec::with_capacity(12);
    let mut start = 0.0;
    for days in MONTH_DAYS {
        let end = start + days / 7.0;
        ticks.push((start + end) / 2.0);
        start = end;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_ticks_strictly_increasing() {
        let ticks = month_ticks();
        assert_eq!(ticks.len(), 12);
        assert_eq!(MONTHS.len(), 12);
        for pair in ticks.windows(2) {
            assert!(pair[0] < pair[1], "ticks not increasing: {:?}", pair);
        }
    }

    #[test]
    fn ticks_span_a_full_year() {
        let ticks = month_ticks();
        // Partition totals 365.25 / 7 weeks; the last tick sits half of
        // December short of it.
        let year_weeks = 365.25 / 7.0;
        assert!(ticks[0] > 0.0 && ticks[0] < 3.0);
        let last = *ticks.last().unwrap();
        assert!((last - (year_weeks - 31.0 / 14.0)).abs() < 1e-9);
        assert!(last < 52.2);
    }

    #[test]
    fn january_midpoint() {
        let ticks = month_ticks();
        assert!((ticks[0] - 31.0 / 14.0).abs() < 1e-9);
    }
}
