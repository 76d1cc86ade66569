//! Dashboard analytics: period-over-period trends and a least-squares
//! spending projection. Pure functions, no I/O.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Minimal record shape the analytics work on. Callers project their richer
/// domain records (transactions, contributions, debts) down to this.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedAmount {
    pub date: String,
    pub amount: f64,
}

/// Signed percentage change against the immediately preceding window of the
/// same length, e.g. `{ "+12.3%", "vs mes ant." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub trend: String,
    pub trend_label: String,
}

/// Window length in days and comparison label for each period preset.
fn period_window(period_key: &str) -> Option<(i64, &'static str)> {
    match period_key {
        "7days" => Some((7, "vs 7 días ant.")),
        "month" => Some((30, "vs mes ant.")),
        "3months" => Some((90, "vs 3 meses ant.")),
        "all" => Some((365, "vs año ant.")),
        _ => None,
    }
}

/// Parse a record date as a plain calendar date. Expects `YYYY-MM-DD`
/// (longer strings are truncated to the date part); input without a dash
/// falls back to `DD/MM/YYYY`. Returns `None` for anything unparseable.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains('-') {
        let head = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    } else {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
    }
}

/// Compare the trailing period against the one right before it.
///
/// The current window is `[today - days, today]` inclusive; the previous
/// window is the `days`-long half-open range ending exactly where the
/// current one starts. Records with unparseable dates are skipped. Returns
/// `None` for an unknown `period_key` or when the previous window sums to
/// zero (a percentage against a zero baseline is meaningless).
pub fn calculate_trend(
    records: &[DatedAmount],
    period_key: &str,
    today: NaiveDate,
) -> Option<TrendResult> {
    let (days, label) = period_window(period_key)?;

    let current_start = today - Duration::days(days);
    let prev_start = current_start - Duration::days(days);

    let mut current_sum = 0.0_f64;
    let mut prev_sum = 0.0_f64;
    for record in records {
        let date = match parse_record_date(&record.date) {
            Some(d) => d,
            None => continue,
        };
        if date >= current_start && date <= today {
            current_sum += record.amount;
        } else if date >= prev_start && date < current_start {
            prev_sum += record.amount;
        }
    }

    if prev_sum == 0.0 {
        return None;
    }

    let percentage = (current_sum - prev_sum) / prev_sum * 100.0;
    Some(TrendResult {
        trend: format!("{:+.1}%", percentage),
        trend_label: label.to_string(),
    })
}

/// Project a full period's total from a partial run of per-day amounts.
///
/// `daily_amounts[i]` is the total for day `i` of the period (not
/// cumulative). Observed days are kept as-is; each remaining day up to
/// `total_days` gets the least-squares prediction, clamped at zero since
/// spending cannot go negative. Result is rounded to a whole amount.
pub fn calculate_linear_regression(daily_amounts: &[f64], total_days: usize) -> i64 {
    let n = daily_amounts.len();
    if n == 0 {
        return 0;
    }
    if n == 1 {
        // Not enough points for a slope; assume the one observed day repeats.
        return (daily_amounts[0] * total_days as f64).round() as i64;
    }

    let n_f = n as f64;
    let mut sum_x = 0.0_f64;
    let mut sum_y = 0.0_f64;
    let mut sum_xy = 0.0_f64;
    let mut sum_xx = 0.0_f64;
    for (i, &y) in daily_amounts.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // X is the index sequence 0..n-1, so the denominator is nonzero for n >= 2.
    let slope = (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n_f;

    let mut total_projected: f64 = daily_amounts.iter().sum();
    for x in n..total_days {
        let predicted = slope * x as f64 + intercept;
        total_projected += predicted.max(0.0);
    }

    total_projected.round() as i64
}

/// Number of days in the month `date` falls in.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(date: &str, amount: f64) -> DatedAmount {
        DatedAmount {
            date: date.to_string(),
            amount,
        }
    }

    #[test]
    fn unknown_period_key_yields_none() {
        let records = vec![record("2024-06-25", 100.0)];
        assert!(calculate_trend(&records, "14days", date("2024-06-30")).is_none());
        assert!(calculate_trend(&records, "", date("2024-06-30")).is_none());
    }

    #[test]
    fn empty_records_yield_none() {
        assert!(calculate_trend(&[], "7days", date("2024-06-30")).is_none());
    }

    #[test]
    fn zero_baseline_yields_none() {
        // Activity in the current window only: nothing to compare against.
        let records = vec![record("2024-06-30", 100.0)];
        assert!(calculate_trend(&records, "7days", date("2024-06-30")).is_none());
    }

    #[test]
    fn increase_formats_with_plus_sign() {
        let records = vec![record("2024-06-25", 150.0), record("2024-06-20", 100.0)];
        let result = calculate_trend(&records, "7days", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "+50.0%");
        assert_eq!(result.trend_label, "vs 7 días ant.");
    }

    #[test]
    fn decrease_formats_with_minus_sign() {
        let records = vec![record("2024-06-25", 50.0), record("2024-06-20", 100.0)];
        let result = calculate_trend(&records, "7days", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "-50.0%");
    }

    #[test]
    fn month_period_uses_its_own_label() {
        let records = vec![record("2024-06-15", 300.0), record("2024-05-20", 200.0)];
        let result = calculate_trend(&records, "month", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "+50.0%");
        assert_eq!(result.trend_label, "vs mes ant.");
    }

    #[test]
    fn boundary_date_counts_in_current_window_only() {
        // today = 2024-06-30, 7days: current starts 2024-06-23, which is also
        // where the previous window ends. A record exactly on that date must
        // land in the current sum, never in both.
        let records = vec![record("2024-06-23", 50.0), record("2024-06-20", 100.0)];
        let result = calculate_trend(&records, "7days", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "-50.0%");
    }

    #[test]
    fn malformed_dates_are_skipped_not_fatal() {
        let records = vec![
            record("garbage", 9999.0),
            record("", 9999.0),
            record("2024-13-45", 9999.0),
            record("2024-06-25", 150.0),
            record("2024-06-20", 100.0),
        ];
        let result = calculate_trend(&records, "7days", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "+50.0%");
    }

    #[test]
    fn slashed_dates_use_the_fallback_format() {
        let records = vec![record("25/06/2024", 150.0), record("20/06/2024", 100.0)];
        let result = calculate_trend(&records, "7days", date("2024-06-30")).unwrap();
        assert_eq!(result.trend, "+50.0%");
    }

    #[test]
    fn trend_is_idempotent() {
        let records = vec![record("2024-06-25", 150.0), record("2024-06-20", 100.0)];
        let first = calculate_trend(&records, "7days", date("2024-06-30"));
        let second = calculate_trend(&records, "7days", date("2024-06-30"));
        assert_eq!(first, second);
    }

    #[test]
    fn date_components_round_trip() {
        let parsed = parse_record_date("2024-03-01").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 3, 1));
    }

    #[test]
    fn timestamp_suffix_is_ignored() {
        let parsed = parse_record_date("2024-03-01T00:00:00.000Z").unwrap();
        assert_eq!(parsed, date("2024-03-01"));
    }

    #[test]
    fn regression_of_empty_input_is_zero() {
        assert_eq!(calculate_linear_regression(&[], 7), 0);
    }

    #[test]
    fn regression_of_single_day_repeats_it() {
        assert_eq!(calculate_linear_regression(&[40.0], 7), 280);
    }

    #[test]
    fn regression_without_remaining_days_sums_actuals() {
        assert_eq!(calculate_linear_regression(&[10.0, 20.0, 30.0], 3), 60);
    }

    #[test]
    fn regression_extrapolates_a_rising_series() {
        // Perfect line y = 10x + 10 over 3 days, projected to 5:
        // 10 + 20 + 30 observed, 40 + 50 predicted.
        assert_eq!(calculate_linear_regression(&[10.0, 20.0, 30.0], 5), 150);
    }

    #[test]
    fn negative_predictions_clamp_at_zero() {
        // Falling line hits zero at day 2; later days would predict negative
        // amounts and must not reduce the total below the observed sum.
        let observed = [100.0, 50.0, 0.0];
        let projected = calculate_linear_regression(&observed, 10);
        assert_eq!(projected, 150);
        assert!(projected >= observed.iter().sum::<f64>() as i64);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(date("2024-02-10")), 29);
        assert_eq!(days_in_month(date("2023-02-10")), 28);
        assert_eq!(days_in_month(date("2024-04-01")), 30);
        assert_eq!(days_in_month(date("2024-12-31")), 31);
    }
}
