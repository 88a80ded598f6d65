//! Month-end spending projection for budgets.

use chrono::{Datelike, NaiveDate};

/// Projected spending for a budget period and whether it stays in budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    pub forecasted_spending: f64,
    pub on_track: bool,
}

/// Number of days in the given month, or None if the month is invalid
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Forecast spending for `month`/`year` as seen on `today`.
///
/// For the current month, spending so far is extrapolated at the daily
/// average over the days that are left. Any other month is already settled
/// (or not started), so the forecast is simply what was spent.
pub fn forecast(budget_amount: f64, spent: f64, month: u32, year: i32, today: NaiveDate) -> Forecast {
    let is_current_month = today.month() == month && today.year() == year;
    if !is_current_month {
        return Forecast {
            forecasted_spending: spent,
            on_track: spent <= budget_amount,
        };
    }

    let days_total = days_in_month(year, month).unwrap_or_else(|| today.day());
    project_month(budget_amount, spent, today.day(), days_total)
}

/// Extrapolate spending within a month that is `days_elapsed` days in.
/// With no elapsed days there is no daily average and the forecast is 0
/// (or the spend itself for a zero budget), so on-track falls back to the
/// spend so far.
pub fn project_month(budget_amount: f64, spent: f64, days_elapsed: u32, days_total: u32) -> Forecast {
    let days_left = days_total.saturating_sub(days_elapsed);

    let forecasted_spending = if days_elapsed > 0 && budget_amount >= 0.0 {
        let daily_average = spent / f64::from(days_elapsed);
        spent + daily_average * f64::from(days_left)
    } else if budget_amount == 0.0 {
        spent
    } else {
        0.0
    };

    let on_track = if forecasted_spending > 0.0 && budget_amount > 0.0 {
        forecasted_spending <= budget_amount
    } else {
        spent <= budget_amount
    };

    Forecast {
        forecasted_spending,
        on_track,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_current_month_extrapolates_daily_average() {
        // 100 spent over 10 of 30 days -> 300 by month end
        let result = forecast(250.0, 100.0, 6, 2024, date(2024, 6, 10));

        assert!((result.forecasted_spending - 300.0).abs() < 1e-9);
        assert!(!result.on_track);
    }

    #[test]
    fn test_current_month_within_budget() {
        let result = forecast(400.0, 100.0, 6, 2024, date(2024, 6, 10));
        assert!(result.on_track);
    }

    #[test]
    fn test_last_day_forecast_is_spend() {
        let result = forecast(100.0, 80.0, 6, 2024, date(2024, 6, 30));
        assert_eq!(result.forecasted_spending, 80.0);
        assert!(result.on_track);
    }

    #[test]
    fn test_zero_forecast_falls_back_to_spend() {
        let result = forecast(50.0, 0.0, 6, 2024, date(2024, 6, 3));
        assert_eq!(result.forecasted_spending, 0.0);
        assert!(result.on_track);
    }

    #[test]
    fn test_zero_budget_forecast() {
        let result = forecast(0.0, 0.0, 6, 2024, date(2024, 6, 3));
        assert!(result.on_track);

        let overspent = forecast(0.0, 5.0, 6, 2024, date(2024, 6, 3));
        assert!(!overspent.on_track);
    }

    #[test]
    fn test_zero_days_elapsed_uses_spend_to_date() {
        let under = project_month(100.0, 40.0, 0, 30);
        assert_eq!(under.forecasted_spending, 0.0);
        assert!(under.on_track);

        let over = project_month(100.0, 140.0, 0, 30);
        assert!(!over.on_track);
    }

    #[test]
    fn test_other_month_uses_actual_spend() {
        let past = forecast(100.0, 120.0, 5, 2024, date(2024, 6, 10));
        assert_eq!(past.forecasted_spending, 120.0);
        assert!(!past.on_track);

        let future = forecast(100.0, 0.0, 7, 2024, date(2024, 6, 10));
        assert_eq!(future.forecasted_spending, 0.0);
        assert!(future.on_track);
    }
}
