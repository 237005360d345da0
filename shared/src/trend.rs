//! Trend windower
//!
//! Buckets log history into one slot per calendar day over the trailing
//! week. Every day is evaluated against the goal passed in: goals are not
//! versioned, so history is always compared with today's targets.

use crate::aggregate::{local_date, sum_nutrients};
use crate::goals::MacroGoal;
use crate::models::LogEntry;
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Days in the weekly trend, today included
pub const TREND_DAYS: u32 = 7;

pub const TODAY_LABEL: &str = "Today";

/// One day of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDay {
    pub date: NaiveDate,
    pub date_label: String,
    pub calories: i32,
    pub goal: i32,
    pub protein: f64,
    pub protein_goal: i32,
    pub fat: f64,
    pub fat_goal: i32,
    pub carbs: f64,
    pub carbs_goal: i32,
}

impl TrendDay {
    pub fn is_over_goal(&self) -> bool {
        self.calories > self.goal
    }

    pub fn has_entries(&self) -> bool {
        self.calories != 0 || self.protein != 0.0 || self.fat != 0.0 || self.carbs != 0.0
    }
}

/// "Today" for the most recent day, abbreviated weekday otherwise
pub fn default_day_label(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        TODAY_LABEL.to_string()
    } else {
        date.format("%a").to_string()
    }
}

/// Seven-day series ending today, oldest first
pub fn build_weekly_trend<Tz: TimeZone>(
    logs: &[LogEntry],
    goal: &MacroGoal,
    now: &DateTime<Tz>,
) -> Vec<TrendDay> {
    build_trend(logs, goal, now, TREND_DAYS, default_day_label)
}

/// Series of `days` slots ending today, oldest first, zero-filled
pub fn build_trend<Tz, F>(
    logs: &[LogEntry],
    goal: &MacroGoal,
    now: &DateTime<Tz>,
    days: u32,
    label: F,
) -> Vec<TrendDay>
where
    Tz: TimeZone,
    F: Fn(NaiveDate, bool) -> String,
{
    let tz = now.timezone();
    let today = now.date_naive();

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let totals = sum_nutrients(
                logs.iter()
                    .filter(|log| local_date(log.timestamp, &tz) == Some(date)),
            );
            TrendDay {
                date,
                date_label: label(date, date == today),
                calories: totals.calories,
                goal: goal.calories,
                protein: totals.protein,
                protein_goal: goal.protein,
                fat: totals.fat,
                fat_goal: goal.fat,
                carbs: totals.carbs,
                carbs_goal: goal.carbs,
            }
        })
        .collect()
}

/// Numeric digest of a trend series for advice generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub days: usize,
    pub days_logged: usize,
    pub days_over_goal: usize,
    /// Totals divided by every day in the series, empty days included
    pub average_calories: f64,
    pub average_protein: f64,
    pub average_carbs: f64,
    /// Averages over logged days only; zero when nothing was logged
    pub logged_average_calories: f64,
    pub logged_average_protein: f64,
    pub calorie_goal: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
}

fn mean<'a, I>(days: I, value: fn(&TrendDay) -> f64) -> f64
where
    I: ExactSizeIterator<Item = &'a TrendDay>,
{
    let count = days.len().max(1) as f64;
    days.map(value).sum::<f64>() / count
}

pub fn summarize_trend(days: &[TrendDay]) -> TrendSummary {
    let logged: Vec<&TrendDay> = days.iter().filter(|d| d.has_entries()).collect();
    let calories: fn(&TrendDay) -> f64 = |d| d.calories as f64;
    let protein: fn(&TrendDay) -> f64 = |d| d.protein;

    TrendSummary {
        days: days.len(),
        days_logged: logged.len(),
        days_over_goal: days.iter().filter(|d| d.is_over_goal()).count(),
        average_calories: mean(days.iter(), calories),
        average_protein: mean(days.iter(), protein),
        average_carbs: mean(days.iter(), |d| d.carbs),
        logged_average_calories: mean(logged.iter().copied(), calories),
        logged_average_protein: mean(logged.iter().copied(), protein),
        calorie_goal: days.last().map(|d| d.goal).unwrap_or_default(),
        protein_goal: days.last().map(|d| d.protein_goal).unwrap_or_default(),
        carbs_goal: days.last().map(|d| d.carbs_goal).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;
    use chrono::{FixedOffset, Utc};
    use proptest::prelude::*;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn goal() -> MacroGoal {
        MacroGoal {
            calories: 2000,
            protein: 150,
            carbs: 200,
            fat: 67,
        }
    }

    fn log(calories: i32, protein: f64, when: DateTime<FixedOffset>) -> LogEntry {
        LogEntry {
            id: format!("log-{}", when.timestamp_millis()),
            food_id: "1".to_string(),
            food_name: "Chicken breast".to_string(),
            icon: "🍗".to_string(),
            weight_grams: 100.0,
            timestamp: when.timestamp_millis(),
            nutrients: Nutrients {
                calories,
                protein,
                fat: 1.0,
                carbs: 2.0,
            },
        }
    }

    #[test]
    fn test_empty_logs_zero_filled_week() {
        let now = at(2024, 6, 15, 13);
        let trend = build_weekly_trend(&[], &goal(), &now);

        assert_eq!(trend.len(), 7);
        assert!(trend.iter().all(|d| d.calories == 0 && d.goal == 2000));
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(trend[6].date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(trend[6].date_label, TODAY_LABEL);
        // 2024-06-14 was a Friday
        assert_eq!(trend[5].date_label, "Fri");
    }

    #[test]
    fn test_logs_bucketed_by_local_day() {
        let now = at(2024, 6, 15, 13);
        let logs = vec![
            log(500, 30.0, at(2024, 6, 15, 8)),
            log(300, 10.0, at(2024, 6, 15, 12)),
            log(700, 20.0, at(2024, 6, 13, 0)),
            // Outside the window
            log(900, 50.0, at(2024, 6, 8, 23)),
        ];

        let trend = build_weekly_trend(&logs, &goal(), &now);

        assert_eq!(trend[6].calories, 800);
        assert!((trend[6].protein - 40.0).abs() < 1e-9);
        assert_eq!(trend[4].calories, 700);
        assert_eq!(trend.iter().map(|d| d.calories).sum::<i32>(), 1500);
    }

    #[test]
    fn test_local_midnight_boundary() {
        // 2024-06-14 16:30 UTC is 2024-06-15 00:30 at +08:00
        let now = at(2024, 6, 15, 13);
        let utc = Utc.with_ymd_and_hms(2024, 6, 14, 16, 30, 0).unwrap();
        let logs = vec![log(400, 10.0, utc.with_timezone(&tz()))];

        let trend = build_weekly_trend(&logs, &goal(), &now);
        assert_eq!(trend[6].calories, 400);
        assert_eq!(trend[5].calories, 0);
    }

    #[test]
    fn test_every_day_uses_current_goal() {
        let now = at(2024, 6, 15, 13);
        let trend = build_weekly_trend(&[], &goal(), &now);
        assert!(trend
            .iter()
            .all(|d| d.protein_goal == 150 && d.fat_goal == 67 && d.carbs_goal == 200));
    }

    #[test]
    fn test_custom_labels_and_length() {
        let now = at(2024, 6, 15, 13);
        let trend = build_trend(&[], &goal(), &now, 3, |date, today| {
            if today {
                "now".to_string()
            } else {
                date.format("%m-%d").to_string()
            }
        });
        let labels: Vec<&str> = trend.iter().map(|d| d.date_label.as_str()).collect();
        assert_eq!(labels, vec!["06-13", "06-14", "now"]);
    }

    #[test]
    fn test_summarize_trend() {
        let now = at(2024, 6, 15, 13);
        let logs = vec![
            log(2500, 100.0, at(2024, 6, 15, 8)),
            log(1500, 80.0, at(2024, 6, 14, 8)),
        ];
        let summary = summarize_trend(&build_weekly_trend(&logs, &goal(), &now));

        assert_eq!(summary.days, 7);
        assert_eq!(summary.days_logged, 2);
        assert_eq!(summary.days_over_goal, 1);
        assert!((summary.logged_average_calories - 2000.0).abs() < 1e-9);
        assert!((summary.logged_average_protein - 90.0).abs() < 1e-9);
        // Week averages divide by all seven days
        assert!((summary.average_calories - 4000.0 / 7.0).abs() < 1e-9);
        assert!((summary.average_protein - 180.0 / 7.0).abs() < 1e-9);
        assert_eq!(summary.calorie_goal, 2000);
    }

    #[test]
    fn test_week_averages_include_empty_days() {
        let now = at(2024, 6, 15, 13);
        let mut single = log(500, 70.0, at(2024, 6, 15, 8));
        single.nutrients.carbs = 35.0;
        let summary = summarize_trend(&build_weekly_trend(&[single], &goal(), &now));

        assert_eq!(summary.days_logged, 1);
        assert!((summary.average_protein - 10.0).abs() < 1e-9);
        assert!((summary.average_carbs - 5.0).abs() < 1e-9);
        assert!((summary.logged_average_protein - 70.0).abs() < 1e-9);
        assert_eq!(summary.carbs_goal, goal().carbs);
    }

    #[test]
    fn test_summarize_empty_series() {
        let summary = summarize_trend(&[]);
        assert_eq!(summary.days_logged, 0);
        assert_eq!(summary.average_calories, 0.0);
        assert_eq!(summary.logged_average_calories, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: always 7 chronological days ending today
        #[test]
        fn prop_week_shape(
            day_offsets in proptest::collection::vec(0u64..20, 0..30),
            hour in 0u32..24
        ) {
            let now = at(2024, 3, 1, hour);
            let logs: Vec<LogEntry> = day_offsets
                .iter()
                .map(|&o| log(100, 5.0, now - chrono::Duration::days(o as i64)))
                .collect();

            let trend = build_weekly_trend(&logs, &goal(), &now);

            prop_assert_eq!(trend.len(), 7);
            prop_assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
            prop_assert_eq!(trend[6].date, now.date_naive());
        }
    }
}
