//! Dashboard service - read views assembled from the session state
//!
//! Every view is rebuilt on demand from raw logs; nothing here is cached
//! or persisted.

use crate::services::advice::AdviceRequest;
use crate::state::AppState;
use chrono::{DateTime, NaiveDate, TimeZone};
use nutritrack_shared::{
    build_weekly_trend, daily_progress, entries_on_day, rank_recommendations, recent_food_names,
    sum_nutrients, total_burned, DailyProgress, ExerciseEntry, LogEntry, MacroGoal, Nutrients,
    RankedFood, TrendDay,
};
use serde::{Deserialize, Serialize};

/// Number of recent food names handed to the advice producer
pub const RECENT_FOODS_FOR_ADVICE: usize = 5;

/// Today's consumed-vs-target overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDashboard {
    pub date: NaiveDate,
    pub goals: MacroGoal,
    pub progress: DailyProgress,
    pub logs: Vec<LogEntry>,
    pub exercises: Vec<ExerciseEntry>,
    pub recommendations: Vec<RankedFood>,
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    /// Food logs whose local date is today
    pub fn today_logs<'a, Tz: TimeZone>(
        state: &'a AppState,
        now: &DateTime<Tz>,
    ) -> Vec<&'a LogEntry> {
        entries_on_day(&state.food_logs, now.date_naive(), &now.timezone())
    }

    /// Exercise entries whose local date is today
    pub fn today_exercise<'a, Tz: TimeZone>(
        state: &'a AppState,
        now: &DateTime<Tz>,
    ) -> Vec<&'a ExerciseEntry> {
        entries_on_day(&state.exercise_logs, now.date_naive(), &now.timezone())
    }

    /// Today's consumed totals
    pub fn consumed_today<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> Nutrients {
        sum_nutrients(Self::today_logs(state, now))
    }

    /// Ranked foods for today's remaining gap
    pub fn recommendations<Tz: TimeZone>(
        state: &AppState,
        now: &DateTime<Tz>,
        top_n: usize,
    ) -> Vec<RankedFood> {
        let consumed = Self::consumed_today(state, now);
        rank_recommendations(&state.catalog, &consumed, &state.goals, top_n)
    }

    /// Build today's dashboard
    pub fn daily<Tz: TimeZone>(
        state: &AppState,
        now: &DateTime<Tz>,
        top_n: usize,
    ) -> DailyDashboard {
        let logs = Self::today_logs(state, now);
        let exercises = Self::today_exercise(state, now);
        let consumed = sum_nutrients(logs.iter().copied());
        let burned = total_burned(exercises.iter().copied());

        DailyDashboard {
            date: now.date_naive(),
            goals: state.goals,
            progress: daily_progress(&consumed, burned, &state.goals),
            logs: logs.into_iter().cloned().collect(),
            exercises: exercises.into_iter().cloned().collect(),
            recommendations: rank_recommendations(&state.catalog, &consumed, &state.goals, top_n),
        }
    }

    /// Seven-day trend against the current goal
    pub fn weekly<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> Vec<TrendDay> {
        build_weekly_trend(&state.food_logs, &state.goals, now)
    }

    /// Numeric summary handed to the advice producer
    pub fn advice_request<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> AdviceRequest {
        let logs = Self::today_logs(state, now);
        AdviceRequest {
            consumed: sum_nutrients(logs.iter().copied()),
            goal: state.goals,
            recent_foods: recent_food_names(logs, RECENT_FOODS_FOR_ADVICE),
        }
    }
}
