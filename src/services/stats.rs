//! Aggregate statistics computed from daily sessions

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::sessions::Session;

/// How many recent sessions the streak calculation looks at
const STREAK_LOOKBACK: usize = 30;

/// Today's counters for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today_work_time: u32,
    pub today_breaks: u32,
    pub today_posture_reminders: u32,
    pub today_eye_exercises: u32,
    pub today_stretches: u32,
    pub current_streak: u32,
    pub active_session_id: Option<String>,
}

/// Totals over a window of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_work_time: u32,
    pub total_breaks: u32,
    pub total_posture_reminders: u32,
    pub total_eye_exercises: u32,
    pub total_stretches: u32,
    pub active_days: u32,
    pub average_daily_work_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_day_work_time: Option<u32>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// One day of the trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub work_time: u32,
    pub breaks: u32,
    pub posture_reminders: u32,
    pub health_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trends {
    pub daily_trends: Vec<DailyTrend>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Build the dashboard from all known sessions
pub fn dashboard(sessions: &[Session], today: NaiveDate) -> DashboardStats {
    let today_session = sessions
        .iter()
        .find(|session| session.date == today && session.is_active);

    match today_session {
        Some(session) => DashboardStats {
            today_work_time: session.work_time,
            today_breaks: session.breaks_taken,
            today_posture_reminders: session.posture_reminders,
            today_eye_exercises: session.eye_exercises_completed,
            today_stretches: session.stretches_completed,
            current_streak: current_streak(sessions, today),
            active_session_id: Some(session.id.clone()),
        },
        None => DashboardStats {
            current_streak: current_streak(sessions, today),
            ..Default::default()
        },
    }
}

/// Consecutive days with recorded work, ending today
pub fn current_streak(sessions: &[Session], today: NaiveDate) -> u32 {
    let mut worked: Vec<NaiveDate> = sessions
        .iter()
        .filter(|session| session.work_time > 0)
        .map(|session| session.date)
        .collect();
    worked.sort_unstable_by(|a, b| b.cmp(a));
    worked.dedup();

    let mut streak = 0;
    let mut expected = today;
    for date in worked.into_iter().take(STREAK_LOOKBACK) {
        if date != expected {
            break;
        }
        streak += 1;
        expected = date - Duration::days(1);
    }
    streak
}

/// Sum a counter across sessions, saturating at `u32::MAX`
fn total<F>(sessions: &[&Session], counter: F) -> u32
where
    F: Fn(&Session) -> u32,
{
    let sum: u64 = sessions.iter().map(|s| u64::from(counter(s))).sum();
    u32::try_from(sum).unwrap_or(u32::MAX)
}

/// Totals for sessions dated within `start..=end`
pub fn period_summary(
    sessions: &[Session],
    start: NaiveDate,
    end: NaiveDate,
    with_best_day: bool,
) -> PeriodSummary {
    let in_range: Vec<&Session> = sessions
        .iter()
        .filter(|session| session.date >= start && session.date <= end)
        .collect();

    let work_time: u64 = in_range.iter().map(|s| u64::from(s.work_time)).sum();
    let active_days = in_range.iter().filter(|s| s.work_time > 0).count() as u32;
    let average_daily_work_time = if active_days > 0 {
        // the average of u32 values always fits a u32
        (work_time / u64::from(active_days)) as u32
    } else {
        0
    };

    PeriodSummary {
        total_work_time: total(&in_range, |s| s.work_time),
        total_breaks: total(&in_range, |s| s.breaks_taken),
        total_posture_reminders: total(&in_range, |s| s.posture_reminders),
        total_eye_exercises: total(&in_range, |s| s.eye_exercises_completed),
        total_stretches: total(&in_range, |s| s.stretches_completed),
        active_days,
        average_daily_work_time,
        best_day_work_time: with_best_day
            .then(|| in_range.iter().map(|s| s.work_time).max().unwrap_or(0)),
        period_start: start,
        period_end: end,
    }
}

/// Past `days` days plus today, one entry per calendar day
pub fn trends(sessions: &[Session], today: NaiveDate, days: i64) -> Trends {
    let start = today - Duration::days(days);
    let daily_trends = start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| match sessions.iter().find(|s| s.date == date) {
            Some(session) => DailyTrend {
                date,
                work_time: session.work_time,
                breaks: session.breaks_taken,
                posture_reminders: session.posture_reminders,
                health_score: health_score(session),
            },
            None => DailyTrend {
                date,
                work_time: 0,
                breaks: 0,
                posture_reminders: 0,
                health_score: 0,
            },
        })
        .collect();

    Trends {
        daily_trends,
        period_start: start,
        period_end: today,
    }
}

/// 0-100 score rewarding work, breaks and exercises. Frequent posture
/// reminders past ten a day count against it.
pub fn health_score(session: &Session) -> u32 {
    let mut score = (session.work_time / 5).min(40) as i64;
    score += (session.breaks_taken.saturating_mul(5)).min(20) as i64;
    score += (session.eye_exercises_completed.saturating_mul(10)).min(20) as i64;
    score += (session.stretches_completed.saturating_mul(10)).min(20) as i64;

    if session.posture_reminders > 10 {
        score -= ((session.posture_reminders - 10).saturating_mul(2)).min(20) as i64;
    }

    score.clamp(0, 100) as u32
}
