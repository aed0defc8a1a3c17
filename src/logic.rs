/*
Study plan partitioning logic.
Module was independently written from HTTP / Axum for testing
*/

use chrono::{Days, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::duration;
use crate::models::{Course, DayBucket, FlatLecture, StudyPlan};

// A day may run this much over the target before a new day is started
pub const SOFT_CAP_FACTOR: f64 = 1.2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// Parse a lecture/section duration, warning when non-empty text
// contributes nothing. The value itself still falls back to 0.
fn minutes_of(text: &str, what: &str) -> u32 {
    match duration::parse_strict(text) {
        Ok(m) => m,
        Err(e) => {
            if !text.trim().is_empty() {
                warn!(%e, what, "unparsed duration counted as 0m");
            }
            0
        }
    }
}

// Linearize the curriculum.
//
// Returns every lecture in section/lecture order together with the
// course total. The total counts each section's own duration AND
// each lecture's duration.
pub fn flatten(course: &Course) -> (Vec<FlatLecture>, u32) {
    let mut total = 0u32;
    let mut flat = Vec::with_capacity(course.lecture_count());

    for section in &course.curriculum {
        total = total.saturating_add(minutes_of(&section.duration, &section.title));

        for lecture in &section.lectures {
            let minutes = minutes_of(&lecture.duration, &lecture.title);
            total = total.saturating_add(minutes);
            flat.push(FlatLecture {
                section: section.title.clone(),
                lecture: lecture.title.clone(),
                duration: lecture.duration.clone(),
                minutes,
            });
        }
    }

    (flat, total)
}

// Resolve the date of day 1.
// Missing or unparsable "YYYY-MM-DD" -> today
pub fn resolve_anchor(start_date: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = start_date else {
        return today;
    };
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            warn!(start_date = raw, "unparsable start date, using today");
            today
        }
    }
}

fn date_for_day(anchor: NaiveDate, day: u32) -> NaiveDate {
    anchor
        .checked_add_days(Days::new(u64::from(day - 1)))
        .unwrap_or(NaiveDate::MAX)
}

// Lectures collected for the day currently being filled
#[derive(Default)]
struct OpenDay {
    lectures: Vec<FlatLecture>,
    sections: Vec<String>,
    minutes: u32,
}

impl OpenDay {
    fn push(&mut self, lecture: FlatLecture) {
        if !self.sections.contains(&lecture.section) {
            self.sections.push(lecture.section.clone());
        }
        self.minutes = self.minutes.saturating_add(lecture.minutes);
        self.lectures.push(lecture);
    }

    fn close(self, day: u32, anchor: NaiveDate) -> DayBucket {
        DayBucket {
            day,
            date: date_for_day(anchor, day),
            lectures: self.lectures,
            sections: self.sections,
            total_minutes: self.minutes,
        }
    }
}

/// Greedily pack lectures into days.
///
/// Single forward pass:
/// - A new day starts before a lecture if adding it would push the open
///   day past `target * 1.2`, the open day already has something in it,
///   and there are days left in the budget
/// - Otherwise the lecture joins the open day, so an oversized lecture
///   or a spent budget can still overflow the cap
pub fn pack_days(
    lectures: Vec<FlatLecture>,
    target_daily_minutes: u32,
    total_days: u32,
    anchor: NaiveDate,
) -> Vec<DayBucket> {
    let cap = f64::from(target_daily_minutes) * SOFT_CAP_FACTOR;

    let mut days = Vec::new();
    let mut day = 1u32;
    let mut open = OpenDay::default();

    for lecture in lectures {
        let would_be = f64::from(open.minutes.saturating_add(lecture.minutes));
        if would_be > cap && !open.lectures.is_empty() && day < total_days {
            days.push(std::mem::take(&mut open).close(day, anchor));
            day += 1;
        }
        open.push(lecture);
    }

    if !open.lectures.is_empty() {
        days.push(open.close(day, anchor));
    }

    days
}

/// Build a dated study plan for `course` spread over `weeks` weeks.
///
/// `today` stands in for the current date whenever `start_date` is
/// missing or cannot be parsed.
pub fn build_plan(
    course: &Course,
    weeks: i64,
    start_date: Option<&str>,
    today: NaiveDate,
) -> Result<StudyPlan, PlanError> {
    let total_days = weeks
        .checked_mul(7)
        .filter(|d| *d > 0)
        .and_then(|d| u32::try_from(d).ok())
        .ok_or_else(|| {
            PlanError::InvalidArgument(format!("weeks must be positive, got {weeks}"))
        })?;

    let (lectures, total_minutes) = flatten(course);
    let target_daily_minutes = total_minutes / total_days;
    let anchor = resolve_anchor(start_date, today);

    let days = pack_days(lectures, target_daily_minutes, total_days, anchor);

    let scheduled = days
        .iter()
        .fold(0u32, |acc, d| acc.saturating_add(d.total_minutes));
    let actual_daily_minutes = match u32::try_from(days.len()) {
        Ok(n) if n > 0 => scheduled / n,
        _ => 0,
    };

    debug!(
        total_minutes,
        target_daily_minutes,
        actual_daily_minutes,
        days = days.len(),
        "built study plan"
    );

    Ok(StudyPlan {
        course: course.clone(),
        days,
        total_minutes,
        target_daily_minutes,
        actual_daily_minutes,
        weeks,
        start_date: start_date.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_course;
    use crate::models::{Lecture, Section};

    fn section(title: &str, duration: &str, lectures: &[(&str, &str)]) -> Section {
        Section {
            title: title.to_string(),
            duration: duration.to_string(),
            lectures: lectures
                .iter()
                .map(|(t, d)| Lecture {
                    title: t.to_string(),
                    duration: d.to_string(),
                })
                .collect(),
        }
    }

    fn course(curriculum: Vec<Section>) -> Course {
        Course {
            title: "Test Course".to_string(),
            instructor: "Someone".to_string(),
            url: None,
            curriculum,
        }
    }

    fn two_section_course() -> Course {
        course(vec![
            section("A", "", &[("a1", "30m"), ("a2", "40m"), ("a3", "50m")]),
            section("B", "", &[("b1", "60m"), ("b2", "20m")]),
        ])
    }

    fn day0() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn minutes_per_day(plan: &StudyPlan) -> Vec<u32> {
        plan.days.iter().map(|d| d.total_minutes).collect()
    }

    #[test]
    fn test_two_section_scenario() {
        let plan = build_plan(&two_section_course(), 1, Some("2024-01-01"), day0()).unwrap();

        assert_eq!(plan.total_minutes, 200);
        assert_eq!(plan.target_daily_minutes, 28);
        assert_eq!(minutes_per_day(&plan), vec![30, 40, 50, 60, 20]);
        assert_eq!(plan.actual_daily_minutes, 40);
        assert_eq!(plan.scheduled_minutes(), 200);
        assert_eq!(plan.days[3].sections, vec!["B".to_string()]);
    }

    #[test]
    fn test_small_lectures_share_a_day() {
        // total 120 over 7 days -> target 17, cap 20.4
        let c = course(vec![section(
            "S",
            "",
            &[("1", "10m"), ("2", "10m"), ("3", "10m"), ("4", "90m")],
        )]);
        let plan = build_plan(&c, 1, None, day0()).unwrap();
        assert_eq!(minutes_per_day(&plan), vec![20, 10, 90]);
    }

    #[test]
    fn test_section_durations_count_toward_total() {
        let c = course(vec![
            section("A", "1h", &[("a1", "30m"), ("a2", "30m")]),
            section("B", "15m", &[("b1", "15m")]),
        ]);
        let plan = build_plan(&c, 1, None, day0()).unwrap();

        assert_eq!(plan.total_minutes, 150);
        assert_eq!(plan.target_daily_minutes, 21);
        // only lectures are placed on days
        assert_eq!(plan.scheduled_minutes(), 75);
    }

    #[test]
    fn test_lectures_covered_once_in_order() {
        let c = sample_course();
        let (flat, _) = flatten(&c);
        let plan = build_plan(&c, 2, None, day0()).unwrap();

        let placed: Vec<FlatLecture> = plan
            .days
            .iter()
            .flat_map(|d| d.lectures.iter().cloned())
            .collect();
        assert_eq!(placed, flat);

        for (i, d) in plan.days.iter().enumerate() {
            assert_eq!(d.day as usize, i + 1);
            assert!(!d.lectures.is_empty());
        }
    }

    #[test]
    fn test_never_exceeds_day_budget() {
        let c = sample_course();
        for weeks in 1..=8 {
            let plan = build_plan(&c, weeks, None, day0()).unwrap();
            assert!((plan.days.len() as i64) <= weeks * 7, "weeks={weeks}");
        }
    }

    #[test]
    fn test_soft_cap_respected_before_last_day() {
        let c = sample_course();
        for weeks in 1..=4 {
            let plan = build_plan(&c, weeks, None, day0()).unwrap();
            let cap = f64::from(plan.target_daily_minutes) * SOFT_CAP_FACTOR;
            let largest = plan
                .days
                .iter()
                .flat_map(|d| d.lectures.iter().map(|l| l.minutes))
                .max()
                .unwrap();
            if f64::from(largest) > cap {
                continue;
            }
            let (_, rest) = plan.days.split_last().unwrap();
            for d in rest {
                assert!(f64::from(d.total_minutes) <= cap, "day {} over cap", d.day);
            }
        }
    }

    #[test]
    fn test_budget_exhausted_piles_onto_last_day() {
        let lectures: Vec<(String, String)> = (1..=10)
            .map(|i| (format!("l{i}"), "60m".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = lectures
            .iter()
            .map(|(t, d)| (t.as_str(), d.as_str()))
            .collect();
        let c = course(vec![section("S", "", &refs)]);

        let plan = build_plan(&c, 1, None, day0()).unwrap();
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[6].total_minutes, 240);
        assert_eq!(plan.days[6].lectures.len(), 4);
        assert_eq!(plan.scheduled_minutes(), 600);
    }

    #[test]
    fn test_anchor_date_resolution() {
        let today = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        let plan = build_plan(&two_section_course(), 1, Some("2024-01-01"), today).unwrap();
        assert_eq!(plan.days[2].day, 3);
        assert_eq!(plan.days[2].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(
            plan.days[2].date.format("%A, %B %-d, %Y").to_string(),
            "Wednesday, January 3, 2024"
        );
    }

    #[test]
    fn test_bad_anchor_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        assert_eq!(resolve_anchor(Some("not a date"), today), today);
        assert_eq!(resolve_anchor(None, today), today);

        let plan = build_plan(&two_section_course(), 1, Some("2024-13-40"), today).unwrap();
        assert_eq!(plan.days[0].date, today);
        assert_eq!(plan.days[1].date, NaiveDate::from_ymd_opt(2030, 6, 16).unwrap());
    }

    #[test]
    fn test_non_positive_weeks_rejected() {
        for weeks in [0, -1, -52] {
            let err = build_plan(&two_section_course(), weeks, None, day0()).unwrap_err();
            assert!(matches!(err, PlanError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_huge_lectures_saturate_instead_of_overflowing() {
        let c = course(vec![section(
            "S",
            "40000000h",
            &[("x", "40000000h"), ("y", "40000000h")],
        )]);
        let plan = build_plan(&c, 1, None, day0()).unwrap();

        assert_eq!(plan.total_minutes, u32::MAX);
        assert_eq!(plan.target_daily_minutes, u32::MAX / 7);
        assert_eq!(minutes_per_day(&plan), vec![2_400_000_000, 2_400_000_000]);
        assert_eq!(plan.scheduled_minutes(), u32::MAX);
        assert_eq!(plan.actual_daily_minutes, u32::MAX / 2);
    }

    #[test]
    fn test_bucket_totals_saturate() {
        let c = course(vec![section(
            "S",
            "",
            &[("x", "40000000h"), ("y", "40000000h"), ("z", "40000000h")],
        )]);
        let plan = build_plan(&c, 1, None, day0()).unwrap();
        assert_eq!(plan.total_minutes, u32::MAX);
        assert_eq!(plan.days.len(), 3);
        assert_eq!(plan.scheduled_minutes(), u32::MAX);
        assert_eq!(plan.actual_daily_minutes, u32::MAX / 3);
    }

    #[test]
    fn test_empty_course() {
        let plan = build_plan(&course(vec![]), 2, None, day0()).unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.total_minutes, 0);
        assert_eq!(plan.target_daily_minutes, 0);
        assert_eq!(plan.actual_daily_minutes, 0);
    }

    #[test]
    fn test_unparsed_durations_count_as_zero() {
        let c = course(vec![section("S", "n/a", &[("x", "tbd"), ("y", "5m")])]);
        let (flat, total) = flatten(&c);
        assert_eq!(total, 5);
        assert_eq!(flat[0].minutes, 0);
    }

    #[test]
    fn test_zero_target_puts_each_lecture_on_own_day() {
        // total 5 over 7 days -> target 0, every non-empty day closes
        let c = course(vec![section("S", "", &[("1", "1m"), ("2", "2m"), ("3", "2m")])]);
        let plan = build_plan(&c, 1, None, day0()).unwrap();
        assert_eq!(minutes_per_day(&plan), vec![1, 2, 2]);
    }
}
