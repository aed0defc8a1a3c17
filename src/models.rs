use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lecture {
    pub title: String,
    pub duration: String, // "2h 30m", "45m", ...
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    // Nominal section length as advertised by the catalog.
    // Not checked against the lectures' sum.
    pub duration: String,
    pub lectures: Vec<Lecture>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    pub instructor: String,
    pub url: Option<String>,
    pub curriculum: Vec<Section>,
}

impl Course {
    pub fn lecture_count(&self) -> usize {
        self.curriculum.iter().map(|s| s.lectures.len()).sum()
    }
}

// One lecture pulled out of its section, in curriculum order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlatLecture {
    pub section: String,
    pub lecture: String,
    pub duration: String,
    pub minutes: u32,
}

// Lectures assigned to a single study day
#[derive(Debug, Clone, Serialize)]
pub struct DayBucket {
    pub day: u32, // 1-based
    pub date: NaiveDate,
    pub lectures: Vec<FlatLecture>,
    pub sections: Vec<String>, // distinct section titles
    pub total_minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyPlan {
    pub course: Course,
    pub days: Vec<DayBucket>,
    pub total_minutes: u32,        // section durations + lecture durations
    pub target_daily_minutes: u32, // total / (weeks * 7), floored
    pub actual_daily_minutes: u32, // scheduled / days produced, floored
    pub weeks: i64,
    pub start_date: Option<String>,
}

impl StudyPlan {
    /// Sum of the minutes actually placed on days.
    pub fn scheduled_minutes(&self) -> u32 {
        self.days
            .iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.total_minutes))
    }
}
