// --------------------------------------------------
// Course data sources.
//
// No real catalog scraping happens here: SampleCatalog hands back
// a fixed curriculum for any course URL, JsonCatalog reads courses
// from a local JSON file.
// --------------------------------------------------

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;

use crate::models::{Course, Lecture, Section};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course not found: {0}")]
    NotFound(String),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait CourseSource: Send + Sync {
    fn fetch_course(&self, identifier: &str) -> Result<Course, CatalogError>;
}

fn is_course_url(identifier: &str) -> bool {
    let id = identifier.trim();
    id.strip_prefix("https://")
        .or_else(|| id.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

// Stand-in for a catalog lookup: every http(s) URL maps to the sample course
#[derive(Debug, Default, Clone)]
pub struct SampleCatalog;

impl CourseSource for SampleCatalog {
    fn fetch_course(&self, identifier: &str) -> Result<Course, CatalogError> {
        if !is_course_url(identifier) {
            return Err(CatalogError::NotFound(identifier.to_string()));
        }
        let mut course = sample_course();
        course.url = Some(identifier.trim().to_string());
        Ok(course)
    }
}

/// Courses loaded from a JSON object of `{ "<url>": Course, ... }`.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    courses: HashMap<String, Course>,
}

impl JsonCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let courses: HashMap<String, Course> = serde_json::from_str(text)?;
        Ok(Self { courses })
    }
}

impl CourseSource for JsonCatalog {
    fn fetch_course(&self, identifier: &str) -> Result<Course, CatalogError> {
        let key = identifier.trim();
        let mut course = self
            .courses
            .get(key)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))?;
        if course.url.is_none() {
            course.url = Some(key.to_string());
        }
        Ok(course)
    }
}

fn lecture(title: &str, duration: &str) -> Lecture {
    Lecture {
        title: title.to_string(),
        duration: duration.to_string(),
    }
}

fn section(title: &str, duration: &str, lectures: Vec<Lecture>) -> Section {
    Section {
        title: title.to_string(),
        duration: duration.to_string(),
        lectures,
    }
}

pub fn sample_course() -> Course {
    Course {
        title: "CompTIA A+ Core 1 (220-1101) Complete Course".to_string(),
        instructor: "Mike Meyers".to_string(),
        url: Some("https://www.udemy.com/course/comptia-a-core-1/".to_string()),
        curriculum: vec![
            section("Introduction to CompTIA A+", "45m", vec![
                lecture("Welcome to the Course", "5m"),
                lecture("Course Overview and Objectives", "10m"),
                lecture("What You Will Learn", "15m"),
                lecture("Setting Up Your Study Environment", "15m"),
            ]),
            section("Hardware Fundamentals", "2h 15m", vec![
                lecture("Understanding Computer Components", "25m"),
                lecture("CPU and Motherboard Basics", "30m"),
                lecture("Memory and Storage Technologies", "35m"),
                lecture("Power Supplies and Cooling Systems", "25m"),
                lecture("Hardware Lab Exercise", "20m"),
            ]),
            section("Networking Basics", "1h 45m", vec![
                lecture("Network Fundamentals", "30m"),
                lecture("Network Protocols and Standards", "25m"),
                lecture("Wireless Networking Technologies", "20m"),
                lecture("Network Troubleshooting Basics", "30m"),
            ]),
            section("Mobile Devices", "55m", vec![
                lecture("Mobile Device Types and Features", "25m"),
                lecture("Mobile Device Hardware", "20m"),
                lecture("Mobile Device Connectivity", "20m"),
                lecture("Mobile Device Security", "15m"),
            ]),
            section("Hardware and Network Troubleshooting", "2h", vec![
                lecture("Troubleshooting Methodology", "30m"),
                lecture("Hardware Troubleshooting", "45m"),
                lecture("Network Troubleshooting", "45m"),
                lecture("Common Issues and Solutions", "30m"),
            ]),
            section("Virtualization and Cloud Computing", "1h 15m", vec![
                lecture("Virtualization Concepts", "25m"),
                lecture("Cloud Computing Basics", "25m"),
                lecture("Virtualization and Cloud Security", "25m"),
            ]),
            section("Operating Systems", "2h 15m", vec![
                lecture("Windows Operating System", "45m"),
                lecture("macOS and Linux Basics", "30m"),
                lecture("Operating System Installation", "30m"),
                lecture("Operating System Configuration", "30m"),
                lecture("Operating System Maintenance", "30m"),
            ]),
            section("Software Troubleshooting", "1h 15m", vec![
                lecture("Software Installation Issues", "30m"),
                lecture("Operating System Problems", "30m"),
                lecture("Security Software Issues", "25m"),
                lecture("Software Troubleshooting Tools", "20m"),
            ]),
            section("Security Fundamentals", "1h 30m", vec![
                lecture("Security Threats and Vulnerabilities", "30m"),
                lecture("Security Best Practices", "30m"),
                lecture("Data Protection and Privacy", "30m"),
            ]),
            section("Course Review and Exam Preparation", "1h 15m", vec![
                lecture("Course Review and Key Concepts", "30m"),
                lecture("Practice Exam Questions", "30m"),
                lecture("Exam Day Tips and Strategies", "15m"),
            ]),
        ],
    }
}
