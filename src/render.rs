/*
Markdown rendering of a study plan, plus a small Markdown -> HTML
conversion used by the preview endpoint. The converter only knows
the constructs the renderer itself emits.
*/

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::duration;
use crate::models::{DayBucket, FlatLecture, StudyPlan};

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

const STUDY_TIPS: [&str; 5] = [
    "✅ Check off each lecture as you complete it",
    "📝 Take notes during lectures",
    "🔄 Review previous sections regularly",
    "⏰ Stick to the daily schedule for best results",
    "🎯 Focus on understanding concepts, not just memorizing",
];

// "Wednesday, January 3, 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Group a day's lectures by section, keeping sections in the order they first appear.
pub fn group_by_section(lectures: &[FlatLecture]) -> Vec<(&str, Vec<&FlatLecture>)> {
    let mut groups: Vec<(&str, Vec<&FlatLecture>)> = Vec::new();
    for lecture in lectures {
        match groups.iter().position(|(s, _)| *s == lecture.section) {
            Some(i) => groups[i].1.push(lecture),
            None => groups.push((lecture.section.as_str(), vec![lecture])),
        }
    }
    groups
}

fn push_day(out: &mut Vec<String>, day: &DayBucket) {
    out.push(format!("### Day {} - {}", day.day, format_date(day.date)));
    out.push(format!("**Total Time:** {}", duration::format(day.total_minutes)));
    out.push(String::new());

    for (section, lectures) in group_by_section(&day.lectures) {
        out.push(format!("#### 📖 {section}"));
        out.push(String::new());
        for l in lectures {
            out.push(format!("- [ ] **{}** ({})", l.lecture, l.duration));
        }
        out.push(String::new());
    }

    out.push("---".to_string());
    out.push(String::new());
}

/// Render the plan as a Markdown checklist document.
pub fn render_markdown(plan: &StudyPlan) -> String {
    let course = &plan.course;
    let mut out: Vec<String> = Vec::new();

    out.push("# 📚 Course Study Plan".to_string());
    out.push(String::new());

    out.push("## 📋 Course Information".to_string());
    out.push(String::new());
    out.push(format!("**Course:** {}", course.title));
    out.push(format!("**Instructor:** {}", course.instructor));
    out.push(format!("**Total Duration:** {}", duration::format(plan.total_minutes)));
    out.push(format!("**Study Period:** {} weeks", plan.weeks));
    out.push(format!(
        "**Target Daily Time:** {}",
        duration::format(plan.target_daily_minutes)
    ));
    out.push(format!(
        "**Actual Daily Average:** {}",
        duration::format(plan.actual_daily_minutes)
    ));
    if let Some(url) = &course.url {
        out.push(format!("**Course URL:** {url}"));
    }
    out.push(String::new());

    out.push("## 📊 Progress Summary".to_string());
    out.push(String::new());
    out.push("| Day | Date | Sections | Duration | Status |".to_string());
    out.push("|-----|------|----------|----------|--------|".to_string());
    for day in &plan.days {
        out.push(format!(
            "| Day {} | {} | {} sections | {} | ⬜ |",
            day.day,
            format_date(day.date),
            day.sections.len(),
            duration::format(day.total_minutes)
        ));
    }
    out.push(String::new());

    out.push("## 📅 Daily Study Plans".to_string());
    out.push(String::new());
    for day in &plan.days {
        push_day(&mut out, day);
    }

    out.push("## 💡 Study Tips".to_string());
    out.push(String::new());
    for tip in STUDY_TIPS {
        out.push(format!("- {tip}"));
    }
    out.push(String::new());

    out.push("## 📝 Notes".to_string());
    out.push(String::new());
    out.push("Add your personal notes here:".to_string());
    out.push(String::new());
    for day in &plan.days {
        out.push(format!("### Day {} Notes", day.day));
        out.push(String::new());
    }

    out.join("\n")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn inline(text: &str) -> String {
    BOLD_RE
        .replace_all(&escape_html(text), "<strong>$1</strong>")
        .into_owned()
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum Block {
    None,
    List,
    Table,
}

fn switch_block(html: &mut Vec<String>, current: &mut Block, next: Block) {
    if *current == next {
        return;
    }
    match *current {
        Block::List => html.push("</ul>".to_string()),
        Block::Table => html.push("</table>".to_string()),
        Block::None => {}
    }
    match next {
        Block::List => html.push("<ul>".to_string()),
        Block::Table => html.push("<table>".to_string()),
        Block::None => {}
    }
    *current = next;
}

fn is_table_separator(line: &str) -> bool {
    line.starts_with('|') && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn table_row(line: &str) -> String {
    let cells: Vec<String> = line
        .trim_matches('|')
        .split('|')
        .map(|c| format!("<td>{}</td>", inline(c.trim())))
        .collect();
    format!("<tr>{}</tr>", cells.concat())
}

/// Best-effort Markdown -> HTML for the plan preview.
///
/// Handles headers (`#` to `####`), bold spans, checklist and plain
/// list items, pipe tables, horizontal rules and paragraphs.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut html: Vec<String> = Vec::new();
    let mut block = Block::None;

    for raw in markdown.lines() {
        let line = raw.trim_end();

        if let Some(item) = line.strip_prefix("- [ ] ") {
            switch_block(&mut html, &mut block, Block::List);
            html.push(format!("<li class=\"checkbox\">☐ {}</li>", inline(item)));
            continue;
        }
        if let Some(item) = line.strip_prefix("- [x] ") {
            switch_block(&mut html, &mut block, Block::List);
            html.push(format!("<li class=\"checkbox\">☑ {}</li>", inline(item)));
            continue;
        }
        if let Some(item) = line.strip_prefix("- ") {
            switch_block(&mut html, &mut block, Block::List);
            html.push(format!("<li>{}</li>", inline(item)));
            continue;
        }
        if line.starts_with('|') {
            switch_block(&mut html, &mut block, Block::Table);
            if !is_table_separator(line) {
                html.push(table_row(line));
            }
            continue;
        }

        switch_block(&mut html, &mut block, Block::None);

        if line.is_empty() {
            continue;
        }
        if line == "---" {
            html.push("<hr>".to_string());
            continue;
        }

        let heading = [("#### ", "h4"), ("### ", "h3"), ("## ", "h2"), ("# ", "h1")]
            .into_iter()
            .find_map(|(prefix, tag)| line.strip_prefix(prefix).map(|rest| (tag, rest)));
        match heading {
            Some((tag, rest)) => html.push(format!("<{tag}>{}</{tag}>", inline(rest))),
            None => html.push(format!("<p>{}</p>", inline(line))),
        }
    }
    switch_block(&mut html, &mut block, Block::None);

    html.join("\n")
}
