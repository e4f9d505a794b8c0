//! Printable HTML rendering of a reconciled grid.
//!
//! Output depends only on the arguments, including the `generated_on` date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, TimetableGrid};

pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub institution: Option<String>,
    pub course: Option<String>,
    pub academic_year: Option<String>,
    pub section: Option<String>,
}

const STYLE: &str = r#"    body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
    .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #e2e8f0; padding-bottom: 20px; }
    .institution-name { font-size: 24px; font-weight: bold; color: #1e40af; margin-bottom: 5px; }
    .course-info { font-size: 18px; color: #6b7280; margin-bottom: 10px; }
    .section-info { font-size: 16px; color: #374151; }
    .timetable-table { width: 100%; border-collapse: collapse; margin-top: 20px; font-size: 12px; }
    .timetable-table th, .timetable-table td { border: 1px solid #d1d5db; padding: 8px; text-align: center; vertical-align: middle; }
    .timetable-table th { background-color: #f3f4f6; font-weight: bold; color: #374151; }
    .day-header { background-color: #dbeafe; font-weight: bold; color: #1e40af; }
    .subject-name { font-weight: bold; color: #7c3aed; margin-bottom: 2px; }
    .faculty-name { color: #059669; margin-bottom: 2px; }
    .room-name { color: #dc2626; font-size: 10px; }
    .empty-cell { color: #9ca3af; }
    .footer { margin-top: 30px; text-align: center; font-size: 12px; color: #6b7280; }
    @media print { body { margin: 0; } }
"#;

pub fn render(grid: &TimetableGrid, metadata: &ExportMetadata, generated_on: NaiveDate) -> String {
    let institution = text(metadata.institution.as_deref(), "Institution Name");
    let course = text(metadata.course.as_deref(), "Course");
    let academic_year = text(metadata.academic_year.as_deref(), "Academic Year");
    let section = text(metadata.section.as_deref(), "Section");

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str(&format!("  <title>Timetable - {}</title>\n", section));
    out.push_str("  <style>\n");
    out.push_str(STYLE);
    out.push_str("  </style>\n</head>\n<body>\n");

    out.push_str("  <div class=\"header\">\n");
    out.push_str(&format!("    <div class=\"institution-name\">{}</div>\n", institution));
    out.push_str(&format!("    <div class=\"course-info\">{} - {}</div>\n", course, academic_year));
    out.push_str(&format!(
        "    <div class=\"section-info\">Section: {} | Generated on: {}</div>\n",
        section,
        generated_on.format("%Y-%m-%d")
    ));
    out.push_str("  </div>\n");

    out.push_str("  <table class=\"timetable-table\">\n    <thead>\n      <tr>\n");
    out.push_str("        <th>Day / Period</th>\n");
    for period in grid.periods() {
        out.push_str(&format!("        <th>Period {}</th>\n", escape(&period.to_string())));
    }
    out.push_str("      </tr>\n    </thead>\n    <tbody>\n");

    for (d, day) in grid.days().iter().enumerate() {
        out.push_str("      <tr>\n");
        out.push_str(&format!("        <td class=\"day-header\">{}</td>\n", escape(day)));
        for cell in grid.row(d) {
            out.push_str(&render_cell(cell));
        }
        out.push_str("      </tr>\n");
    }

    out.push_str("    </tbody>\n  </table>\n");
    out.push_str("  <div class=\"footer\">\n    <p>Generated by Timetable Generator System</p>\n  </div>\n");
    out.push_str("</body>\n</html>\n");
    out
}

fn render_cell(cell: Cell<'_>) -> String {
    match cell {
        Cell::Session(s) => format!(
            "        <td>\n          <div class=\"subject-name\">{}</div>\n          <div class=\"faculty-name\">{}</div>\n          <div class=\"room-name\">{}</div>\n        </td>\n",
            escape(&s.subject),
            escape(&s.faculty),
            escape(&s.room)
        ),
        Cell::Empty => format!("        <td><span class=\"empty-cell\">{}</span></td>\n", EMPTY_CELL),
    }
}

fn text(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => escape(v),
        _ => placeholder.to_string(),
    }
}

/// Only the characters that would break the markup.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
