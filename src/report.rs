//! Plain-text tank report for PDF and print consumers.
//!
//! Report text is restricted to Latin-1. A few common typographic characters
//! are transliterated; anything else outside Latin-1 is dropped.

use crate::models::Tank;

#[derive(Debug, Clone, PartialEq)]
pub struct TankReport {
    pub title: String,
    pub lines: Vec<String>,
}

impl TankReport {
    pub fn build(tank: &Tank, suggestions: &[String]) -> Self {
        let mut lines = vec!["Latest Parameters:".to_string()];
        if let Some(record) = tank.latest_record() {
            lines.extend(
                record
                    .readings
                    .iter()
                    .map(|r| to_latin1(&format!("{}: {}", r.parameter, r.value))),
            );
        }

        if !suggestions.is_empty() {
            lines.push("Suggested Maintenance:".to_string());
            lines.extend(suggestions.iter().map(|tip| to_latin1(&format!("- {tip}"))));
        }

        Self {
            title: to_latin1(&format!("Tank Report: {}", tank.name)),
            lines,
        }
    }

    pub fn render(&self) -> String {
        let mut out = self.title.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

pub fn to_latin1(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2022}' => Some('-'),
            '\u{2018}' | '\u{2019}' => Some('\''),
            '\u{201C}' | '\u{201D}' => Some('"'),
            '\u{2082}' => Some('2'),
            c if (c as u32) <= 0xFF => Some(c),
            _ => None,
        })
        .collect()
}
