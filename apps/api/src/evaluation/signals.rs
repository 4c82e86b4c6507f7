//! Candidate signals — descriptive facts read off the CV text.
//!
//! Reported next to the evaluation; none of these feed the score.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::positions::JobProfile;

static YEARS_OF_EXPERIENCE: OnceLock<Regex> = OnceLock::new();

fn years_pattern() -> &'static Regex {
    YEARS_OF_EXPERIENCE.get_or_init(|| {
        Regex::new(r"(\d+)\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:experience|exp)")
            .expect("valid regex")
    })
}

const LANGUAGE_KEYWORDS: &[(&str, &[&str])] = &[
    ("English", &["english", "toefl", "ielts", "esl"]),
    ("Chinese", &["chinese", "mandarin", "hsk"]),
    ("Japanese", &["japanese", "jlpt"]),
    ("German", &["german", "goethe"]),
    ("French", &["french"]),
    ("Spanish", &["spanish"]),
    ("Vietnamese", &["vietnamese"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EducationLevel {
    None,
    #[serde(rename = "Bachelor's")]
    Bachelor,
    #[serde(rename = "Master's")]
    Master,
    PhD,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSignals {
    pub years_experience: u32,
    pub seniority: Seniority,
    pub education_level: EducationLevel,
    pub languages: Vec<String>,
    pub meets_min_experience: bool,
}

pub fn extract_signals(cv_text: &str, profile: &JobProfile) -> CandidateSignals {
    let text = cv_text.to_lowercase();
    let years_experience = years_experience(&text);

    CandidateSignals {
        years_experience,
        seniority: seniority(&text),
        education_level: education_level(&text),
        languages: languages(&text),
        meets_min_experience: years_experience >= profile.min_experience_years,
    }
}

fn years_experience(text: &str) -> u32 {
    years_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        // digits only, so parsing fails on overflow alone
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn seniority(text: &str) -> Seniority {
    if contains_any(text, &["senior", "lead", "principal"]) {
        Seniority::Senior
    } else if text.contains("mid") {
        Seniority::Mid
    } else {
        Seniority::Junior
    }
}

fn education_level(text: &str) -> EducationLevel {
    if contains_any(text, &["phd", "doctorate"]) {
        EducationLevel::PhD
    } else if contains_any(text, &["master", "m.s.", "msc"]) {
        EducationLevel::Master
    } else if contains_any(text, &["bachelor", "b.s.", "bsc"]) {
        EducationLevel::Bachelor
    } else {
        EducationLevel::None
    }
}

fn languages(text: &str) -> Vec<String> {
    LANGUAGE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(language, _)| language.to_string())
        .collect()
}
