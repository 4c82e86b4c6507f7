#![allow(dead_code)]

//! CV Scorer — weighted, deterministic fitness score of a CV against one job profile.
//!
//! Components (points):
//! - must-have: per matched required skill
//! - nice-to-have: per matched optional skill
//! - experience: base, raised by "N years" mentions, raised further by seniority words
//! - education: bachelor + master + certification, capped
//! - soft skills: per keyword, capped
//!
//! The total is capped at 100 and mapped to a [`Rating`]. Missing more than half of
//! the required skills forces `NotSuitable` whatever the score.
//!
//! `AppState` holds an `Arc<dyn CvScorer>`; `RuleBasedScorer` is the only backend.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::evaluation::skill_matcher::SkillMatcher;
use crate::positions::JobProfile;

// ────────────────────────────────────────────────────────────────────────────
// Weights and thresholds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub must_have_per_skill: u32,
    pub nice_to_have_per_skill: u32,
    pub experience_base: u32,
    pub experience_years: u32,
    pub experience_senior: u32,
    pub bachelor: u32,
    pub master: u32,
    pub certification: u32,
    pub education_cap: u32,
    pub soft_skill_each: u32,
    pub soft_skills_cap: u32,
    pub total_cap: u32,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    must_have_per_skill: 15,
    nice_to_have_per_skill: 5,
    experience_base: 5,
    experience_years: 15,
    experience_senior: 20,
    bachelor: 15,
    master: 10,
    certification: 5,
    education_cap: 25,
    soft_skill_each: 3,
    soft_skills_cap: 20,
    total_cap: 100,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingThresholds {
    pub excellent: u32,
    pub very_good: u32,
    pub good: u32,
    /// Strictly more than this share of required skills missing ⇒ `NotSuitable`.
    pub max_missing_required_ratio: f64,
}

pub const DEFAULT_THRESHOLDS: RatingThresholds = RatingThresholds {
    excellent: 85,
    very_good: 75,
    good: 60,
    max_missing_required_ratio: 0.5,
};

const SENIORITY_MARKERS: &[&str] = &["senior", "lead"];
const EXPERIENCE_YEARS: std::ops::RangeInclusive<u32> = 3..=9;
const BACHELOR_MARKERS: &[&str] = &["bachelor", "b.s."];
const MASTER_MARKERS: &[&str] = &["master", "m.s."];
const CERTIFICATION_MARKERS: &[&str] = &["certification"];
const SOFT_SKILLS: &[&str] = &["communication", "leadership", "teamwork"];

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Rating tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rating {
    #[serde(rename = "Not Suitable")]
    NotSuitable,
    #[serde(rename = "Below Threshold")]
    BelowThreshold,
    #[serde(rename = "Good – Consider for Interview")]
    Good,
    #[serde(rename = "Very Good – Recommended")]
    VeryGood,
    #[serde(rename = "Excellent – Highly Recommended")]
    Excellent,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::NotSuitable => "Not Suitable",
            Rating::BelowThreshold => "Below Threshold",
            Rating::Good => "Good – Consider for Interview",
            Rating::VeryGood => "Very Good – Recommended",
            Rating::Excellent => "Excellent – Highly Recommended",
        }
    }

    /// First matching rule wins: the missing-required override, then score tiers.
    pub fn assign(
        total_score: u32,
        missing_count: usize,
        required_count: usize,
        thresholds: &RatingThresholds,
    ) -> Self {
        if missing_count as f64 > required_count as f64 * thresholds.max_missing_required_ratio {
            Rating::NotSuitable
        } else if total_score >= thresholds.excellent {
            Rating::Excellent
        } else if total_score >= thresholds.very_good {
            Rating::VeryGood
        } else if total_score >= thresholds.good {
            Rating::Good
        } else {
            Rating::BelowThreshold
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComponentScores {
    pub must_have: u32,
    pub nice_to_have: u32,
    pub experience: u32,
    pub education: u32,
    pub soft_skills: u32,
}

impl ComponentScores {
    pub fn sum(&self) -> u32 {
        self.must_have + self.nice_to_have + self.experience + self.education + self.soft_skills
    }
}

/// Result of one evaluation. Built fresh per call and handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_optional: Vec<String>,
    pub component_scores: ComponentScores,
    pub total_score: u32, // 0 – 100
    pub rating: Rating,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one CV text against one resolved job profile. Implementations are pure.
pub trait CvScorer: Send + Sync {
    fn evaluate(&self, cv_text: &str, profile: &JobProfile) -> EvaluationResult;

    /// Short backend label echoed in API responses.
    fn backend(&self) -> &'static str;
}

/// Scores with [`RuleBasedScorer::default`].
pub fn evaluate(cv_text: &str, profile: &JobProfile) -> EvaluationResult {
    RuleBasedScorer::default().evaluate(cv_text, profile)
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct RuleBasedScorer {
    matcher: SkillMatcher<'static>,
    weights: ScoringWeights,
    thresholds: RatingThresholds,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self {
            matcher: SkillMatcher::canonical(),
            weights: DEFAULT_WEIGHTS,
            thresholds: DEFAULT_THRESHOLDS,
        }
    }
}

impl CvScorer for RuleBasedScorer {
    fn evaluate(&self, cv_text: &str, profile: &JobProfile) -> EvaluationResult {
        let text = cv_text.to_lowercase();

        // No text, no evidence: every component stays at zero.
        if text.trim().is_empty() {
            debug!("Empty CV text for {}; returning zero score", profile.key);
            return self.empty_result(profile);
        }

        let mut matched_required = Vec::new();
        let mut missing_required = Vec::new();
        for skill in profile.must_have_skills {
            if self.matcher.matches_lowercase(&skill.to_lowercase(), &text) {
                matched_required.push(skill.to_string());
            } else {
                missing_required.push(skill.to_string());
            }
        }

        let matched_optional: Vec<String> = profile
            .nice_to_have_skills
            .iter()
            .filter(|skill| self.matcher.matches_lowercase(&skill.to_lowercase(), &text))
            .map(|skill| skill.to_string())
            .collect();

        let w = &self.weights;
        let scores = ComponentScores {
            must_have: w.must_have_per_skill * matched_required.len() as u32,
            nice_to_have: w.nice_to_have_per_skill * matched_optional.len() as u32,
            experience: self.experience_score(&text),
            education: self.education_score(&text),
            soft_skills: self.soft_skills_score(&text),
        };

        let total_score = scores.sum().min(w.total_cap);
        let rating = Rating::assign(
            total_score,
            missing_required.len(),
            profile.must_have_skills.len(),
            &self.thresholds,
        );

        debug!(
            "Evaluated CV for {}: total={} rating={} matched={}/{} optional={}",
            profile.key,
            total_score,
            rating,
            matched_required.len(),
            profile.must_have_skills.len(),
            matched_optional.len()
        );

        EvaluationResult {
            strengths: strengths(&scores),
            improvement_areas: improvement_areas(&scores, &missing_required),
            matched_required,
            missing_required,
            matched_optional,
            component_scores: scores,
            total_score,
            rating,
        }
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

impl RuleBasedScorer {
    pub fn new(weights: ScoringWeights, thresholds: RatingThresholds) -> Self {
        Self {
            matcher: SkillMatcher::canonical(),
            weights,
            thresholds,
        }
    }

    fn empty_result(&self, profile: &JobProfile) -> EvaluationResult {
        let scores = ComponentScores::default();
        let missing_required: Vec<String> = profile
            .must_have_skills
            .iter()
            .map(|s| s.to_string())
            .collect();
        EvaluationResult {
            matched_required: vec![],
            improvement_areas: improvement_areas(&scores, &missing_required),
            missing_required,
            matched_optional: vec![],
            component_scores: scores,
            total_score: 0,
            rating: Rating::BelowThreshold,
            strengths: vec![],
        }
    }

    /// Seniority words beat a "N years" mention; only one tier applies.
    fn experience_score(&self, text: &str) -> u32 {
        if SENIORITY_MARKERS.iter().any(|m| text.contains(m)) {
            return self.weights.experience_senior;
        }
        let mentions_years = EXPERIENCE_YEARS
            .into_iter()
            .any(|n| text.contains(&format!("{n} years")) || text.contains(&format!("{n}+ years")));
        if mentions_years {
            self.weights.experience_years
        } else {
            self.weights.experience_base
        }
    }

    fn education_score(&self, text: &str) -> u32 {
        let w = &self.weights;
        let mut score = 0;
        if BACHELOR_MARKERS.iter().any(|m| text.contains(m)) {
            score += w.bachelor;
        }
        if MASTER_MARKERS.iter().any(|m| text.contains(m)) {
            score += w.master;
        }
        if CERTIFICATION_MARKERS.iter().any(|m| text.contains(m)) {
            score += w.certification;
        }
        score.min(w.education_cap)
    }

    fn soft_skills_score(&self, text: &str) -> u32 {
        let found = SOFT_SKILLS.iter().filter(|s| text.contains(*s)).count() as u32;
        (found * self.weights.soft_skill_each).min(self.weights.soft_skills_cap)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Narrative hints (presentation only, never fed back into the score)
// ────────────────────────────────────────────────────────────────────────────

fn strengths(scores: &ComponentScores) -> Vec<String> {
    let mut out = Vec::new();
    if scores.must_have >= 15 {
        out.push("Strong core technical skills".to_string());
    }
    if scores.experience >= 15 {
        out.push("Good experience level".to_string());
    }
    if scores.education >= 15 {
        out.push("Strong educational background".to_string());
    }
    if scores.soft_skills >= 10 {
        out.push("Good soft skills demonstrated".to_string());
    }
    out
}

fn improvement_areas(scores: &ComponentScores, missing_required: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    if !missing_required.is_empty() {
        out.push(format!("Missing key skills: {}", missing_required.join(", ")));
    }
    if scores.experience < 10 {
        out.push("Need more years of experience".to_string());
    }
    if scores.education < 10 {
        out.push("Consider formal certifications or degrees".to_string());
    }
    if scores.nice_to_have < 10 {
        out.push("Develop additional technical skills".to_string());
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::{catalog, PositionKey};

    fn make_profile(must: &'static [&'static str], nice: &'static [&'static str]) -> JobProfile {
        JobProfile {
            key: PositionKey::PythonDeveloper,
            display_name: "Test Profile",
            display_name_localized: "Test Profile",
            description: "fixture",
            must_have_skills: must,
            nice_to_have_skills: nice,
            min_experience_years: 2,
        }
    }

    fn python_sql_docker() -> JobProfile {
        make_profile(&["Python", "SQL"], &["Docker"])
    }

    #[test]
    fn test_senior_python_candidate_breakdown() {
        let cv = "Senior engineer, 5 years, Python, SQL, Docker, bachelor degree, communication";
        let result = evaluate(cv, &python_sql_docker());

        assert_eq!(
            result.component_scores,
            ComponentScores {
                must_have: 30,
                nice_to_have: 5,
                experience: 20,
                education: 15,
                soft_skills: 3,
            }
        );
        assert_eq!(result.total_score, 73);
        // 73 sits between the good (60) and very-good (75) thresholds
        assert_eq!(result.rating, Rating::Good);
        assert_eq!(result.matched_required, vec!["Python", "SQL"]);
        assert!(result.missing_required.is_empty());
        assert_eq!(result.matched_optional, vec!["Docker"]);
    }

    #[test]
    fn test_missing_all_required_is_not_suitable() {
        let result = evaluate("Frontend developer with React", &python_sql_docker());
        assert_eq!(result.component_scores.must_have, 0);
        assert_eq!(result.component_scores.nice_to_have, 0);
        assert_eq!(result.missing_required, vec!["Python", "SQL"]);
        assert_eq!(result.rating, Rating::NotSuitable);
    }

    #[test]
    fn test_empty_text_scores_zero_below_threshold() {
        let result = evaluate("", &python_sql_docker());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.component_scores, ComponentScores::default());
        assert_eq!(result.rating, Rating::BelowThreshold);
        assert!(result.matched_required.is_empty());
        assert!(result.matched_optional.is_empty());
        assert_eq!(result.missing_required, vec!["Python", "SQL"]);
        assert!(result.strengths.is_empty());
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let result = evaluate("   \n\t ", &python_sql_docker());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.rating, Rating::BelowThreshold);
    }

    #[test]
    fn test_override_beats_high_score() {
        // 1 of 3 required matched, but everything else maxed out
        let profile = make_profile(&["Python", "Haskell", "Erlang"], &["Docker", "Git"]);
        let cv = "Senior lead. Python, Docker, Git. Bachelor, Master, certification. \
                  communication leadership teamwork";
        let result = evaluate(cv, &profile);
        assert_eq!(result.missing_required.len(), 2);
        assert_eq!(result.rating, Rating::NotSuitable);
    }

    #[test]
    fn test_exactly_half_missing_is_not_overridden() {
        let profile = make_profile(&["Python", "Haskell"], &["Docker"]);
        let result = evaluate("Python developer", &profile);
        assert_eq!(result.missing_required, vec!["Haskell"]);
        assert_ne!(result.rating, Rating::NotSuitable);
    }

    #[test]
    fn test_experience_tiers() {
        let scorer = RuleBasedScorer::default();
        assert_eq!(scorer.experience_score("junior dev"), 5);
        assert_eq!(scorer.experience_score("3 years of rust"), 15);
        assert_eq!(scorer.experience_score("9+ years in ops"), 15);
        assert_eq!(scorer.experience_score("2 years of rust"), 5);
        assert_eq!(scorer.experience_score("team lead"), 20);
        // seniority wins over a numeric mention
        assert_eq!(scorer.experience_score("senior, 4 years"), 20);
    }

    #[test]
    fn test_education_is_additive_and_capped() {
        let scorer = RuleBasedScorer::default();
        assert_eq!(scorer.education_score("no degree"), 0);
        assert_eq!(scorer.education_score("bachelor of science"), 15);
        assert_eq!(scorer.education_score("m.s. in physics"), 10);
        assert_eq!(scorer.education_score("certification in aws"), 5);
        assert_eq!(scorer.education_score("bachelor and master"), 25);
        assert_eq!(scorer.education_score("b.s., m.s., certification"), 25);
    }

    #[test]
    fn test_soft_skills_points() {
        let scorer = RuleBasedScorer::default();
        assert_eq!(scorer.soft_skills_score("quiet"), 0);
        assert_eq!(scorer.soft_skills_score("communication and teamwork"), 6);
        assert_eq!(
            scorer.soft_skills_score("communication, leadership, teamwork"),
            9
        );
    }

    #[test]
    fn test_total_score_is_capped_at_100() {
        let profile = PositionKey::AiMlEngineer.profile();
        let cv = "Senior AI engineer. Python, machine learning, TensorFlow, PyTorch, NLP, \
                  computer vision, deep learning, LangChain, FAISS, LLM, GPT, OpenAI, \
                  transformers, hugging face. Bachelor, Master, certification. \
                  communication leadership teamwork";
        let result = evaluate(cv, profile);
        assert_eq!(result.total_score, 100);
        assert!(result.component_scores.sum() > 100);
        assert_eq!(result.rating, Rating::Excellent);
    }

    #[test]
    fn test_rating_tiers() {
        let t = &DEFAULT_THRESHOLDS;
        assert_eq!(Rating::assign(85, 0, 2, t), Rating::Excellent);
        assert_eq!(Rating::assign(84, 0, 2, t), Rating::VeryGood);
        assert_eq!(Rating::assign(75, 0, 2, t), Rating::VeryGood);
        assert_eq!(Rating::assign(74, 0, 2, t), Rating::Good);
        assert_eq!(Rating::assign(60, 1, 2, t), Rating::Good);
        assert_eq!(Rating::assign(59, 0, 2, t), Rating::BelowThreshold);
        assert_eq!(Rating::assign(100, 2, 3, t), Rating::NotSuitable);
        assert_eq!(Rating::assign(100, 2, 2, t), Rating::NotSuitable);
    }

    #[test]
    fn test_rating_serializes_as_label() {
        let json = serde_json::to_string(&Rating::VeryGood).unwrap();
        assert_eq!(json, "\"Very Good – Recommended\"");
        let json = serde_json::to_string(&Rating::NotSuitable).unwrap();
        assert_eq!(json, "\"Not Suitable\"");
        assert!(Rating::NotSuitable < Rating::BelowThreshold);
        assert!(Rating::Good < Rating::Excellent);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let cv = "Lead data engineer, 7 years, SQL, Python, ETL with Airflow and Spark";
        let profile = PositionKey::DataEngineer.profile();
        let first = serde_json::to_vec(&evaluate(cv, profile)).unwrap();
        let second = serde_json::to_vec(&evaluate(cv, profile)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_missing_skill_never_lowers_score() {
        let base = "Engineer with React and a bachelor degree";
        for profile in catalog() {
            let before = evaluate(base, profile);
            for skill in before.missing_required.clone() {
                let after = evaluate(&format!("{base} {skill}"), profile);
                assert!(after.total_score >= before.total_score, "{skill}");
                assert!(after.matched_required.contains(&skill));
                assert!(!after.missing_required.contains(&skill));
            }
        }
    }

    #[test]
    fn test_score_always_within_bounds() {
        let texts = [
            "",
            "x",
            "Senior lead bachelor master certification communication leadership teamwork",
            "Python SQL Java Spring Boot JavaScript React Node.js Docker CI/CD Linux ETL testing automation",
        ];
        for profile in catalog() {
            for text in texts {
                let result = evaluate(text, profile);
                assert!(result.total_score <= 100);
                let missing = result.missing_required.len() as f64;
                if !text.trim().is_empty()
                    && missing > profile.must_have_skills.len() as f64 * 0.5
                {
                    assert_eq!(result.rating, Rating::NotSuitable);
                }
            }
        }
    }

    #[test]
    fn test_synonym_only_match_counts_as_required() {
        let profile = make_profile(&["AI"], &["Docker"]);
        let result = evaluate("Background in artificial intelligence", &profile);
        assert_eq!(result.matched_required, vec!["AI"]);
    }

    #[test]
    fn test_narrative_hints() {
        let result = evaluate(
            "Senior engineer, Python, bachelor",
            &python_sql_docker(),
        );
        assert!(result
            .strengths
            .contains(&"Strong core technical skills".to_string()));
        assert!(result.strengths.contains(&"Good experience level".to_string()));
        assert!(result
            .strengths
            .contains(&"Strong educational background".to_string()));
        assert!(result
            .improvement_areas
            .contains(&"Missing key skills: SQL".to_string()));
        assert!(result
            .improvement_areas
            .contains(&"Develop additional technical skills".to_string()));
    }

    #[test]
    fn test_custom_weights_and_thresholds() {
        let weights = ScoringWeights {
            must_have_per_skill: 40,
            ..DEFAULT_WEIGHTS
        };
        let thresholds = RatingThresholds {
            excellent: 95,
            ..DEFAULT_THRESHOLDS
        };
        let scorer = RuleBasedScorer::new(weights, thresholds);
        // 80 + 0 + 5 (base experience) = 85: excellent by default, very good here
        let result = scorer.evaluate("Python and SQL", &python_sql_docker());
        assert_eq!(result.total_score, 85);
        assert_eq!(result.rating, Rating::VeryGood);
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(RuleBasedScorer::default().backend(), "rule_based");
    }
}
