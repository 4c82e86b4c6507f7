#![allow(dead_code)]

//! Skill Matcher — decides whether a named skill is present in a block of CV text.
//!
//! Three checks, first success wins:
//! 1. case-insensitive substring of the whole skill name
//! 2. multi-token skills: every alphanumeric token appears somewhere in the text
//!    (order-independent, so "data" and "analysis" may be far apart)
//! 3. any synonym from the table is a substring of the text

use crate::evaluation::synonyms::{self, SynonymTable};

/// Matches against the canonical synonym table.
pub fn matches(skill_name: &str, cv_text: &str) -> bool {
    SkillMatcher::canonical().matches(skill_name, cv_text)
}

#[derive(Debug, Clone, Copy)]
pub struct SkillMatcher<'a> {
    synonyms: &'a SynonymTable,
}

impl SkillMatcher<'static> {
    pub fn canonical() -> Self {
        Self::new(synonyms::canonical())
    }
}

impl<'a> SkillMatcher<'a> {
    pub fn new(synonyms: &'a SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn matches(&self, skill_name: &str, cv_text: &str) -> bool {
        self.matches_lowercase(&skill_name.to_lowercase(), &cv_text.to_lowercase())
    }

    /// Same as [`matches`](Self::matches) for callers that already lower-cased both sides.
    pub fn matches_lowercase(&self, skill: &str, text: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || text.is_empty() {
            return false;
        }

        if text.contains(skill) {
            return true;
        }

        let tokens: Vec<&str> = skill
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() > 1 && tokens.iter().all(|t| text.contains(t)) {
            return true;
        }

        self.synonyms
            .lookup(skill)
            .is_some_and(|forms| forms.iter().any(|form| text.contains(form.as_str())))
    }
}
