//! Static job-profile table, position-key parsing and request-side resolution.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Every position the service can evaluate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKey {
    PythonDeveloper,
    JavaDeveloper,
    AiMlEngineer,
    FrontendDeveloper,
    DevopsEngineer,
    FullStackDeveloper,
    DataEngineer,
    QaEngineer,
}

impl PositionKey {
    pub const ALL: [PositionKey; 8] = [
        PositionKey::PythonDeveloper,
        PositionKey::JavaDeveloper,
        PositionKey::AiMlEngineer,
        PositionKey::FrontendDeveloper,
        PositionKey::DevopsEngineer,
        PositionKey::FullStackDeveloper,
        PositionKey::DataEngineer,
        PositionKey::QaEngineer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PositionKey::PythonDeveloper => "python_developer",
            PositionKey::JavaDeveloper => "java_developer",
            PositionKey::AiMlEngineer => "ai_ml_engineer",
            PositionKey::FrontendDeveloper => "frontend_developer",
            PositionKey::DevopsEngineer => "devops_engineer",
            PositionKey::FullStackDeveloper => "full_stack_developer",
            PositionKey::DataEngineer => "data_engineer",
            PositionKey::QaEngineer => "qa_engineer",
        }
    }

    /// The catalog entry for this key. Total: every key has exactly one profile.
    pub fn profile(self) -> &'static JobProfile {
        match self {
            PositionKey::PythonDeveloper => &PROFILES[0],
            PositionKey::JavaDeveloper => &PROFILES[1],
            PositionKey::AiMlEngineer => &PROFILES[2],
            PositionKey::FrontendDeveloper => &PROFILES[3],
            PositionKey::DevopsEngineer => &PROFILES[4],
            PositionKey::FullStackDeveloper => &PROFILES[5],
            PositionKey::DataEngineer => &PROFILES[6],
            PositionKey::QaEngineer => &PROFILES[7],
        }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PositionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| AppError::UnknownPosition(s.trim().to_string()))
    }
}

/// A target role: the skills a CV is checked against, plus descriptive labels.
#[derive(Debug, Clone, Serialize)]
pub struct JobProfile {
    pub key: PositionKey,
    pub display_name: &'static str,
    pub display_name_localized: &'static str,
    pub description: &'static str,
    pub must_have_skills: &'static [&'static str],
    pub nice_to_have_skills: &'static [&'static str],
    /// Descriptive only; never gates the score.
    pub min_experience_years: u32,
}

static PROFILES: [JobProfile; 8] = [
    JobProfile {
        key: PositionKey::PythonDeveloper,
        display_name: "Python Developer",
        display_name_localized: "Lập Trình Viên Python",
        description: "Develop backend services using Python frameworks",
        must_have_skills: &["Python", "SQL"],
        nice_to_have_skills: &["Django", "FastAPI", "Docker", "Git"],
        min_experience_years: 2,
    },
    JobProfile {
        key: PositionKey::JavaDeveloper,
        display_name: "Java Developer",
        display_name_localized: "Lập Trình Viên Java",
        description: "Develop enterprise Java applications",
        must_have_skills: &["Java", "Spring Boot"],
        nice_to_have_skills: &["Spring Data", "Docker", "Microservices", "Git"],
        min_experience_years: 2,
    },
    JobProfile {
        key: PositionKey::AiMlEngineer,
        display_name: "AI/ML Engineer",
        display_name_localized: "Kỹ Sư AI/Machine Learning",
        description: "Build AI/ML models and solutions",
        must_have_skills: &["Python", "Machine Learning", "AI"],
        nice_to_have_skills: &[
            "TensorFlow",
            "PyTorch",
            "NLP",
            "Computer Vision",
            "Deep Learning",
            "LangChain",
            "FAISS",
            "LLM",
            "GPT",
            "OpenAI",
            "Transformers",
            "Hugging Face",
        ],
        min_experience_years: 1,
    },
    JobProfile {
        key: PositionKey::FrontendDeveloper,
        display_name: "Frontend Developer",
        display_name_localized: "Lập Trình Viên Frontend",
        description: "Build responsive web interfaces",
        must_have_skills: &["JavaScript", "React"],
        nice_to_have_skills: &["TypeScript", "Tailwind CSS", "Next.js", "Redux"],
        min_experience_years: 2,
    },
    JobProfile {
        key: PositionKey::DevopsEngineer,
        display_name: "DevOps Engineer",
        display_name_localized: "Kỹ Sư DevOps",
        description: "Manage infrastructure and deployment",
        must_have_skills: &["Docker", "CI/CD", "Linux"],
        nice_to_have_skills: &["Kubernetes", "AWS", "Terraform", "Jenkins"],
        min_experience_years: 2,
    },
    JobProfile {
        key: PositionKey::FullStackDeveloper,
        display_name: "Full Stack Developer",
        display_name_localized: "Lập Trình Viên Full Stack",
        description: "Build complete web applications",
        must_have_skills: &["JavaScript", "React", "Node.js"],
        nice_to_have_skills: &["TypeScript", "MongoDB", "Docker", "AWS"],
        min_experience_years: 3,
    },
    JobProfile {
        key: PositionKey::DataEngineer,
        display_name: "Data Engineer",
        display_name_localized: "Kỹ Sư Dữ Liệu",
        description: "Build data infrastructure and pipelines",
        must_have_skills: &["SQL", "Python", "ETL"],
        nice_to_have_skills: &["Spark", "Hadoop", "Data Warehouse", "Airflow"],
        min_experience_years: 2,
    },
    JobProfile {
        key: PositionKey::QaEngineer,
        display_name: "QA Engineer",
        display_name_localized: "Kỹ Sư Kiểm Thử",
        description: "Ensure software quality through testing",
        must_have_skills: &["Testing", "Automation"],
        nice_to_have_skills: &["Selenium", "Python", "API Testing", "Jenkins"],
        min_experience_years: 1,
    },
];

/// Free-text phrases that name a position. The longest phrase found wins.
const POSITION_ALIASES: &[(&str, PositionKey)] = &[
    ("python developer", PositionKey::PythonDeveloper),
    ("java developer", PositionKey::JavaDeveloper),
    ("ai/ml engineer", PositionKey::AiMlEngineer),
    ("ai/ml", PositionKey::AiMlEngineer),
    ("machine learning", PositionKey::AiMlEngineer),
    ("frontend developer", PositionKey::FrontendDeveloper),
    ("backend developer", PositionKey::PythonDeveloper),
    ("devops engineer", PositionKey::DevopsEngineer),
    ("full stack developer", PositionKey::FullStackDeveloper),
    ("data engineer", PositionKey::DataEngineer),
    ("qa engineer", PositionKey::QaEngineer),
    ("python", PositionKey::PythonDeveloper),
    ("java", PositionKey::JavaDeveloper),
    ("frontend", PositionKey::FrontendDeveloper),
    ("backend", PositionKey::PythonDeveloper),
    ("devops", PositionKey::DevopsEngineer),
    ("full stack", PositionKey::FullStackDeveloper),
    ("data", PositionKey::DataEngineer),
    ("qa", PositionKey::QaEngineer),
    ("ai", PositionKey::AiMlEngineer),
    ("ml", PositionKey::AiMlEngineer),
];

/// All profiles, in catalog order.
pub fn catalog() -> &'static [JobProfile] {
    &PROFILES
}

/// Case-insensitive lookup by key string.
pub fn lookup(key: &str) -> Option<&'static JobProfile> {
    key.parse::<PositionKey>().ok().map(PositionKey::profile)
}

/// Resolves the position a caller asked for.
///
/// Absent or blank ⇒ `default`. Present but not in the catalog ⇒ `UnknownPosition`.
pub fn resolve(
    requested: Option<&str>,
    default: PositionKey,
) -> Result<&'static JobProfile, AppError> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default.profile()),
        Some(key) => key.parse::<PositionKey>().map(PositionKey::profile),
    }
}

/// Picks the position named in a free-text request such as "evaluate my CV for devops".
pub fn infer_from_message(message: &str) -> Option<PositionKey> {
    let message = message.to_lowercase();
    POSITION_ALIASES
        .iter()
        .filter(|(alias, _)| message.contains(alias))
        .min_by_key(|(alias, _)| Reverse(alias.len()))
        .map(|(_, key)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_key_maps_to_its_own_profile() {
        for key in PositionKey::ALL {
            assert_eq!(key.profile().key, key);
        }
        assert_eq!(catalog().len(), PositionKey::ALL.len());
    }

    #[test]
    fn test_skill_lists_non_empty_and_disjoint() {
        for profile in catalog() {
            assert!(!profile.must_have_skills.is_empty(), "{}", profile.key);
            assert!(!profile.nice_to_have_skills.is_empty(), "{}", profile.key);
            let must: HashSet<String> = profile
                .must_have_skills
                .iter()
                .map(|s| s.to_lowercase())
                .collect();
            for skill in profile.nice_to_have_skills {
                assert!(
                    !must.contains(&skill.to_lowercase()),
                    "{skill} is both required and optional for {}",
                    profile.key
                );
            }
        }
    }

    #[test]
    fn test_key_string_round_trip() {
        for key in PositionKey::ALL {
            assert_eq!(key.as_str().parse::<PositionKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let profile = lookup("  DevOps_Engineer ").unwrap();
        assert_eq!(profile.key, PositionKey::DevopsEngineer);
        assert!(lookup("astronaut").is_none());
    }

    #[test]
    fn test_resolve_defaults_when_absent_or_blank() {
        let p = resolve(None, PositionKey::QaEngineer).unwrap();
        assert_eq!(p.key, PositionKey::QaEngineer);
        let p = resolve(Some("   "), PositionKey::PythonDeveloper).unwrap();
        assert_eq!(p.key, PositionKey::PythonDeveloper);
    }

    #[test]
    fn test_resolve_unknown_key_is_rejected() {
        let err = resolve(Some("rockstar_ninja"), PositionKey::PythonDeveloper).unwrap_err();
        assert!(matches!(err, AppError::UnknownPosition(ref k) if k == "rockstar_ninja"));
    }

    #[test]
    fn test_infer_prefers_longest_alias() {
        // "java developer" beats "java"; "full stack developer" beats "data"/"full stack"
        assert_eq!(
            infer_from_message("Please review my CV for the Java Developer role"),
            Some(PositionKey::JavaDeveloper)
        );
        assert_eq!(
            infer_from_message("full stack developer with data skills"),
            Some(PositionKey::FullStackDeveloper)
        );
        assert_eq!(
            infer_from_message("evaluate me for AI/ML engineer"),
            Some(PositionKey::AiMlEngineer)
        );
        assert_eq!(
            infer_from_message("backend please"),
            Some(PositionKey::PythonDeveloper)
        );
    }

    #[test]
    fn test_infer_none_when_nothing_named() {
        assert_eq!(infer_from_message("hello there"), None);
    }
}
