#![allow(dead_code)]

//! Canonical skill synonym table.
//!
//! Keys are lower-cased canonical skill names; values are alternate surface forms
//! (abbreviations, related terms) that also count as evidence for the skill.

use std::collections::HashMap;
use std::sync::LazyLock;

static CANONICAL: LazyLock<SynonymTable> = LazyLock::new(|| {
    let entries: &[(&str, &[&str])] = &[
        ("python", &["python", "py", "pyton"]),
        (
            "machine learning",
            &[
                "machine learning",
                "ml",
                "artificial intelligence",
                "ai",
                "ai engineer",
                "machine",
                "learning",
                "predictive",
            ],
        ),
        (
            "ai",
            &[
                "ai",
                "artificial intelligence",
                "machine learning",
                "ml",
                "ai engineer",
                "agi",
            ],
        ),
        (
            "data analysis",
            &[
                "data analysis",
                "data analytics",
                "analytics",
                "data science",
                "analysis",
            ],
        ),
        ("tensorflow", &["tensorflow", "tf"]),
        ("pytorch", &["pytorch", "torch"]),
        (
            "nlp",
            &[
                "nlp",
                "natural language processing",
                "language model",
                "text processing",
                "language models",
                "genai",
                "generative ai",
            ],
        ),
        (
            "computer vision",
            &["computer vision", "cv", "image processing", "vision"],
        ),
        (
            "deep learning",
            &["deep learning", "neural network", "nn", "deep", "cnn", "rnn"],
        ),
        ("langchain", &["langchain", "lang chain"]),
        (
            "llm",
            &[
                "llm",
                "large language model",
                "language model",
                "gpt",
                "chatbot",
                "llms",
                "generative",
                "rag",
            ],
        ),
        (
            "faiss",
            &[
                "faiss",
                "vector search",
                "similarity search",
                "vector database",
                "vector",
            ],
        ),
        ("hugging face", &["hugging face", "transformers", "hf"]),
        ("openai", &["openai", "gpt", "chatgpt"]),
        (
            "aws",
            &["aws", "amazon web services", "cloud", "sagemaker"],
        ),
        ("azure", &["azure", "microsoft cloud"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("docker", &["docker", "containerization"]),
        ("kubernetes", &["kubernetes", "k8s"]),
        ("fastapi", &["fastapi", "api development"]),
        ("sql", &["sql", "database", "postgresql", "mysql"]),
        ("git", &["git", "version control", "github"]),
        (
            "deployment",
            &["deployment", "production", "devops", "ci/cd"],
        ),
        ("leadership", &["leadership", "lead", "mentor", "team lead"]),
        (
            "communication",
            &["communication", "presentation", "collaboration"],
        ),
        ("testing", &["testing", "qa", "unit test", "automation"]),
    ];
    SynonymTable::from_entries(entries)
});

/// The one synonym table shared by every evaluation.
pub fn canonical() -> &'static SynonymTable {
    &CANONICAL
}

#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Builds a table; keys and synonyms are lower-cased on the way in.
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let entries = entries
            .iter()
            .map(|(skill, synonyms)| {
                (
                    skill.to_lowercase(),
                    synonyms.iter().map(|s| s.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Case-insensitive lookup of the alternate forms for `skill`.
    pub fn lookup(&self, skill: &str) -> Option<&[String]> {
        self.entries
            .get(skill.trim().to_lowercase().as_str())
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
