//! Keyword analysis tool.
//!
//! Produces mock keyword metrics with a realistic shape: volume, difficulty,
//! competition band, trend, related phrasings, a monthly series and advice.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::tool::ToolDescriptor;
use crate::tools::types::{
    build_schema, parse_args, require_keywords, to_output, Tool, ToolContext, ToolError,
};

const RELATED_PREFIXES: [&str; 5] = ["best", "how to", "top", "create", "build"];
const RELATED_SUFFIXES: [&str; 5] = ["for", "near me", "2024", "guide", "tips"];
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalyzeKeywordsArgs {
    /// List of keywords to analyze
    #[schemars(length(min = 1))]
    pub keywords: Vec<String>,
    /// Language code (default: he)
    #[serde(default = "default_language")]
    pub language: String,
    /// Region code (default: IL)
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_language() -> String {
    "he".to_string()
}

fn default_region() -> String {
    "IL".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn from_difficulty(difficulty: u32) -> Self {
        if difficulty < 30 {
            Self::Low
        } else if difficulty < 70 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub volume: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub search_volume: u32,
    pub keyword_difficulty: u32,
    pub competition_level: CompetitionLevel,
    pub cpc_value: f64,
    pub trends: String,
    pub related_keywords: Vec<String>,
    pub seasonal_trends: Vec<MonthlyVolume>,
    pub recommendations: Vec<String>,
}

/// Analyze every keyword, drawing all randomized fields from `rng`.
pub fn analyze_keywords<R: Rng>(keywords: &[String], rng: &mut R) -> Vec<KeywordAnalysis> {
    keywords
        .iter()
        .map(|keyword| analyze_keyword(keyword, rng))
        .collect()
}

fn analyze_keyword<R: Rng>(keyword: &str, rng: &mut R) -> KeywordAnalysis {
    let search_volume = rng.gen_range(100..100_100);
    let difficulty = rng.gen_range(0..100);
    let competition_level = CompetitionLevel::from_difficulty(difficulty);
    let cpc_value = (rng.gen_range(0.0..10.0_f64) * 100.0).round() / 100.0;
    let trends = if difficulty < 40 { "trending_up" } else { "stable" };

    KeywordAnalysis {
        keyword: keyword.to_string(),
        search_volume,
        keyword_difficulty: difficulty,
        competition_level,
        cpc_value,
        trends: trends.to_string(),
        related_keywords: related_keywords(keyword, rng),
        seasonal_trends: seasonal_trends(rng),
        recommendations: recommendations(keyword, search_volume, competition_level),
    }
}

/// Three prefixed and two suffixed variants of `keyword`.
fn related_keywords<R: Rng>(keyword: &str, rng: &mut R) -> Vec<String> {
    let mut related = Vec::with_capacity(5);
    for _ in 0..3 {
        let prefix = RELATED_PREFIXES.choose(rng).copied().unwrap_or("best");
        related.push(format!("{prefix} {keyword}"));
    }
    for _ in 0..2 {
        let suffix = RELATED_SUFFIXES.choose(rng).copied().unwrap_or("guide");
        related.push(format!("{keyword} {suffix}"));
    }
    related
}

fn seasonal_trends<R: Rng>(rng: &mut R) -> Vec<MonthlyVolume> {
    MONTHS
        .iter()
        .map(|month| MonthlyVolume {
            month: month.to_string(),
            volume: rng.gen_range(50..150),
        })
        .collect()
}

fn recommendations(keyword: &str, search_volume: u32, level: CompetitionLevel) -> Vec<String> {
    let mut out = Vec::new();

    if search_volume > 50_000 {
        out.push("High search volume - good opportunity for traffic".to_string());
    }

    match level {
        CompetitionLevel::Low => {
            out.push("Low competition - easier to rank for this keyword".to_string())
        }
        CompetitionLevel::High => out.push(
            "High competition - focus on long-tail variations or create unique content"
                .to_string(),
        ),
        CompetitionLevel::Medium => {}
    }

    out.push(format!(
        "Create comprehensive content targeting \"{keyword}\" and related keywords"
    ));
    out.push("Build quality backlinks to improve domain authority".to_string());
    out
}

/// `analyze_keywords` tool.
pub struct AnalyzeKeywordsTool;

#[async_trait]
impl Tool for AnalyzeKeywordsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "analyze_keywords".into(),
            description:
                "Analyze keywords for SEO potential, search volume, competition, and trends".into(),
            input_schema: build_schema::<AnalyzeKeywordsArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: AnalyzeKeywordsArgs = parse_args(input)?;
        require_keywords(&args.keywords)?;
        tracing::debug!(
            "analyzing {} keywords (language={}, region={})",
            args.keywords.len(),
            args.language,
            args.region
        );

        let analysis = ctx.with_rng(|rng| analyze_keywords(&args.keywords, rng));
        to_output(&analysis)
    }
}
