//! Content writer tool.
//!
//! Generates a templated markdown article for a topic and scores it:
//! keyword density, Flesch reading ease, and a heuristic SEO score.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Datelike;
use rand::seq::SliceRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::tool::ToolDescriptor;
use crate::tools::types::{
    build_schema, parse_args, require_keywords, to_output, whole_number, Tool, ToolContext,
    ToolError,
};

/// Words of target length covered by one generated section.
const WORDS_PER_SECTION: u32 = 200;

/// Largest accepted `wordCount`.
pub const MAX_WORD_COUNT: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Blog,
    Product,
    LandingPage,
    Guide,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WriteContentArgs {
    /// The main topic for content
    pub topic: String,
    /// Primary keywords to target
    #[schemars(length(min = 1))]
    pub keywords: Vec<String>,
    pub content_type: ContentType,
    /// Target word count
    #[serde(default = "default_word_count", deserialize_with = "whole_number")]
    #[schemars(range(max = 100000))]
    pub word_count: u32,
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_word_count() -> u32 {
    1000
}

fn default_tone() -> String {
    "professional".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentGenerationResult {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub keyword_density: BTreeMap<String, f64>,
    pub readability_score: u32,
    pub seo_score: u32,
    pub suggestions: Vec<String>,
}

/// Generate and score an article. `year` is used by the dated title templates.
pub fn write_content<R: Rng>(
    topic: &str,
    keywords: &[String],
    content_type: ContentType,
    word_count: u32,
    year: i32,
    rng: &mut R,
) -> ContentGenerationResult {
    let content = generate_body(topic, keywords, word_count, rng);

    ContentGenerationResult {
        title: generate_title(topic, keywords, content_type, year, rng),
        word_count: count_words(&content),
        keyword_density: keyword_density(&content, keywords),
        readability_score: readability_score(&content),
        seo_score: seo_score(&content, keywords),
        suggestions: suggestions(&content, keywords),
        content,
    }
}

fn generate_title<R: Rng>(
    topic: &str,
    keywords: &[String],
    content_type: ContentType,
    year: i32,
    rng: &mut R,
) -> String {
    let primary = primary_keyword(keywords);
    let templates = match content_type {
        ContentType::Blog => [
            format!("Ultimate Guide to {topic}: Everything You Need to Know"),
            format!("{topic}: {primary} Tips & Strategies"),
            format!("How to {topic}: Complete {year} Guide"),
        ],
        ContentType::Product => [
            format!("{topic}: Features, Benefits & Pricing Guide"),
            format!("Best {topic} Solutions: Compare & Choose"),
            format!("{topic} Review: Everything You Need to Know"),
        ],
        ContentType::LandingPage => [
            format!("Professional {topic} Services | Get Started Today"),
            format!("{topic} Solutions \u{2013} Trusted by Thousands"),
            format!("Transform Your {topic} Experience Now"),
        ],
        ContentType::Guide => [
            format!("{topic} Guide: Step-by-Step Instructions"),
            format!("Beginner's Guide to {topic}"),
            format!("Complete {topic} Handbook for {year}"),
        ],
    };

    let index = rng.gen_range(0..templates.len());
    templates[index].clone()
}

fn generate_body<R: Rng>(topic: &str, keywords: &[String], word_count: u32, rng: &mut R) -> String {
    let primary = primary_keyword(keywords);
    let secondary = keywords.get(1).map(String::as_str).unwrap_or(primary);
    let sections = word_count.div_ceil(WORDS_PER_SECTION);

    let mut content = format!(
        "## Introduction\n\nWelcome to our comprehensive guide on {topic}. This article covers \
         everything you need to know about {}. Whether you're a beginner or an experienced \
         professional, you'll find valuable insights and actionable strategies to help you \
         succeed.\n\n",
        keywords.join(", ")
    );

    for i in 1..=sections {
        let focus = keywords.choose(rng).map(String::as_str).unwrap_or(primary);
        content.push_str(&format!(
            "## Section {i}: Key Aspects of {topic}\n\nWhen discussing {focus}, it's important \
             to understand the foundational concepts. This section explores the critical \
             elements that make {topic} successful.\n\n"
        ));
        content.push_str("Key points to consider:\n");
        content.push_str(&format!("- Understanding the basics of {primary}\n"));
        content.push_str(&format!("- Implementing effective strategies for {secondary}\n"));
        content.push_str("- Measuring success with proper metrics\n");
        content.push_str("- Optimizing performance continuously\n\n");
    }

    content.push_str(&format!(
        "## Conclusion\n\n{topic} is an essential aspect of modern business and personal \
         development. By implementing the strategies discussed in this guide and focusing on \
         {primary}, you can achieve significant improvements in your results.\n\nTake action \
         today and start applying these principles to see the difference they can make in your \
         success journey.\n"
    ));

    content
}

fn primary_keyword(keywords: &[String]) -> &str {
    keywords.first().map(String::as_str).unwrap_or_default()
}

fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Percentage of tokens containing each keyword, rounded to two decimals.
pub fn keyword_density(content: &str, keywords: &[String]) -> BTreeMap<String, f64> {
    let lower = content.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let total = words.len().max(1) as f64;

    keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.to_lowercase();
            let hits = words.iter().filter(|w| w.contains(needle.as_str())).count();
            (keyword.clone(), round2(hits as f64 / total * 100.0))
        })
        .collect()
}

/// Flesch reading ease, rounded and clamped to 0..=100.
pub fn readability_score(content: &str) -> u32 {
    let sentences = content
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1) as f64;
    let words: Vec<&str> = content.split_whitespace().collect();
    let word_total = words.len().max(1) as f64;
    let syllables: usize = words.iter().map(|w| estimate_syllables(w)).sum();

    let score = 206.835 - 1.015 * (word_total / sentences) - 84.6 * (syllables as f64 / word_total);
    score.round().clamp(0.0, 100.0) as u32
}

fn estimate_syllables(word: &str) -> usize {
    let vowels = word
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
        .count();
    vowels.max(1)
}

/// Mean over keywords of (literal occurrences / word count).
fn average_density(content: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let lower = content.to_lowercase();
    let words = count_words(content).max(1) as f64;
    let total: f64 = keywords
        .iter()
        .map(|keyword| {
            let needle = keyword.to_lowercase();
            if needle.is_empty() {
                return 0.0;
            }
            lower.matches(needle.as_str()).count() as f64 / words
        })
        .sum();
    total / keywords.len() as f64
}

/// Base 60, plus density, length, and heading bonuses, capped at 100.
pub fn seo_score(content: &str, keywords: &[String]) -> u32 {
    let mut score = 60;

    let density = average_density(content, keywords);
    if (0.01..=0.03).contains(&density) {
        score += 15;
    } else if density > 0.0 {
        score += 8;
    }

    let words = count_words(content);
    if (300..=3000).contains(&words) {
        score += 15;
    }

    if content.contains("##") {
        score += 10;
    }

    score.min(100)
}

fn suggestions(content: &str, keywords: &[String]) -> Vec<String> {
    let mut out = Vec::new();

    let density = average_density(content, keywords);
    if density < 0.01 {
        out.push("Increase keyword frequency - aim for 1-3% keyword density".to_string());
    } else if density > 0.03 {
        out.push(
            "Keyword density is too high - avoid keyword stuffing for better user experience"
                .to_string(),
        );
    }

    if count_words(content) < 300 {
        out.push("Content is too short - aim for at least 300 words".to_string());
    }

    if !content.contains("##") {
        out.push("Add subheadings (##) to improve content structure".to_string());
    }

    if !content.contains("- ") {
        out.push("Use bullet points to break up content and improve readability".to_string());
    }

    out.push("Add internal links to related content".to_string());
    out.push("Include a clear call-to-action at the end".to_string());
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `write_content` tool.
pub struct WriteContentTool;

#[async_trait]
impl Tool for WriteContentTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "write_content".into(),
            description: "Generate SEO-optimized content based on keywords and topic".into(),
            input_schema: build_schema::<WriteContentArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: WriteContentArgs = parse_args(input)?;
        require_keywords(&args.keywords)?;
        if args.word_count > MAX_WORD_COUNT {
            return Err(ToolError::InvalidInput(format!(
                "wordCount must be at most {MAX_WORD_COUNT}, got {}",
                args.word_count
            )));
        }
        tracing::debug!(
            "writing {:?} content on '{}' ({} words, tone={})",
            args.content_type,
            args.topic,
            args.word_count,
            args.tone
        );

        let year = chrono::Utc::now().year();
        let result = ctx.with_rng(|rng| {
            write_content(
                &args.topic,
                &args.keywords,
                args.content_type,
                args.word_count,
                year,
                rng,
            )
        });
        to_output(&result)
    }
}
