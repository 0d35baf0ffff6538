//! Meta tag optimizer tool.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::tool::ToolDescriptor;
use crate::tools::types::{
    build_schema, parse_args, require_keywords, to_output, Tool, ToolContext, ToolError,
};

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const TITLE_KEYWORD_ROOM: usize = 55;
const DESCRIPTION_MIN: usize = 120;
const DESCRIPTION_MAX: usize = 160;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OptimizeMetaTagsArgs {
    /// Current page title
    pub title: String,
    /// Current page description
    pub description: String,
    /// Target keywords
    #[schemars(length(min = 1))]
    pub keywords: Vec<String>,
    /// URL slug for the page
    #[serde(default)]
    pub url_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenGraphTags {
    pub og_title: String,
    pub og_description: String,
    pub og_type: String,
    pub og_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterTags {
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedMetaTags {
    pub title: String,
    pub title_length: usize,
    pub meta_description: String,
    pub description_length: usize,
    pub keywords: String,
    pub open_graph_tags: OpenGraphTags,
    pub twitter_tags: TwitterTags,
    pub canonical_url: String,
    pub structured_data: StructuredData,
    pub recommendations: Vec<String>,
}

/// Optimize a title/description pair for `keywords`. `keywords` must not be empty.
pub fn optimize_meta_tags(
    title: &str,
    description: &str,
    keywords: &[String],
    url_slug: Option<&str>,
    canonical_base_url: &str,
) -> OptimizedMetaTags {
    let title = optimize_title(title, keywords);
    let description = optimize_description(description, keywords);
    let canonical_url = canonical_url(canonical_base_url, url_slug);

    OptimizedMetaTags {
        title_length: char_len(&title),
        description_length: char_len(&description),
        keywords: keywords
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        open_graph_tags: OpenGraphTags {
            og_title: title.clone(),
            og_description: description.clone(),
            og_type: "article".to_string(),
            og_url: canonical_url.clone(),
        },
        twitter_tags: TwitterTags {
            twitter_card: "summary_large_image".to_string(),
            twitter_title: title.clone(),
            twitter_description: description.clone(),
        },
        canonical_url,
        structured_data: StructuredData {
            context: "https://schema.org".to_string(),
            kind: "Article".to_string(),
            name: title.clone(),
            description: description.clone(),
        },
        recommendations: recommendations(&title, &description, keywords),
        title,
        meta_description: description,
    }
}

fn optimize_title(title: &str, keywords: &[String]) -> String {
    let primary = primary_keyword(keywords);
    let mut optimized = title.to_string();

    if !contains_ignore_case(&optimized, primary) && char_len(&optimized) < TITLE_KEYWORD_ROOM {
        optimized = format!("{optimized} - {primary}");
    }

    if char_len(&optimized) > TITLE_MAX {
        optimized = truncate_with_ellipsis(&optimized, TITLE_MAX - ELLIPSIS.len());
    }

    if char_len(&optimized) < TITLE_MIN {
        optimized = format!("{optimized} | {primary}");
    }

    optimized
}

fn optimize_description(description: &str, keywords: &[String]) -> String {
    let primary = primary_keyword(keywords);
    let mut optimized = description.to_string();

    if !contains_ignore_case(&optimized, primary) {
        optimized = format!("{optimized} Learn more about {primary}.");
    }

    let length = char_len(&optimized);
    if length > DESCRIPTION_MAX {
        optimized = truncate_with_ellipsis(&optimized, DESCRIPTION_MAX - ELLIPSIS.len());
    } else if length < DESCRIPTION_MIN {
        let secondary = keywords
            .get(1)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .unwrap_or(primary);
        optimized = format!("{optimized} Discover tips and strategies for {secondary}.");
    }

    optimized
}

/// Checks run against the optimized values, not the caller's input.
fn recommendations(title: &str, description: &str, keywords: &[String]) -> Vec<String> {
    let primary = primary_keyword(keywords);
    let mut out = Vec::new();

    let title_length = char_len(title);
    out.push(if title_length < TITLE_MIN {
        "Title is too short (< 30 chars) - expand to include more context".to_string()
    } else if title_length > TITLE_MAX {
        "Title may be truncated in search results - keep under 60 characters".to_string()
    } else {
        "✓ Title length is optimal (30-60 characters)".to_string()
    });

    let description_length = char_len(description);
    out.push(if description_length < DESCRIPTION_MIN {
        "Description is too short - expand to at least 120 characters".to_string()
    } else if description_length > DESCRIPTION_MAX {
        "Description may be truncated - keep under 160 characters".to_string()
    } else {
        "✓ Description length is optimal (120-160 characters)".to_string()
    });

    out.push(if contains_ignore_case(title, primary) {
        format!("✓ Primary keyword \"{primary}\" found in title")
    } else {
        format!("Include primary keyword \"{primary}\" in the title")
    });

    out.push(if contains_ignore_case(description, primary) {
        format!("✓ Primary keyword \"{primary}\" found in description")
    } else {
        format!("Include primary keyword \"{primary}\" in meta description")
    });

    out.push("Add structured data markup for rich snippets in search results".to_string());
    out.push("Set up Open Graph tags for better social media sharing".to_string());
    out.push("Configure URL slug to be descriptive and keyword-rich".to_string());
    out
}

fn canonical_url(base: &str, slug: Option<&str>) -> String {
    let slug = slug
        .map(|s| s.trim_start_matches('/'))
        .filter(|s| !s.is_empty())
        .unwrap_or("page");
    format!("{}/{slug}", base.trim_end_matches('/'))
}

fn primary_keyword(keywords: &[String]) -> &str {
    keywords.first().map(String::as_str).unwrap_or_default()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn truncate_with_ellipsis(value: &str, keep: usize) -> String {
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// `optimize_meta_tags` tool.
pub struct OptimizeMetaTagsTool;

#[async_trait]
impl Tool for OptimizeMetaTagsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "optimize_meta_tags".into(),
            description: "Generate and optimize meta tags (title, description, etc.)".into(),
            input_schema: build_schema::<OptimizeMetaTagsArgs>(),
        }
    }

    async fn invoke(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let args: OptimizeMetaTagsArgs = parse_args(input)?;
        require_keywords(&args.keywords)?;

        let tags = optimize_meta_tags(
            &args.title,
            &args.description,
            &args.keywords,
            args.url_slug.as_deref(),
            ctx.canonical_base_url(),
        );
        to_output(&tags)
    }
}
