use crate::error::{GatewayError, GatewayResult};
use crate::io_struct::{BrandContext, GenerateRequest, GenerationType, OutlineSection};

pub const SYSTEM_PROMPT: &str =
    "You are an expert SEO content strategist. Always respond with valid JSON.";

const DEFAULT_TONE: &str = "professional";
const DEFAULT_AUDIENCE: &str = "business professionals";

const KEYWORDS_SHAPE: &str = r#"Return JSON: { "keywords": [{ "keyword": "string", "source": "ai" or "google_suggest", "intent": "informational" or "transactional" or "commercial", "difficulty": "low" or "medium" or "high", "reasoning": "brief explanation" }] }"#;
const TITLES_SHAPE: &str = r#"Return JSON: { "titles": [{ "title": "string", "type": "seo" or "aeo" or "geo" or "conversion", "score": 1-100, "reasoning": "why this works" }] }"#;
const OUTLINE_SHAPE: &str = r#"Return JSON: { "outline": [{ "heading": "string", "level": "h2" or "h3", "points": ["key point 1", "key point 2"] }] }"#;
const CONTENT_SHAPE: &str = r#"Return JSON: { "content": "full markdown content", "seoScores": { "overall": 85, "readability": 80, "keyword_density": 75, "structure": 90, "meta_quality": 80, "suggestions": ["suggestion 1"] } }"#;

/// Brand fragment placed ahead of every instruction. Absent or blank
/// tone/audience fall back to the defaults, with or without a configured
/// brand.
pub fn brand_fragment(domain: Option<&BrandContext>) -> String {
    match domain {
        Some(domain) => format!(
            "Brand: {}. Tone: {}. Audience: {}.",
            domain.name,
            non_empty(domain.tone.as_deref()).unwrap_or(DEFAULT_TONE),
            non_empty(domain.target_audience.as_deref()).unwrap_or(DEFAULT_AUDIENCE),
        ),
        None => format!("Tone: {}. Audience: {}.", DEFAULT_TONE, DEFAULT_AUDIENCE),
    }
}

/// Compose the per-type user prompt. Fails fast when a field the template
/// needs is missing or blank, before any upstream call is made.
pub fn build_user_prompt(request: &GenerateRequest) -> GatewayResult<String> {
    let kind = request.r#type;

    let instruction = match kind {
        GenerationType::Keywords => {
            let topic = required_field(&request.topic, "topic", kind)?;
            format!(
                "Generate 6 keyword suggestions for the topic: \"{}\".\n{}",
                topic, KEYWORDS_SHAPE
            )
        }
        GenerationType::Titles => {
            let keyword = required_field(&request.keyword, "keyword", kind)?;
            format!(
                "Generate 4 SEO-optimized title variants for keyword: \"{}\".\n{}",
                keyword, TITLES_SHAPE
            )
        }
        GenerationType::Outline => {
            let title = required_field(&request.title, "title", kind)?;
            let keyword = required_field(&request.keyword, "keyword", kind)?;
            format!(
                "Create a detailed blog outline for: \"{}\" targeting keyword: \"{}\".\n{}",
                title, keyword, OUTLINE_SHAPE
            )
        }
        GenerationType::Content => {
            let title = required_field(&request.title, "title", kind)?;
            let keyword = required_field(&request.keyword, "keyword", kind)?;
            let outline = required_outline(request.outline.as_deref())?;
            let outline_json = serde_json::to_string(outline)
                .map_err(|err| GatewayError::InvalidRequest(err.to_string()))?;
            format!(
                "Write a comprehensive blog post for: \"{}\".\nKeyword: \"{}\".\nOutline: {}.\nWrite 1500+ words. Use markdown formatting.\n{}",
                title, keyword, outline_json, CONTENT_SHAPE
            )
        }
    };

    Ok(format!(
        "{}\n{}",
        brand_fragment(request.domain.as_ref()),
        instruction
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn required_field<'a>(
    value: &'a Option<String>,
    field: &str,
    kind: GenerationType,
) -> GatewayResult<&'a str> {
    value
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidRequest(format!(
                "Field '{}' is required for type '{}'",
                field,
                kind.as_str()
            ))
        })
}

fn required_outline(outline: Option<&[OutlineSection]>) -> GatewayResult<&[OutlineSection]> {
    outline
        .filter(|sections| !sections.is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidRequest(
                "Field 'outline' is required for type 'content'".to_string(),
            )
        })
}
