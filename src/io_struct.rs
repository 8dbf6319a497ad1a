use serde::{Deserialize, Serialize};

/// The four generation kinds the gateway understands. Anything else is
/// rejected at the JSON boundary before a prompt is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    Keywords,
    Titles,
    Outline,
    Content,
}

impl GenerationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationType::Keywords => "keywords",
            GenerationType::Titles => "titles",
            GenerationType::Outline => "outline",
            GenerationType::Content => "content",
        }
    }
}

/// Brand fields steering generation tone and audience. Extra fields sent
/// by clients (like database ids) are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandContext {
    pub name: String,
    pub tone: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateRequest {
    pub r#type: GenerationType,
    pub topic: Option<String>,
    pub keyword: Option<String>,
    pub title: Option<String>,
    pub outline: Option<Vec<OutlineSection>>,
    pub domain: Option<BrandContext>,
}

impl GenerateRequest {
    /// Subject for the request log line, first non-empty of
    /// topic/keyword/title.
    pub fn subject(&self) -> &str {
        [&self.topic, &self.keyword, &self.title]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|value| !value.is_empty()))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    Ai,
    GoogleSuggest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    Informational,
    Transactional,
    Navigational,
    Commercial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordDifficulty {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub source: KeywordSource,
    pub intent: SearchIntent,
    pub difficulty: KeywordDifficulty,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStyle {
    Seo,
    Aeo,
    Geo,
    Conversion,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TitleVariant {
    pub title: String,
    pub r#type: TitleStyle,
    pub score: u32,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutlineSection {
    pub heading: String,
    pub level: HeadingLevel,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeoScores {
    pub overall: u32,
    pub readability: u32,
    pub keyword_density: u32,
    pub structure: u32,
    pub meta_quality: u32,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordBatch {
    pub keywords: Vec<KeywordSuggestion>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TitleBatch {
    pub titles: Vec<TitleVariant>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutlineBatch {
    pub outline: Vec<OutlineSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftPayload {
    pub content: String,
    #[serde(rename = "seoScores")]
    pub seo_scores: SeoScores,
}

/// Response payload, one shape per generation type. Serialized untagged so
/// clients see the plain batch object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GenerationPayload {
    Keywords(KeywordBatch),
    Titles(TitleBatch),
    Outline(OutlineBatch),
    Draft(DraftPayload),
}
