use serde::de::DeserializeOwned;

use crate::error::{GatewayError, GatewayResult};
use crate::io_struct::{
    DraftPayload, GenerationPayload, GenerationType, KeywordBatch, OutlineBatch, TitleBatch,
};

/// Extract the first complete JSON object from free-form model output.
///
/// The model is not guaranteed to return only JSON, so the scan walks the
/// text with a brace depth counter, tracking string boundaries and escape
/// sequences so braces inside string values do not end the object early.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let json_start = text.find('{')?;

    let mut brace_depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    let bytes = text.as_bytes();

    for i in json_start..text.len() {
        let byte = bytes[i];

        if escape_next {
            escape_next = false;
            continue;
        }

        if byte == b'\\' {
            escape_next = true;
            continue;
        }

        if byte == b'"' {
            in_string = !in_string;
            continue;
        }

        if !in_string {
            if byte == b'{' {
                brace_depth += 1;
            } else if byte == b'}' {
                brace_depth -= 1;
                if brace_depth == 0 {
                    return Some(&text[json_start..=i]);
                }
            }
        }
    }

    // No matching closing brace found
    None
}

/// Parse the model's free text into the typed payload for `kind`,
/// enforcing field presence, enum membership and score bounds.
pub fn parse_payload(kind: GenerationType, content: &str) -> GatewayResult<GenerationPayload> {
    let json = extract_json_object(content).ok_or_else(|| GatewayError::Extraction {
        detail: "no JSON object in model output".to_string(),
    })?;

    match kind {
        GenerationType::Keywords => {
            let batch: KeywordBatch = parse_typed(json)?;
            Ok(GenerationPayload::Keywords(batch))
        }
        GenerationType::Titles => {
            let batch: TitleBatch = parse_typed(json)?;
            for variant in &batch.titles {
                check_score(variant.score)?;
            }
            Ok(GenerationPayload::Titles(batch))
        }
        GenerationType::Outline => {
            let batch: OutlineBatch = parse_typed(json)?;
            Ok(GenerationPayload::Outline(batch))
        }
        GenerationType::Content => {
            let draft: DraftPayload = parse_typed(json)?;
            let scores = &draft.seo_scores;
            for score in [
                scores.overall,
                scores.readability,
                scores.keyword_density,
                scores.structure,
                scores.meta_quality,
            ] {
                check_score(score)?;
            }
            Ok(GenerationPayload::Draft(draft))
        }
    }
}

fn parse_typed<T: DeserializeOwned>(json: &str) -> GatewayResult<T> {
    serde_json::from_str(json).map_err(|err| GatewayError::Extraction {
        detail: err.to_string(),
    })
}

fn check_score(score: u32) -> GatewayResult<()> {
    if score > 100 {
        return Err(GatewayError::Extraction {
            detail: format!("score {} outside the 0-100 range", score),
        });
    }
    Ok(())
}
