use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::models::place::{Place, ProposalEntry};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[derive(Debug)]
pub enum GenerationError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            GenerationError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GenerationError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::HttpError(err)
    }
}

/// Client for the generation collaborator (Gemini). One synchronous call per
/// plan, bounded by a request timeout, never retried: a failure surfaces to
/// the user as "could not generate itinerary".
#[derive(Clone)]
pub struct GenerationService {
    client: Client,
    api_key: String,
    model: String,
}

impl GenerationService {
    pub fn new() -> Result<Self, GenerationError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            GenerationError::EnvironmentError("GEMINI_API_KEY not set".to_string())
        })?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Asks the model to slot the selected places into Morning / Afternoon /
    /// Evening and returns the raw proposal entries. The response schema
    /// constrains the model to the proposal shape; the reconciler still
    /// validates everything afterwards.
    pub async fn generate_plan(
        &self,
        city: &str,
        places: &[Place],
    ) -> Result<Vec<ProposalEntry>, GenerationError> {
        let prompt = self.build_prompt(city, places)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: proposal_schema(),
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::ResponseError(format!(
                "Generation request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::ResponseError(format!("Failed to parse response: {}", e))
        })?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| {
                GenerationError::ResponseError("Response contained no candidates".to_string())
            })?;

        let proposal: Vec<ProposalEntry> = serde_json::from_str(text).map_err(|e| {
            GenerationError::ResponseError(format!("Model returned malformed plan JSON: {}", e))
        })?;

        println!(
            "Generation returned {} proposal entries for {} places",
            proposal.len(),
            places.len()
        );
        Ok(proposal)
    }

    fn build_prompt(&self, city: &str, places: &[Place]) -> Result<String, GenerationError> {
        let places_json = serde_json::to_string_pretty(places).map_err(|e| {
            GenerationError::ResponseError(format!("Failed to serialize places: {}", e))
        })?;

        Ok(format!(
            "Create a daily itinerary for {} using the following places selected by the user:\n\
             {}\n\n\
             Organize these places into three sections: \"Morning\", \"Afternoon\", and \"Evening\".\n\
             Provide a logical order and a time estimate for each place (e.g., \"09:00 AM - 11:00 AM\").\n\
             Make sure to include all the provided places.",
            city, places_json
        ))
    }
}

/// Response schema: a JSON array of {place_id, section, order_index,
/// time_estimate}, one entry expected per input place.
fn proposal_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "place_id": {
                    "type": "STRING",
                    "description": "The place_id from the input list"
                },
                "section": {
                    "type": "STRING",
                    "description": "Must be 'Morning', 'Afternoon', or 'Evening'"
                },
                "order_index": {
                    "type": "INTEGER",
                    "description": "The order index within the section (0, 1, 2...)"
                },
                "time_estimate": {
                    "type": "STRING",
                    "description": "Estimated time, e.g., '09:00 AM - 11:00 AM'"
                }
            },
            "required": ["place_id", "section", "order_index", "time_estimate"]
        }
    })
}
