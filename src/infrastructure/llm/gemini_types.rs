use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::GeneratorError;
use crate::domain::ResponseChunk;

/// Body of a `generateContent` / `streamGenerateContent` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.response_mime_type.is_none()
            && self.response_modalities.is_empty()
            && self.speech_config.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

impl GenerateRequest {
    /// A single user turn.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: text.into() }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.generation_config.temperature = Some(temperature);
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.generation_config.response_mime_type = Some(mime_type.into());
        self
    }

    pub fn with_modalities(mut self, modalities: &[&str]) -> Self {
        self.generation_config.response_modalities =
            modalities.iter().map(|m| (*m).to_string()).collect();
        self
    }

    pub fn with_voice(mut self, voice_name: impl Into<String>) -> Self {
        self.generation_config.speech_config = Some(SpeechConfig {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        });
        self
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

impl GenerateResponse {
    /// Parts of the first candidate, in order. Parts carrying neither text
    /// nor inline data are skipped.
    pub(super) fn into_chunks(self) -> Result<Vec<ResponseChunk>, GeneratorError> {
        let Some(parts) = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
        else {
            return Ok(Vec::new());
        };

        let mut chunks = Vec::with_capacity(parts.len());
        for part in parts {
            if let Some(inline) = part.inline_data {
                chunks.push(ResponseChunk::Binary {
                    data: decode_base64(&inline.data)?.into(),
                    mime_type: inline.mime_type,
                });
            } else if let Some(text) = part.text {
                chunks.push(ResponseChunk::Text(text));
            }
        }
        Ok(chunks)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}

pub(super) fn decode_base64(data: &str) -> Result<Vec<u8>, GeneratorError> {
    general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| GeneratorError::InvalidResponse(format!("inline data is not base64: {}", e)))
}
