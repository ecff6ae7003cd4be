use std::pin::Pin;
use std::sync::LazyLock;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{ContentGenerator, GeneratorError};
use crate::domain::{Category, GeneratedContent, GeneratedMedia, ResponseChunk};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::GeminiSettings;

use super::gemini_types::{
    GenerateRequest, GenerateResponse, PredictInstance, PredictParameters, PredictRequest,
    PredictResponse, decode_base64,
};
use super::sse::SseDecoder;

pub type ResponseChunkStream =
    Pin<Box<dyn Stream<Item = Result<ResponseChunk, GeneratorError>> + Send + 'static>>;

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_IMAGE_MIME: &str = "image/png";

const SCRIPT_PROMPT_TEMPLATE: &str = r#"You are a content creator who specialises in {goal} content for {audience}.

Write a short content script (at most 100 words) relevant to the category: {name}.
Category description: {description}
Example use case: {use_case}

Use a relaxed tone, brief storytelling and a subtle call to action. Include one or two practical insights or tips.
The content is meant for short video formats such as reels or TikTok.

Besides the script, write one very detailed and creative sentence describing a visual that an image generator can turn into a picture matching the script.

Write everything in {language}. Reply with JSON of exactly this shape:
{
  "title": "Catchy content title",
  "caption": "Short caption for the post",
  "scriptText": "The full video script, as narration or easy to read bullet points",
  "promptImage": "Visual description for an AI image generator, e.g. 'A futuristic city at night with glowing neon and flying cars. Cinematic, high detail.'"
}"#;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n?\s*```").expect("fenced json pattern is valid")
});

/// REST client for the Gemini `generateContent` family and Imagen `predict`.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    script_model: String,
    tts_model: String,
    tts_voice: String,
    image_model: String,
    image_aspect_ratio: String,
    temperature: f32,
    language: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings, language: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            script_model: settings.script_model.clone(),
            tts_model: settings.tts_model.clone(),
            tts_voice: settings.tts_voice.clone(),
            image_model: settings.image_model.clone(),
            image_aspect_ratio: settings.image_aspect_ratio.clone(),
            temperature: settings.temperature,
            language: language.to_string(),
        }
    }

    pub fn speech_request(&self, text: &str, voice: Option<&str>) -> GenerateRequest {
        GenerateRequest::user_text(text)
            .with_temperature(self.temperature)
            .with_modalities(&["AUDIO"])
            .with_voice(voice.unwrap_or(&self.tts_voice))
    }

    /// Non-streaming call; returns every part of the first candidate.
    #[tracing::instrument(skip(self, request))]
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<Vec<ResponseChunk>, GeneratorError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response: GenerateResponse = self.post_json(&url, request).await?;
        response.into_chunks()
    }

    /// Server-sent-events call; chunks are yielded as the model produces them.
    #[tracing::instrument(skip(self, request))]
    pub async fn stream_generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<ResponseChunkStream, GeneratorError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        );
        let response = self.send(&url, request).await?;

        let body = response.bytes_stream().map(Some).chain(stream::once(async { None }));
        let chunks = body
            .scan(SseDecoder::default(), |decoder, item| {
                let events: Vec<Result<String, GeneratorError>> = match item {
                    Some(Ok(bytes)) => decoder.push(&bytes).into_iter().map(Ok).collect(),
                    Some(Err(e)) => vec![Err(GeneratorError::ApiRequestFailed(e.to_string()))],
                    None => decoder.finish().into_iter().map(Ok).collect(),
                };
                futures::future::ready(Some(stream::iter(events)))
            })
            .flatten()
            .flat_map(|event| {
                let items: Vec<Result<ResponseChunk, GeneratorError>> =
                    match event.and_then(|data| parse_event(&data)) {
                        Ok(chunks) => chunks.into_iter().map(Ok).collect(),
                        Err(e) => vec![Err(e)],
                    };
                stream::iter(items)
            });

        Ok(Box::pin(chunks))
    }

    #[tracing::instrument(skip(self, prompt))]
    pub async fn predict_image(
        &self,
        prompt: &str,
    ) -> Result<Option<GeneratedMedia>, GeneratorError> {
        let url = format!("{}/models/{}:predict", self.base_url, self.image_model);
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: self.image_aspect_ratio.clone(),
            },
        };

        let response: PredictResponse = self.post_json(&url, &request).await?;

        let Some((encoded, mime_type)) = response.predictions.into_iter().find_map(|p| {
            p.bytes_base64_encoded
                .map(|data| (data, p.mime_type.unwrap_or_else(|| DEFAULT_IMAGE_MIME.into())))
        }) else {
            tracing::warn!("No image data received from the model");
            return Ok(None);
        };

        Ok(Some(GeneratedMedia::new(decode_base64(&encoded)?, mime_type)))
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, GeneratorError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(url, body)
            .await?
            .json::<R>()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))
    }

    async fn send<B>(&self, url: &str, body: &B) -> Result<reqwest::Response, GeneratorError>
    where
        B: Serialize + ?Sized,
    {
        if self.api_key.is_empty() {
            return Err(GeneratorError::MissingApiKey);
        }

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeneratorError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeneratorError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_script(
        &self,
        category: &Category,
    ) -> Result<GeneratedContent, GeneratorError> {
        let prompt = build_script_prompt(category, &self.language);
        tracing::debug!(prompt = %sanitize_prompt(&prompt), "Requesting content script");

        let request = GenerateRequest::user_text(prompt).with_response_mime_type("application/json");
        let text: String = self
            .generate(&self.script_model, &request)
            .await?
            .into_iter()
            .filter_map(|chunk| match chunk {
                ResponseChunk::Text(text) => Some(text),
                ResponseChunk::Binary { .. } => None,
            })
            .collect();

        parse_generated_content(&text)
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Option<GeneratedMedia>, GeneratorError> {
        let request = self.speech_request(text, None);
        let audio = self
            .generate(&self.tts_model, &request)
            .await?
            .into_iter()
            .find_map(ResponseChunk::into_media);

        if audio.is_none() {
            tracing::warn!("No audio data received from the model");
        }
        Ok(audio)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedMedia>, GeneratorError> {
        self.predict_image(prompt).await
    }
}

pub fn build_script_prompt(category: &Category, language: &str) -> String {
    let or_blank = |value: &Option<String>| value.clone().unwrap_or_default();

    SCRIPT_PROMPT_TEMPLATE
        .replace("{goal}", &or_blank(&category.content_goal))
        .replace("{audience}", &or_blank(&category.target_audience))
        .replace("{name}", &category.name)
        .replace("{description}", &or_blank(&category.description))
        .replace("{use_case}", &or_blank(&category.example_use_case))
        .replace("{language}", language)
}

/// Accepts a bare JSON object or one wrapped in a markdown code fence.
pub fn parse_generated_content(text: &str) -> Result<GeneratedContent, GeneratorError> {
    let json = FENCED_JSON
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str())
        .trim();

    serde_json::from_str(json).map_err(|e| {
        GeneratorError::InvalidResponse(format!("model did not return valid content JSON: {}", e))
    })
}

fn parse_event(data: &str) -> Result<Vec<ResponseChunk>, GeneratorError> {
    serde_json::from_str::<GenerateResponse>(data)
        .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?
        .into_chunks()
}
