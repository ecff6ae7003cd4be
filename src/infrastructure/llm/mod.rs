mod gemini_client;
mod gemini_types;
mod sse;

pub use gemini_client::{
    GeminiClient, ResponseChunkStream, build_script_prompt, parse_generated_content,
};
pub use gemini_types::{
    GenerateRequest, GenerationConfig, PrebuiltVoiceConfig, RequestContent, RequestPart,
    SpeechConfig, VoiceConfig,
};
pub use sse::SseDecoder;
