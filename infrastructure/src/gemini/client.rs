//! Gemini `generateContent` client.

use super::envelope::{GeminiEnvelope, ResponseEnvelope, decode_success, map_status};
use async_trait::async_trait;
use docquiz_application::{GenerationClient, GenerationError};
use docquiz_domain::QuizResult;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

/// [`GenerationClient`] backed by the Gemini REST API.
///
/// One blocking request per call: no streaming and no retries.
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
    envelope: Arc<dyn ResponseEnvelope>,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, GenerationError> {
        if settings.api_key.trim().is_empty() {
            return Err(GenerationError::Auth("No API key configured.".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            settings,
            envelope: Arc::new(GeminiEnvelope),
        })
    }

    /// Swap the response envelope adapter.
    pub fn with_envelope(mut self, envelope: Arc<dyn ResponseEnvelope>) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<QuizResult, GenerationError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                response_mime_type: "application/json",
            },
        };

        info!("Calling {} ({} prompt chars)", self.settings.model, prompt.len());
        let response = self
            .http
            .post(self.settings.endpoint())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!("Gemini replied HTTP {} with {} bytes", status, body.len());

        if status != 200 {
            warn!("Gemini API error (HTTP {}): {}", status, body);
            return Err(map_status(status, &body, &self.settings.model));
        }

        decode_success(&body, self.envelope.as_ref())
    }
}

/// The request URL carries the API key, so it is stripped before display.
fn transport_error(error: reqwest::Error) -> GenerationError {
    let timed_out = error.is_timeout();
    let error = error.without_url();
    if timed_out {
        GenerationError::Transport(format!("request timed out: {}", error))
    } else {
        GenerationError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Accept one connection, capture the full request and answer with a canned response.
    async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let _ = tx.send(request);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        (format!("http://{}/v1beta", addr), rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(GeminiSettings::new("test-key").with_base_url(base_url)).unwrap()
    }

    fn envelope(inner: &serde_json::Value) -> String {
        json!({"candidates": [{"content": {"parts": [{"text": inner.to_string()}]}}]}).to_string()
    }

    #[tokio::test]
    async fn test_generate_success_and_request_shape() {
        let inner = json!({
            "questions": [{
                "id": 1, "question": "What is ATP?",
                "options": {"A": "energy", "B": "a", "C": "b", "D": "c"},
                "correct_answer": "A", "answer_type": "single", "difficulty": "easy"
            }],
            "metadata": {"total_questions": 1}
        });
        let (url, request) = serve_once("200 OK", envelope(&inner)).await;

        let quiz = client(&url).generate("PROMPT TEXT").await.unwrap();
        assert_eq!(quiz.len(), 1);

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent?key=test-key"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "PROMPT TEXT");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_quota_exceeded() {
        let body = json!({"error": {"code": 429, "message": "Quota exceeded for requests per minute"}});
        let (url, _request) = serve_once("429 Too Many Requests", body.to_string()).await;

        let err = client(&url).generate("p").await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::QuotaExceeded("Quota exceeded for requests per minute".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_auth_error() {
        let body = json!({"error": {"code": 403, "message": "API key not valid"}});
        let (url, _request) = serve_once("403 Forbidden", body.to_string()).await;
        let err = client(&url).generate("p").await.unwrap_err();
        assert_eq!(err, GenerationError::Auth("API key not valid".to_string()));
    }

    #[tokio::test]
    async fn test_generate_malformed_inner_payload() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "not json"}]}}]});
        let (url, _request) = serve_once("200 OK", body.to_string()).await;
        let err = client(&url).generate("p").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_connection_refused_hides_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr)).generate("p").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            GeminiClient::new(GeminiSettings::new("  ")),
            Err(GenerationError::Auth(_))
        ));
    }

    #[test]
    fn test_endpoint_and_debug_redaction() {
        let settings = GeminiSettings::new("secret").with_base_url("https://example.test/v1beta/");
        assert_eq!(
            settings.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!format!("{:?}", settings).contains("secret"));
    }
}
