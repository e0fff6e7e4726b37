// Gemini REST client
// Thin request/response plumbing over the generative service; all domain
// intelligence lives on the remote side

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::gemini::types::{
    ApiErrorBody, GenerateContentRequest, GenerateContentResponse, ImageInstance, ImageParameters,
    PredictRequest, PredictResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("could not parse the generated record: {0}")]
    BadPayload(#[from] serde_json::Error),
    #[error("the service returned an empty response")]
    EmptyResponse,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (used by tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GeminiError> {
        let url = format!("{}/{}?key={}", self.base_url, path, self.api_key);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            // The API wraps errors in a JSON envelope; fall back to the raw body
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or(raw);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.post(&format!("models/{}:generateContent", model), request)
            .await
    }

    /// Generate a single image and return it as a data URI
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<String, GeminiError> {
        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        };

        let response: PredictResponse =
            self.post(&format!("models/{}:predict", model), &request).await?;

        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or(GeminiError::EmptyResponse)?;
        let bytes = prediction
            .bytes_base64_encoded
            .ok_or(GeminiError::EmptyResponse)?;
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| "image/jpeg".to_string());

        Ok(format!("data:{};base64,{}", mime_type, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::Content;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned JSON response on an ephemeral port
    async fn stub_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Read the full request (headers, then Content-Length bytes of
            // body) before responding, so the client never sees a reset
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break buf.len();
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn text_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            system_instruction: None,
            generation_config: None,
        }
    }

    #[tokio::test]
    async fn test_generate_content_ok() {
        let base_url = stub_server(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Bzz"}]}}]}"#,
        )
        .await;
        let client = GeminiClient::with_base_url("test-key", base_url);

        let response = client
            .generate_content("gemini-2.5-flash", &text_request("make a bee sound"))
            .await
            .unwrap();
        assert_eq!(response.first_text(), Some("Bzz"));
    }

    #[tokio::test]
    async fn test_api_error_surfaces_message() {
        let base_url = stub_server(
            "400 Bad Request",
            r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;
        let client = GeminiClient::with_base_url("bad-key", base_url);

        let err = client
            .generate_content("gemini-2.5-flash", &text_request("hi"))
            .await
            .unwrap_err();
        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_image_returns_data_uri() {
        let base_url = stub_server(
            "200 OK",
            r#"{"predictions":[{"bytesBase64Encoded":"aGVsbG8=","mimeType":"image/jpeg"}]}"#,
        )
        .await;
        let client = GeminiClient::with_base_url("test-key", base_url);

        let uri = client
            .generate_image("imagen-4.0-generate-001", "a ladybug", "1:1")
            .await
            .unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_generate_image_empty_predictions() {
        let base_url = stub_server("200 OK", r#"{"predictions":[]}"#).await;
        let client = GeminiClient::with_base_url("test-key", base_url);

        let err = client
            .generate_image("imagen-4.0-generate-001", "a moth", "16:9")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::EmptyResponse));
    }
}
