use std::path::Path;

use async_trait::async_trait;
use jsonschema::JSONSchema;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::ProcessingError;
use crate::models::{
    AnalyticsSummary, AutomationResponse, ErrorBody, ExtractionResult, UploadResponse,
};

/// The remote document-processing service. A trait so the workflow can be
/// exercised against an in-memory double in tests.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<UploadResponse, ProcessingError>;
    async fn extract(&self, filepath: &str) -> Result<ExtractionResult, ProcessingError>;
    async fn analytics(&self) -> Result<AnalyticsSummary, ProcessingError>;
    async fn simulate_automation(&self) -> Result<AutomationResponse, ProcessingError>;
}

pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> Self {
        BackendClient {
            base_url: settings.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DocumentBackend for BackendClient {
    async fn upload(&self, path: &Path) -> Result<UploadResponse, ProcessingError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let bytes = tokio::fs::read(path).await?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let value = decode_body(response).await?;
        serde_json::from_value(value)
            .map_err(|e| ProcessingError::Application(format!("Unexpected upload response: {}", e)))
    }

    async fn extract(&self, filepath: &str) -> Result<ExtractionResult, ProcessingError> {
        let response = self
            .client
            .post(self.endpoint("extract"))
            .json(&json!({ "filepath": filepath }))
            .send()
            .await?;
        let value = decode_body(response).await?;

        let data = value.get("data").cloned().ok_or_else(|| {
            ProcessingError::Application("Extraction response is missing data".to_string())
        })?;
        if !extraction_schema().is_valid(&data) {
            return Err(ProcessingError::Application(
                "Extraction response did not match the expected schema".to_string(),
            ));
        }
        serde_json::from_value(data).map_err(|e| {
            ProcessingError::Application(format!("Unexpected extraction response: {}", e))
        })
    }

    async fn analytics(&self) -> Result<AnalyticsSummary, ProcessingError> {
        let response = self.client.get(self.endpoint("analytics")).send().await?;
        let value = decode_body(response).await?;
        serde_json::from_value(value).map_err(|e| {
            ProcessingError::Application(format!("Unexpected analytics response: {}", e))
        })
    }

    async fn simulate_automation(&self) -> Result<AutomationResponse, ProcessingError> {
        let response = self
            .client
            .post(self.endpoint("simulate_automation"))
            .json(&json!({}))
            .send()
            .await?;
        let value = decode_body(response).await?;
        serde_json::from_value(value).map_err(|e| {
            ProcessingError::Application(format!("Unexpected automation response: {}", e))
        })
    }
}

/// Decode a response into JSON, normalizing failures: a body with an
/// `error` field wins over the HTTP status, a non-2xx without one stays a
/// network-level error.
async fn decode_body(response: reqwest::Response) -> Result<Value, ProcessingError> {
    if let Err(status_err) = response.error_for_status_ref() {
        return match response.json::<ErrorBody>().await {
            Ok(body) => Err(ProcessingError::Application(body.error)),
            Err(_) => Err(ProcessingError::Network(status_err)),
        };
    }

    let value: Value = response.json().await?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(ProcessingError::Application(error.to_string()));
    }
    Ok(value)
}

fn extraction_schema() -> JSONSchema {
    let schema = json!({
        "type": "object",
        "properties": {
            "document_type": {"type": ["string", "null"]},
            "company_name": {"type": ["string", "null"]},
            "invoice_number": {"type": ["string", "null"]},
            "date": {"type": ["string", "null"]},
            "amount": {"type": ["string", "null"]},
            "tax": {"type": ["string", "null"]},
            "raw_text": {"type": ["string", "null"]},
            "processing_time": {"type": ["number", "null"]},
            "timestamp": {"type": ["string", "null"]},
            "file_name": {"type": ["string", "null"]}
        }
    });

    JSONSchema::compile(&schema).expect("Invalid JSON schema")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_accepts_partial_and_empty_payloads() {
        let schema = extraction_schema();
        assert!(schema.is_valid(&json!({})));
        assert!(schema.is_valid(&json!({
            "document_type": "Invoice",
            "amount": "2,750.00",
            "processing_time": 1.2
        })));
    }

    #[test]
    fn schema_rejects_wrongly_typed_fields() {
        let schema = extraction_schema();
        assert!(!schema.is_valid(&json!({ "amount": 2750.0 })));
        assert!(!schema.is_valid(&json!({ "processing_time": "fast" })));
    }
}
