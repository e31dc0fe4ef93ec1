//! Client of the map server's REST api.

use serde::Deserialize;

use crate::error::EditorError;

/// Description of a layer known to the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerSummary {
    /// Server-side id of the layer.
    pub id: i64,
    /// Name of the layer.
    pub name: String,
    /// Kind of the layer (`"point"`, `"line"`, `"polygon"`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of the file upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Whether the upload was accepted.
    pub success: bool,
    /// Name the file was stored under.
    #[serde(default)]
    pub filename: Option<String>,
    /// Error message if the upload was rejected.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of the WMTS registration endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WmtsResponse {
    /// Whether the service was registered.
    pub success: bool,
    /// Error message if the registration failed.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LayersResponse {
    layers: Vec<LayerSummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client of the map server.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new client for the server at the given base url (e.g.
    /// `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the list of layers registered on the server.
    pub async fn get_layers(&self) -> Result<Vec<LayerSummary>, EditorError> {
        let url = format!("{}/api/layers", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        let body: LayersResponse = response.json().await?;
        Ok(body.layers)
    }

    /// Uploads a geodata file to the server.
    pub async fn upload(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse, EditorError> {
        let url = format!("{}/api/upload", self.base_url);
        let part = reqwest::multipart::Part::bytes(contents).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http_client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Registers an external WMTS service on the server.
    pub async fn add_wmts(&self, url: &str, layer: &str) -> Result<WmtsResponse, EditorError> {
        let endpoint = format!("{}/api/wmts", self.base_url);
        let body = serde_json::json!({ "url": url, "layer": layer });

        let response = self.http_client.post(&endpoint).json(&body).send().await?;
        let response = Self::check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Turns a non-success response into an error, using the `error` field of the body if
    /// the server sent one.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EditorError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(EditorError::Api(body.error)),
            Err(_) => Err(EditorError::Api(format!(
                "server returned status {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_list_parsing() {
        // the list arrives wrapped in a "layers" object
        let json = r#"{"layers": [
            {"id": 1, "name": "Roads", "type": "line"},
            {"id": 2, "name": "Buildings", "type": "polygon"}
        ]}"#;

        let response: LayersResponse = serde_json::from_str(json).expect("invalid json");
        assert_eq!(response.layers.len(), 2);
        assert_eq!(response.layers[0].name, "Roads");
        assert_eq!(response.layers[0].kind, "line");
        assert_eq!(response.layers[1].id, 2);
    }

    #[test]
    fn bare_layer_array_is_rejected() {
        let json = r#"[{"id": 1, "name": "Roads", "type": "line"}]"#;
        assert!(serde_json::from_str::<LayersResponse>(json).is_err());
    }

    #[test]
    fn upload_response_parsing() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success": true, "filename": "parcels.geojson"}"#)
                .expect("invalid json");
        assert!(ok.success);
        assert_eq!(ok.filename.as_deref(), Some("parcels.geojson"));
        assert!(ok.error.is_none());

        let rejected: UploadResponse =
            serde_json::from_str(r#"{"success": false, "error": "unsupported file type"}"#)
                .expect("invalid json");
        assert!(!rejected.success);
        assert_eq!(rejected.error.as_deref(), Some("unsupported file type"));
    }

    #[test]
    fn wmts_response_parsing() {
        let response: WmtsResponse =
            serde_json::from_str(r#"{"success": true}"#).expect("invalid json");
        assert!(response.success);
        assert!(response.error.is_none());
    }
}
