use reqwest::{Client, Error};
use serde::de::DeserializeOwned;

use crate::schemas::ModelRecord;

// The ApiClient talks to the upstream catalog. It never carries the gate secret.
#[derive(Clone, Debug)]
pub struct ApiClient {
    api_base_url: String, // The base URL of the upstream API.
    client: Client,       // Shared `reqwest` connection pool.
}

impl ApiClient {
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    // Makes a GET request to `path` below the base URL and decodes the JSON body as `T`.
    // Non-2xx statuses are turned into errors before decoding.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.client
            .get(format!("{}{}", self.api_base_url, path))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    pub async fn list_models(&self) -> Result<Vec<ModelRecord>, Error> {
        self.get::<Vec<ModelRecord>>("/models").await
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use tokio_test::block_on;

    #[test]
    fn test_get_sends_no_body_headers_or_credentials() {
        let mut mock_server = mockito::Server::new();
        let mock = mock_server
            .mock("GET", "/")
            .match_header("Accept", "application/json")
            .match_header("Content-Type", mockito::Matcher::Missing)
            .match_header("Authorization", mockito::Matcher::Missing)
            .create();

        let api_client = ApiClient::new(mock_server.url());
        let _ = block_on(api_client.get::<()>("/"));
        mock.assert();
    }

    #[test]
    fn test_get_returns_deserialized_json() {
        let mut mock_server = mockito::Server::new();
        let mock = mock_server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[\"foo\", \"bar\", \"baz\"]")
            .create();

        let api_client = ApiClient::new(mock_server.url());
        let result = block_on(api_client.get::<Vec<String>>("/"));
        mock.assert();
        assert_eq!(
            result.unwrap(),
            vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]
        );
    }

    #[test]
    fn test_list_models_reads_catalog() {
        let mut mock_server = mockito::Server::new();
        let mock = mock_server
            .mock("GET", "/api/models")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"DeepSeek-R1","name":"DeepSeek R1","description":"Reasoning",
                     "temperature":"0.6","about_content":"a","info_content":"i",
                     "thumbnail_id":"deepseek","hf_repo":null,"token_limit":null,
                     "available":true}]"#,
            )
            .create();

        let api_client = ApiClient::new(format!("{}/api/", mock_server.url()));
        let models = block_on(api_client.list_models()).unwrap();
        mock.assert();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "DeepSeek-R1");
        assert_eq!(models[0].temperature, "0.6");
        assert_eq!(models[0].hf_repo, "");
        assert_eq!(models[0].token_limit, 0);
        assert!(models[0].available);
    }

    #[test]
    fn test_list_models_surfaces_upstream_errors() {
        let mut mock_server = mockito::Server::new();
        let mock = mock_server
            .mock("GET", "/models")
            .with_status(503)
            .create();

        let api_client = ApiClient::new(mock_server.url());
        let result = block_on(api_client.list_models());
        mock.assert();

        let err = result.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    }
}
