//! Blocking REST client for the catalog API.
//!
//! Every endpoint answers a `{success, data}` envelope; failures are
//! mapped to `ApiError` at this boundary and never propagate into the
//! frame loop. Calls block, so the app runs them on spawned threads and
//! collects results over a channel.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::catalog::{Product, Topic, TopicFilter};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API reported failure")]
    Envelope,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: T,
}

/// Combined result of the global search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(rename = "topicos", default)]
    pub topics: Vec<Topic>,
    #[serde(rename = "produtos", default)]
    pub products: Vec<Product>,
}

pub struct ApiClient {
    client: reqwest::blocking::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given API base (e.g. `http://host:8001/api`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Url::join drops the last path segment without a trailing slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("TechMesh/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, base })
    }

    /// `GET /topicos` — all taxonomy facets, keyed by topic id.
    pub fn fetch_topics(&self) -> Result<BTreeMap<String, Topic>, ApiError> {
        self.get_json("topicos", &[])
    }

    /// `GET /products` — the raw product list.
    pub fn fetch_products(&self, page_size: u32) -> Result<Vec<Product>, ApiError> {
        self.get_json("products", &[("per_page", page_size.to_string())])
    }

    /// `GET /topicos/produtos-por-topico` — products scoped by a filter.
    pub fn products_by_topic(
        &self,
        filter: &TopicFilter,
        page_size: u32,
    ) -> Result<Vec<Product>, ApiError> {
        let params = filter_params(filter, page_size);
        self.get_json("topicos/produtos-por-topico", &params)
    }

    /// `GET /topicos/busca-global` — topics and products matching a query.
    pub fn search_global(&self, query: &str, page_size: u32) -> Result<SearchResults, ApiError> {
        self.get_json(
            "topicos/busca-global",
            &[
                ("q", query.to_string()),
                ("per_page", page_size.to_string()),
            ],
        )
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.base.join(path)?;
        log::debug!("GET {url} {params:?}");
        let response = self.client.get(url).query(params).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = response.text()?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(ApiError::Envelope);
        }
        Ok(envelope.data)
    }
}

/// Wire parameters for the products-by-topic endpoint.
fn filter_params(filter: &TopicFilter, page_size: u32) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(5);
    if let Some(field) = &filter.field {
        params.push(("campo", field.clone()));
    }
    if let Some(value) = &filter.value {
        params.push(("valor", value.clone()));
    }
    if let Some(name) = &filter.name {
        params.push(("nome", name.clone()));
    }
    if let Some(category) = &filter.category {
        params.push(("categoria", category.clone()));
    }
    params.push(("per_page", page_size.to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_topic_map() {
        let json = r#"{
            "success": true,
            "data": {
                "protocolos": {"id": "protocolos", "nome": "Protocolos", "valores": ["abnt"]},
                "hemera": {"id": "hemera", "nome": "Hemera"}
            }
        }"#;
        let envelope: Envelope<BTreeMap<String, Topic>> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data["protocolos"].values, vec!["abnt"]);
    }

    #[test]
    fn envelope_decodes_product_list() {
        let json = r#"{
            "success": true,
            "data": [
                {"sku": "P1", "title": "Meter", "status": "active"},
                {"sku": "P2", "title": "Gateway", "status": "discontinued"}
            ]
        }"#;
        let envelope: Envelope<Vec<Product>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[1].sku, "P2");
    }

    #[test]
    fn search_results_decode_with_wire_names() {
        let json = r#"{
            "topicos": [{"id": "protocolos", "nome": "Protocolos", "valor_encontrado": "dlms"}],
            "produtos": [{"sku": "P9", "title": "Relay"}]
        }"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.topics[0].matched_value.as_deref(), Some("dlms"));
        assert_eq!(results.products[0].sku, "P9");
    }

    #[test]
    fn filter_params_use_wire_names() {
        let filter = TopicFilter::by_value("protocolos", "dlms");
        let params = filter_params(&filter, 50);
        assert_eq!(
            params,
            vec![
                ("nome", "dlms".to_string()),
                ("categoria", "protocolos".to_string()),
                ("per_page", "50".to_string()),
            ]
        );

        let filter = TopicFilter::by_topic("hemera");
        let params = filter_params(&filter, 25);
        assert_eq!(params[0], ("campo", "hemera".to_string()));
        assert_eq!(params[1], ("valor", "hemera".to_string()));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::new("http://localhost:8001/api").unwrap();
        assert_eq!(
            client.base.join("topicos").unwrap().as_str(),
            "http://localhost:8001/api/topicos"
        );
    }
}
