//! Overpass API client for highway geometry
//!
//! Sends a single Overpass QL query per bounding box and parses the JSON
//! answer into [`GeoElement`]s. There is no retry and no request timeout
//! beyond what the transport enforces.

use super::{BoundingBox, DataError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Public Overpass endpoint used when none is configured
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// A latitude/longitude pair inside a way's `geometry` array
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

/// An ordered chain of points, as returned with `out geom`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub geometry: Vec<GeometryPoint>,
}

impl Way {
    /// Value of the `highway` tag, if any
    pub fn highway(&self) -> Option<&str> {
        self.tags.get("highway").map(String::as_str)
    }
}

/// One entry of the response's `elements` array, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeoElement {
    Node(Node),
    Way(Way),
    /// Relations and anything else the query did not ask for
    #[serde(other)]
    Other,
}

impl GeoElement {
    pub fn as_way(&self) -> Option<&Way> {
        match self {
            GeoElement::Way(way) => Some(way),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<GeoElement>,
}

/// Overpass QL selecting every `highway`-tagged way in `bbox`, with full geometry
pub fn highway_query(bbox: &BoundingBox) -> String {
    format!("[out:json];\nway[\"highway\"]({bbox});\nout geom;")
}

/// Parse an Overpass JSON document into its elements
pub fn parse_response(body: &str) -> Result<Vec<GeoElement>> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response.elements)
}

/// HTTP client bound to one Overpass endpoint
#[derive(Clone, Debug)]
pub struct OverpassClient {
    url: String,
    http: reqwest::Client,
}

impl OverpassClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    /// Use an already configured HTTP client, e.g. one with custom proxy rules
    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch all highway ways inside `bbox`.
    ///
    /// The query is sent form-encoded as the `data` field of a POST body.
    #[tracing::instrument(skip(self, bbox), fields(url = %self.url, bbox = %bbox))]
    pub async fn fetch_highways(&self, bbox: &BoundingBox) -> Result<Vec<GeoElement>> {
        let query = highway_query(bbox);
        tracing::debug!("Overpass query: {}", query);

        let response = self
            .http
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status { status });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}
