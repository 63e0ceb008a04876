//! Remote score table over a PostgREST-style HTTP API
//!
//! Request building and response parsing are plain functions so they run
//! anywhere; only the `fetch` transport ([`RestScoreGateway`]) is wasm32.

use serde::{Deserialize, Serialize};

use super::ScoreRecord;
use crate::error::GatewayError;

fn default_table() -> String {
    "flappymodeV2".to_string()
}

/// Where the leaderboard lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTableConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public (anon) API key, sent as `apikey` and bearer token
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Transport-independent HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl RestTableConfig {
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        Ok(serde_json::from_str(json)?)
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            encode_query_value(&self.table)
        )
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.api_key)),
            ("Accept", "application/json".to_string()),
        ]
    }

    fn get(&self, query: String) -> RestRequest {
        RestRequest {
            method: HttpMethod::Get,
            url: format!("{}?{query}", self.table_url()),
            headers: self.headers(),
            body: None,
        }
    }

    fn post(&self, query: &str, prefer: &str, record: &ScoreRecord) -> Result<RestRequest, GatewayError> {
        let mut headers = self.headers();
        headers.push(("Content-Type", "application/json".to_string()));
        headers.push(("Prefer", prefer.to_string()));
        let url = if query.is_empty() {
            self.table_url()
        } else {
            format!("{}?{query}", self.table_url())
        };
        Ok(RestRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(serde_json::to_string(record)?),
        })
    }

    /// Zero or one row for `nickname`
    pub fn fetch_score_request(&self, nickname: &str) -> RestRequest {
        self.get(format!(
            "select=nickname,score&nickname=eq.{}",
            encode_query_value(nickname)
        ))
    }

    pub fn insert_request(&self, record: &ScoreRecord) -> Result<RestRequest, GatewayError> {
        self.post("", "return=minimal", record)
    }

    /// Insert, or overwrite the row with the same nickname
    pub fn upsert_request(&self, record: &ScoreRecord) -> Result<RestRequest, GatewayError> {
        self.post(
            "on_conflict=nickname",
            "resolution=merge-duplicates,return=minimal",
            record,
        )
    }

    pub fn top_scores_request(&self, limit: usize) -> RestRequest {
        self.get(format!("select=nickname,score&order=score.desc&limit={limit}"))
    }
}

/// Rows from a select response
pub fn parse_records(body: &str) -> Result<Vec<ScoreRecord>, GatewayError> {
    Ok(serde_json::from_str(body)?)
}

/// A select that should match at most one row
pub fn parse_single(body: &str) -> Result<Option<ScoreRecord>, GatewayError> {
    let mut rows = parse_records(body)?;
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        n => Err(GatewayError::Status {
            status: 406,
            body: format!("expected at most one row, got {n}"),
        }),
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(target_arch = "wasm32")]
pub use web::RestScoreGateway;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{RestRequest, RestTableConfig, parse_records, parse_single};
    use crate::error::GatewayError;
    use crate::persistence::{ScoreGateway, ScoreRecord};

    /// Remote table reached with the browser's `fetch`
    #[derive(Debug, Clone)]
    pub struct RestScoreGateway {
        config: RestTableConfig,
    }

    impl RestScoreGateway {
        pub fn new(config: RestTableConfig) -> Self {
            Self { config }
        }

        async fn send(&self, request: RestRequest) -> Result<String, GatewayError> {
            let init = web_sys::RequestInit::new();
            init.set_method(request.method.as_str());
            init.set_mode(web_sys::RequestMode::Cors);
            if let Some(body) = &request.body {
                init.set_body(&JsValue::from_str(body));
            }

            let req = web_sys::Request::new_with_str_and_init(&request.url, &init)
                .map_err(js_error)?;
            for (name, value) in &request.headers {
                req.headers().set(name, value).map_err(js_error)?;
            }

            let window = web_sys::window()
                .ok_or_else(|| GatewayError::Network("no window".to_string()))?;
            let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&req))
                .await
                .map_err(js_error)?
                .dyn_into()
                .map_err(js_error)?;
            let text = JsFuture::from(response.text().map_err(js_error)?)
                .await
                .map_err(js_error)?;
            let body = text.as_string().unwrap_or_default();

            if !response.ok() {
                return Err(GatewayError::Status {
                    status: response.status(),
                    body,
                });
            }
            Ok(body)
        }
    }

    fn js_error(value: JsValue) -> GatewayError {
        GatewayError::Network(format!("{value:?}"))
    }

    impl ScoreGateway for RestScoreGateway {
        async fn fetch_score(&self, nickname: &str) -> Result<Option<ScoreRecord>, GatewayError> {
            let body = self.send(self.config.fetch_score_request(nickname)).await?;
            parse_single(&body)
        }

        async fn insert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
            let request = self.config.insert_request(&ScoreRecord::new(nickname, score))?;
            self.send(request).await.map(|_| ())
        }

        async fn upsert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
            let request = self.config.upsert_request(&ScoreRecord::new(nickname, score))?;
            self.send(request).await.map(|_| ())
        }

        async fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
            let body = self.send(self.config.top_scores_request(limit)).await?;
            parse_records(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RestTableConfig {
        RestTableConfig::from_json(r#"{ "base_url": "https://scores.example.co/", "api_key": "anon" }"#)
            .unwrap()
    }

    fn header<'a>(request: &'a RestRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_table_name() {
        assert_eq!(config().table, "flappymodeV2");
    }

    #[test]
    fn test_fetch_score_filters_by_nickname() {
        let request = config().fetch_score_request("Chad & co");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://scores.example.co/rest/v1/flappymodeV2?select=nickname,score&nickname=eq.Chad%20%26%20co"
        );
        assert_eq!(header(&request, "apikey"), Some("anon"));
        assert_eq!(header(&request, "Authorization"), Some("Bearer anon"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_top_scores_order_and_limit() {
        let request = config().top_scores_request(10);
        assert!(request.url.ends_with("?select=nickname,score&order=score.desc&limit=10"));
    }

    #[test]
    fn test_upsert_merges_duplicates() {
        let request = config().upsert_request(&ScoreRecord::new("A", 42)).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.url.ends_with("/flappymodeV2?on_conflict=nickname"));
        assert_eq!(
            header(&request, "Prefer"),
            Some("resolution=merge-duplicates,return=minimal")
        );
        assert_eq!(request.body.as_deref(), Some(r#"{"nickname":"A","score":42}"#));
    }

    #[test]
    fn test_insert_is_plain_post() {
        let request = config().insert_request(&ScoreRecord::new("B", 50)).unwrap();
        assert!(request.url.ends_with("/rest/v1/flappymodeV2"));
        assert_eq!(header(&request, "Prefer"), Some("return=minimal"));
        assert_eq!(header(&request, "Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(parse_single("[]").unwrap(), None);
        assert_eq!(
            parse_single(r#"[{"nickname":"A","score":500}]"#).unwrap(),
            Some(ScoreRecord::new("A", 500))
        );
        assert!(matches!(
            parse_single(r#"[{"nickname":"A","score":1},{"nickname":"A","score":2}]"#),
            Err(GatewayError::Status { status: 406, .. })
        ));
        assert!(matches!(parse_single("{"), Err(GatewayError::Decode(_))));
    }

    #[test]
    fn test_encode_keeps_unreserved() {
        assert_eq!(encode_query_value("Az09-_.~"), "Az09-_.~");
        assert_eq!(encode_query_value("ñ"), "%C3%B1");
    }
}
