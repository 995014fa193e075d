use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::WikiError;

pub const USER_AGENT: &str = "ClassicalMusicApp/1.0";
const CATEGORY_PREFIX: &str = "Category:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Full wiki title, e.g. `Category:Chopin, Frédéric`.
    pub fn title(&self) -> String {
        format!("{}{}", CATEGORY_PREFIX, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub name: String,
    pub namespace: i64,
}

impl WikiPage {
    pub fn new(name: impl Into<String>, namespace: i64) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }
}

/// Read-only view of a wiki's category structure.
#[async_trait]
pub trait WikiClient: Send + Sync {
    async fn resolve_category(&self, name: &str) -> Result<Category, WikiError>;

    /// Every member of the category, in the order the wiki returns them.
    async fn category_members(&self, category: &Category) -> Result<Vec<WikiPage>, WikiError>;
}

/// `WikiClient` backed by the MediaWiki Action API.
pub struct MediaWikiClient {
    client: Client,
    api_url: Url,
    site_name: String,
}

impl MediaWikiClient {
    /// Build the HTTP client and check the site answers a siteinfo query.
    /// Without a `timeout` requests wait as long as reqwest's default allows.
    pub async fn connect(api_url: &str, timeout: Option<Duration>) -> Result<Self, WikiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let mut wiki = Self {
            client: builder.build()?,
            api_url: Url::parse(api_url)?,
            site_name: String::new(),
        };

        let siteinfo: SiteInfoResponse = wiki.query(&[("meta", "siteinfo"), ("siprop", "general")]).await?;
        wiki.site_name = siteinfo.query.general.sitename;
        info!("Connected to {} ({})", wiki.site_name, wiki.api_url);

        Ok(wiki)
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    async fn query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, WikiError> {
        let res = self
            .client
            .get(self.api_url.clone())
            .query(&[("action", "query"), ("format", "json")])
            .query(params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(WikiError::Status {
                url: res.url().to_string(),
                status: res.status().as_u16(),
            });
        }

        let body: Value = res.json().await?;
        if let Some(err) = body.get("error") {
            return Err(WikiError::Api {
                code: value_text(err.get("code")),
                info: value_text(err.get("info")),
            });
        }

        serde_json::from_value(body).map_err(|e| WikiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl WikiClient for MediaWikiClient {
    async fn resolve_category(&self, name: &str) -> Result<Category, WikiError> {
        let category = Category::new(name);
        let title = category.title();
        let response: PagesResponse = self.query(&[("titles", title.as_str())]).await?;

        let pages = response.query.map(|q| q.pages).unwrap_or_default();
        if pages.is_empty() || pages.values().any(|p| p.missing.is_some() || p.invalid.is_some()) {
            return Err(WikiError::CategoryNotFound(name.to_string()));
        }

        Ok(category)
    }

    async fn category_members(&self, category: &Category) -> Result<Vec<WikiPage>, WikiError> {
        let title = category.title();
        let mut members = Vec::new();
        let mut continuation: Vec<(String, String)> = vec![("continue".into(), String::new())];

        loop {
            let mut params: Vec<(&str, &str)> = vec![
                ("list", "categorymembers"),
                ("cmtitle", title.as_str()),
                ("cmprop", "ids|title"),
                ("cmlimit", "max"),
            ];
            params.extend(continuation.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let batch: MembersResponse = self.query(&params).await?;
            if let Some(query) = batch.query {
                debug!("{}: +{} members", title, query.categorymembers.len());
                members.extend(
                    query
                        .categorymembers
                        .into_iter()
                        .map(|m| WikiPage::new(m.title, m.ns)),
                );
            }

            continuation = match (batch.continue_, batch.query_continue) {
                (Some(next), _) => next.iter().map(|(k, v)| (k.clone(), value_text(Some(v)))).collect(),
                (None, Some(mut legacy)) => match legacy.remove("categorymembers") {
                    Some(next) => next.iter().map(|(k, v)| (k.clone(), value_text(Some(v)))).collect(),
                    None => break,
                },
                (None, None) => break,
            };
        }

        Ok(members)
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[derive(Deserialize)]
struct SiteInfoResponse {
    query: SiteInfoQuery,
}

#[derive(Deserialize)]
struct SiteInfoQuery {
    general: GeneralInfo,
}

#[derive(Deserialize)]
struct GeneralInfo {
    sitename: String,
}

#[derive(Deserialize)]
struct PagesResponse {
    query: Option<PagesQuery>,
}

#[derive(Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: HashMap<String, PageStatus>,
}

#[derive(Deserialize)]
struct PageStatus {
    missing: Option<Value>,
    invalid: Option<Value>,
}

#[derive(Deserialize)]
struct MembersResponse {
    query: Option<MembersQuery>,
    #[serde(rename = "continue")]
    continue_: Option<HashMap<String, Value>>,
    #[serde(rename = "query-continue")]
    query_continue: Option<HashMap<String, HashMap<String, Value>>>,
}

#[derive(Deserialize)]
struct MembersQuery {
    #[serde(default)]
    categorymembers: Vec<MemberEntry>,
}

#[derive(Deserialize)]
struct MemberEntry {
    ns: i64,
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_title_has_namespace_prefix() {
        assert_eq!(
            Category::new("Chopin, Frédéric").title(),
            "Category:Chopin, Frédéric"
        );
    }

    #[test]
    fn parses_members_with_continuation() {
        let raw = r#"{
            "batchcomplete": "",
            "continue": {"cmcontinue": "page|4e4f|123", "continue": "-||"},
            "query": {"categorymembers": [
                {"pageid": 1, "ns": 0, "title": "Sonata No.14 (Beethoven, Ludwig van)"},
                {"pageid": 2, "ns": 14, "title": "Category:Beethoven, Ludwig van/Sonatas"}
            ]}
        }"#;
        let parsed: MembersResponse = serde_json::from_str(raw).unwrap();

        let members = parsed.query.unwrap().categorymembers;
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].ns, 14);
        let next = parsed.continue_.unwrap();
        assert_eq!(value_text(next.get("cmcontinue")), "page|4e4f|123");
    }

    #[test]
    fn parses_legacy_query_continue() {
        let raw = r#"{
            "query-continue": {"categorymembers": {"cmcontinue": "Sonata|"}},
            "query": {"categorymembers": []}
        }"#;
        let parsed: MembersResponse = serde_json::from_str(raw).unwrap();

        assert!(parsed.continue_.is_none());
        let legacy = parsed.query_continue.unwrap();
        assert_eq!(value_text(legacy["categorymembers"].get("cmcontinue")), "Sonata|");
    }

    #[test]
    fn missing_page_is_flagged() {
        let raw = r#"{"query": {"pages": {"-1": {"ns": 14, "title": "Category:Nobody", "missing": ""}}}}"#;
        let parsed: PagesResponse = serde_json::from_str(raw).unwrap();

        let pages = parsed.query.unwrap().pages;
        assert!(pages["-1"].missing.is_some());
    }
}
