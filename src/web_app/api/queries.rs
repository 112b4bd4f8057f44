// web_app/api/queries.rs - Search request translation
//
// Maps the page's SearchRequest onto the upstream REST database's
// query-string dialect, and parses the serialized request that arrives
// on the products route.
//
// Philosophy: pure functions, no I/O. The upstream client owns the
// HTTP call and its failures.

use reqwest::Url;
use serde_json::Value;
use url::form_urlencoded;

use crate::web_app::error::SearchError;
use crate::web_app::model::{SearchRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Ordered query-string parameters for one upstream products call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamQuery {
    pairs: Vec<(&'static str, String)>,
}

impl UpstreamQuery {
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Value of the first parameter with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// `<base>/products?<query>`, keeping any path the base already has
    pub fn products_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("products");
        }
        url.query_pairs_mut()
            .clear()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }

    /// Percent-encoded query string, without the leading `?`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// Translate a search request into upstream parameters.
///
/// Parameter order: q, h, filter, skip, max, dir, sort, groupBy.
/// `h` only appears when hints were supplied.
pub fn to_upstream_query(req: &SearchRequest) -> UpstreamQuery {
    let page = if req.page == 0 { DEFAULT_PAGE } else { req.page };
    let page_size = if req.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        req.page_size
    };
    let skip = u64::from(page - 1) * u64::from(page_size);

    let mut pairs: Vec<(&'static str, String)> = Vec::with_capacity(8);
    pairs.push(("q", req.query.to_string()));
    if let Some(hints) = req.hints.as_ref().filter(|h| !h.is_null()) {
        pairs.push(("h", hints.to_string()));
    }
    if let Some(filter) = &req.filter {
        pairs.push(("filter", filter.clone()));
    }
    pairs.push(("skip", skip.to_string()));
    pairs.push(("max", page_size.to_string()));
    pairs.push(("dir", if req.ascending { "1" } else { "-1" }.to_string()));
    if let Some(sort_by) = req.sort_by {
        pairs.push(("sort", sort_by.upstream_field().to_string()));
    }
    if let Some(group_by) = &req.group_by {
        pairs.push(("groupBy", group_by.clone()));
    }

    UpstreamQuery { pairs }
}

/// Parse the serialized request carried by the `q=` parameter.
///
/// Fails with `MalformedRequest` when the text is not JSON, is not a
/// JSON object, lacks `query`, or has a field of the wrong type.
pub fn parse_incoming(raw: &str) -> Result<SearchRequest, SearchError> {
    let value: Value = serde_json::from_str(raw).map_err(SearchError::malformed)?;
    let object = value
        .as_object()
        .ok_or_else(|| SearchError::malformed("expected a JSON object"))?;
    if !object.contains_key("query") {
        return Err(SearchError::malformed("missing field `query`"));
    }
    serde_json::from_value(value).map_err(SearchError::malformed)
}
