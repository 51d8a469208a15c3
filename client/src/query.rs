/// Query-string options attached to a request.
///
/// Implementors list only the fields that are set; unset fields never reach
/// the query string.
pub trait Options: Send + Sync {
    fn to_query_pairs(&self) -> Vec<(String, String)>;
}

/// Ad-hoc options bag with unique keys, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set `key`, replacing any previous value in place.
    pub fn set<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt<K: Into<String>, V: ToString>(self, key: K, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Options for QueryParams {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.pairs.clone()
    }
}

/// Append `options` to `path` as a URL-encoded query string.
///
/// Returns `path` untouched when there are no non-empty options. A key
/// repeated by an `Options` implementation keeps its first position and its
/// last value; pairs whose value is empty are dropped.
pub fn build_query_string(path: &str, options: Option<&dyn Options>) -> String {
    let pairs = match options {
        Some(options) => options.to_query_pairs(),
        None => return path.to_string(),
    };

    let unique = pairs
        .into_iter()
        .fold(QueryParams::new(), |params, (key, value)| params.set(key, value));
    let present: Vec<_> = unique
        .pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();
    if present.is_empty() {
        return path.to_string();
    }

    let query = present
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}
