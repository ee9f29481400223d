use url::form_urlencoded;

/// Ordered parameter map for one CDA request.
///
/// Values are stored raw and encoded exactly once, in [`QueryParams::encode`].
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed envelope every CDA query carries.
    pub fn cda_envelope(cda_path: &str, data_access_id: &str) -> Self {
        let mut params = Self::new();
        params.insert("path", cda_path);
        params.insert("dataAccessId", data_access_id);
        params.insert("outputIndexId", "1");
        params.insert("pageSize", "0");
        params.insert("pageStart", "0");
        params.insert("sortBy", "");
        params.insert("paramsearchBox", "");
        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Append every entry of `other`, replacing names already present.
    pub fn extend(&mut self, other: &QueryParams) {
        for (name, value) in &other.entries {
            self.insert(name.as_str(), value.as_str());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// `application/x-www-form-urlencoded` body: each name and value
    /// percent-encoded on its own, pairs joined with `&`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}
