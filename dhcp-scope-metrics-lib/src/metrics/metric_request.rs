/// A single query from the monitoring host: a metric key plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    key: String,
    params: Vec<String>,
}

impl MetricRequest {
    #[must_use]
    pub fn new(key: impl Into<String>, params: Vec<String>) -> Self {
        Self { key: key.into(), params }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }
}
