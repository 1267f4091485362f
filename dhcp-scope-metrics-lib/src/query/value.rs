use core::fmt::{Display, Formatter};

/// The canonical value handed back to the monitoring host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    /// A collection with no items.
    EmptyList,

    /// A base-10 integer.
    Scalar(i64),

    /// An ordered, non-empty list of strings.
    List(Vec<String>),

    /// JSON text whose first character is `[`.
    Document(String),
}

impl NormalizedValue {
    /// Render the value the way the monitoring host expects to receive it.
    ///
    /// Lists become JSON array text, scalars become plain digits, and documents are
    /// returned as-is.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::EmptyList => "[]".to_string(),
            Self::Scalar(value) => value.to_string(),
            Self::List(items) => serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()),
            Self::Document(text) => text.clone(),
        }
    }

    /// The list items, if this value is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::EmptyList => Some(&[]),
            Self::List(items) => Some(items),
            Self::Scalar(_) | Self::Document(_) => None,
        }
    }
}

impl Display for NormalizedValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.render())
    }
}
