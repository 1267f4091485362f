use strum::{Display, EnumIter};

/// The structural category a metric's result must conform to after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum ExpectedShape {
    /// A base-10 integer.
    #[strum(to_string = "integer")]
    ScalarInt,

    /// A list of strings, possibly empty.
    #[strum(to_string = "string list")]
    StringList,

    /// JSON text whose outermost value is an array of records.
    #[strum(to_string = "record array")]
    RecordArray,
}
