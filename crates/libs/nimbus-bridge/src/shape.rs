use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of bridge shapes a collaborator call can be adapted into.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One awaited success or failure.
    Single,
    /// A finite or observed sequence of items.
    Sequence,
    /// Data events plus a connection-state stream.
    Subscription,
    /// Progress updates plus one terminal result.
    Transfer,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Sequence => "sequence",
            Self::Subscription => "subscription",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
