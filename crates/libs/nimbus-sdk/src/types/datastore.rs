use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::api::JsonValue;

/// A model instance as the data store exchanges it: model name, primary key
/// and field values.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelRecord {
    pub model: String,
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, JsonValue>,
}

impl ModelRecord {
    pub fn new(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
    BeginsWith,
}

/// Filter handed to the data store. Evaluation is the store's business; this
/// is only its description.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum QueryPredicate {
    /// Matches every record.
    #[default]
    All,
    Compare {
        field: String,
        op: QueryOperator,
        value: JsonValue,
    },
    And(Vec<QueryPredicate>),
    Or(Vec<QueryPredicate>),
    Not(Box<QueryPredicate>),
}

impl QueryPredicate {
    pub fn compare(
        field: impl Into<String>,
        op: QueryOperator,
        value: impl Into<JsonValue>,
    ) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::compare(field, QueryOperator::Eq, value)
    }

    pub fn and(self, other: QueryPredicate) -> Self {
        match self {
            Self::All => other,
            Self::And(mut terms) => {
                terms.push(other);
                Self::And(terms)
            }
            first => Self::And(vec![first, other]),
        }
    }

    pub fn or(self, other: QueryPredicate) -> Self {
        match self {
            Self::Or(mut terms) => {
                terms.push(other);
                Self::Or(terms)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuerySort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryPage {
    pub index: u32,
    pub limit: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryOptions {
    pub predicate: QueryPredicate,
    #[serde(default)]
    pub sort: Vec<QuerySort>,
    #[serde(default)]
    pub page: Option<QueryPage>,
}

impl QueryOptions {
    pub fn matching(predicate: QueryPredicate) -> Self {
        Self {
            predicate,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(QuerySort {
            field: field.into(),
            order,
        });
        self
    }

    pub fn paginated(mut self, index: u32, limit: u32) -> Self {
        self.page = Some(QueryPage { index, limit });
        self
    }
}

/// Which changes an observation receives.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ObserveSelector {
    /// Every change to every model.
    #[default]
    All,
    Model {
        model: String,
    },
    Item {
        model: String,
        id: String,
    },
    Matching {
        model: String,
        predicate: QueryPredicate,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeInitiator {
    Local,
    Remote,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemChange {
    pub change_id: String,
    pub kind: ChangeKind,
    pub initiator: ChangeInitiator,
    pub item: ModelRecord,
}
