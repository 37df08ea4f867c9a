//! Predicate evaluation for the in-memory store fakes.

use std::cmp::Ordering;

use nimbus_sdk::{
    ItemChange, JsonValue, ModelRecord, ObserveSelector, QueryOperator, QueryPredicate,
};

/// Field value, with `id` resolving to the primary key.
pub fn field(record: &ModelRecord, name: &str) -> Option<JsonValue> {
    if name == "id" {
        return Some(JsonValue::String(record.id.clone()));
    }
    record.fields.get(name).cloned()
}

/// Missing fields never match a comparison.
pub fn matches(predicate: &QueryPredicate, record: &ModelRecord) -> bool {
    match predicate {
        QueryPredicate::All => true,
        QueryPredicate::And(terms) => terms.iter().all(|term| matches(term, record)),
        QueryPredicate::Or(terms) => terms.iter().any(|term| matches(term, record)),
        QueryPredicate::Not(inner) => !matches(inner, record),
        QueryPredicate::Compare {
            field: name,
            op,
            value,
        } => match field(record, name) {
            Some(actual) => compare(&actual, *op, value),
            None => false,
        },
    }
}

pub fn accepts(selector: &ObserveSelector, change: &ItemChange) -> bool {
    let item = &change.item;
    match selector {
        ObserveSelector::All => true,
        ObserveSelector::Model { model } => item.model == *model,
        ObserveSelector::Item { model, id } => item.model == *model && item.id == *id,
        ObserveSelector::Matching { model, predicate } => {
            item.model == *model && matches(predicate, item)
        }
    }
}

fn compare(actual: &JsonValue, op: QueryOperator, expected: &JsonValue) -> bool {
    match op {
        QueryOperator::Eq => actual == expected,
        QueryOperator::Ne => actual != expected,
        QueryOperator::Contains => match (actual, expected) {
            (JsonValue::String(haystack), JsonValue::String(needle)) => {
                haystack.contains(needle.as_str())
            }
            (JsonValue::Array(items), needle) => items.contains(needle),
            _ => false,
        },
        QueryOperator::BeginsWith => match (actual, expected) {
            (JsonValue::String(value), JsonValue::String(prefix)) => {
                value.starts_with(prefix.as_str())
            }
            _ => false,
        },
        QueryOperator::Lt => ordering(actual, expected) == Some(Ordering::Less),
        QueryOperator::Le => matches!(
            ordering(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        QueryOperator::Gt => ordering(actual, expected) == Some(Ordering::Greater),
        QueryOperator::Ge => matches!(
            ordering(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

fn ordering(left: &JsonValue, right: &JsonValue) -> Option<Ordering> {
    match (left, right) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        (JsonValue::Bool(a), JsonValue::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
