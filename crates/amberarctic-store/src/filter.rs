//! Structural filter matching for the in-memory store.
//!
//! Implements the subset of filter semantics the handlers rely on: exact
//! equality, `$in` membership, and `$lte` numeric range. [`MemoryStore`]
//! evaluates these in-process so tests observe the same query behavior as
//! the MongoDB adapter.
//!
//! [`MemoryStore`]: crate::MemoryStore

use mongodb::bson::{Bson, Document};

/// Returns `true` when `document` satisfies every clause in `filter`.
///
/// An empty filter matches everything.
pub(crate) fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, condition)| clause_matches(document.get(field), condition))
}

fn clause_matches(value: Option<&Bson>, condition: &Bson) -> bool {
    match condition {
        Bson::Document(ops) if ops.keys().any(|k| k.starts_with('$')) => ops
            .iter()
            .all(|(operator, operand)| operator_matches(value, operator, operand)),
        expected => value == Some(expected),
    }
}

fn operator_matches(value: Option<&Bson>, operator: &str, operand: &Bson) -> bool {
    match operator {
        "$in" => in_matches(value, operand),
        "$lte" => lte_matches(value, operand),
        // Unknown operators never match; handlers only emit the two above.
        _ => false,
    }
}

/// `$in`: array fields match when any element is in the allowed list;
/// scalar fields match when the value itself is in the list.
fn in_matches(value: Option<&Bson>, operand: &Bson) -> bool {
    let Bson::Array(allowed) = operand else {
        return false;
    };
    match value {
        Some(Bson::Array(elements)) => elements.iter().any(|e| allowed.contains(e)),
        Some(scalar) => allowed.contains(scalar),
        None => false,
    }
}

/// `$lte`: numeric comparison across Int32/Int64/Double.
fn lte_matches(value: Option<&Bson>, operand: &Bson) -> bool {
    match (value.and_then(as_f64), as_f64(operand)) {
        (Some(field), Some(bound)) => field <= bound,
        _ => false,
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn product() -> Document {
        doc! {
            "slug": "arctic-edge-pro",
            "gender": "Unisex",
            "activity": ["city", "hiking", "travel"],
            "temperature_min_c": -30,
            "price": 399.0,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches(&product(), &doc! {}));
    }

    #[test]
    fn test_exact_match() {
        assert!(matches(&product(), &doc! { "gender": "Unisex" }));
        assert!(!matches(&product(), &doc! { "gender": "Men" }));
        assert!(!matches(&product(), &doc! { "missing_field": "x" }));
    }

    #[test]
    fn test_in_membership_on_array_field() {
        assert!(matches(&product(), &doc! { "activity": { "$in": ["hiking"] } }));
        assert!(matches(
            &product(),
            &doc! { "activity": { "$in": ["biking", "travel"] } }
        ));
        assert!(!matches(&product(), &doc! { "activity": { "$in": ["biking"] } }));
    }

    #[test]
    fn test_in_membership_on_scalar_field() {
        assert!(matches(
            &product(),
            &doc! { "gender": { "$in": ["Men", "Unisex"] } }
        ));
        assert!(!matches(&product(), &doc! { "gender": { "$in": ["Women"] } }));
    }

    #[test]
    fn test_lte_range() {
        assert!(matches(
            &product(),
            &doc! { "temperature_min_c": { "$lte": -20 } }
        ));
        assert!(matches(
            &product(),
            &doc! { "temperature_min_c": { "$lte": -30 } }
        ));
        assert!(!matches(
            &product(),
            &doc! { "temperature_min_c": { "$lte": -31 } }
        ));
    }

    #[test]
    fn test_lte_across_numeric_types() {
        // Int32 field against Int64 and Double bounds.
        assert!(matches(
            &product(),
            &doc! { "temperature_min_c": { "$lte": -20_i64 } }
        ));
        assert!(matches(&product(), &doc! { "price": { "$lte": 400 } }));
        assert!(!matches(&product(), &doc! { "price": { "$lte": 398.5 } }));
    }

    #[test]
    fn test_lte_non_numeric_never_matches() {
        assert!(!matches(&product(), &doc! { "slug": { "$lte": 10 } }));
    }

    #[test]
    fn test_combined_clauses() {
        let filter = doc! {
            "gender": "Unisex",
            "activity": { "$in": ["city"] },
            "temperature_min_c": { "$lte": -20 },
        };
        assert!(matches(&product(), &filter));

        let mismatched = doc! {
            "gender": "Unisex",
            "activity": { "$in": ["biking"] },
        };
        assert!(!matches(&product(), &mismatched));
    }
}
