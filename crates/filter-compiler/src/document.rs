//! Renders the intermediate filter tree into the final nested filter
//! document understood by the target document store.

use crate::compile::{FilterNode, FilterValue};
use serde_json::{Map, Value};

/// Ordered mapping from field-path-or-operator key to scalar, array, or
/// nested mapping. Dotted field names are single keys containing the
/// dot, never nested mappings.
pub type FilterDocument = Map<String, Value>;

pub fn materialize(node: &FilterNode) -> FilterDocument {
    let mut document = FilterDocument::new();

    match node {
        FilterNode::FieldEquals { field, value } => {
            document.insert(field.clone(), render_value(value));
        }
        FilterNode::FieldOp { field, op, value } => {
            let mut operator = Map::new();
            operator.insert(op.to_string(), render_value(value));
            document.insert(field.clone(), Value::Object(operator));
        }
        FilterNode::And(a, b) => {
            document.insert(
                "$and".to_string(),
                Value::Array(vec![
                    Value::Object(materialize(a)),
                    Value::Object(materialize(b)),
                ]),
            );
        }
        FilterNode::Or(a, b) => {
            document.insert(
                "$or".to_string(),
                Value::Array(vec![
                    Value::Object(materialize(a)),
                    Value::Object(materialize(b)),
                ]),
            );
        }
        FilterNode::ElemMatch { field, inner } => {
            let mut operator = Map::new();
            operator.insert("$elemMatch".to_string(), Value::Object(materialize(inner)));
            document.insert(field.clone(), Value::Object(operator));
        }
        FilterNode::Size { field, value } => {
            let mut operator = Map::new();
            operator.insert("$size".to_string(), render_value(value));
            document.insert(field.clone(), Value::Object(operator));
        }
        FilterNode::In { field, value } => {
            // Operand order mirrors the reference: the captured array's
            // path keys the document, the field path sits under $in
            let mut operator = Map::new();
            operator.insert("$in".to_string(), Value::String(field.clone()));
            document.insert(value.clone(), Value::Object(operator));
        }
    }

    document
}

fn render_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Literal(v) => v.clone(),
        FilterValue::Path(path) => Value::String(path.clone()),
    }
}
