use serde_json::Value;

use super::config::{AttributeValue, Document, ResourceBlock};

/// Terraform JSON syntax allows an array wherever a single object may appear.
fn one_or_many(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

pub(super) fn parse(content: &str) -> Result<Document, serde_json::Error> {
    let root: Value = serde_json::from_str(content)?;
    let mut resources = Vec::new();

    let Some(resource) = root.get("resource") else {
        return Ok(Document { resources });
    };

    for by_type in one_or_many(resource) {
        let Value::Object(by_type) = by_type else {
            continue;
        };
        for (resource_type, by_name) in by_type {
            for by_name in one_or_many(by_name) {
                let Value::Object(by_name) = by_name else {
                    continue;
                };
                for (name, body) in by_name {
                    for body in one_or_many(body) {
                        let Value::Object(body) = body else {
                            continue;
                        };
                        let attributes = body
                            .iter()
                            .map(|(key, value)| (key.clone(), AttributeValue::from(value)))
                            .collect();
                        resources.push(ResourceBlock {
                            resource_type: resource_type.clone(),
                            name: name.clone(),
                            attributes,
                        });
                    }
                }
            }
        }
    }

    Ok(Document { resources })
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => AttributeValue::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => AttributeValue::String(s.clone()),
            Value::Array(items) => AttributeValue::List(items.len()),
            Value::Object(map) => AttributeValue::Map(map.len()),
        }
    }
}
