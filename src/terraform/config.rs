use std::collections::BTreeMap;

use crate::schema::LABEL_ATTRIBUTES;

/// Static view of an attribute value. Collections keep only their length
/// and non-literal expressions are opaque.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(usize),
    Map(usize),
    /// References, function calls, templates and other expressions whose
    /// value is only known at plan time.
    Expression,
}

impl AttributeValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Null => false,
            AttributeValue::Bool(b) => *b,
            AttributeValue::Number(n) => *n != 0.0,
            AttributeValue::String(s) => !s.is_empty(),
            AttributeValue::List(len) | AttributeValue::Map(len) => *len > 0,
            AttributeValue::Expression => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceBlock {
    pub resource_type: String,
    pub name: String,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ResourceBlock {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    /// True when `labels` or `resource_labels` is set to a non-empty value.
    pub fn has_labels(&self) -> bool {
        LABEL_ATTRIBUTES.iter().any(|attr| {
            self.attributes
                .get(*attr)
                .is_some_and(AttributeValue::is_truthy)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub resources: Vec<ResourceBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!AttributeValue::Null.is_truthy());
        assert!(!AttributeValue::Bool(false).is_truthy());
        assert!(AttributeValue::Bool(true).is_truthy());
        assert!(!AttributeValue::Number(0.0).is_truthy());
        assert!(AttributeValue::Number(2.5).is_truthy());
        assert!(!AttributeValue::String(String::new()).is_truthy());
        assert!(AttributeValue::String("x".to_string()).is_truthy());
        assert!(!AttributeValue::List(0).is_truthy());
        assert!(AttributeValue::List(1).is_truthy());
        assert!(!AttributeValue::Map(0).is_truthy());
        assert!(AttributeValue::Map(3).is_truthy());
        assert!(AttributeValue::Expression.is_truthy());
    }

    #[test]
    fn test_has_labels_either_attribute() {
        let labels = ResourceBlock::new("google_compute_instance", "vm")
            .with_attribute("labels", AttributeValue::Map(1));
        assert!(labels.has_labels());

        let resource_labels = ResourceBlock::new("google_cloudfunctions2_function", "fn")
            .with_attribute("resource_labels", AttributeValue::Expression);
        assert!(resource_labels.has_labels());
    }

    #[test]
    fn test_has_labels_falsy_values() {
        let empty = ResourceBlock::new("google_compute_instance", "vm")
            .with_attribute("labels", AttributeValue::Map(0))
            .with_attribute("resource_labels", AttributeValue::Null);
        assert!(!empty.has_labels());

        let missing = ResourceBlock::new("google_compute_instance", "vm")
            .with_attribute("name", AttributeValue::String("vm".to_string()));
        assert!(!missing.has_labels());
    }

    #[test]
    fn test_falsy_labels_with_truthy_resource_labels() {
        let block = ResourceBlock::new("google_compute_instance", "vm")
            .with_attribute("labels", AttributeValue::String(String::new()))
            .with_attribute("resource_labels", AttributeValue::Map(2));
        assert!(block.has_labels());
    }

    #[test]
    fn test_address() {
        let block = ResourceBlock::new("google_storage_bucket", "assets");
        assert_eq!(block.address(), "google_storage_bucket.assets");
    }
}
