use hcl::{Block, Body, Expression};

use super::config::{AttributeValue, Document, ResourceBlock};

pub(super) fn parse(content: &str) -> Result<Document, hcl::Error> {
    let body: Body = hcl::parse(content)?;
    let resources = body
        .blocks()
        .filter(|block| block.identifier() == "resource")
        .filter_map(resource_block)
        .collect();
    Ok(Document { resources })
}

fn resource_block(block: &Block) -> Option<ResourceBlock> {
    let [resource_type, name] = block.labels() else {
        tracing::debug!(
            labels = block.labels().len(),
            "skipping resource block without type and name labels"
        );
        return None;
    };

    let attributes = block
        .body()
        .attributes()
        .map(|attr| (attr.key().to_string(), AttributeValue::from(attr.expr())))
        .collect();

    Some(ResourceBlock {
        resource_type: resource_type.as_str().to_string(),
        name: name.as_str().to_string(),
        attributes,
    })
}

impl From<&Expression> for AttributeValue {
    fn from(expr: &Expression) -> Self {
        match expr {
            Expression::Null => AttributeValue::Null,
            Expression::Bool(b) => AttributeValue::Bool(*b),
            Expression::Number(n) => AttributeValue::Number(n.as_f64().unwrap_or_default()),
            Expression::String(s) => AttributeValue::String(s.clone()),
            Expression::Array(items) => AttributeValue::List(items.len()),
            Expression::Object(object) => AttributeValue::Map(object.len()),
            Expression::Parenthesis(inner) => AttributeValue::from(inner.as_ref()),
            _ => AttributeValue::Expression,
        }
    }
}
