//! Typed Notion filter grammar: `and`/`or` combinators over property
//! predicates. Serialized form is sent verbatim as the database query
//! `filter` argument, so these shapes must match the Notion API exactly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterExpression {
    And { and: Vec<FilterExpression> },
    Or { or: Vec<FilterExpression> },
    Predicate(PropertyPredicate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyPredicate {
    pub property: String,
    #[serde(flatten)]
    pub condition: PropertyCondition,
}

/// Condition keyed by the property type, e.g. `{"title": {"contains": "Analyst"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCondition {
    Title(TextCondition),
    RichText(TextCondition),
    Status(StatusCondition),
    Date(DateCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCondition {
    Equals(String),
    Contains(String),
    IsNotEmpty(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCondition {
    Equals(String),
    IsNotEmpty(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCondition {
    Equals(String),
    OnOrAfter(String),
    Before(String),
    IsNotEmpty(bool),
}

impl FilterExpression {
    pub fn and(parts: Vec<FilterExpression>) -> Self {
        FilterExpression::And { and: parts }
    }

    pub fn title_contains(property: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpression::Predicate(PropertyPredicate {
            property: property.into(),
            condition: PropertyCondition::Title(TextCondition::Contains(value.into())),
        })
    }

    pub fn rich_text_contains(property: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpression::Predicate(PropertyPredicate {
            property: property.into(),
            condition: PropertyCondition::RichText(TextCondition::Contains(value.into())),
        })
    }
}
