//! Catalog records as delivered by the REST API.
//!
//! Wire field names are Portuguese (`nome`, `icone`, `valores`, ...);
//! the Rust fields are English with serde renames. Records are immutable
//! for the duration of a display cycle — each fetched batch fully
//! replaces the previous one, no merging.

pub mod format;

use std::collections::BTreeMap;

use serde::Deserialize;

/// A nested value group inside a topic (e.g. meter sub-families).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubTopic {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "valores", default)]
    pub values: Vec<String>,
}

/// A taxonomy facet: groups products by one attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Topic {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "icone", default)]
    pub icon: Option<String>,
    /// Hex color delivered by the API; the palette is the fallback.
    #[serde(rename = "cor", default)]
    pub color: Option<String>,
    /// Discrete values the topic can be narrowed to.
    #[serde(rename = "valores", default)]
    pub values: Vec<String>,
    #[serde(rename = "subtopicos", default)]
    pub subtopics: Vec<SubTopic>,
    #[serde(default)]
    pub count: Option<u32>,
    /// Set by global search: which value matched the query.
    #[serde(rename = "valor_encontrado", default)]
    pub matched_value: Option<String>,
}

impl Topic {
    /// Minimal topic, used for synthesized relation views and tests.
    pub fn named(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: None,
            icon: None,
            color: None,
            values: Vec::new(),
            subtopics: Vec::new(),
            count: None,
            matched_value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
    /// Anything the API sends that we don't know; kept instead of
    /// failing the whole batch.
    #[serde(other)]
    Unknown,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Active
    }
}

impl ProductStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Discontinued => "discontinued",
            ProductStatus::Unknown => "unknown",
        }
    }
}

/// One catalog product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub sku: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// relation-type → related identifiers (other SKUs, topic values).
    #[serde(default)]
    pub relationships: BTreeMap<String, Vec<String>>,
    /// Data completeness, 0–100.
    #[serde(default)]
    pub completeness_score: Option<u8>,
}

impl Product {
    pub fn new(sku: &str, title: &str) -> Self {
        Self {
            sku: sku.to_string(),
            title: title.to_string(),
            status: ProductStatus::default(),
            categories: Vec::new(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
            completeness_score: None,
        }
    }
}

/// What the scene displays: a topic or a product.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Topic(Topic),
    Product(Product),
}

impl Entity {
    pub fn id(&self) -> &str {
        match self {
            Entity::Topic(t) => &t.id,
            Entity::Product(p) => &p.sku,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Entity::Topic(t) => &t.name,
            Entity::Product(p) => &p.title,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Entity::Topic(t) => t.icon.as_deref(),
            Entity::Product(_) => None,
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Entity::Topic(t) => t.count,
            Entity::Product(_) => None,
        }
    }
}

/// Query shape for the products-by-topic endpoint. Field names mirror
/// the wire parameters (`campo`, `valor`, `nome`, `categoria`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopicFilter {
    pub field: Option<String>,
    pub value: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
}

impl TopicFilter {
    /// Everything tagged with the topic itself.
    pub fn by_topic(topic_id: &str) -> Self {
        Self {
            field: Some(topic_id.to_string()),
            value: Some(topic_id.to_string()),
            ..Self::default()
        }
    }

    /// One discrete value within a category.
    pub fn by_value(category: &str, value: &str) -> Self {
        Self {
            name: Some(value.to_string()),
            category: Some(category.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_decodes_wire_names() {
        let json = r##"{
            "id": "protocolos",
            "nome": "Protocolos",
            "tipo": "grupo",
            "icone": "🔵",
            "cor": "#4ecdc4",
            "valores": ["abnt", "modbus", "dlms"],
            "count": 3
        }"##;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.name, "Protocolos");
        assert_eq!(topic.values, vec!["abnt", "modbus", "dlms"]);
        assert_eq!(topic.color.as_deref(), Some("#4ecdc4"));
        assert_eq!(topic.count, Some(3));
        assert!(topic.subtopics.is_empty());
    }

    #[test]
    fn topic_with_subtopics() {
        let json = r#"{
            "id": "medidores",
            "nome": "Medidores",
            "subtopicos": [
                {"id": "fabricante_medidor", "nome": "Fabricantes", "valores": ["a", "b"]}
            ]
        }"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.subtopics.len(), 1);
        assert_eq!(topic.subtopics[0].values, vec!["a", "b"]);
    }

    #[test]
    fn product_decodes_with_unknown_status() {
        let json = r#"{
            "sku": "MTR-100",
            "title": "Meter 100",
            "status": "prototype",
            "categories": ["medidores"],
            "attributes": {"fasorial": true},
            "relationships": {"protocolos": ["abnt", "dlms"]},
            "completeness_score": 87
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.status, ProductStatus::Unknown);
        assert_eq!(product.relationships["protocolos"], vec!["abnt", "dlms"]);
        assert_eq!(product.completeness_score, Some(87));
    }

    #[test]
    fn product_status_known_values() {
        for (wire, status) in [
            ("\"active\"", ProductStatus::Active),
            ("\"inactive\"", ProductStatus::Inactive),
            ("\"discontinued\"", ProductStatus::Discontinued),
        ] {
            let parsed: ProductStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn filter_constructors() {
        let by_topic = TopicFilter::by_topic("protocolos");
        assert_eq!(by_topic.field.as_deref(), Some("protocolos"));
        assert_eq!(by_topic.value.as_deref(), Some("protocolos"));
        assert!(by_topic.name.is_none());

        let by_value = TopicFilter::by_value("protocolos", "dlms");
        assert_eq!(by_value.category.as_deref(), Some("protocolos"));
        assert_eq!(by_value.name.as_deref(), Some("dlms"));
        assert!(by_value.field.is_none());
    }

    #[test]
    fn entity_accessors() {
        let topic = Entity::Topic(Topic::named("hemera", "Hemera"));
        assert_eq!(topic.id(), "hemera");
        assert_eq!(topic.label(), "Hemera");
        let product = Entity::Product(Product::new("P1", "Gateway"));
        assert_eq!(product.id(), "P1");
        assert_eq!(product.label(), "Gateway");
        assert!(product.count().is_none());
    }
}
