//! Triple normalization.
//!
//! Converts one raw triple into canonical entries in a [`GraphStore`]:
//! both entities are upserted (first occurrence wins, later occurrences are
//! ignored entirely) and then one edge is appended unconditionally.

use crate::raw::{RawEntity, RawRelation, RawTriple};
use crate::store::GraphStore;
use crate::types::{Edge, EdgeDetail, Node, NodeDetail};
use kgview_core::{CategoryTable, RelationTable, Result, ViewerConfig};

/// Resolves raw entities and relations against the display tables.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer<'a> {
    categories: &'a CategoryTable,
    relations: &'a RelationTable,
    default_color: &'a str,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer over explicit tables.
    pub fn new(
        categories: &'a CategoryTable,
        relations: &'a RelationTable,
        default_color: &'a str,
    ) -> Self {
        Self {
            categories,
            relations,
            default_color,
        }
    }

    /// Creates a normalizer over the tables of a viewer configuration.
    pub fn from_config(config: &'a ViewerConfig) -> Self {
        Self::new(&config.categories, &config.relations, &config.default_color)
    }

    /// Adds one triple to `store`.
    ///
    /// The store must not be sealed yet; [`GraphBuilder`](crate::GraphBuilder)
    /// is the only caller in normal operation.
    pub fn normalize(&self, triple: &RawTriple, store: &mut GraphStore) -> Result<()> {
        for entity in [&triple.source, &triple.target] {
            if !store.contains_node(&entity.element_id) {
                store.insert_node(self.node_for(entity));
            }
        }
        store.push_edge(self.edge_for(triple))
    }

    /// Builds the canonical node for an entity.
    pub fn node_for(&self, entity: &RawEntity) -> Node {
        let resolved = self
            .categories
            .resolve(entity.category(), self.default_color);

        let value = entity
            .attribute_text("value")
            .or_else(|| entity.display_value.clone().filter(|v| !v.is_empty()));

        let label = entity
            .attribute_text("name")
            .or_else(|| entity.attribute_text("value"))
            .unwrap_or_else(|| entity.element_id.clone());

        Node {
            id: entity.element_id.clone(),
            label,
            category: resolved.display_label.clone(),
            color: resolved.color,
            detail: NodeDetail {
                id: entity.element_id.clone(),
                category: resolved.display_label,
                value,
                attributes: entity.attributes.clone(),
            },
        }
    }

    /// Builds the canonical edge for a triple.
    pub fn edge_for(&self, triple: &RawTriple) -> Edge {
        let RawRelation {
            element_id,
            relation_type,
            attributes,
        } = &triple.relation;

        Edge {
            from: triple.source.element_id.clone(),
            to: triple.target.element_id.clone(),
            relation_label: self.relations.resolve(relation_type),
            detail: EdgeDetail {
                id: element_id.clone(),
                relation_type: relation_type.clone(),
                attributes: attributes.clone(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
