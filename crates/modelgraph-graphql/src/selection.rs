//! Requested sub-field introspection.
//!
//! [`Selection`] is the tree of fields a request asked for under a
//! connection field. The connection field inspects it to discover which
//! related models were selected, so each can be joined up front instead of
//! triggering one query per row.

use modelgraph_orm::fields::FieldKind;
use modelgraph_orm::model::{ModelDescriptor, ModelRef, ModelRegistry};

/// A requested field and its nested selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The field name as requested.
    pub name: String,
    /// Nested selections beneath this field.
    pub children: Vec<Selection>,
}

impl Selection {
    /// Creates a leaf selection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Creates a selection with nested children.
    pub fn with_children(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Returns the direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the node-level selection of a connection selection.
    ///
    /// Connection requests select `edges { node { ... } }`; this digs down
    /// to the node fields. A selection without that wrapping is returned
    /// unchanged.
    pub fn node_selection(&self) -> &Self {
        self.child("edges")
            .and_then(|edges| edges.child("node"))
            .unwrap_or(self)
    }
}

/// Determines the related models implied by the requested sub-field tree.
///
/// Each selected field that is a forward foreign key on `model` names a
/// related model to join. Duplicates are removed; unknown names and
/// non-relation fields are ignored.
pub fn requested_models(
    selection: &Selection,
    model: &ModelDescriptor,
    models: &ModelRegistry,
) -> Vec<ModelRef> {
    let node = selection.node_selection();
    let mut related = Vec::new();
    for child in &node.children {
        let Some(field) = model.field_named(&child.name) else {
            continue;
        };
        let FieldKind::ForeignKey { to, .. } = &field.kind else {
            continue;
        };
        if let Some(target) = models.get(to) {
            if !related.iter().any(|m: &ModelRef| m.name == target.name) {
                related.push(target);
            }
        }
    }
    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgraph_orm::fields::FieldDef;

    fn registry() -> ModelRegistry {
        let mut models = ModelRegistry::new();
        models.register(
            ModelDescriptor::new("material")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char)),
        );
        models.register(
            ModelDescriptor::new("weapon")
                .field(FieldDef::new("id", FieldKind::PrimaryKey))
                .field(FieldDef::new("name", FieldKind::Char))
                .field(FieldDef::foreign_key("material", "material", Some("weapons"))),
        );
        models
    }

    #[test]
    fn test_node_selection_digs_through_edges() {
        let sel = Selection::with_children(
            "weapons",
            vec![Selection::with_children(
                "edges",
                vec![Selection::with_children(
                    "node",
                    vec![Selection::new("name")],
                )],
            )],
        );
        assert_eq!(sel.node_selection().children, vec![Selection::new("name")]);
    }

    #[test]
    fn test_node_selection_passthrough() {
        let sel = Selection::with_children("weapons", vec![Selection::new("name")]);
        assert_eq!(sel.node_selection(), &sel);
    }

    #[test]
    fn test_requested_models_finds_foreign_keys() {
        let models = registry();
        let weapon = models.get("weapon").unwrap();
        let sel = Selection::with_children(
            "weapons",
            vec![Selection::with_children(
                "edges",
                vec![Selection::with_children(
                    "node",
                    vec![
                        Selection::new("name"),
                        Selection::with_children("material", vec![Selection::new("name")]),
                    ],
                )],
            )],
        );
        let related = requested_models(&sel, &weapon, &models);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "material");
    }

    #[test]
    fn test_requested_models_ignores_scalars_and_unknowns() {
        let models = registry();
        let weapon = models.get("weapon").unwrap();
        let sel = Selection::with_children(
            "weapons",
            vec![Selection::new("name"), Selection::new("nonexistent")],
        );
        assert!(requested_models(&sel, &weapon, &models).is_empty());
    }
}
