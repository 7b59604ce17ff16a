//! Observable parameter groups mirroring the tree shape.
//!
//! Built once per publication from a validated [`ParameterTree`]; the shape
//! is read-only afterwards. Because the tree was validated at engine
//! construction, asking a group for an identifier it does not contain is a
//! programming error, and the navigation accessors panic rather than return
//! a recoverable error. [`ObservableGroup::get`] exists for the rare caller
//! that genuinely probes.

use std::collections::HashMap;
use std::sync::Arc;

use clinch_core::{GroupSpec, ParameterTree, RenderParameterStore, TreeNode};

use crate::observable::ObservableParameter;

/// A child of an [`ObservableGroup`].
pub enum GroupChild {
    Parameter(Arc<ObservableParameter>),
    Group(Arc<ObservableGroup>),
}

/// Navigable, named collection of parameter proxies and nested groups.
pub struct ObservableGroup {
    identifier: &'static str,
    name: &'static str,
    children: Vec<GroupChild>,
    by_identifier: HashMap<&'static str, usize>,
}

impl ObservableGroup {
    /// Mirror `spec` with proxy leaves, appending every created proxy to
    /// `flat` in declaration order.
    pub(crate) fn build(
        spec: &GroupSpec,
        tree: &Arc<ParameterTree>,
        store: &Arc<RenderParameterStore>,
        flat: &mut Vec<Arc<ObservableParameter>>,
    ) -> Arc<Self> {
        let mut children = Vec::with_capacity(spec.children.len());
        let mut by_identifier = HashMap::with_capacity(spec.children.len());

        for node in &spec.children {
            let (identifier, child) = match node {
                TreeNode::Parameter(param) => {
                    let index = tree
                        .index_of(param.address)
                        .expect("validated tree resolves its own addresses");
                    let proxy = Arc::new(ObservableParameter::new(
                        Arc::clone(tree),
                        Arc::clone(store),
                        index,
                    ));
                    flat.push(Arc::clone(&proxy));
                    (param.identifier, GroupChild::Parameter(proxy))
                }
                TreeNode::Group(group) => (
                    group.identifier,
                    GroupChild::Group(Self::build(group, tree, store, flat)),
                ),
            };
            by_identifier.insert(identifier, children.len());
            children.push(child);
        }

        Arc::new(Self {
            identifier: spec.identifier,
            name: spec.name,
            children,
            by_identifier,
        })
    }

    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Child by identifier, if present.
    pub fn get(&self, identifier: &str) -> Option<&GroupChild> {
        self.by_identifier
            .get(identifier)
            .map(|&index| &self.children[index])
    }

    /// Child by identifier.
    ///
    /// # Panics
    ///
    /// Panics on an unknown identifier; the group shape is fixed at
    /// construction from a validated tree.
    pub fn child(&self, identifier: &str) -> &GroupChild {
        match self.get(identifier) {
            Some(child) => child,
            None => panic!(
                "group \"{}\" has no child named \"{identifier}\"",
                self.identifier
            ),
        }
    }

    /// Parameter proxy by identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is unknown or names a nested group.
    pub fn parameter(&self, identifier: &str) -> &Arc<ObservableParameter> {
        match self.child(identifier) {
            GroupChild::Parameter(param) => param,
            GroupChild::Group(_) => panic!(
                "\"{identifier}\" in group \"{}\" is a group, not a parameter",
                self.identifier
            ),
        }
    }

    /// Nested group by identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is unknown or names a parameter.
    pub fn group(&self, identifier: &str) -> &Arc<ObservableGroup> {
        match self.child(identifier) {
            GroupChild::Group(group) => group,
            GroupChild::Parameter(_) => panic!(
                "\"{identifier}\" in group \"{}\" is a parameter, not a group",
                self.identifier
            ),
        }
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[GroupChild] {
        &self.children
    }

    /// All parameter proxies under this group, depth-first in declaration
    /// order.
    pub fn parameters(&self) -> Vec<Arc<ObservableParameter>> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);
        out
    }

    fn collect_parameters(&self, out: &mut Vec<Arc<ObservableParameter>>) {
        for child in &self.children {
            match child {
                GroupChild::Parameter(param) => out.push(Arc::clone(param)),
                GroupChild::Group(group) => group.collect_parameters(out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinch_core::{ParameterSpec, ParameterUnit, ValueRange};

    fn test_group() -> (Arc<ObservableGroup>, Vec<Arc<ObservableParameter>>) {
        let tree = Arc::new(
            ParameterTree::build(
                GroupSpec::new("global", "Global")
                    .parameter(ParameterSpec::new(
                        0,
                        "compress",
                        "Compress",
                        ParameterUnit::Generic,
                        ValueRange::new(0.0, 10.0),
                        5.0,
                    ))
                    .group(
                        GroupSpec::new("output", "Output").parameter(ParameterSpec::new(
                            3,
                            "output_gain",
                            "Output",
                            ParameterUnit::Decibels,
                            ValueRange::new(-24.0, 24.0),
                            0.0,
                        )),
                    ),
            )
            .unwrap(),
        );
        let store = Arc::new(RenderParameterStore::new(&tree));
        let mut flat = Vec::new();
        let root = ObservableGroup::build(tree.root(), &tree, &store, &mut flat);
        (root, flat)
    }

    #[test]
    fn test_mirrors_tree_shape() {
        let (root, flat) = test_group();
        assert_eq!(root.identifier(), "global");
        assert_eq!(root.children().len(), 2);
        assert_eq!(flat.len(), 2);

        assert_eq!(root.parameter("compress").spec().address, 0);
        assert_eq!(
            root.group("output").parameter("output_gain").spec().address,
            3
        );
    }

    #[test]
    fn test_depth_first_parameters() {
        let (root, _) = test_group();
        let ids: Vec<_> = root
            .parameters()
            .iter()
            .map(|p| p.spec().identifier)
            .collect();
        assert_eq!(ids, ["compress", "output_gain"]);
    }

    #[test]
    fn test_get_probing() {
        let (root, _) = test_group();
        assert!(root.get("compress").is_some());
        assert!(root.get("nope").is_none());
    }

    #[test]
    #[should_panic(expected = "no child named \"tone\"")]
    fn test_unknown_child_panics() {
        let (root, _) = test_group();
        root.child("tone");
    }

    #[test]
    #[should_panic(expected = "is a group, not a parameter")]
    fn test_group_as_parameter_panics() {
        let (root, _) = test_group();
        root.parameter("output");
    }
}
