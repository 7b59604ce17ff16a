//! Declarative parameter tree with construction-time validation.
//!
//! A tree is declared as nested [`GroupSpec`]s and built exactly once per
//! engine instance. After [`ParameterTree::build`] succeeds the tree is
//! immutable, which is what lets the render thread read descriptors without
//! any synchronization.
//!
//! # Example
//!
//! ```
//! use clinch_core::{GroupSpec, ParameterSpec, ParameterTree, ParameterUnit, ValueRange};
//!
//! let root = GroupSpec::new("global", "Global")
//!     .parameter(ParameterSpec::new(
//!         0,
//!         "drive",
//!         "Drive",
//!         ParameterUnit::Generic,
//!         ValueRange::new(0.0, 10.0),
//!         5.0,
//!     ))
//!     .parameter(ParameterSpec::toggle(1, "bypass", "Bypass", false));
//!
//! let tree = ParameterTree::build(root).unwrap();
//! assert_eq!(tree.resolve(0).unwrap().identifier, "drive");
//! assert_eq!(tree.resolve_id("bypass").unwrap().address, 1);
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::param::{ParameterAddress, ParameterSpec};

/// One entry in a group: a parameter leaf or a nested group.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Parameter(ParameterSpec),
    Group(GroupSpec),
}

/// A named, ordered collection of parameters and nested groups.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub identifier: &'static str,
    pub name: &'static str,
    pub children: Vec<TreeNode>,
}

impl GroupSpec {
    pub fn new(identifier: &'static str, name: &'static str) -> Self {
        Self {
            identifier,
            name,
            children: Vec::new(),
        }
    }

    /// Append a parameter leaf.
    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.children.push(TreeNode::Parameter(spec));
        self
    }

    /// Append a nested group.
    pub fn group(mut self, group: GroupSpec) -> Self {
        self.children.push(TreeNode::Group(group));
        self
    }
}

/// Validated parameter hierarchy plus address/identifier indexes.
///
/// Owned by the engine; shared read-only with every other component via
/// `Arc`. Never mutated after construction.
#[derive(Debug)]
pub struct ParameterTree {
    root: GroupSpec,
    params: Vec<ParameterSpec>,
    by_address: HashMap<ParameterAddress, usize>,
    by_identifier: HashMap<&'static str, usize>,
}

impl ParameterTree {
    /// Validate the declaration and build the lookup indexes.
    ///
    /// Fails on a duplicate address, duplicate identifier, duplicate sibling
    /// identifier within a group, an inverted or non-finite range, a default
    /// outside its range, or a tree with no parameters. A failure here is
    /// fatal at startup.
    pub fn build(root: GroupSpec) -> Result<Self> {
        let mut params = Vec::new();
        Self::collect(&root, &mut params)?;

        if params.is_empty() {
            return Err(Error::EmptyTree);
        }

        let mut by_address = HashMap::with_capacity(params.len());
        let mut by_identifier = HashMap::with_capacity(params.len());

        for (index, spec) in params.iter().enumerate() {
            if !spec.range.is_valid() {
                return Err(Error::InvalidRange {
                    identifier: spec.identifier.to_string(),
                    min: spec.range.min,
                    max: spec.range.max,
                });
            }
            if !spec.range.contains(spec.default) {
                return Err(Error::DefaultOutOfRange {
                    identifier: spec.identifier.to_string(),
                    default: spec.default,
                    min: spec.range.min,
                    max: spec.range.max,
                });
            }
            if by_address.insert(spec.address, index).is_some() {
                return Err(Error::DuplicateAddress {
                    address: spec.address,
                    identifier: spec.identifier.to_string(),
                });
            }
            if by_identifier.insert(spec.identifier, index).is_some() {
                return Err(Error::DuplicateIdentifier {
                    identifier: spec.identifier.to_string(),
                });
            }
        }

        Ok(Self {
            root,
            params,
            by_address,
            by_identifier,
        })
    }

    /// Flatten in declaration order, checking sibling identifier uniqueness
    /// (parameters and subgroups share one namespace within a group).
    fn collect(group: &GroupSpec, params: &mut Vec<ParameterSpec>) -> Result<()> {
        let mut siblings: HashSet<&'static str> = HashSet::new();
        for node in &group.children {
            let identifier = match node {
                TreeNode::Parameter(spec) => spec.identifier,
                TreeNode::Group(child) => child.identifier,
            };
            if !siblings.insert(identifier) {
                return Err(Error::DuplicateChild {
                    group: group.identifier.to_string(),
                    identifier: identifier.to_string(),
                });
            }
            match node {
                TreeNode::Parameter(spec) => params.push(*spec),
                TreeNode::Group(child) => Self::collect(child, params)?,
            }
        }
        Ok(())
    }

    /// Look up a descriptor by host automation address.
    pub fn resolve(&self, address: ParameterAddress) -> Option<&ParameterSpec> {
        self.by_address.get(&address).map(|&i| &self.params[i])
    }

    /// Look up a descriptor by string identifier.
    pub fn resolve_id(&self, identifier: &str) -> Option<&ParameterSpec> {
        self.by_identifier.get(identifier).map(|&i| &self.params[i])
    }

    /// Dense slot index for an address. Slot indexes are the render path's
    /// resolve-once handle into the store.
    pub fn index_of(&self, address: ParameterAddress) -> Option<usize> {
        self.by_address.get(&address).copied()
    }

    /// Descriptor at a dense slot index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`; indexes only come from this tree.
    pub fn spec(&self, index: usize) -> &ParameterSpec {
        &self.params[index]
    }

    /// All descriptors in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter()
    }

    /// Root group declaration.
    pub fn root(&self) -> &GroupSpec {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
