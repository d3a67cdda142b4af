//! Arena-backed in-memory document used by tests and the replay tool.
//!
//! # Design
//! - Nodes live in a flat `Vec` and refer to each other by [`NodeId`].
//! - `id` and `class` are stored as plain attributes, mirroring the DOM, so a
//!   class change is visible to every selector that reads `class`.
//! - Lookups walk the tree on demand; ids assigned after construction are
//!   found without reindexing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::MenuDom;
use crate::error::{SelectorError, SnapshotError};
use crate::selector::{self, AttributeCondition, Combinator, CompoundSelector, SelectorPart};

const ID_ATTRIBUTE: &str = "id";
const CLASS_ATTRIBUTE: &str = "class";

/// Handle to a node inside a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Description of an element to append to a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl ElementSpec {
    /// Start describing an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    /// Set the element id.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr(ID_ATTRIBUTE, id)
    }

    /// Add a class to the element.
    #[must_use]
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let entry = self
            .attributes
            .entry(CLASS_ATTRIBUTE.to_string())
            .or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class.as_ref());
        self
    }

    /// Set an arbitrary attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }
}

/// Mutable element tree rooted at a document node.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty document containing only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
        }
    }

    /// The document node. It is not an element and never matches selectors.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Element(Element {
                tag: spec.tag,
                attributes: spec.attributes,
            }),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Tag name of an element, or `None` for the document node.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag.as_str())
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    /// Read an attribute without allocating.
    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    /// Class names on an element, in attribute order.
    #[must_use]
    pub fn class_names(&self, node: NodeId) -> Vec<&str> {
        self.attr(node, CLASS_ATTRIBUTE)
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Replace (or set) the `id` attribute of an element.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.write_attribute(node, ID_ATTRIBUTE, id);
    }

    /// First element in document order matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when the selector falls outside the
    /// supported subset.
    pub fn try_query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.try_query_selector_all(None, selector)?.into_iter().next())
    }

    /// Every element matching `selector`, restricted to descendants of
    /// `scope` when given.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when the selector falls outside the
    /// supported subset.
    pub fn try_query_selector_all(
        &self,
        scope: Option<NodeId>,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let list = selector::parse(selector)?;
        let mut candidates = Vec::new();
        self.collect_descendants(scope.unwrap_or_else(|| self.root()), &mut candidates);
        Ok(candidates
            .into_iter()
            .filter(|node| {
                list.groups
                    .iter()
                    .any(|group| self.matches_parts(*node, &group.parts))
            })
            .collect())
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when the selector falls outside the
    /// supported subset.
    pub fn try_closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = selector::parse(selector)?;
        let mut cursor = Some(node).filter(|n| self.element(*n).is_some());
        while let Some(current) = cursor {
            if list
                .groups
                .iter()
                .any(|group| self.matches_parts(current, &group.parts))
            {
                return Ok(Some(current));
            }
            cursor = self.parent_element(current);
        }
        Ok(None)
    }

    /// Build a document from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::EmptyTag`] when any node lacks a tag name.
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Result<Self, SnapshotError> {
        let mut document = Self::new();
        let root = document.root();
        for (index, child) in snapshot.children.iter().enumerate() {
            document.import(root, child, &index.to_string())?;
        }
        Ok(document)
    }

    /// Decode a JSON snapshot into a document.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or describes an invalid tree.
    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        let snapshot: DocumentSnapshot =
            serde_json::from_str(input).map_err(|source| SnapshotError::Decode { source })?;
        Self::from_snapshot(&snapshot)
    }

    /// Capture the current tree as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            children: self
                .children(self.root())
                .iter()
                .filter_map(|child| self.export(*child))
                .collect(),
        }
    }

    /// Render the current tree as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|source| SnapshotError::Encode { source })
    }

    fn import(&mut self, parent: NodeId, node: &NodeSnapshot, path: &str) -> Result<(), SnapshotError> {
        if node.tag.trim().is_empty() {
            return Err(SnapshotError::EmptyTag {
                path: path.to_string(),
            });
        }
        let mut spec = ElementSpec::new(node.tag.trim());
        for (name, value) in &node.attributes {
            spec = spec.attr(name.clone(), value.clone());
        }
        if let Some(id) = &node.id {
            spec = spec.id(id.clone());
        }
        for class in &node.classes {
            spec = spec.class(class);
        }
        let id = self.append(parent, spec);
        for (index, child) in node.children.iter().enumerate() {
            self.import(id, child, &format!("{path}/{index}"))?;
        }
        Ok(())
    }

    fn export(&self, node: NodeId) -> Option<NodeSnapshot> {
        let element = self.element(node)?;
        let mut attributes = element.attributes.clone();
        let id = attributes.remove(ID_ATTRIBUTE);
        let classes = attributes
            .remove(CLASS_ATTRIBUTE)
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Some(NodeSnapshot {
            tag: element.tag.clone(),
            id,
            classes,
            attributes,
            children: self
                .children(node)
                .iter()
                .filter_map(|child| self.export(*child))
                .collect(),
        })
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Document => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Document => None,
        }
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|parent| self.element(*parent).is_some())
    }

    fn write_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if self.element(*child).is_some() {
                out.push(*child);
            }
            self.collect_descendants(*child, out);
        }
    }

    fn matches_parts(&self, node: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return true;
        };
        if !self.matches_compound(node, &last.compound) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        match last.combinator {
            Some(Combinator::Child) => self
                .parent_element(node)
                .is_some_and(|parent| self.matches_parts(parent, rest)),
            Some(Combinator::Descendant) | None => {
                let mut cursor = self.parent_element(node);
                while let Some(ancestor) = cursor {
                    if self.matches_parts(ancestor, rest) {
                        return true;
                    }
                    cursor = self.parent_element(ancestor);
                }
                false
            }
        }
    }

    fn matches_compound(&self, node: NodeId, compound: &CompoundSelector) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        if compound.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
            return false;
        }
        if compound
            .id
            .as_ref()
            .is_some_and(|id| element.attributes.get(ID_ATTRIBUTE) != Some(id))
        {
            return false;
        }
        let classes = self.class_names(node);
        if !compound
            .classes
            .iter()
            .all(|class| classes.contains(&class.as_str()))
        {
            return false;
        }
        compound.attributes.iter().all(|condition| match condition {
            AttributeCondition::Exists { name } => element.attributes.contains_key(name),
            AttributeCondition::Equals { name, value } => element.attributes.get(name) == Some(value),
        })
    }
}

impl MenuDom for MemoryDocument {
    type Element = NodeId;

    fn body(&self) -> Option<NodeId> {
        let mut elements = Vec::new();
        self.collect_descendants(self.root(), &mut elements);
        elements.into_iter().find(|node| self.tag(*node) == Some("body"))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let mut elements = Vec::new();
        self.collect_descendants(self.root(), &mut elements);
        elements
            .into_iter()
            .find(|node| self.attr(*node, ID_ATTRIBUTE) == Some(id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.try_query_selector(selector).unwrap_or_else(|err| {
            tracing::debug!(selector, error = %err, "selector rejected");
            None
        })
    }

    fn query_selector_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        self.try_query_selector_all(scope.copied(), selector)
            .unwrap_or_else(|err| {
                tracing::debug!(selector, error = %err, "selector rejected");
                Vec::new()
            })
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        self.try_closest(*element, selector).unwrap_or_else(|err| {
            tracing::debug!(selector, error = %err, "selector rejected");
            None
        })
    }

    fn next_element_sibling(&self, element: &NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(*element)?);
        let position = siblings.iter().position(|node| node == element)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|node| self.element(*node).is_some())
    }

    fn contains(&self, ancestor: &NodeId, element: &NodeId) -> bool {
        let mut cursor = Some(*element);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.attr(*element, name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        self.write_attribute(*element, name, value);
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.class_names(*element).contains(&class)
    }

    fn set_class(&mut self, element: &NodeId, class: &str, present: bool) {
        let mut classes: Vec<String> = self
            .class_names(*element)
            .into_iter()
            .map(str::to_string)
            .collect();
        let had = classes.iter().any(|existing| existing == class);
        if had == present {
            return;
        }
        if present {
            classes.push(class.to_string());
        } else {
            classes.retain(|existing| existing != class);
        }
        self.write_attribute(*element, CLASS_ATTRIBUTE, &classes.join(" "));
    }
}

/// Serialisable form of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Top-level elements, usually a single `html` or `body` element.
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}

/// Serialisable form of one element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Tag name.
    pub tag: String,
    /// Optional element id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Class names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Remaining attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Child elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}
