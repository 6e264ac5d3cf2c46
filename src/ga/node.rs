use crate::error::{TreeError, ValidationError};
use serde::{Deserialize, Serialize};

/// Name given to the root of every Ga tree
///
/// The root is never compared against its own name; uniqueness only
/// applies among siblings.
pub const ROOT_NAME: &str = "Root_Ga";

/// A named goal ("Ga") with ordered sub-goals
///
/// Each node exclusively owns its children and holds no reference to its
/// parent. Because insertion only ever creates fresh nodes, a node can never
/// end up as its own descendant.
///
/// Serialized as `{"name": ..., "subGa": [...]}`, the shape stored in the
/// remote bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(rename = "subGa", default)]
    pub children: Vec<Node>,
}

/// Build a node with a trimmed name and the given children
///
/// # Arguments
/// * `name` - Node name; surrounding whitespace is removed
/// * `children` - Optional initial children (empty when `None`)
///
/// # Returns
/// The new node, or [`ValidationError::InvalidName`] when the trimmed name is empty
pub fn build_node(name: &str, children: Option<Vec<Node>>) -> Result<Node, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidName);
    }

    Ok(Node {
        name: trimmed.to_string(),
        children: children.unwrap_or_default(),
    })
}

/// Remove exactly one node from `siblings`
///
/// On error `siblings` is left untouched.
pub fn remove_at(siblings: &mut Vec<Node>, index: usize) -> Result<Node, TreeError> {
    if index >= siblings.len() {
        return Err(TreeError::IndexOutOfRange {
            index,
            len: siblings.len(),
        });
    }
    Ok(siblings.remove(index))
}

impl Node {
    /// Create the sentinel root of an empty tree
    pub fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            children: Vec::new(),
        }
    }

    /// Position of the first child whose name matches exactly (case-sensitive)
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name == name)
    }

    /// Names of the direct children, in order
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Insert a fresh child named `name`
    ///
    /// `index` positions the new node before the child currently at that
    /// position. A missing or out-of-range index appends at the end.
    /// All checks run before anything is mutated.
    ///
    /// # Returns
    /// The position the new child landed at
    pub fn insert_child(&mut self, name: &str, index: Option<usize>) -> Result<usize, TreeError> {
        let node = build_node(name, None)?;

        if self.position_of(&node.name).is_some() {
            return Err(TreeError::DuplicateName(node.name));
        }

        match index {
            Some(i) if i < self.children.len() => {
                self.children.insert(i, node);
                Ok(i)
            }
            _ => {
                self.children.push(node);
                Ok(self.children.len() - 1)
            }
        }
    }

    /// Remove the child at `index`
    pub fn remove_child_at(&mut self, index: usize) -> Result<Node, TreeError> {
        remove_at(&mut self.children, index)
    }

    /// Remove the first child named exactly `name`
    ///
    /// A failure of the underlying index removal is wrapped with both names.
    pub fn remove_child_named(&mut self, name: &str) -> Result<Node, TreeError> {
        if name.trim().is_empty() {
            return Err(TreeError::InvalidName);
        }

        let Some(index) = self.position_of(name) else {
            return Err(TreeError::NotFound {
                name: name.to_string(),
                parent: self.name.clone(),
            });
        };

        self.remove_child_at(index)
            .map_err(|err| TreeError::RemoveFailed {
                name: name.to_string(),
                parent: self.name.clone(),
                source: Box::new(err),
            })
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_node_trims_name() {
        let node = build_node("  Health  ", None).unwrap();
        assert_eq!(node.name, "Health");
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_build_node_rejects_blank_names() {
        assert_eq!(build_node("", None), Err(ValidationError::InvalidName));
        assert_eq!(build_node(" \t\n", None), Err(ValidationError::InvalidName));
    }

    #[test]
    fn test_build_node_keeps_children() {
        let child = build_node("Run", None).unwrap();
        let node = build_node("Health", Some(vec![child.clone()])).unwrap();
        assert_eq!(node.children, vec![child]);
    }

    #[test]
    fn test_insert_child_trimmed_duplicate_is_rejected() {
        let mut root = Node::root();
        root.insert_child("Sprint1", None).unwrap();
        let err = root.insert_child("  Sprint1 ", None).unwrap_err();
        assert_eq!(err, TreeError::DuplicateName("Sprint1".to_string()));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut root = Node::root();
        root.insert_child("sprint", None).unwrap();
        root.insert_child("Sprint", None).unwrap();
        assert_eq!(root.child_names(), vec!["sprint", "Sprint"]);
    }

    #[test]
    fn test_remove_at_out_of_range_keeps_siblings() {
        let mut siblings = vec![build_node("A", None).unwrap()];
        let err = remove_at(&mut siblings, 1).unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn test_count_includes_descendants() {
        let mut root = Node::root();
        root.insert_child("A", None).unwrap();
        root.children[0].insert_child("A1", None).unwrap();
        root.insert_child("B", None).unwrap();
        assert_eq!(root.count(), 4);
    }

    #[test]
    fn test_serializes_with_sub_ga_key() {
        let mut root = Node::root();
        root.insert_child("A", None).unwrap();
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Root_Ga", "subGa": [{"name": "A", "subGa": []}]})
        );
    }

    #[test]
    fn test_deserializes_missing_sub_ga_as_empty() {
        let node: Node = serde_json::from_str(r#"{"name": "Leaf"}"#).unwrap();
        assert_eq!(node.name, "Leaf");
        assert!(node.children.is_empty());
    }
}
