use std::cmp::Ordering;
use std::collections::HashMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::Course;

/// Tree node in the arena-based search tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Course stored at this node
    pub course: Course,
    /// Index of the left child (strictly smaller identifiers)
    pub left: Option<Index>,
    /// Index of the right child (equal or greater identifiers)
    pub right: Option<Index>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Ordered course index: an unbalanced binary search tree keyed by identifier.
///
/// Nodes live in a generational arena; every node index is referenced from
/// exactly one slot (the root or a parent's `left`/`right`). Identifiers are
/// compared byte-wise as given, normalization is the caller's job.
///
/// Smaller identifiers go left, everything else (including equal ones) goes
/// right, so duplicates are kept and listed in insertion order while `find`
/// resolves to the first one inserted.
#[derive(Debug)]
pub struct CourseIndex {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for an empty index
    root: Option<Index>,
}

impl Default for CourseIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseIndex {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Number of stored courses (one per `insert` call).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Insert a course below the first free slot on its search path.
    ///
    /// Never rejects: a duplicate identifier ends up in the right subtree of
    /// the existing equal node.
    #[instrument(level = "trace", skip(self, course), fields(identifier = %course.identifier))]
    pub fn insert(&mut self, course: Course) -> Index {
        let mut parent: Option<(Index, Side)> = None;
        let mut current = self.root;

        while let Some(idx) = current {
            let Some(node) = self.arena.get(idx) else {
                break;
            };
            if course.identifier < node.course.identifier {
                parent = Some((idx, Side::Left));
                current = node.left;
            } else {
                parent = Some((idx, Side::Right));
                current = node.right;
            }
        }

        let node_idx = self.arena.insert(TreeNode {
            course,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(node_idx),
            Some((parent_idx, side)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    match side {
                        Side::Left => parent.left = Some(node_idx),
                        Side::Right => parent.right = Some(node_idx),
                    }
                }
            }
        }

        node_idx
    }

    /// Look up a course by (already normalized) identifier.
    ///
    /// Stops at the first equal node on the search path.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, identifier: &str) -> Option<&Course> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = self.arena.get(idx)?;
            match identifier.cmp(node.course.identifier.as_str()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    /// In-order traversal: courses in non-decreasing identifier order.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, level)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(level);
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, level + 1));
                }
            }
        }
        max_depth
    }

    /// Render the tree shape; children are labelled `L:` or `R:`.
    ///
    /// Built bottom-up from a post-order walk so degenerate trees don't recurse.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree_string(&self) -> Tree<String> {
        let Some(root) = self.root else {
            return Tree::new("Empty index".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack: Vec<(Index, Option<Side>, bool)> = vec![(root, None, false)];

        while let Some((idx, side, visited)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            if !visited {
                stack.push((idx, side, true));
                if let Some(right) = node.right {
                    stack.push((right, Some(Side::Right), false));
                }
                if let Some(left) = node.left {
                    stack.push((left, Some(Side::Left), false));
                }
                continue;
            }

            let label = match side {
                None => node.course.to_string(),
                Some(Side::Left) => format!("L: {}", node.course),
                Some(Side::Right) => format!("R: {}", node.course),
            };
            let leaves: Vec<Tree<String>> = [node.left, node.right]
                .into_iter()
                .flatten()
                .filter_map(|child| built.remove(&child))
                .collect();
            built.insert(idx, Tree::new(label).with_leaves(leaves));
        }

        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new("Empty index".to_string()))
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order iterator over a `CourseIndex` using an explicit stack.
pub struct InOrderIter<'a> {
    index: &'a CourseIndex,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(index: &'a CourseIndex) -> Self {
        Self {
            index,
            stack: Vec::new(),
            current: index.root(),
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        // Walk down the left spine of the pending subtree
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.index.get_node(idx).and_then(|node| node.left);
        }

        let idx = self.stack.pop()?;
        let node = self.index.get_node(idx)?;
        self.current = node.right;
        Some(&node.course)
    }
}
