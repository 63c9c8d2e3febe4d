// Category model and tree helpers

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A listing category. Categories form a tree through `parent_id`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A category with its nested children
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Pre-order walk yielding `(depth, category)`, used for indented selects
    pub fn flatten(&self) -> Vec<(usize, &Category)> {
        let mut out = Vec::new();
        self.walk(0, &mut out);
        out
    }

    fn walk<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a Category)>) {
        out.push((depth, &self.category));
        for child in &self.children {
            child.walk(depth + 1, out);
        }
    }

    /// Number of categories in this subtree, including the node itself
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::count).sum::<usize>()
    }
}

/// Build a forest from a flat, parent-linked category list.
///
/// Siblings are ordered by `sort_order` then `id`. Categories whose parent is
/// missing from the list become roots, and so do categories caught in a
/// parent cycle (without their cyclic children).
pub fn build_category_tree(categories: Vec<Category>) -> Vec<CategoryNode> {
    let known: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    let mut children: HashMap<Option<i64>, Vec<Category>> = HashMap::new();

    for category in categories {
        let parent = category
            .parent_id
            .filter(|p| known.contains(p) && *p != category.id);
        children.entry(parent).or_default().push(category);
    }

    fn attach(
        parent: Option<i64>,
        children: &mut HashMap<Option<i64>, Vec<Category>>,
    ) -> Vec<CategoryNode> {
        let mut level = children.remove(&parent).unwrap_or_default();
        level.sort_by_key(|c| (c.sort_order.unwrap_or(i64::MAX), c.id));
        level
            .into_iter()
            .map(|category| {
                let id = category.id;
                CategoryNode {
                    category,
                    children: attach(Some(id), children),
                }
            })
            .collect()
    }

    let mut roots = attach(None, &mut children);

    // Anything left is unreachable from a root
    let mut unreachable: Vec<Category> = children.into_values().flatten().collect();
    unreachable.sort_by_key(|c| c.id);
    roots.extend(unreachable.into_iter().map(|category| CategoryNode {
        category,
        children: Vec::new(),
    }));
    roots
}
