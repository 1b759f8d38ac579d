use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::common::{AccountId, CommentId};
use crate::domains::posts::models::CommentWithDepth;

/// One node of a materialized comment thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: CommentId,
    pub author_id: AccountId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Materialize a flat depth-ordered row set into a tree.
    ///
    /// Rows arrive ordered by depth, so every parent is placed before its
    /// children; replies whose parent fell outside the depth bound are
    /// dropped with their subtree.
    pub fn build_tree(rows: Vec<CommentWithDepth>) -> Vec<CommentNode> {
        let mut roots: Vec<CommentNode> = Vec::new();
        // parent id -> path of indexes from the root set to that node
        let mut paths: HashMap<CommentId, Vec<usize>> = HashMap::new();

        for row in rows {
            let node = CommentNode {
                id: row.id,
                author_id: row.author_id,
                content: row.content,
                created_at: row.created_at,
                replies: Vec::new(),
            };

            match row.parent_id {
                None => {
                    paths.insert(node.id, vec![roots.len()]);
                    roots.push(node);
                }
                Some(parent_id) => {
                    let Some(parent_path) = paths.get(&parent_id) else {
                        continue;
                    };
                    let mut siblings = &mut roots;
                    for &idx in &parent_path[..parent_path.len() - 1] {
                        siblings = &mut siblings[idx].replies;
                    }
                    let parent = &mut siblings[*parent_path.last().expect("non-empty path")];

                    let mut path = parent_path.clone();
                    path.push(parent.replies.len());
                    paths.insert(node.id, path);
                    parent.replies.push(node);
                }
            }
        }

        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Id;

    fn row(id: i64, parent: Option<i64>, depth: i32) -> CommentWithDepth {
        CommentWithDepth {
            id: Id::from_i64(id),
            post_id: Id::from_i64(1),
            parent_id: parent.map(Id::from_i64),
            author_id: Id::from_i64(7),
            content: format!("comment {}", id),
            created_at: Utc::now(),
            depth,
        }
    }

    #[test]
    fn test_build_tree_nests_replies() {
        let rows = vec![
            row(1, None, 1),
            row(2, None, 1),
            row(3, Some(1), 2),
            row(4, Some(3), 3),
        ];
        let tree = CommentNode::build_tree(rows);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].replies[0].id, Id::from_i64(4));
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn test_build_tree_drops_orphans() {
        // parent 99 never materialized (outside depth bound)
        let rows = vec![row(1, None, 1), row(2, Some(99), 2)];
        let tree = CommentNode::build_tree(rows);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn test_build_tree_empty() {
        assert!(CommentNode::build_tree(vec![]).is_empty());
    }
}
