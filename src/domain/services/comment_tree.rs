//! Comment tree assembly.
//!
//! Turns the flat rows of the thread-detail join into nested comments.
//! A row with a `comment_id` and no `parent_comment_id` is a top-level
//! comment; every other row hangs under the row whose `comment_id` matches
//! its `parent_comment_id`, to any depth.
//!
//! The store's foreign key on `parent_comment_id` keeps these chains acyclic.
//! Recursion is still guarded: a row whose id already appears on its own
//! ancestor path is skipped, so duplicated ids or a hand-built cycle end the
//! walk instead of looping.

use std::collections::HashMap;

use crate::domain::entities::{CommentNode, NodeKind, ThreadDetailRow};

/// Build the nested comment list for one thread.
///
/// Top-level comments and every reply list keep the order of `rows`.
/// Rows not reachable from a top-level comment (orphans) are dropped, as is
/// the comment-less thread header row.
pub fn build_comment_tree(rows: &[ThreadDetailRow]) -> Vec<CommentNode> {
    let children = index_by_parent(rows);
    let mut ancestors = Vec::new();

    rows.iter()
        .filter(|row| row.comment_id.is_some() && row.parent_comment_id.is_none())
        .filter_map(|row| build_node(row, NodeKind::Comment, &children, &mut ancestors))
        .collect()
}

/// Content to expose for a row. Only rows explicitly flagged
/// `is_deleted = false` keep their text; an unset flag counts as deleted.
pub fn visible_content(row: &ThreadDetailRow, kind: NodeKind) -> String {
    if row.is_deleted == Some(false) {
        row.content.clone().unwrap_or_default()
    } else {
        kind.deleted_placeholder().to_string()
    }
}

fn index_by_parent(rows: &[ThreadDetailRow]) -> HashMap<&str, Vec<&ThreadDetailRow>> {
    let mut children: HashMap<&str, Vec<&ThreadDetailRow>> = HashMap::new();
    for row in rows {
        if let Some(parent) = row.parent_comment_id.as_deref() {
            children.entry(parent).or_default().push(row);
        }
    }
    children
}

fn build_node<'a>(
    row: &'a ThreadDetailRow,
    kind: NodeKind,
    children: &HashMap<&'a str, Vec<&'a ThreadDetailRow>>,
    ancestors: &mut Vec<&'a str>,
) -> Option<CommentNode> {
    let id = row.comment_id.as_deref().unwrap_or_default();
    if ancestors.contains(&id) {
        tracing::warn!(comment_id = id, "Skipping cyclic comment reference");
        return None;
    }

    ancestors.push(id);
    let replies = children
        .get(id)
        .map(|rows| {
            rows.iter()
                .filter_map(|&child| build_node(child, NodeKind::Reply, children, ancestors))
                .collect()
        })
        .unwrap_or_default();
    ancestors.pop();

    Some(CommentNode {
        id: id.to_string(),
        username: row.comment_username.clone().unwrap_or_default(),
        date: row.comment_date.clone().unwrap_or_default(),
        content: visible_content(row, kind),
        replies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DELETED_COMMENT_CONTENT, DELETED_REPLY_CONTENT};
    use pretty_assertions::assert_eq;

    fn header() -> ThreadDetailRow {
        ThreadDetailRow {
            thread_id: Some("thread-123".into()),
            title: Some("A Thread".into()),
            body: Some("Thread body".into()),
            updated_at: Some("2025-01-20T07:00:00.000Z".into()),
            username: Some("dicoding".into()),
            ..Default::default()
        }
    }

    fn row(id: &str, parent: Option<&str>) -> ThreadDetailRow {
        ThreadDetailRow {
            comment_id: Some(id.into()),
            comment_username: Some("johndoe".into()),
            comment_date: Some("2025-01-20T07:01:00.000Z".into()),
            content: Some(id.to_uppercase()),
            is_deleted: Some(false),
            parent_comment_id: parent.map(Into::into),
            ..header()
        }
    }

    fn depth(node: &CommentNode) -> usize {
        1 + node.replies.iter().map(depth).max().unwrap_or(0)
    }

    #[test]
    fn test_no_comment_rows_yields_empty_tree() {
        assert!(build_comment_tree(&[header()]).is_empty());
        assert!(build_comment_tree(&[]).is_empty());
    }

    #[test]
    fn test_comment_with_reply() {
        let rows = vec![
            header(),
            row("comment-123", None),
            row("reply-123", Some("comment-123")),
        ];

        let tree = build_comment_tree(&rows);

        assert_eq!(
            tree,
            vec![CommentNode {
                id: "comment-123".into(),
                username: "johndoe".into(),
                date: "2025-01-20T07:01:00.000Z".into(),
                content: "COMMENT-123".into(),
                replies: vec![CommentNode {
                    id: "reply-123".into(),
                    username: "johndoe".into(),
                    date: "2025-01-20T07:01:00.000Z".into(),
                    content: "REPLY-123".into(),
                    replies: vec![],
                }],
            }]
        );
    }

    #[test]
    fn test_chain_depth_matches_row_chain() {
        let mut rows = vec![row("c-0", None)];
        for i in 1..50 {
            rows.push(row(&format!("c-{}", i), Some(&format!("c-{}", i - 1))));
        }

        let tree = build_comment_tree(&rows);

        assert_eq!(tree.len(), 1);
        assert_eq!(depth(&tree[0]), 50);
    }

    #[test]
    fn test_order_follows_rows_not_ids() {
        let rows = vec![
            row("comment-b", None),
            row("comment-a", None),
            row("reply-z", Some("comment-b")),
            row("reply-y", Some("comment-b")),
        ];

        let tree = build_comment_tree(&rows);

        let top: Vec<_> = tree.iter().map(|n| n.id.as_str()).collect();
        let replies: Vec<_> = tree[0].replies.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(top, vec!["comment-b", "comment-a"]);
        assert_eq!(replies, vec!["reply-z", "reply-y"]);
    }

    #[test]
    fn test_reply_listed_before_its_parent_is_still_attached() {
        let rows = vec![row("reply-1", Some("comment-1")), row("comment-1", None)];

        let tree = build_comment_tree(&rows);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].replies[0].id, "reply-1");
    }

    #[test]
    fn test_orphan_replies_are_dropped() {
        let rows = vec![
            row("comment-1", None),
            row("reply-1", Some("comment-missing")),
            row("reply-2", Some("reply-1")),
        ];

        let tree = build_comment_tree(&rows);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn test_redaction_policy() {
        let mut deleted = row("comment-1", None);
        deleted.is_deleted = Some(true);
        let mut unflagged = row("comment-2", None);
        unflagged.is_deleted = None;
        let mut deleted_reply = row("reply-1", Some("comment-3"));
        deleted_reply.is_deleted = None;

        let tree = build_comment_tree(&[deleted, unflagged, row("comment-3", None), deleted_reply]);

        assert_eq!(tree[0].content, DELETED_COMMENT_CONTENT);
        assert_eq!(tree[1].content, DELETED_COMMENT_CONTENT);
        assert_eq!(tree[2].content, "COMMENT-3");
        assert_eq!(tree[2].replies[0].content, DELETED_REPLY_CONTENT);
    }

    #[test]
    fn test_deleted_node_keeps_its_replies() {
        let mut deleted = row("comment-1", None);
        deleted.is_deleted = Some(true);

        let tree = build_comment_tree(&[deleted, row("reply-1", Some("comment-1"))]);

        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].content, "REPLY-1");
    }

    #[test]
    fn test_duplicate_id_cycle_terminates() {
        // A top-level row and a reply share an id, so the reply would contain itself.
        let rows = vec![row("comment-1", None), row("comment-1", Some("comment-1"))];

        let tree = build_comment_tree(&rows);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }
}
