//! Thread detail projection.
//!
//! A read-only view of one thread and its comment tree, assembled per request
//! from the denormalized rows of the thread-detail join query. It is never
//! persisted.
//!
//! Two construction paths exist:
//! - raw rows straight from the store, assembled by
//!   [`build_comment_tree`](crate::domain::services::build_comment_tree);
//! - an already nested JSON payload, re-validated field by field.
//!
//! Both paths fail fast on the first invalid field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::services::build_comment_tree;

/// Content shown in place of a soft-deleted top-level comment.
pub const DELETED_COMMENT_CONTENT: &str = "**komentar telah dihapus**";

/// Content shown in place of a soft-deleted reply, at any depth.
pub const DELETED_REPLY_CONTENT: &str = "**balasan telah dihapus**";

/// One row of the thread-detail join.
///
/// Thread columns are repeated on every row. Each row carries at most one
/// comment or reply; a thread without comments yields a single header row
/// whose comment columns are all `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDetailRow {
    pub thread_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub updated_at: Option<String>,
    pub username: Option<String>,
    pub comment_id: Option<String>,
    pub comment_username: Option<String>,
    pub comment_date: Option<String>,
    pub content: Option<String>,
    pub is_deleted: Option<bool>,
    pub parent_comment_id: Option<String>,
}

/// A comment or reply with its nested replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub replies: Vec<CommentNode>,
}

/// Position of a node in the tree. Anything below the top level is a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Comment,
    Reply,
}

impl NodeKind {
    /// Redaction placeholder for a soft-deleted node of this kind.
    pub fn deleted_placeholder(self) -> &'static str {
        match self {
            NodeKind::Comment => DELETED_COMMENT_CONTENT,
            NodeKind::Reply => DELETED_REPLY_CONTENT,
        }
    }

    fn invalid_id(self) -> ThreadDetailError {
        match self {
            NodeKind::Comment => ThreadDetailError::InvalidCommentId,
            NodeKind::Reply => ThreadDetailError::InvalidReplyId,
        }
    }

    fn invalid_content(self) -> ThreadDetailError {
        match self {
            NodeKind::Comment => ThreadDetailError::InvalidCommentContent,
            NodeKind::Reply => ThreadDetailError::InvalidReplyContent,
        }
    }

    fn invalid_username(self) -> ThreadDetailError {
        match self {
            NodeKind::Comment => ThreadDetailError::InvalidCommentUsername,
            NodeKind::Reply => ThreadDetailError::InvalidReplyUsername,
        }
    }

    fn invalid_date(self) -> ThreadDetailError {
        match self {
            NodeKind::Comment => ThreadDetailError::InvalidCommentDate,
            NodeKind::Reply => ThreadDetailError::InvalidReplyDate,
        }
    }
}

/// Thread detail construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ThreadDetailError {
    #[error("thread detail is missing a required property")]
    MissingField,

    #[error("thread detail property does not meet the data type specification")]
    InvalidFieldType,

    #[error("comment id must be a non-empty string")]
    InvalidCommentId,

    #[error("comment content must be a non-empty string")]
    InvalidCommentContent,

    #[error("comment username must be a non-empty string")]
    InvalidCommentUsername,

    #[error("comment date must be a valid timestamp")]
    InvalidCommentDate,

    #[error("reply id must be a non-empty string")]
    InvalidReplyId,

    #[error("reply content must be a non-empty string")]
    InvalidReplyContent,

    #[error("reply username must be a non-empty string")]
    InvalidReplyUsername,

    #[error("reply date must be a valid timestamp")]
    InvalidReplyDate,
}

impl ThreadDetailError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField => "DETAIL_THREAD.NOT_CONTAIN_NEEDED_PROPERTY",
            Self::InvalidFieldType => "DETAIL_THREAD.NOT_MEET_DATA_TYPE_SPECIFICATION",
            Self::InvalidCommentId => "DETAIL_THREAD.INVALID_COMMENT_ID",
            Self::InvalidCommentContent => "DETAIL_THREAD.INVALID_COMMENT_CONTENT",
            Self::InvalidCommentUsername => "DETAIL_THREAD.INVALID_COMMENT_USERNAME",
            Self::InvalidCommentDate => "DETAIL_THREAD.INVALID_COMMENT_DATE",
            Self::InvalidReplyId => "DETAIL_THREAD.INVALID_REPLY_ID",
            Self::InvalidReplyContent => "DETAIL_THREAD.INVALID_REPLY_CONTENT",
            Self::InvalidReplyUsername => "DETAIL_THREAD.INVALID_REPLY_USERNAME",
            Self::InvalidReplyDate => "DETAIL_THREAD.INVALID_REPLY_DATE",
        }
    }
}

/// Input accepted by [`ThreadDetail::new`].
#[derive(Debug, Clone)]
pub enum ThreadDetailSource {
    /// Flat rows from the thread-detail join, in store order.
    Rows(Vec<ThreadDetailRow>),
    /// An already nested object with a `comments` array.
    Payload(Value),
}

/// Validated thread detail.
///
/// Serializes to the public shape `{id, title, body, date, username, comments}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadDetail {
    id: String,
    title: String,
    body: String,
    date: String,
    username: String,
    comments: Vec<CommentNode>,
}

impl ThreadDetail {
    /// Build and validate a thread detail from either input shape.
    pub fn new(source: ThreadDetailSource) -> Result<Self, ThreadDetailError> {
        match source {
            ThreadDetailSource::Rows(rows) => Self::from_rows(&rows),
            ThreadDetailSource::Payload(payload) => Self::from_payload(&payload),
        }
    }

    /// Assemble from join rows. Thread fields are taken from the first row.
    pub fn from_rows(rows: &[ThreadDetailRow]) -> Result<Self, ThreadDetailError> {
        let header = rows.first().ok_or(ThreadDetailError::MissingField)?;

        let id = required(header.thread_id.as_deref())?;
        let title = required(header.title.as_deref())?;
        let body = required(header.body.as_deref())?;
        let date = required(header.updated_at.as_deref())?;
        let username = required(header.username.as_deref())?;

        if parse_timestamp(date).is_none() {
            return Err(ThreadDetailError::InvalidFieldType);
        }

        let comments = build_comment_tree(rows);
        for comment in &comments {
            verify_node(comment, NodeKind::Comment)?;
        }

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            date: date.to_string(),
            username: username.to_string(),
            comments,
        })
    }

    /// Re-validate an already nested payload.
    ///
    /// The thread timestamp is read from `date`, falling back to `updated_at`.
    pub fn from_payload(payload: &Value) -> Result<Self, ThreadDetailError> {
        let truthy = |name: &str| payload.get(name).filter(|value| is_truthy(value));

        let (Some(id), Some(title), Some(body), Some(date), Some(username), Some(comments)) = (
            truthy("id"),
            truthy("title"),
            truthy("body"),
            truthy("date").or_else(|| truthy("updated_at")),
            truthy("username"),
            payload.get("comments").and_then(Value::as_array),
        ) else {
            return Err(ThreadDetailError::MissingField);
        };

        let (Some(id), Some(title), Some(body), Some(date), Some(username)) = (
            id.as_str(),
            title.as_str(),
            body.as_str(),
            date.as_str().filter(|d| parse_timestamp(d).is_some()),
            username.as_str(),
        ) else {
            return Err(ThreadDetailError::InvalidFieldType);
        };

        let comments = comments
            .iter()
            .map(|comment| node_from_value(comment, NodeKind::Comment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            date: date.to_string(),
            username: username.to_string(),
            comments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn comments(&self) -> &[CommentNode] {
        &self.comments
    }
}

/// Parse a timestamp in any of the formats the store or clients produce.
///
/// Accepts RFC 3339, naive ISO-8601 date-times (`T` or space separated,
/// optional fraction) and plain dates. Naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn required(value: Option<&str>) -> Result<&str, ThreadDetailError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ThreadDetailError::MissingField)
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn verify_node(node: &CommentNode, kind: NodeKind) -> Result<(), ThreadDetailError> {
    if node.id.is_empty() {
        return Err(kind.invalid_id());
    }
    if node.content.is_empty() {
        return Err(kind.invalid_content());
    }
    if node.username.is_empty() {
        return Err(kind.invalid_username());
    }
    if parse_timestamp(&node.date).is_none() {
        return Err(kind.invalid_date());
    }

    for reply in &node.replies {
        verify_node(reply, NodeKind::Reply)?;
    }

    Ok(())
}

fn node_from_value(value: &Value, kind: NodeKind) -> Result<CommentNode, ThreadDetailError> {
    let text = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let id = text("id").ok_or_else(|| kind.invalid_id())?;
    let content = text("content").ok_or_else(|| kind.invalid_content())?;
    let username = text("username").ok_or_else(|| kind.invalid_username())?;
    let date = text("date")
        .filter(|d| parse_timestamp(d).is_some())
        .ok_or_else(|| kind.invalid_date())?;

    let replies = match value.get("replies").and_then(Value::as_array) {
        Some(replies) => replies
            .iter()
            .map(|reply| node_from_value(reply, NodeKind::Reply))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(CommentNode {
        id: id.to_string(),
        username: username.to_string(),
        date: date.to_string(),
        content: content.to_string(),
        replies,
    })
}
