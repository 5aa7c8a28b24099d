use serde::Deserialize;

/// New entry for the public comment board.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCommentRequest {
    pub name: String,
    pub message: String,
}
