//! Member — a person who can be assigned tasks and accumulates a score.

use serde::{Deserialize, Serialize};

/// A household member as stored.
///
/// The score only ever grows, through task completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
  pub id:         i64,
  pub name:       String,
  pub avatar_url: Option<String>,
  pub score:      i64,
}

/// Input for explicitly creating a member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
  pub name:       String,
  #[serde(default)]
  pub avatar_url: Option<String>,
}

/// Normalise a member reference from a request or a task row.
///
/// Member ids are SQLite rowids and start at 1, so `0` never names a member
/// and is read as "nobody".
pub fn member_ref(id: Option<i64>) -> Option<i64> { id.filter(|&id| id != 0) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_is_nobody() {
    assert_eq!(member_ref(Some(0)), None);
    assert_eq!(member_ref(None), None);
    assert_eq!(member_ref(Some(4)), Some(4));
  }
}
