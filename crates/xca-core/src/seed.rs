//! The sample social graph loaded by `xca run`.

use serde::{Deserialize, Serialize};

use crate::user::model::{FollowEdge, User};

/// Everyone a single user follows. An empty list means they follow no one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowList {
    pub follower_id: String,
    pub followees: Vec<String>,
}

impl FollowList {
    pub fn new(follower_id: &str, followees: &[&str]) -> Self {
        Self {
            follower_id: follower_id.to_string(),
            followees: followees.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Expand into one edge per followee.
    pub fn edges(&self) -> impl Iterator<Item = FollowEdge> + '_ {
        self.followees
            .iter()
            .map(|followee| FollowEdge::new(self.follower_id.as_str(), followee.as_str()))
    }
}

const USERS: &[(&str, &str, &str)] = &[
    ("ash2shukla", "Ashish", "Shukla"),
    ("message_aj", "Ayush", "Jaiswal"),
    ("sypherv", "Ravi", "Goel"),
    ("tusharsr", "Tushar", "Srivastava"),
    ("dhulam", "Ajit", "Dhulam"),
];

/// Seed users, in insertion order.
pub fn users() -> Vec<User> {
    USERS
        .iter()
        .map(|(id, first, last)| User::new(*id, *first, *last))
        .collect()
}

/// Seed follow table, keyed by follower.
pub fn follows() -> Vec<FollowList> {
    vec![
        FollowList::new("ash2shukla", &["message_aj"]),
        FollowList::new("message_aj", &["ash2shukla", "tusharsr"]),
        FollowList::new("sypherv", &[]),
        FollowList::new("tusharsr", &["ash2shukla", "message_aj", "sypherv"]),
    ]
}
