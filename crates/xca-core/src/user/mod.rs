//! Users and the follow relation between them.

pub mod model;

/// Vertex label for users in the graph store.
pub const USER_LABEL: &str = "user";

/// Edge label for the follow relation.
pub const FOLLOWS_LABEL: &str = "follows";

/// Property holding the user id, both on documents and on vertices.
pub const ID_PROPERTY: &str = "id";

/// Partition-key property required by partitioned graph containers.
pub const PARTITION_PROPERTY: &str = "pk";
