//! MongoDB-backed document store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, FindOptions, UpdateOptions};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use xca_core::config::{DocumentFlavor, DocumentSettings};
use xca_core::{UpsertOutcome, User};

use crate::store::{DocResult, DocumentStore};

/// Handle to one collection of user records.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    collection: String,
    flavor: DocumentFlavor,
}

impl MongoStore {
    /// Connect and verify the account answers before any work is attempted.
    pub async fn connect(settings: &DocumentSettings) -> DocResult<Self> {
        let mut options = ClientOptions::parse(&settings.connection_string).await?;
        options.app_name = Some("xca".to_string());
        options.connect_timeout = Some(std::time::Duration::from_secs(10));
        options.server_selection_timeout = Some(std::time::Duration::from_secs(10));

        let client = Client::with_options(options)?;

        // Listing databases forces server selection, so an unreachable
        // account fails here instead of at the first upsert.
        client.list_database_names().await?;

        info!(
            database = %settings.database,
            collection = %settings.collection,
            flavor = ?settings.flavor,
            "Connected to document store"
        );

        Ok(Self {
            client,
            database: settings.database.clone(),
            collection: settings.collection.clone(),
            flavor: settings.flavor,
        })
    }

    fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    fn documents(&self) -> Collection<Document> {
        self.database().collection(&self.collection)
    }

    fn users(&self) -> Collection<User> {
        self.database().collection(&self.collection)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn reset(&self) -> DocResult<()> {
        let db = self.database();

        let existing = self.client.list_database_names().await?;
        if existing.iter().any(|name| name == &self.database) {
            db.drop().await?;
            info!(database = %self.database, "Dropped database");
        }

        match self.flavor {
            DocumentFlavor::Cosmos => {
                db.run_command(create_database_command()).await?;
                info!(database = %self.database, "Created database");
                db.run_command(create_collection_command(&self.collection)).await?;
            }
            DocumentFlavor::Mongo => {
                db.create_collection(&self.collection).await?;
            }
        }
        info!(collection = %self.collection, "Created collection");

        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> DocResult<UpsertOutcome> {
        user.validate()?;

        let options = UpdateOptions::builder().upsert(true).build();

        let result = self
            .documents()
            .update_one(upsert_filter(user), upsert_update(user))
            .with_options(options)
            .await?;

        debug!(
            id = %user.id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Upserted user document"
        );

        Ok(if result.upserted_id.is_some() {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }

    async fn list_users(&self) -> DocResult<Vec<User>> {
        let options = FindOptions::builder().projection(user_projection()).build();

        let mut cursor = self.users().find(doc! {}).with_options(options).await?;

        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await? {
            users.push(user);
        }
        Ok(users)
    }

    async fn count_users(&self) -> DocResult<u64> {
        Ok(self.documents().count_documents(doc! {}).await?)
    }
}

fn create_database_command() -> Document {
    doc! { "customAction": "CreateDatabase" }
}

fn create_collection_command(collection: &str) -> Document {
    doc! { "customAction": "CreateCollection", "collection": collection }
}

fn upsert_filter(user: &User) -> Document {
    doc! { "id": &user.id }
}

fn upsert_update(user: &User) -> Document {
    doc! {
        "$set": {
            "id": &user.id,
            "first_name": &user.first_name,
            "last_name": &user.last_name,
        }
    }
}

fn user_projection() -> Document {
    doc! { "_id": 0, "id": 1, "first_name": 1, "last_name": 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_is_keyed_on_id() {
        let user = User::new("message_aj", "Ayush", "Jaiswal");
        assert_eq!(upsert_filter(&user), doc! { "id": "message_aj" });

        let update = upsert_update(&user);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("first_name").unwrap(), "Ayush");
        assert_eq!(set.get_str("last_name").unwrap(), "Jaiswal");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_projection_hides_object_id() {
        let projection = user_projection();
        assert_eq!(projection.get_i32("_id").unwrap(), 0);
        assert_eq!(projection.get_i32("id").unwrap(), 1);
    }

    #[test]
    fn test_cosmos_provisioning_commands() {
        assert_eq!(create_database_command().get_str("customAction").unwrap(), "CreateDatabase");
        let cmd = create_collection_command("users");
        assert_eq!(cmd.get_str("customAction").unwrap(), "CreateCollection");
        assert_eq!(cmd.get_str("collection").unwrap(), "users");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_round_trip() {
        let settings = DocumentSettings {
            connection_string: std::env::var("COSMOS_MONGO_CONNECTION_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: "xca_test".to_string(),
            collection: "users".to_string(),
            flavor: DocumentFlavor::Mongo,
        };
        let store = MongoStore::connect(&settings).await.unwrap();
        store.reset().await.unwrap();

        let user = User::new("dhulam", "Ajit", "Dhulam");
        assert_eq!(store.upsert_user(&user).await.unwrap(), UpsertOutcome::Created);
        assert_eq!(store.upsert_user(&user).await.unwrap(), UpsertOutcome::Updated);
        assert_eq!(store.list_users().await.unwrap(), vec![user]);
    }
}
