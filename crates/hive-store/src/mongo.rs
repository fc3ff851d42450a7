//! MongoDB store adapter.

use crate::error::StoreError;
use crate::store::{AdminStore, AuditStore, BotStore};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use hive_core::{Admin, AuditRecord, Bot};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use uuid::Uuid;

const ADMIN_COLLECTION: &str = "admins";
const BOT_COLLECTION: &str = "bots";
const AUDIT_COLLECTION: &str = "audits";

/// Store backed by a MongoDB deployment.
pub struct MongoStore {
    admins: Collection<Admin>,
    bots: Collection<Bot>,
    audits: Collection<AuditRecord>,
}

impl MongoStore {
    /// Connect, verify the connection with a ping, and ensure indexes.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database, "connected to MongoDB");

        let store = Self {
            admins: db.collection(ADMIN_COLLECTION),
            bots: db.collection(BOT_COLLECTION),
            audits: db.collection(AUDIT_COLLECTION),
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        // Email uniqueness is enforced here; the lifecycle layer still
        // checks first so a duplicate stays a business result, not a fault.
        self.admins
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.admins
            .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
            .await?;
        self.bots
            .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build())
            .await?;
        self.bots
            .create_index(IndexModel::builder().keys(doc! { "status": 1 }).build())
            .await?;
        self.audits
            .create_index(IndexModel::builder().keys(doc! { "recordedAt": -1 }).build())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl AdminStore for MongoStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.find_one(doc! { "id": id.to_string() }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.find_one(doc! { "email": email }).await?)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Admin>, StoreError> {
        let cursor = self
            .admins
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError> {
        self.admins.insert_one(admin).await?;
        Ok(())
    }

    async fn save(&self, admin: &Admin) -> Result<(), StoreError> {
        self.admins
            .replace_one(doc! { "id": admin.id.to_string() }, admin)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = self
            .admins
            .delete_one(doc! { "id": id.to_string() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl BotStore for MongoStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bot>, StoreError> {
        Ok(self.bots.find_one(doc! { "id": id.to_string() }).await?)
    }

    async fn list_active(&self, limit: i64) -> Result<Vec<Bot>, StoreError> {
        let cursor = self
            .bots
            .find(doc! { "status": { "$ne": "deleted" } })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list_public_deployed(&self, limit: i64) -> Result<Vec<Bot>, StoreError> {
        let cursor = self
            .bots
            .find(doc! { "public": true, "status": "deployed" })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, bot: &Bot) -> Result<(), StoreError> {
        self.bots.insert_one(bot).await?;
        Ok(())
    }

    async fn save(&self, bot: &Bot) -> Result<(), StoreError> {
        self.bots
            .replace_one(doc! { "id": bot.id.to_string() }, bot)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuditStore for MongoStore {
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.audits.insert_one(record).await?;
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, StoreError> {
        let cursor = self
            .audits
            .find(doc! {})
            .sort(doc! { "recordedAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
