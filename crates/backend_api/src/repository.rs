use async_trait::async_trait;
use models::{Debt, Household, HouseholdMember};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};

/// One household document: its settings plus the member list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseholdRecord {
    pub household: Household,
    #[serde(default)]
    pub members: Vec<HouseholdMember>,
}

/// Repository trait for the data the engines read.
/// This abstraction allows swapping between file-based and database-backed implementations
#[async_trait]
pub trait DataRepository: Send + Sync {
    async fn fetch_debts(&self, user_id: &str) -> Result<Vec<Debt>>;
    async fn fetch_household(&self, household_id: &str) -> Result<HouseholdRecord>;
    async fn fetch_member(&self, household_id: &str, member_id: &str) -> Result<HouseholdMember>;
    async fn invalidate_cache(&self);
}

/// File-based implementation:
/// `<data_dir>/debts/<user_id>.json` holds a JSON array of debts and
/// `<data_dir>/households/<household_id>.json` a `HouseholdRecord`.
pub struct FileDataRepository {
    data_dir: PathBuf,
    households: Arc<RwLock<HashMap<String, HouseholdRecord>>>,
}

impl FileDataRepository {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            households: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, folder: &str, id: &str) -> Result<PathBuf> {
        // ids become file names
        let safe = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(ApiError::BadRequest(format!("Invalid id: {}", id)));
        }
        Ok(self.data_dir.join(folder).join(format!("{}.json", id)))
    }

    /// Load a household document, using the cache when it is already loaded
    async fn load_household(&self, household_id: &str) -> Result<HouseholdRecord> {
        {
            let cache = self.households.read().await;
            if let Some(record) = cache.get(household_id) {
                return Ok(record.clone());
            }
        }

        let path = self.document_path("households", household_id)?;
        if !path.exists() {
            return Err(ApiError::NotFound(format!("Household {} not found", household_id)));
        }
        let content = tokio::fs::read_to_string(&path).await?;
        let record: HouseholdRecord = serde_json::from_str(&content)?;

        {
            let mut cache = self.households.write().await;
            cache.insert(household_id.to_string(), record.clone());
        }

        Ok(record)
    }
}

#[async_trait]
impl DataRepository for FileDataRepository {
    async fn fetch_debts(&self, user_id: &str) -> Result<Vec<Debt>> {
        // Debts change with every payment, so they are always read fresh
        let path = self.document_path("debts", user_id)?;
        if !path.exists() {
            return Err(ApiError::NotFound(format!("No debts recorded for user {}", user_id)));
        }
        let content = tokio::fs::read_to_string(&path).await?;
        let debts: Vec<Debt> = serde_json::from_str(&content)?;
        Ok(debts)
    }

    async fn fetch_household(&self, household_id: &str) -> Result<HouseholdRecord> {
        self.load_household(household_id).await
    }

    async fn fetch_member(&self, household_id: &str, member_id: &str) -> Result<HouseholdMember> {
        let record = self.load_household(household_id).await?;
        record
            .members
            .into_iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| ApiError::NotFound(format!("Member {} not found in household {}", member_id, household_id)))
    }

    async fn invalidate_cache(&self) {
        let mut cache = self.households.write().await;
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Role;

    fn write(dir: &Path, folder: &str, id: &str, content: &str) {
        let folder = dir.join(folder);
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join(format!("{}.json", id)), content).unwrap();
    }

    const HOUSEHOLD: &str = r#"{
        "household": {"id": "h1", "name": "Home", "requireApprovalForLargeTransactions": true, "largeTransactionThreshold": 500},
        "members": [
            {"id": "m1", "householdId": "h1", "userId": "u1", "role": "owner"},
            {"id": "m2", "householdId": "h1", "userId": "u2", "role": "child", "isActive": false}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_debts() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "debts",
            "u1",
            r#"[{"id":"visa","type":"credit_card","balance":900,"creditLimit":3000,"interestRate":21.9,"minimumPayment":35}]"#,
        );
        let repo = FileDataRepository::new(dir.path());

        let debts = repo.fetch_debts("u1").await.unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].credit_limit, Some(3000.0));

        assert!(matches!(repo.fetch_debts("u2").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileDataRepository::new(dir.path());
        assert!(matches!(repo.fetch_debts("../secrets").await, Err(ApiError::BadRequest(_))));
        assert!(matches!(repo.fetch_household("").await, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_fetch_member_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "households", "h1", HOUSEHOLD);
        let repo = FileDataRepository::new(dir.path());

        let member = repo.fetch_member("h1", "m2").await.unwrap();
        assert_eq!(member.role, Role::Child);
        assert!(!member.is_active);
        assert!(matches!(repo.fetch_member("h1", "m9").await, Err(ApiError::NotFound(_))));

        // served from cache until invalidated
        std::fs::remove_file(dir.path().join("households").join("h1.json")).unwrap();
        let record = repo.fetch_household("h1").await.unwrap();
        assert!(record.household.require_approval_for_large_transactions);

        repo.invalidate_cache().await;
        assert!(matches!(repo.fetch_household("h1").await, Err(ApiError::NotFound(_))));
    }
}
