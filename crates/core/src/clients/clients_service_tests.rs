//! Unit tests for the client service.

use super::*;
use crate::errors::{Error, Result, ValidationError};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockClientRepository {
    groups: Mutex<Vec<ClientGroup>>,
    owners: Mutex<Vec<ProductOwner>>,
}

#[async_trait]
impl ClientRepositoryTrait for MockClientRepository {
    async fn create(&self, new_group: NewClientGroup) -> Result<ClientGroup> {
        let now = Utc::now().naive_utc();
        let group = ClientGroup {
            id: new_group.id.unwrap_or_else(|| "group-1".to_string()),
            name: new_group.name,
            status: new_group.status.unwrap_or_else(|| "active".to_string()),
            created_at: now,
            updated_at: now,
        };
        self.groups.lock().unwrap().push(group.clone());
        Ok(group)
    }

    async fn update(&self, group_update: ClientGroupUpdate) -> Result<ClientGroup> {
        let mut groups = self.groups.lock().unwrap();
        let group = groups
            .iter_mut()
            .find(|g| Some(&g.id) == group_update.id.as_ref())
            .ok_or_else(|| Error::NotFound("Client group".to_string()))?;
        group.name = group_update.name;
        group.status = group_update.status;
        Ok(group.clone())
    }

    fn get_by_id(&self, client_group_id: &str) -> Result<ClientGroup> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == client_group_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Client group {}", client_group_id)))
    }

    fn list(&self) -> Result<Vec<ClientGroup>> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn create_owner(&self, new_owner: NewProductOwner) -> Result<ProductOwner> {
        let now = Utc::now().naive_utc();
        let mut owners = self.owners.lock().unwrap();
        let owner = ProductOwner {
            id: new_owner
                .id
                .unwrap_or_else(|| format!("owner-{}", owners.len() + 1)),
            client_group_id: new_owner.client_group_id,
            known_as: new_owner.known_as,
            firstname: new_owner.firstname,
            surname: new_owner.surname,
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        };
        owners.push(owner.clone());
        Ok(owner)
    }

    async fn update_owner(&self, owner_update: ProductOwnerUpdate) -> Result<ProductOwner> {
        let mut owners = self.owners.lock().unwrap();
        let owner = owners
            .iter_mut()
            .find(|o| Some(&o.id) == owner_update.id.as_ref())
            .ok_or_else(|| Error::NotFound("Owner".to_string()))?;
        owner.known_as = owner_update.known_as;
        owner.status = owner_update.status;
        Ok(owner.clone())
    }

    fn get_owner(&self, owner_id: &str) -> Result<ProductOwner> {
        self.owners
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == owner_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Owner {}", owner_id)))
    }

    fn list_owners(&self, client_group_id: &str) -> Result<Vec<ProductOwner>> {
        Ok(self
            .owners
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.client_group_id == client_group_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn service_with_group() -> ClientService {
    let service = ClientService::new(Arc::new(MockClientRepository::default()));
    service
        .create_client_group(NewClientGroup {
            id: Some("group-1".to_string()),
            name: "Smith Family".to_string(),
            status: None,
        })
        .await
        .unwrap();
    service
}

fn new_owner(known_as: &str) -> NewProductOwner {
    NewProductOwner {
        id: None,
        client_group_id: "group-1".to_string(),
        known_as: known_as.to_string(),
        firstname: None,
        surname: None,
        status: None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_create_client_group_rejects_blank_name() {
    let service = ClientService::new(Arc::new(MockClientRepository::default()));
    let result = service
        .create_client_group(NewClientGroup {
            id: None,
            name: "   ".to_string(),
            status: None,
        })
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_create_client_group_rejects_ids_shadowing_routes() {
    let repo = Arc::new(MockClientRepository::default());
    let service = ClientService::new(repo.clone());
    for id in ["compare", "snapshot", "a/b", " "] {
        let result = service
            .create_client_group(NewClientGroup {
                id: Some(id.to_string()),
                name: "Smith Family".to_string(),
                status: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }
    assert!(repo.groups.lock().unwrap().is_empty());

    let created = service
        .create_client_group(NewClientGroup {
            id: Some("comparison".to_string()),
            name: "Smith Family".to_string(),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "comparison");
}

#[tokio::test]
async fn test_create_owner_for_unknown_group_is_not_found() {
    let service = ClientService::new(Arc::new(MockClientRepository::default()));
    let result = service.create_owner(new_owner("john")).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_create_owner_rejects_duplicate_known_as() {
    let service = service_with_group().await;
    service.create_owner(new_owner("john")).await.unwrap();

    let result = service.create_owner(new_owner("john")).await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::DuplicateOwnerKey(ref k))) if k == "john"
    ));
}

#[tokio::test]
async fn test_known_as_uniqueness_is_case_sensitive() {
    let service = service_with_group().await;
    service.create_owner(new_owner("john")).await.unwrap();
    assert!(service.create_owner(new_owner("John")).await.is_ok());
}

#[tokio::test]
async fn test_create_owner_rejects_reserved_key() {
    let service = service_with_group().await;
    let result = service.create_owner(new_owner("joint")).await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::ReservedOwnerKey(_)))
    ));
}

#[tokio::test]
async fn test_rename_owner_keeps_own_name_and_blocks_clash() {
    let service = service_with_group().await;
    let john = service.create_owner(new_owner("john")).await.unwrap();
    service.create_owner(new_owner("mary")).await.unwrap();

    let update = |known_as: &str| ProductOwnerUpdate {
        id: Some(john.id.clone()),
        known_as: known_as.to_string(),
        firstname: None,
        surname: None,
        status: "active".to_string(),
    };

    // Re-saving under the same name is not a clash with itself
    assert!(service.update_owner(update("john")).await.is_ok());
    assert!(matches!(
        service.update_owner(update("mary")).await,
        Err(Error::Validation(ValidationError::DuplicateOwnerKey(_)))
    ));

    let renamed = service.update_owner(update("johnny")).await.unwrap();
    assert_eq!(renamed.known_as, "johnny");
    let owners = service.list_owners("group-1").unwrap();
    assert_eq!(owners[0].known_as, "johnny");
}
