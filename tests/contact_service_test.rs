mod common;

use std::time::Duration;

use compass_backend::dto::contact_dto::{ContactListParams, ContactPatch};
use compass_backend::model::{Contact, ContactSubject};
use compass_backend::service::contact_service::{ContactService, ContactServiceImpl};
use compass_backend::util::error::ServiceError;
use common::{contact_service, new_contact, FailingRepository};
use std::sync::Arc;

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let service = contact_service();
    let created = service
        .create_contact(new_contact("Meera Nair", ContactSubject::Claim))
        .await
        .unwrap();
    let fetched = service
        .get_contact(&created.id.unwrap().to_hex())
        .await
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.subject, ContactSubject::Claim);
    assert_eq!(fetched.email, "meera.nair@example.com");
}

#[tokio::test]
async fn test_partial_update() {
    let service = contact_service();
    let created = service
        .create_contact(new_contact("Meera Nair", ContactSubject::Claim))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let patch = ContactPatch {
        subject: Some(ContactSubject::Policy),
        ..ContactPatch::default()
    };
    let updated = service
        .update_contact(&created.id.unwrap().to_hex(), patch)
        .await
        .unwrap();
    assert_eq!(updated.subject, ContactSubject::Policy);
    assert_eq!(updated.message, created.message);
    assert_eq!(updated.createdAt, created.createdAt);
    assert!(updated.updatedAt > created.updatedAt);
}

#[tokio::test]
async fn test_filter_by_subject_and_search() {
    let service = contact_service();
    service
        .create_contact(new_contact("Arun", ContactSubject::Quote))
        .await
        .unwrap();
    service
        .create_contact(new_contact("Divya", ContactSubject::Other))
        .await
        .unwrap();
    service
        .create_contact(new_contact("Arjun", ContactSubject::Other))
        .await
        .unwrap();

    let others = service
        .list_contacts(&ContactListParams {
            subject: Some("other".into()),
            ..ContactListParams::default()
        })
        .await
        .unwrap();
    assert_eq!(others.pagination.total_count, 2);

    let found = service
        .list_contacts(&ContactListParams {
            subject: Some("other".into()),
            search: Some("ARJ".into()),
            ..ContactListParams::default()
        })
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].fullName, "Arjun");

    let blank_ignored = service
        .list_contacts(&ContactListParams {
            subject: Some("".into()),
            search: Some("".into()),
            ..ContactListParams::default()
        })
        .await
        .unwrap();
    assert_eq!(blank_ignored.pagination.total_count, 3);
}

#[tokio::test]
async fn test_limit_fallbacks() {
    let service = contact_service();
    for i in 0..12 {
        service
            .create_contact(new_contact(&format!("Person{i}"), ContactSubject::Policy))
            .await
            .unwrap();
    }
    let page = service
        .list_contacts(&ContactListParams {
            page: Some("0".into()),
            limit: Some("abc".into()),
            ..ContactListParams::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(page.pagination.has_next_page);
    assert!(!page.pagination.has_prev_page);
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let service = contact_service();
    let missing = bson::oid::ObjectId::new().to_hex();
    assert_eq!(service.get_contact("nope").await, Err(ServiceError::InvalidId));
    assert_eq!(service.get_contact(&missing).await, Err(ServiceError::NotFound));
    assert_eq!(
        service.update_contact(&missing, ContactPatch::default()).await,
        Err(ServiceError::NotFound)
    );
    assert_eq!(service.delete_contact(&missing).await, Err(ServiceError::NotFound));
}

#[tokio::test]
async fn test_delete() {
    let service = contact_service();
    let created = service
        .create_contact(new_contact("Kiran", ContactSubject::Quote))
        .await
        .unwrap();
    let id = created.id.unwrap().to_hex();
    service.delete_contact(&id).await.unwrap();
    assert_eq!(service.get_contact(&id).await, Err(ServiceError::NotFound));
}

#[tokio::test]
async fn test_store_failure_is_internal() {
    let service = ContactServiceImpl::new(Arc::new(FailingRepository::<Contact>::new()));
    let result = service
        .get_contact(&bson::oid::ObjectId::new().to_hex())
        .await;
    assert!(matches!(result, Err(ServiceError::Internal(_))));
}
