//! 模拟数据层集成测试

use affbox_lib::affbox_core::models::{
    AiService, NewLeadMagnet, NewProduct, LeadMagnetStatus, LeadMagnetType, ProductPatch,
    ProductStatus,
};
use affbox_lib::affbox_core::StoreError;
use affbox_lib::affbox_store::{
    ApiStatus, FixedOutcome, MockStore, NotificationVariant, ScriptedOutcomes, StoreState,
};
use std::sync::Arc;

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: "Email Marketing".to_string(),
        commission: "30%".to_string(),
        status: ProductStatus::Active,
    }
}

#[tokio::test]
async fn test_failed_add_leaves_collection_untouched() {
    let store = MockStore::new(StoreState::sample(), Arc::new(FixedOutcome::Fail));
    let mut notes = store.subscribe_notifications();
    let before = store.products().list().await;

    let err = store.add_product(new_product("Mailchimp")).await.unwrap_err();
    assert!(matches!(err, StoreError::SimulatedFailure(_)));
    assert_eq!(store.products().list().await, before);
    assert_eq!(store.products_status(), ApiStatus::Error);

    let note = notes.recv().await.expect("failure notification");
    assert_eq!(note.title, "Operation Failed");
    assert_eq!(note.variant, NotificationVariant::Destructive);
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let policy = ScriptedOutcomes::new([FixedOutcome::Fail]);
    let store = MockStore::new(StoreState::sample(), Arc::new(policy));

    assert!(store.add_product(new_product("Mailchimp")).await.is_err());
    let product = store.add_product(new_product("Mailchimp")).await.unwrap();

    assert_eq!(store.products().len().await, 6);
    assert_eq!(store.products_status(), ApiStatus::Success);
    // 失败的那次也消耗了一个 id
    assert_eq!(product.id, 7);
}

#[tokio::test]
async fn test_delete_then_add_never_reuses_ids() {
    let store = MockStore::new(StoreState::sample(), Arc::new(FixedOutcome::Succeed));

    assert!(store.delete_product(5).await.unwrap());
    let added = store.add_product(new_product("Podia")).await.unwrap();
    assert_eq!(added.id, 6);

    let ids: Vec<u32> = store.products().list().await.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 6]);
}

#[tokio::test]
async fn test_update_merges_and_missing_id_is_not_found() {
    let store = MockStore::new(StoreState::sample(), Arc::new(FixedOutcome::Succeed));
    let patch = ProductPatch {
        status: Some(ProductStatus::Active),
        ..Default::default()
    };

    let updated = store.update_product(4, patch.clone()).await.unwrap();
    assert_eq!(updated.status, ProductStatus::Active);
    assert_eq!(updated.name, "Teachable");

    let before = store.products().list().await;
    let err = store.update_product(99, patch).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.products().list().await, before);
}

#[tokio::test]
async fn test_lead_magnet_defaults_and_ai_flags() {
    let store = MockStore::new(StoreState::default(), Arc::new(FixedOutcome::Succeed));

    let magnet = store
        .add_lead_magnet(NewLeadMagnet {
            title: "Swipe File".to_string(),
            magnet_type: LeadMagnetType::Templates,
            product: "Kartra".to_string(),
            status: LeadMagnetStatus::Draft,
        })
        .await
        .unwrap();
    assert_eq!(magnet.id, 1);
    assert_eq!(magnet.downloads, 0);

    store.connect_ai_service(AiService::Midjourney, true);
    store.connect_ai_service(AiService::Midjourney, false);
    store.connect_ai_service(AiService::FluxApi, true);
    let flags = store.ai_services();
    assert!(!flags.midjourney);
    assert!(flags.flux_api);
}
