use super::*;

#[test]
fn quota_errors_map_to_quota_exceeded() {
    assert_eq!(classify_write_error("QuotaExceededError"), StoreError::QuotaExceeded);
    assert_eq!(classify_write_error("NS_ERROR_DOM_QUOTA_REACHED"), StoreError::QuotaExceeded);
}

#[test]
fn security_errors_mean_storage_is_unavailable() {
    assert_eq!(classify_write_error("SecurityError"), StoreError::Unavailable);
    assert_eq!(classify_write_error("InvalidStateError"), StoreError::Backend("InvalidStateError".to_owned()));
}

#[test]
fn stores_are_unavailable_outside_the_browser() {
    assert_eq!(LocalStorageStore.get("k"), Err(StoreError::Unavailable));
    assert_eq!(SessionStorageStore.set("k", "v"), Err(StoreError::Unavailable));
    assert_eq!(current_path(), "/");
}
