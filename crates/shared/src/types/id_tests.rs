use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = BudgetId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_new_is_unique() {
    assert_ne!(UserCategoryId::new(), UserCategoryId::new());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = BudgetId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str_trims() {
    let uuid = Uuid::new_v4();
    let id = UserCategoryId::from_str(&format!("  {uuid}\n")).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(BudgetId::from_str("invalid").is_err());
}

#[test]
fn test_typed_id_serde_is_transparent() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&BudgetId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));

    let back: BudgetId = serde_json::from_str(&json).unwrap();
    assert_eq!(back.into_inner(), uuid);
}
