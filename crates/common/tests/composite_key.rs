//! Integration tests for composite key encoding

use common::composite_key::{CompositeKey, CompositeKeyError};

#[test]
fn test_equality_requires_same_chain() {
    let a = CompositeKey::new("a");
    assert_eq!(a, CompositeKey::new("a"));
    assert_ne!(CompositeKey::new("a").with_parent("p").unwrap(), a);
}

#[test]
fn test_url_safe_with_null_bytes() {
    let key = CompositeKey::new(vec![0u8, 0, b'x', 0])
        .with_parent(vec![0u8])
        .unwrap();
    let decoded = CompositeKey::from_url_safe(&key.to_url_safe().unwrap()).unwrap();
    assert_eq!(decoded, key);
    assert_eq!(decoded.parent().unwrap().id(), Some(&[0u8][..]));
}

#[test]
fn test_url_safe_without_parent() {
    let key = CompositeKey::new(1234u32);
    let decoded = CompositeKey::from_url_safe(&key.to_url_safe().unwrap()).unwrap();
    assert_eq!(decoded, key);
    assert!(decoded.parent().is_none());
    assert_eq!(decoded.get(), "1234");
}

#[test]
fn test_parent_requires_id() {
    assert!(matches!(
        CompositeKey::auto().with_parent("p"),
        Err(CompositeKeyError::MissingKeyValue)
    ));
}
