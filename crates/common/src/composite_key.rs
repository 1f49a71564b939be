use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CompositeKeyError {
    /// A parent can only be attached to a key that has an id
    #[error("composite key has no id")]
    MissingKeyValue,
    #[error("invalid url-safe encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("malformed composite key record: {0}")]
    MalformedRecord(#[from] bincode::Error),
}

/// Canonical byte form of a composite key id
///
/// Strings contribute their UTF-8 bytes, byte slices and vectors are taken
///  as-is, and integers are rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyId(Vec<u8>);

impl KeyId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<&str> for KeyId {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for KeyId {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&String> for KeyId {
    fn from(value: &String) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for KeyId {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for KeyId {
    fn from(value: &[u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for KeyId {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

macro_rules! key_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for KeyId {
                fn from(value: $ty) -> Self {
                    Self(value.to_string().into_bytes())
                }
            }
        )*
    };
}

key_id_from_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Flat wire form of a composite key
#[derive(Serialize, Deserialize)]
struct KeyRecord {
    id: Option<Vec<u8>>,
    parent: Option<Vec<u8>>,
}

/// Hierarchical record identifier: an id and an optional parent
///
/// Chains are built top-down with [`CompositeKey::with_parent`], which always
///  creates a fresh parent, so a key can never be its own ancestor.
#[derive(Debug, Clone, Default)]
pub struct CompositeKey {
    id: Option<Vec<u8>>,
    parent: Option<Box<CompositeKey>>,
}

impl CompositeKey {
    pub fn new(id: impl Into<KeyId>) -> Self {
        Self {
            id: Some(id.into().into_bytes()),
            parent: None,
        }
    }

    /// A key whose id is not set yet
    pub fn auto() -> Self {
        Self::default()
    }

    /// Attach a parent built from `parent_id`
    ///
    /// Any parent already attached is replaced.
    ///
    /// # Errors
    ///
    /// Returns `CompositeKeyError::MissingKeyValue` if this key has no id.
    pub fn with_parent(mut self, parent_id: impl Into<KeyId>) -> Result<Self, CompositeKeyError> {
        if self.id.is_none() {
            return Err(CompositeKeyError::MissingKeyValue);
        }
        self.parent = Some(Box::new(CompositeKey::new(parent_id)));
        Ok(self)
    }

    pub fn id(&self) -> Option<&[u8]> {
        self.id.as_deref()
    }

    pub fn parent(&self) -> Option<&CompositeKey> {
        self.parent.as_deref()
    }

    /// The id as text, lossily decoded; empty when unset
    pub fn get(&self) -> String {
        self.id
            .as_deref()
            .map(|id| String::from_utf8_lossy(id).into_owned())
            .unwrap_or_default()
    }

    /// Flat byte form: `parent.id || id`, or just `id` without a parent
    ///
    /// There is no separator, so `("ab", "c")` and `("a", "bc")` produce the
    ///  same bytes. Use [`CompositeKey::to_url_safe`] when the structure must
    ///  survive.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        let id = self.id.as_ref()?;
        let mut out = self
            .parent
            .as_ref()
            .and_then(|parent| parent.id.clone())
            .unwrap_or_default();
        out.extend_from_slice(id);
        Some(out)
    }

    /// Encode as unpadded base64url text
    ///
    /// The encoded record holds `id` and the parent id as separate fields.
    ///  It does not wrap [`CompositeKey::bytes`], so text from encoders that
    ///  wrap the flat concatenation will not decode here, and
    ///  `("ab", "c")` and `("a", "bc")` encode differently.
    pub fn to_url_safe(&self) -> Result<String, CompositeKeyError> {
        let record = KeyRecord {
            id: self.id.clone(),
            parent: self.parent.as_ref().and_then(|parent| parent.id.clone()),
        };
        let bytes = bincode::serialize(&record)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Decode text produced by [`CompositeKey::to_url_safe`]
    ///
    /// Input with or without `=` padding is accepted.
    pub fn from_url_safe(encoded: &str) -> Result<Self, CompositeKeyError> {
        let mut padded = encoded.trim_end_matches('=').to_string();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        let bytes = URL_SAFE.decode(padded)?;
        let record: KeyRecord = bincode::deserialize(&bytes)?;
        Ok(Self {
            id: record.id,
            parent: record.parent.map(|id| {
                Box::new(CompositeKey {
                    id: Some(id),
                    parent: None,
                })
            }),
        })
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        let mut a = Some(self);
        let mut b = Some(other);
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) if x.id == y.id => {
                    a = x.parent.as_deref();
                    b = y.parent.as_deref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for CompositeKey {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_equality() {
        assert_eq!(CompositeKey::new("a"), CompositeKey::new("a"));
        assert_ne!(CompositeKey::new("a"), CompositeKey::new("b"));

        let child = CompositeKey::new("a").with_parent("p").unwrap();
        assert_ne!(child, CompositeKey::new("a"));
        assert_ne!(CompositeKey::new("a"), child);
        assert_eq!(child, CompositeKey::new("a").with_parent("p").unwrap());
        assert_ne!(child, CompositeKey::new("a").with_parent("q").unwrap());
    }

    #[test]
    fn test_auto_has_no_id() {
        let key = CompositeKey::auto();
        assert_eq!(key.id(), None);
        assert_eq!(key.bytes(), None);
        assert_eq!(key.get(), "");
        assert!(matches!(
            key.with_parent("p"),
            Err(CompositeKeyError::MissingKeyValue)
        ));
    }

    #[test]
    fn test_bytes_concatenates_parent_first() {
        let key = CompositeKey::new("child").with_parent("parent").unwrap();
        assert_eq!(key.bytes().unwrap(), b"parentchild");
        assert_eq!(CompositeKey::new("solo").bytes().unwrap(), b"solo");
    }

    #[test]
    fn test_bytes_is_ambiguous_but_structure_is_not() {
        let left = CompositeKey::new("c").with_parent("ab").unwrap();
        let right = CompositeKey::new("bc").with_parent("a").unwrap();
        assert_eq!(left.bytes(), right.bytes());
        assert_ne!(left, right);
        assert_ne!(left.to_url_safe().unwrap(), right.to_url_safe().unwrap());
    }

    #[test]
    fn test_integer_ids_are_decimal() {
        assert_eq!(CompositeKey::new(42u64).id().unwrap(), b"42");
        assert_eq!(CompositeKey::new(-7i32).get(), "-7");
        assert_eq!(
            CompositeKey::new(10usize).with_parent(3u8).unwrap().bytes().unwrap(),
            b"310"
        );
    }

    #[test]
    fn test_url_safe_roundtrip() {
        let key = CompositeKey::new(vec![0u8, 255, 0, 62, 63])
            .with_parent(&[0u8, 0, 1][..])
            .unwrap();
        let encoded = key.to_url_safe().unwrap();
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(CompositeKey::from_url_safe(&encoded).unwrap(), key);
    }

    #[test]
    fn test_url_safe_accepts_padding() {
        let key = CompositeKey::new("x");
        let encoded = key.to_url_safe().unwrap();
        let mut padded = encoded.clone();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        assert_eq!(CompositeKey::from_url_safe(&padded).unwrap(), key);
    }

    #[test]
    fn test_url_safe_rejects_garbage() {
        assert!(matches!(
            CompositeKey::from_url_safe("***"),
            Err(CompositeKeyError::InvalidEncoding(_))
        ));
        assert!(matches!(
            CompositeKey::from_url_safe("AQ"),
            Err(CompositeKeyError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_auto_roundtrip() {
        let key = CompositeKey::auto();
        let decoded = CompositeKey::from_url_safe(&key.to_url_safe().unwrap()).unwrap();
        assert_eq!(decoded, key);
    }
}
