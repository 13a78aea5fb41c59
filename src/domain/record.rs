use serde::{de::DeserializeOwned, Serialize};

/// A flat record stored in a named collection of the content store.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection the record lives in.
    const COLLECTION: &'static str;
}
