//! Object storage port for credential documents

/// Object storage keyed by path
pub trait FileStorage: Send + Sync {
    /// Store bytes under `path`, replacing any existing object
    ///
    /// Returns the URL or path clients use to fetch the object.
    fn upload(&self, path: &str, content: &[u8]) -> anyhow::Result<String>;

    /// Fetch an object
    fn download(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Remove an object; missing objects are ignored
    fn remove(&self, path: &str) -> anyhow::Result<()>;
}

/// Storage path for a credential document: `{identity}/{type}.{ext}`
#[must_use]
pub fn credential_path(identity_id: &str, document_type: &str, extension: &str) -> String {
    format!("{identity_id}/{document_type}.{extension}")
}
