use crate::utils::error::Result;

/// Where exported files end up. Paths are relative to the backend's root.
pub trait Storage: Send + Sync {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
