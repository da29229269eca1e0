use anyhow::Result;

/// Source of raw asset bytes. Any error is treated as a load failure.
pub trait AssetFetcher: Send + Sync {
    /// Fetch the resource at `path`
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}
