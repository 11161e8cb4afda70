pub mod error;
pub mod fs;
pub mod store;
pub mod types;

pub use error::AssetError;
pub use fs::{FsAssetStore, is_valid_identifier};
pub use store::AssetStore;
pub use types::{LoadedAsset, StoredAsset};
