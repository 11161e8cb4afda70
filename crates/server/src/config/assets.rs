use serde::Deserialize;

/// Where and how product photos are stored.
///
/// # Example
///
/// ```toml
/// [assets]
/// root = "/var/lib/catalog/images"
/// public_prefix = "/images"
/// default_extension = "png"
/// max_upload_bytes = 10485760
/// ```
#[derive(Debug, Deserialize)]
pub struct AssetsConfig {
    /// Directory assets are written into. Created on startup if missing.
    #[serde(default = "default_root")]
    pub root: String,
    /// Prefix of the reference strings stored on records, and the URL path
    /// under which stored files are served.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Extension assumed for payloads without a media type and for
    /// `GET /image/{id}` lookups by bare token.
    #[serde(default = "default_extension")]
    pub default_extension: String,
    /// Maximum request body size in bytes (base64 photos are inline JSON).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Whether stored files are served directly under `public_prefix`.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_prefix: default_public_prefix(),
            default_extension: default_extension(),
            max_upload_bytes: default_max_upload_bytes(),
            serve_static: default_serve_static(),
        }
    }
}

fn default_root() -> String {
    "data/images".to_owned()
}

fn default_public_prefix() -> String {
    "/images".to_owned()
}

fn default_extension() -> String {
    "png".to_owned()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_serve_static() -> bool {
    true
}
