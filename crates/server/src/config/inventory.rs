use serde::Deserialize;

/// Record store configuration.
#[derive(Debug, Deserialize)]
pub struct InventoryConfig {
    /// Start with the three demo products (Monitor, Teclado, Mouse).
    #[serde(default = "default_seed")]
    pub seed_demo_products: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            seed_demo_products: default_seed(),
        }
    }
}

fn default_seed() -> bool {
    true
}
