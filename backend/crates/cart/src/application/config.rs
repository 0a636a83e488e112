//! Application Configuration
//!
//! Configuration for the cart and catalog application layer.

/// Cart application configuration
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Page size when the client sends no `limit`
    pub default_page_size: u32,
    /// Largest accepted `limit`
    pub max_page_size: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}
