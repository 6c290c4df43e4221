use crate::config::AssetConfig;
use crate::models::admin::{Dish, Restaurant};

/// Rows that carry an optional stored image key.
pub trait ImageRef {
    fn image_key(&self) -> Option<&str>;

    /// Fallback when no key is stored.
    fn default_image(&self, _assets: &AssetConfig) -> Option<String> {
        None
    }

    fn image_url(&self, assets: &AssetConfig) -> Option<String> {
        match self.image_key().filter(|key| !key.trim().is_empty()) {
            Some(key) => Some(assets.url_for(key)),
            None => self.default_image(assets),
        }
    }
}

impl ImageRef for Restaurant {
    fn image_key(&self) -> Option<&str> {
        self.restaurant_image.as_deref()
    }

    fn default_image(&self, assets: &AssetConfig) -> Option<String> {
        Some(assets.default_restaurant_image.clone())
    }
}

impl ImageRef for Dish {
    fn image_key(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
