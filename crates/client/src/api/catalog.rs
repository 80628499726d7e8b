//! Catalog endpoints (products and shops).
//!
//! Catalog data is read-only from the client's point of view, so responses
//! are cached for five minutes. Nothing the user can mutate goes through
//! this cache.

use std::sync::Arc;

use mangaba_core::ShopId;

use crate::error::ApiError;
use crate::models::{Product, Shop};

use super::BackendClient;

/// A cached catalog response.
#[derive(Clone)]
pub(crate) enum CatalogEntry {
    Products(Arc<Vec<Product>>),
    Shop(Arc<Shop>),
}

impl BackendClient {
    /// List products, optionally filtered by search text and/or shop.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn products(
        &self,
        search: Option<&str>,
        shop: Option<&ShopId>,
    ) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!(
            "products:{}:{}",
            search.unwrap_or_default(),
            shop.map(ShopId::as_str).unwrap_or_default()
        );

        if let Some(CatalogEntry::Products(products)) = self.catalog_cache().get(&cache_key).await {
            tracing::debug!(key = %cache_key, "catalog cache hit");
            return Ok(products.as_ref().clone());
        }

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(text) = search {
            query.push(("search", text.to_owned()));
        }
        if let Some(shop_id) = shop {
            query.push(("shopId", shop_id.as_str().to_owned()));
        }

        let response = self
            .http()
            .get(self.url("/products"))
            .query(&query)
            .send()
            .await?;

        let products: Vec<Product> = Self::decode(response).await?;

        self.catalog_cache()
            .insert(cache_key, CatalogEntry::Products(Arc::new(products.clone())))
            .await;

        Ok(products)
    }

    /// Fetch shop details by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the shop is unknown.
    pub async fn shop(&self, id: &ShopId) -> Result<Shop, ApiError> {
        let cache_key = format!("shop:{id}");

        if let Some(CatalogEntry::Shop(shop)) = self.catalog_cache().get(&cache_key).await {
            tracing::debug!(key = %cache_key, "catalog cache hit");
            return Ok(shop.as_ref().clone());
        }

        let response = self
            .http()
            .get(self.url(&format!("/shops/{id}")))
            .send()
            .await?;

        let shop: Shop = Self::decode(response).await?;

        self.catalog_cache()
            .insert(cache_key, CatalogEntry::Shop(Arc::new(shop.clone())))
            .await;

        Ok(shop)
    }
}
