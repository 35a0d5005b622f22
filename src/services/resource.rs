//! Generic CRUD over one `/gen/v1/<resource>` endpoint.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::net::query::{QueryBuilder, with_query};
use crate::net::{ApiError, HttpClient, Page};

/// Typed CRUD handle. `T` is the row type, `C` and `U` the create and update
/// bodies. Read-only resources leave `C`/`U` as raw JSON.
pub struct Resource<T, C = serde_json::Value, U = C> {
    client: Arc<HttpClient>,
    endpoint: &'static str,
    _types: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> Clone for Resource<T, C, U> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client), endpoint: self.endpoint, _types: PhantomData }
    }
}

impl<T, C, U> Resource<T, C, U>
where
    T: DeserializeOwned,
    C: Serialize + Sync,
    U: Serialize + Sync,
{
    #[must_use]
    pub fn new(client: Arc<HttpClient>, endpoint: &'static str) -> Self {
        Self { client, endpoint, _types: PhantomData }
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn list(&self, query: &QueryBuilder) -> Result<Page<T>, ApiError> {
        self.client.get(&with_query(self.endpoint, &query.build())).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn get(&self, id: i64) -> Result<T, ApiError> {
        self.client.get(&self.item(id)).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn create(&self, dto: &C) -> Result<T, ApiError> {
        self.client.post(self.endpoint, dto).await
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn update(&self, id: i64, dto: &U) -> Result<(), ApiError> {
        self.client.patch::<IgnoredAny, _>(&self.item(id), dto).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for the failed call.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete::<IgnoredAny>(&self.item(id)).await?;
        Ok(())
    }

    fn item(&self, id: i64) -> String {
        format!("{}/{id}", self.endpoint)
    }
}
