//! CRUD operations over any [`Resource`].

use std::marker::PhantomData;

use http::Method;

use crate::client::{ApiRequest, ClientError, Operation, ShopClient};
use crate::transport::{Context, HttpClient, HttpResponse};

use super::envelope::{CountEnvelope, decode_envelope, encode_envelope};
use super::{QueryOptions, Resource};

/// CRUD service for resource `R`, borrowed from a [`ShopClient`].
///
/// Obtain one with [`ShopClient::resource`] or a typed shortcut such as
/// [`ShopClient::webhooks`]. Every call is a single request; nothing is
/// cached or retried.
#[derive(Debug)]
pub struct ResourceService<'a, R, H> {
    client: &'a ShopClient<H>,
    _record: PhantomData<fn() -> R>,
}

impl<R, H> Clone for ResourceService<'_, R, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, H> Copy for ResourceService<'_, R, H> {}

impl<'a, R, H> ResourceService<'a, R, H> {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: &'a ShopClient<H>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

impl<R: Resource, H: HttpClient> ResourceService<'_, R, H> {
    /// Lists records, optionally filtered.
    ///
    /// Records are returned in response order. `None` means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`], [`ClientError::Api`] or
    /// [`ClientError::Decode`].
    pub async fn list(
        &self,
        ctx: &Context,
        options: Option<&R::Options>,
    ) -> Result<Vec<R>, ClientError> {
        let request = ApiRequest::new(
            Operation::List,
            R::PLURAL,
            Method::GET,
            collection_path::<R>(),
        )
        .with_query(query(options));

        let response = self.client.execute(ctx, request).await?;
        decode(&response, Operation::List, R::PLURAL)
    }

    /// Fetches one record by identifier.
    ///
    /// # Errors
    ///
    /// A missing record is a [`ClientError::Api`] for which
    /// [`ClientError::is_not_found`] holds. Transport and decode failures are
    /// reported as for [`list`](Self::list).
    pub async fn get(
        &self,
        ctx: &Context,
        id: u64,
        options: Option<&R::Options>,
    ) -> Result<R, ClientError> {
        let request = ApiRequest::new(Operation::Get, R::SINGULAR, Method::GET, item_path::<R>(id))
            .with_query(query(options));

        let response = self.client.execute(ctx, request).await?;
        decode(&response, Operation::Get, R::SINGULAR)
    }

    /// Counts records, optionally filtered with the same options as [`list`](Self::list).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`], [`ClientError::Api`] or
    /// [`ClientError::Decode`].
    pub async fn count(
        &self,
        ctx: &Context,
        options: Option<&R::Options>,
    ) -> Result<u64, ClientError> {
        let request = ApiRequest::new(
            Operation::Count,
            R::PLURAL,
            Method::GET,
            format!("{}/count.json", R::PATH),
        )
        .with_query(query(options));

        let response = self.client.execute(ctx, request).await?;
        serde_json::from_slice::<CountEnvelope>(&response.body)
            .map(|envelope| envelope.count)
            .map_err(|source| ClientError::Decode {
                operation: Operation::Count,
                resource: R::PLURAL,
                source,
            })
    }

    /// Creates a record and returns it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if the record cannot be serialized,
    /// otherwise as for [`list`](Self::list).
    pub async fn create(&self, ctx: &Context, record: &R) -> Result<R, ClientError> {
        let request = ApiRequest::new(
            Operation::Create,
            R::SINGULAR,
            Method::POST,
            collection_path::<R>(),
        )
        .with_body(encode::<R>(record)?);

        let response = self.client.execute(ctx, request).await?;
        decode(&response, Operation::Create, R::SINGULAR)
    }

    /// Updates a record and returns the server's current state.
    ///
    /// Only the fields the record serializes are sent, so a sparse record
    /// performs a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingId`] without sending anything if the
    /// record has no nonzero id, otherwise as for [`create`](Self::create).
    pub async fn update(&self, ctx: &Context, record: &R) -> Result<R, ClientError> {
        let id = match record.id() {
            Some(id) if id != 0 => id,
            _ => {
                return Err(ClientError::MissingId {
                    resource: R::SINGULAR,
                });
            }
        };

        let request = ApiRequest::new(
            Operation::Update,
            R::SINGULAR,
            Method::PUT,
            item_path::<R>(id),
        )
        .with_body(encode::<R>(record)?);

        let response = self.client.execute(ctx, request).await?;
        decode(&response, Operation::Update, R::SINGULAR)
    }

    /// Deletes a record.
    ///
    /// Any 2xx response is success; its body is ignored. Deleting a record
    /// that no longer exists fails with whatever the server reports,
    /// normally a not-found [`ClientError::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Api`].
    pub async fn delete(&self, ctx: &Context, id: u64) -> Result<(), ClientError> {
        let request = ApiRequest::new(
            Operation::Delete,
            R::SINGULAR,
            Method::DELETE,
            item_path::<R>(id),
        );

        self.client.execute(ctx, request).await?;
        Ok(())
    }
}

fn collection_path<R: Resource>() -> String {
    format!("{}.json", R::PATH)
}

fn item_path<R: Resource>(id: u64) -> String {
    format!("{}/{id}.json", R::PATH)
}

fn query<O: QueryOptions>(options: Option<&O>) -> Vec<(&'static str, String)> {
    options.map(QueryOptions::query_pairs).unwrap_or_default()
}

fn encode<R: Resource>(record: &R) -> Result<Vec<u8>, ClientError> {
    encode_envelope(R::SINGULAR, record).map_err(|source| ClientError::Encode {
        resource: R::SINGULAR,
        source,
    })
}

fn decode<T: serde::de::DeserializeOwned>(
    response: &HttpResponse,
    operation: Operation,
    key: &'static str,
) -> Result<T, ClientError> {
    decode_envelope(&response.body, key).map_err(|source| ClientError::Decode {
        operation,
        resource: key,
        source,
    })
}
