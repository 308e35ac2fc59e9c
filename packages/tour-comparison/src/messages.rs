//! The message layer between UI surfaces and the background store
//! owner.
//!
//! Requests and responses serialize in the original extension's wire
//! format: an `action` tag plus camelCase payload fields. The transport
//! itself is an opaque collaborator behind [`MessageChannel`];
//! [`LocalChannel`] is the in-process implementation used by tests and
//! the CLI.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, ChannelResult};
use crate::store::{KeyValueStore, TourStore};
use crate::types::{TourDraft, TourRecord};

/// A request from any UI surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TourRequest {
    /// Store a freshly extracted tour.
    #[serde(rename_all = "camelCase")]
    AddTour { tour_data: TourDraft },

    /// Read the full collection.
    GetTours,

    /// Delete one tour by id.
    #[serde(rename_all = "camelCase")]
    DeleteTour { tour_id: String },

    /// Drop the whole collection.
    ClearAllTours,
}

/// A response to a [`TourRequest`]. Shapes mirror the original wire
/// protocol, so the variants are untagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TourResponse {
    /// Answer to `GetTours`.
    Tours { tours: Vec<TourRecord> },

    /// Answer to `AddTour` and `DeleteTour`.
    #[serde(rename_all = "camelCase")]
    Mutation { success: bool, tour_count: usize },

    /// A store failure, surfaced to the caller instead of panicking.
    Failure { success: bool, error: String },

    /// Answer to `ClearAllTours`.
    Cleared { success: bool },
}

impl TourResponse {
    fn failure(error: impl std::fmt::Display) -> Self {
        TourResponse::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    /// The tour list, when this is a `Tours` response.
    pub fn into_tours(self) -> Option<Vec<TourRecord>> {
        match self {
            TourResponse::Tours { tours } => Some(tours),
            _ => None,
        }
    }

    /// Whether the peer reported success.
    pub fn succeeded(&self) -> bool {
        match self {
            TourResponse::Tours { .. } => true,
            TourResponse::Mutation { success, .. } => *success,
            TourResponse::Failure { success, .. } => *success,
            TourResponse::Cleared { success } => *success,
        }
    }

    /// The reported collection size, for mutation acknowledgements.
    pub fn tour_count(&self) -> Option<usize> {
        match self {
            TourResponse::Mutation { tour_count, .. } => Some(*tour_count),
            TourResponse::Tours { tours } => Some(tours.len()),
            _ => None,
        }
    }
}

/// The background owner of the store: services every request against
/// the single persisted collection.
///
/// Store failures never escape as errors; they come back as a
/// [`TourResponse::Failure`] so the invoking surface can show a
/// notification and keep its prior state.
pub struct MessageHandler<K> {
    store: TourStore<K>,
}

impl<K: KeyValueStore> MessageHandler<K> {
    pub fn new(store: TourStore<K>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TourStore<K> {
        &self.store
    }

    pub async fn handle(&self, request: TourRequest) -> TourResponse {
        match request {
            TourRequest::AddTour { tour_data } => match self.store.append(tour_data).await {
                Ok(outcome) => TourResponse::Mutation {
                    success: true,
                    tour_count: outcome.count,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "add tour failed");
                    TourResponse::failure(err)
                }
            },

            TourRequest::GetTours => match self.store.list().await {
                Ok(tours) => TourResponse::Tours { tours },
                Err(err) => {
                    tracing::warn!(error = %err, "list tours failed");
                    TourResponse::failure(err)
                }
            },

            TourRequest::DeleteTour { tour_id } => match self.store.remove(&tour_id).await {
                Ok(count) => TourResponse::Mutation {
                    success: true,
                    tour_count: count,
                },
                Err(err) => {
                    tracing::warn!(tour_id = %tour_id, error = %err, "delete tour failed");
                    TourResponse::failure(err)
                }
            },

            TourRequest::ClearAllTours => match self.store.clear().await {
                Ok(()) => TourResponse::Cleared { success: true },
                Err(err) => {
                    tracing::warn!(error = %err, "clear tours failed");
                    TourResponse::failure(err)
                }
            },
        }
    }
}

/// The opaque request/response transport between surfaces and the
/// background handler. At most one in-flight response per request.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn request(&self, request: TourRequest) -> ChannelResult<TourResponse>;
}

/// In-process channel: every surface holds a clone pointing at the one
/// shared handler, mirroring how extension surfaces share a background
/// worker.
pub struct LocalChannel<K> {
    handler: Arc<MessageHandler<K>>,
}

impl<K> LocalChannel<K> {
    pub fn new(handler: Arc<MessageHandler<K>>) -> Self {
        Self { handler }
    }
}

impl<K> Clone for LocalChannel<K> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

#[async_trait]
impl<K: KeyValueStore> MessageChannel for LocalChannel<K> {
    async fn request(&self, request: TourRequest) -> ChannelResult<TourResponse> {
        Ok(self.handler.handle(request).await)
    }
}

/// Fetch the current collection over a channel, unwrapping the
/// response shape.
pub async fn fetch_tours<C: MessageChannel + ?Sized>(
    channel: &C,
) -> ChannelResult<Vec<TourRecord>> {
    let response = channel.request(TourRequest::GetTours).await?;
    response
        .into_tours()
        .ok_or(ChannelError::UnexpectedResponse { expected: "tours" })
}
