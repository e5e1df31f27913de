use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method};

use crate::{
    dao::storage::{DocumentStore, StorageResult},
    state::pool::Collection,
};

use super::{
    config::EndpointConfig,
    error::{RemoteError, RemoteResult},
};

/// [`DocumentStore`] backed by a single remote JSON document.
#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    url: Arc<str>,
    auth: Option<(Arc<str>, Arc<str>)>,
}

impl HttpDocumentStore {
    /// Build a client for the configured endpoint.
    pub fn new(config: EndpointConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| RemoteError::ClientBuilder { source })?;

        let url = Arc::<str>::from(config.url.trim_end_matches('/'));
        let auth = config
            .username
            .zip(config.password)
            .map(|(u, p)| (Arc::<str>::from(u), Arc::<str>::from(p)));

        Ok(Self { client, url, auth })
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url.as_ref());
        if let Some((ref user, ref pass)) = self.auth {
            builder.basic_auth(user.as_ref(), Some(pass.as_ref()))
        } else {
            builder
        }
    }

    async fn fetch(&self) -> RemoteResult<Collection> {
        let response =
            self.request(Method::GET)
                .send()
                .await
                .map_err(|source| RemoteError::RequestSend {
                    url: self.url.to_string(),
                    source,
                })?;

        if !response.status().is_success() {
            return Err(RemoteError::RequestStatus {
                url: self.url.to_string(),
                status: response.status(),
            });
        }

        response
            .json::<Collection>()
            .await
            .map_err(|source| RemoteError::DecodeResponse {
                url: self.url.to_string(),
                source,
            })
    }

    async fn push(&self, collection: &Collection) -> RemoteResult<()> {
        let response = self
            .request(Method::POST)
            .json(collection)
            .send()
            .await
            .map_err(|source| RemoteError::RequestSend {
                url: self.url.to_string(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RemoteError::RequestStatus {
                url: self.url.to_string(),
                status: response.status(),
            })
        }
    }
}

impl DocumentStore for HttpDocumentStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Collection>> {
        let store = self.clone();
        Box::pin(async move { store.fetch().await.map_err(Into::into) })
    }

    fn save(&self, collection: Collection) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.push(&collection).await.map_err(Into::into) })
    }
}
