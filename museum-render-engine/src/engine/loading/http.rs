use std::future::Future;

use bevy::tasks::{ConditionalSend, IoTaskPool, Task};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::engine::assets::item::ItemFeed;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("async runtime unavailable: {0}")]
    Runtime(String),
}

/// Body returned by the API alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// GET the item feed. A non-2xx status is an error even when the body parses.
pub async fn fetch_feed(url: Url) -> Result<ItemFeed, FetchError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Load failed").to_owned());
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Raw media bytes plus the declared content type, if any.
pub struct MediaBytes {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub async fn fetch_bytes(url: Url) -> Result<MediaBytes, FetchError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Load failed").to_owned(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = response.bytes().await?.to_vec();

    Ok(MediaBytes {
        bytes,
        content_type,
    })
}

/// Spawn a request on the IO pool.
///
/// In the browser the future runs on the page's event loop (fetch API).
/// Natively reqwest needs a tokio reactor, so the future is driven by a
/// current-thread runtime owned by the pool thread.
pub fn spawn_request<T, E, F>(request: F) -> Task<Result<T, E>>
where
    T: ConditionalSend + 'static,
    E: From<FetchError> + ConditionalSend + 'static,
    F: Future<Output = Result<T, E>> + ConditionalSend + 'static,
{
    let pool = IoTaskPool::get();

    #[cfg(target_arch = "wasm32")]
    {
        pool.spawn(request)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        pool.spawn(async move {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| E::from(FetchError::Runtime(e.to_string())))?;
            runtime.block_on(request)
        })
    }
}
