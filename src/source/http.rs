//! Opening an NDJSON source as an incremental byte stream.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use super::Source;
use crate::model::StreamError;

/// Incremental body reader: raw chunks in arrival order.
pub type ByteStream = BoxStream<'static, Result<Bytes, StreamError>>;

/// Open `source` and return a reader over its body.
///
/// For HTTP sources a non-success status is a failure; the body of such a
/// response is never read.
///
/// # Errors
///
/// - `StreamError::Request` if the request could not be sent
/// - `StreamError::Status` for a non-2xx response
/// - `StreamError::Open` if a local file cannot be opened
pub async fn open(source: &Source) -> Result<ByteStream, StreamError> {
    match source {
        Source::Http(url) => open_http(url.as_str()).await,
        Source::File(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| StreamError::Open {
                    path: path.clone(),
                    source,
                })?;
            info!(path = ?path, "Opened NDJSON file");
            Ok(ReaderStream::new(file).map(|chunk| chunk.map_err(StreamError::Read)).boxed())
        }
    }
}

async fn open_http(url: &str) -> Result<ByteStream, StreamError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| StreamError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StreamError::Status {
            url: url.to_string(),
            status,
        });
    }

    info!(%url, %status, content_length = ?response.content_length(), "Opened NDJSON stream");
    let stream = response.bytes_stream().map(|chunk| {
        chunk.map_err(|err| {
            debug!(error = %err, "Body read failed");
            StreamError::Read(std::io::Error::other(err))
        })
    });
    Ok(stream.boxed())
}
