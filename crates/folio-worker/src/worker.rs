//! The analysis worker task.

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use folio_core::{deep_estimate, fast_estimate};

use crate::envelope::{AnalysisRequest, AnalysisResponse, PassKind};

/// Submission failure: the worker task has shut down.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("analysis worker is no longer running")]
    WorkerGone,
}

/// Handle for submitting analysis requests.
///
/// Each request runs independently; responses arrive on the stream
/// returned by [`AnalysisWorker::spawn`] in completion order, keyed by
/// correlation id. There is no cancellation: a caller that loses
/// interest simply discards the eventual response.
#[derive(Clone)]
pub struct AnalysisWorker {
    tx: mpsc::UnboundedSender<AnalysisRequest>,
}

impl AnalysisWorker {
    /// Spawn the worker task and return a submit handle plus the
    /// response stream. Dropping all handles shuts the worker down once
    /// in-flight requests complete.
    pub fn spawn() -> (Self, mpsc::UnboundedReceiver<AnalysisResponse>) {
        let (req_tx, mut req_rx) = mpsc::unbounded_channel::<AnalysisRequest>();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel::<AnalysisResponse>();

        tokio::spawn(async move {
            while let Some(request) = req_rx.recv().await {
                let resp_tx = resp_tx.clone();
                // Requests are independent and stateless; each gets its
                // own task so a slow deep pass never queues behind
                // another file's analysis.
                tokio::spawn(async move {
                    let response = handle_request(request).await;
                    // A closed receiver means the caller abandoned
                    // interest; drop the response.
                    let _ = resp_tx.send(response);
                });
            }
            debug!("analysis worker shutting down");
        });

        (Self { tx: req_tx }, resp_rx)
    }

    /// Submit a request. The response carrying the same correlation id
    /// arrives on the response stream.
    pub fn submit(&self, request: AnalysisRequest) -> Result<(), SubmitError> {
        self.tx.send(request).map_err(|_| SubmitError::WorkerGone)
    }
}

async fn handle_request(request: AnalysisRequest) -> AnalysisResponse {
    if let Some(message) = validate(&request) {
        warn!(id = %request.id, %message, "rejecting malformed analysis request");
        return AnalysisResponse::Error {
            id: request.id,
            message,
        };
    }

    let AnalysisRequest {
        kind,
        id,
        buffer,
        file_name,
        base_price_per_page,
    } = request;

    match kind {
        PassKind::FastPass => {
            let result = fast_estimate(&buffer, &file_name, base_price_per_page);
            AnalysisResponse::FastPassDone { id, result }
        }
        PassKind::DeepPass => {
            // Deep parsing is CPU-bound; keep it off the async executor.
            let join = tokio::task::spawn_blocking(move || {
                deep_estimate(&buffer, &file_name, base_price_per_page)
            })
            .await;

            match join {
                Ok(result) => AnalysisResponse::DeepPassDone { id, result },
                Err(e) => AnalysisResponse::Error {
                    id,
                    message: format!("deep pass task failed: {e}"),
                },
            }
        }
    }
}

fn validate(request: &AnalysisRequest) -> Option<String> {
    if request.id.is_empty() {
        return Some("request id must not be empty".to_string());
    }
    if request.base_price_per_page < Decimal::ZERO {
        return Some("basePricePerPage must not be negative".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use folio_core::{DensityTier, Phase};

    fn request(kind: PassKind, id: &str, buffer: &[u8], file_name: &str) -> AnalysisRequest {
        AnalysisRequest {
            kind,
            id: id.to_string(),
            buffer: buffer.to_vec(),
            file_name: file_name.to_string(),
            base_price_per_page: Decimal::TEN,
        }
    }

    #[tokio::test]
    async fn test_fast_pass_round_trip() {
        let (worker, mut responses) = AnalysisWorker::spawn();
        worker
            .submit(request(PassKind::FastPass, "a1", b"/Count 3", "quote.pdf"))
            .unwrap();

        let response = responses.recv().await.unwrap();
        assert_eq!(response.id(), "a1");
        match response {
            AnalysisResponse::FastPassDone { result, .. } => {
                assert_eq!(result.total_pages, 3);
                assert_eq!(result.phase, Phase::Fast);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deep_pass_on_malformed_pdf_still_completes() {
        let (worker, mut responses) = AnalysisWorker::spawn();
        worker
            .submit(request(PassKind::DeepPass, "d1", b"garbage", "broken.pdf"))
            .unwrap();

        let response = responses.recv().await.unwrap();
        match response {
            AnalysisResponse::DeepPassDone { id, result } => {
                assert_eq!(id, "d1");
                assert_eq!(result.total_pages, 1);
                assert_eq!(result.pages[0].density, DensityTier::High);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_matched_by_id() {
        let (worker, mut responses) = AnalysisWorker::spawn();
        worker
            .submit(request(PassKind::FastPass, "file-1", b"/Count 2", "a.pdf"))
            .unwrap();
        worker
            .submit(request(PassKind::FastPass, "file-2", b"/Count 5", "b.pdf"))
            .unwrap();

        let mut pages_by_id = std::collections::HashMap::new();
        for _ in 0..2 {
            let response = responses.recv().await.unwrap();
            let pages = response.result().unwrap().total_pages;
            pages_by_id.insert(response.id().to_string(), pages);
        }

        assert_eq!(pages_by_id["file-1"], 2);
        assert_eq!(pages_by_id["file-2"], 5);
    }

    #[tokio::test]
    async fn test_negative_base_price_yields_error_response() {
        let (worker, mut responses) = AnalysisWorker::spawn();
        let mut req = request(PassKind::FastPass, "bad-1", b"", "x.pdf");
        req.base_price_per_page = Decimal::NEGATIVE_ONE;
        worker.submit(req).unwrap();

        let response = responses.recv().await.unwrap();
        match response {
            AnalysisResponse::Error { id, message } => {
                assert_eq!(id, "bad-1");
                assert!(message.contains("basePricePerPage"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let (worker, mut responses) = AnalysisWorker::spawn();
        worker
            .submit(request(PassKind::FastPass, "", b"", "x.pdf"))
            .unwrap();

        let response = responses.recv().await.unwrap();
        assert!(matches!(response, AnalysisResponse::Error { .. }));
    }
}
