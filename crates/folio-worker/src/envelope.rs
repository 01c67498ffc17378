//! Request/response envelopes for the analysis worker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::AnalysisResult;

/// Which estimation pass a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassKind {
    /// Immediate heuristic estimate.
    FastPass,
    /// Full-parse refinement; supersedes the fast pass when it arrives.
    DeepPass,
}

/// An analysis request. The `id` is an opaque correlation identifier
/// chosen by the caller and echoed back on the response.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub kind: PassKind,
    pub id: String,
    /// Full file content, already loaded in memory.
    pub buffer: Vec<u8>,
    pub file_name: String,
    pub base_price_per_page: Decimal,
}

/// A completion or error for a previously submitted request.
///
/// Estimation itself never fails (unparseable content degrades to a
/// fallback result); `Error` covers the request/response protocol only,
/// e.g. a malformed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnalysisResponse {
    #[serde(rename_all = "camelCase")]
    FastPassDone { id: String, result: AnalysisResult },
    #[serde(rename_all = "camelCase")]
    DeepPassDone { id: String, result: AnalysisResult },
    Error { id: String, message: String },
}

impl AnalysisResponse {
    /// Correlation id this response answers.
    pub fn id(&self) -> &str {
        match self {
            AnalysisResponse::FastPassDone { id, .. }
            | AnalysisResponse::DeepPassDone { id, .. }
            | AnalysisResponse::Error { id, .. } => id,
        }
    }

    /// The carried result, if this is a completion.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisResponse::FastPassDone { result, .. }
            | AnalysisResponse::DeepPassDone { result, .. } => Some(result),
            AnalysisResponse::Error { .. } => None,
        }
    }
}
