//! Asynchronous analysis worker for folio.
//!
//! Callers submit [`AnalysisRequest`] envelopes keyed by an opaque
//! correlation id and read [`AnalysisResponse`] envelopes off a response
//! stream, matching completions to in-flight requests by id. Fast and
//! deep passes for the same file are independent invocations with no
//! shared state; deep passes run on the blocking thread pool so large
//! parses never stall the async executor.

mod envelope;
mod worker;

pub use envelope::{AnalysisRequest, AnalysisResponse, PassKind};
pub use worker::{AnalysisWorker, SubmitError};
