//! Load failure reporting

use super::RequestId;
use crate::utils::loader::LoadError;
use std::fmt;

/// Human-readable description of a failed load
#[derive(Debug)]
pub struct LoadReport {
    pub url: String,
    pub request: RequestId,
    pub error: LoadError,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load model from {}: {}", self.url, self.error)
    }
}

/// Destination for load failure reports
pub trait ReportSink: Send + Sync {
    fn report(&self, report: &LoadReport);
}

/// Logs reports at error level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ReportSink for TracingReporter {
    fn report(&self, report: &LoadReport) {
        tracing::error!(
            url = %report.url,
            request = %report.request,
            error = %report.error,
            "{report}"
        );
    }
}

impl<F> ReportSink for F
where
    F: Fn(&LoadReport) + Send + Sync,
{
    fn report(&self, report: &LoadReport) {
        self(report)
    }
}
