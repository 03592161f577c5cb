//! Read-only diagnostics of wired pathways.
//!
//! Reads the current LayerZero configuration of the source OApp back from chain and reports every
//! difference from what a wiring run would set, without sending anything.

mod layerzero;

pub use layerzero::{PathwayDiagnostics, PathwayState, inspect_pathway};

use crate::{contracts::IOApp, topology::Plan};
use alloy::providers::DynProvider;
use eyre::Result;
use futures_util::future::join_all;
use tracing::{info, warn};

/// Aggregated diagnostic results
#[derive(Debug, Default)]
pub struct DiagnosticsReport {
    /// Source chain key.
    pub source: String,
    /// Diagnostics for each destination
    pub pathways: Vec<PathwayDiagnostics>,
    /// Global warning messages
    pub global_warnings: Vec<String>,
    /// Global error messages
    pub global_errors: Vec<String>,
}

impl DiagnosticsReport {
    /// Returns true if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.global_errors.is_empty() || self.pathways.iter().any(|p| !p.errors.is_empty())
    }

    /// Returns true if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.global_warnings.is_empty() || self.pathways.iter().any(|p| !p.warnings.is_empty())
    }

    /// Logs all messages.
    pub fn log(&self) {
        for error in &self.global_errors {
            tracing::error!(source = %self.source, "Diagnostic error: {}", error);
        }
        for warning in &self.global_warnings {
            warn!(source = %self.source, "Diagnostic warning: {}", warning);
        }

        for pathway in &self.pathways {
            for error in &pathway.errors {
                tracing::error!(
                    source = %self.source,
                    destination = %pathway.destination,
                    "Diagnostic error: {}",
                    error
                );
            }
            for warning in &pathway.warnings {
                warn!(
                    source = %self.source,
                    destination = %pathway.destination,
                    "Diagnostic warning: {}",
                    warning
                );
            }
        }

        if self.has_errors() {
            tracing::error!("Diagnostics failed with errors. The pathways need to be wired.");
        } else if self.has_warnings() {
            warn!("Diagnostics completed with warnings.");
        } else {
            info!("All pathways are wired.");
        }
    }
}

/// Inspects every pathway of `plan` on the source chain.
pub async fn run_diagnostics(plan: &Plan, provider: &DynProvider) -> Result<DiagnosticsReport> {
    let source = &plan.source;
    let mut report = DiagnosticsReport { source: source.chain_key.clone(), ..Default::default() };

    let Some(oapp) = source.token else {
        report.global_errors.push(format!("No token address for {}", source.chain_key));
        return Ok(report);
    };

    let token = IOApp::new(oapp, provider);
    match token.endpoint().call().await {
        Ok(endpoint) if endpoint != source.endpoint => report.global_errors.push(format!(
            "OApp {oapp} uses endpoint {endpoint}, expected {}",
            source.endpoint
        )),
        Ok(_) => {}
        Err(err) => report.global_errors.push(format!("Failed to read endpoint of {oapp}: {err}")),
    }
    match token.owner().call().await {
        Ok(owner) => info!(%oapp, %owner, "OApp owner"),
        Err(err) => report.global_warnings.push(format!("Failed to read owner of {oapp}: {err}")),
    }

    report.pathways = join_all(
        plan.destinations.iter().map(|dest| inspect_pathway(provider, source, dest, oapp)),
    )
    .await;

    Ok(report)
}
