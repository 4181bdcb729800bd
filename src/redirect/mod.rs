//! Redirect execution.
//!
//! # Data Flow
//! ```text
//! DecisionResult
//!     → Redirect(url): navigator.rs (print / opener command)
//!     → NoAction: nothing, current page stays
//! ```
//!
//! # Design Decisions
//! - Navigation ends the run; nothing else happens after it
//! - Navigation failures are reported, not retried

pub mod navigator;

pub use navigator::{CommandNavigator, ConfiguredNavigator, Navigator, PrintNavigator, RedirectError};

use crate::decision::DecisionResult;

/// Act on a decision. Returns true if a navigation was performed.
pub async fn execute<N: Navigator>(
    result: &DecisionResult,
    navigator: &N,
) -> Result<bool, RedirectError> {
    match result {
        DecisionResult::Redirect(url) => {
            tracing::info!(url = %url, "Redirecting");
            navigator.navigate(url).await?;
            Ok(true)
        }
        DecisionResult::NoAction => Ok(false),
    }
}
