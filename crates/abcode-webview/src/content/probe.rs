//! Dev-server reachability probe.

use std::time::Duration;

use tracing::debug;

/// Check whether the dev server at `url` answers `200 OK` within `timeout`.
///
/// Connection errors, timeouts, and any other status all count as
/// "not running". This never returns an error.
pub async fn probe_dev_server(url: &str, timeout: Duration) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "dev server probe: client build failed");
            return false;
        }
    };

    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            debug!(url, %status, "dev server probe answered");
            status == reqwest::StatusCode::OK
        }
        Err(e) => {
            debug!(url, error = %e, "dev server probe failed");
            false
        }
    }
}
