use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, info_span, warn};
use ureq::Agent;

use crate::error::PbpError;

/// Blocking HTTP agent shared by the upstream clients. The timeout covers the whole call.
pub fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// GET `url` and decode the JSON body into `T`. The body is read to the end before decoding.
pub fn get_json<T: DeserializeOwned>(agent: &Agent, url: &str) -> Result<T, PbpError> {
    let response_result = {
        let _span = info_span!("upstream_fetch", url = %url).entered();
        agent.get(url).call()
    };
    let response = match response_result {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(status)) => {
            warn!(status, url = %url, "Upstream returned non-success status");
            return Err(PbpError::Status { url: url.to_string(), status });
        }
        Err(e) => {
            warn!(error = %e, url = %url, "Upstream request failed");
            return Err(PbpError::Network { url: url.to_string(), source: e });
        }
    };

    let mut body_reader = response.into_body();
    let body = body_reader.read_to_string().map_err(|e| {
        warn!(error = %e, url = %url, "Failed to read upstream response body");
        PbpError::Network { url: url.to_string(), source: e }
    })?;
    info!(url = %url, bytes = body.len(), "Fetched upstream document");

    serde_json::from_str::<T>(&body).map_err(|e| {
        warn!(error = %e, url = %url, "Failed to decode upstream response");
        PbpError::Decode { url: url.to_string(), source: e }
    })
}
