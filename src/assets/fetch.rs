use anyhow::Context;

use crate::foundation::error::GridResult;

/// Blocking client without a request timeout; slow hosts delay the render instead of failing it.
pub(crate) fn build_client() -> GridResult<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Option::<std::time::Duration>::None)
        .user_agent(concat!("reviewgrid/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client")?;
    Ok(client)
}

pub(crate) fn fetch_bytes(client: &reqwest::blocking::Client, url: &str) -> GridResult<Vec<u8>> {
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;
    let bytes = resp
        .bytes()
        .with_context(|| format!("read body of {url}"))?;
    tracing::debug!(url, len = bytes.len(), "fetched remote image");
    Ok(bytes.to_vec())
}
