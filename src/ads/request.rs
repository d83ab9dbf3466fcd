use super::error::AdsError;

/// Maximum number of retries before a rate-limited or transient failure is
/// reported to the caller.
const MAX_ATTEMPTS: u32 = 5;

/// Fallback wait when the server rate-limits without a usable `Retry-After`.
const DEFAULT_BACKOFF_SECONDS: u64 = 2;

/// Makes a GET request to the ADS search endpoint and deserializes the response.
///
/// This function constructs the query from the Solr query string and the list of
/// fields to return, and then sends the request using `request_response`.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` to use for the request.
/// * `token`: The ADS API bearer token.
/// * `query`: The Solr query string (e.g. `doi:"10.1051/..."`).
/// * `fields`: A slice of field names to include in the response documents.
/// * `rows`: The maximum number of documents to return.
///
/// # Returns
///
/// A `Result` containing the deserialized response body, or an `AdsError`.
pub async fn request_and_parse<T>(
    client: &reqwest::Client,
    token: &str,
    query: &str,
    fields: &[&str],
    rows: usize,
) -> Result<T, AdsError>
where
    T: serde::de::DeserializeOwned,
{
    let response = request_response(client, token, query, fields, rows).await?;
    let parsed = response.json::<T>().await?;

    Ok(parsed)
}

/// Sends a GET request to the ADS search endpoint.
///
/// This function handles sending the HTTP request with the bearer Authorization
/// header, and retrying with a capped backoff when the API rate-limits (HTTP 429)
/// or fails transiently (5xx). The wait time follows the `Retry-After` header
/// when present.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` to use for the request.
/// * `token`: The ADS API bearer token.
/// * `query`: The Solr query string.
/// * `fields`: A slice of field names to include in the response documents.
/// * `rows`: The maximum number of documents to return.
///
/// # Returns
///
/// A `Result` containing the `reqwest::Response` if successful (status 200),
/// or an `AdsError` once the retry budget is exhausted.
async fn request_response(
    client: &reqwest::Client,
    token: &str,
    query: &str,
    fields: &[&str],
    rows: usize,
) -> Result<reqwest::Response, AdsError> {
    let base_url: &str = "https://api.adsabs.harvard.edu/v1/search/query";
    let fl = fields.join(",");
    let rows = rows.to_string();

    let mut attempt = 0;
    loop {
        let response = client
            .get(base_url)
            .header("Authorization", format!("Bearer {token}"))
            .query(&[("q", query), ("fl", fl.as_str()), ("rows", rows.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == 200 {
            return Ok(response);
        }

        log::debug!("{:?}", response.headers());

        attempt += 1;
        if attempt >= MAX_ATTEMPTS || !(status == 429 || status.is_server_error()) {
            return Err(AdsError::HttpStatus(status));
        }

        let seconds_to_wait = match response.headers().get("Retry-After") {
            Some(value) => value.to_str()?.parse::<u64>()?,
            None => DEFAULT_BACKOFF_SECONDS * u64::from(attempt),
        };

        async_std::task::sleep(std::time::Duration::from_secs(seconds_to_wait)).await;
    }
}
