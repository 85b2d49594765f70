use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {0} failed: {1}")]
    Request(String, reqwest::Error),

    #[error("{0} answered with status {1}")]
    BadStatus(String, reqwest::StatusCode),
}

/// Fetch the list body. Anything other than a 2xx response with a readable
/// body is fatal; the caller writes no files before this returns Ok.
pub fn download(url: &str) -> Result<String, FetchError> {
    let response =
        reqwest::blocking::get(url).map_err(|err| FetchError::Request(url.to_owned(), err))?;

    if !response.status().is_success() {
        return Err(FetchError::BadStatus(url.to_owned(), response.status()));
    }

    response
        .text()
        .map_err(|err| FetchError::Request(url.to_owned(), err))
}
