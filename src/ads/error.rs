use reqwest::header::ToStrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdsError {
    #[error("request error")]
    Request(#[from] reqwest::Error),
    #[error("parse int error")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("request to str error")]
    RequestToStr(#[from] ToStrError),
    #[error("serde_json error")]
    SerdeJson(#[from] serde_json::Error),
    #[error("no document matches DOI {0}")]
    UnresolvedDoi(String),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),
}
