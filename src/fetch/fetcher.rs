use std::collections::HashMap;
use std::time::Duration;

use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::constants::{PKG_VERSION, SDK_UA_HEADER};
use crate::errors::ClientError;
use crate::errors::ErrorKind::*;
use crate::fetch::fetcher::FetchResponse::{Failed, Fetched};
use crate::model::toggle::{snapshot_from_json, Snapshot};

pub enum FetchResponse {
    Fetched(Snapshot),
    Failed(ClientError),
}

pub struct Fetcher {
    source_url: String,
    http_client: reqwest::Client,
}

impl Fetcher {
    pub fn new(
        url: &str,
        headers: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            SDK_UA_HEADER,
            format!("ToggleBox-Rust/{PKG_VERSION}")
                .parse()
                .map_err(|err| {
                    ClientError::new(InvalidHeader, format!("Invalid user agent header. ({err})"))
                })?,
        );
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                ClientError::new(
                    InvalidHeader,
                    format!("Invalid HTTP header name '{name}'. ({err})"),
                )
            })?;
            let header_value = value.parse::<HeaderValue>().map_err(|err| {
                ClientError::new(
                    InvalidHeader,
                    format!("Invalid HTTP header value for '{name}'. ({err})"),
                )
            })?;
            default_headers.insert(header_name, header_value);
        }
        Ok(Self {
            source_url: url.to_owned(),
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .default_headers(default_headers)
                .build()
                .map_err(|err| {
                    ClientError::new(
                        HttpClientInitFailure,
                        format!("Failed to initialize the HTTP client. ({err})"),
                    )
                })?,
        })
    }

    pub async fn fetch(&self) -> FetchResponse {
        let result = self.http_client.get(&self.source_url).send().await;

        match result {
            Ok(response) => match response.status().as_u16() {
                200 => {
                    debug!("Fetch was successful: new toggle data received");
                    match response.text().await {
                        Ok(body) => match snapshot_from_json(body.as_str()) {
                            Ok(snapshot) => Fetched(snapshot),
                            Err(parse_error) => {
                                let msg = format!("Fetching toggle data was successful but the HTTP response content was invalid. {parse_error}");
                                error!(event_id = InvalidResponseContent.as_u8(); "{}", msg);
                                Failed(ClientError::new(InvalidResponseContent, msg))
                            }
                        },
                        Err(body_error) => {
                            let msg = format!("Fetching toggle data was successful but the HTTP response content was invalid. {body_error}");
                            error!(event_id = InvalidResponseContent.as_u8(); "{}", msg);
                            Failed(ClientError::new(InvalidResponseContent, msg))
                        }
                    }
                }
                code => {
                    let msg = format!("Unexpected HTTP response was received while trying to fetch toggle data. Status code: {code}");
                    error!(event_id = UnexpectedHttpResponse.as_u8(); "{}", msg);
                    Failed(ClientError::new(UnexpectedHttpResponse, msg))
                }
            },
            Err(error) => {
                if error.is_timeout() {
                    let msg = "Request timed out while trying to fetch toggle data.".to_owned();
                    error!(event_id = HttpRequestTimeout.as_u8(); "{}", msg);
                    Failed(ClientError::new(HttpRequestTimeout, msg))
                } else {
                    let msg = format!("Unexpected error occurred while trying to fetch toggle data. It is most likely due to a local network issue. Please make sure your application can reach the toggle source over HTTP. {error}");
                    error!(event_id = HttpRequestFailure.as_u8(); "{}", msg);
                    Failed(ClientError::new(HttpRequestFailure, msg))
                }
            }
        }
    }
}

#[cfg(test)]
mod fetch_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::constants::test_constants::MOCK_PATH;
    use crate::constants::{PKG_VERSION, SDK_UA_HEADER};
    use crate::errors::ErrorKind;
    use crate::fetch::fetcher::FetchResponse::Fetched;
    use crate::fetch::fetcher::{FetchResponse, Fetcher};

    #[tokio::test]
    async fn fetch_http() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", MOCK_PATH)
            .with_status(200)
            .match_header(
                SDK_UA_HEADER,
                format!("ToggleBox-Rust/{PKG_VERSION}").as_str(),
            )
            .with_body(r#"{"features": [{"name": "t", "enabled": true}]}"#)
            .create_async()
            .await;

        let fetcher = Fetcher::new(
            format!("{}{MOCK_PATH}", server.url()).as_str(),
            &HashMap::default(),
            Duration::from_secs(30),
        )
        .unwrap();
        let response = fetcher.fetch().await;
        match response {
            Fetched(snapshot) => assert!(snapshot.get("t").unwrap().enabled),
            _ => panic!(),
        }
    }

    #[tokio::test]
    async fn fetch_http_custom_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", MOCK_PATH)
            .with_status(200)
            .match_header("authorization", "token-1")
            .with_body(r#"{"features": []}"#)
            .create_async()
            .await;

        let fetcher = Fetcher::new(
            format!("{}{MOCK_PATH}", server.url()).as_str(),
            &HashMap::from([("Authorization".to_owned(), "token-1".to_owned())]),
            Duration::from_secs(30),
        )
        .unwrap();
        let response = fetcher.fetch().await;
        assert!(matches!(response, Fetched(_)));
    }

    #[tokio::test]
    async fn fetch_http_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", MOCK_PATH)
            .with_status(500)
            .create_async()
            .await;

        let fetcher = Fetcher::new(
            format!("{}{MOCK_PATH}", server.url()).as_str(),
            &HashMap::default(),
            Duration::from_secs(30),
        )
        .unwrap();
        let response = fetcher.fetch().await;
        match response {
            FetchResponse::Failed(err) => {
                assert_eq!(err.kind, ErrorKind::UnexpectedHttpResponse);
                assert_eq!(format!("{err}").as_str(), "Unexpected HTTP response was received while trying to fetch toggle data. Status code: 500");
            }
            _ => panic!(),
        }
    }

    #[tokio::test]
    async fn fetch_http_body_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", MOCK_PATH)
            .with_status(200)
            .with_body(r#"{"features": ["#)
            .create_async()
            .await;

        let fetcher = Fetcher::new(
            format!("{}{MOCK_PATH}", server.url()).as_str(),
            &HashMap::default(),
            Duration::from_secs(30),
        )
        .unwrap();
        let response = fetcher.fetch().await;
        match response {
            FetchResponse::Failed(err) => {
                assert_eq!(err.kind, ErrorKind::InvalidResponseContent);
            }
            _ => panic!(),
        }
    }

    #[test]
    fn invalid_header_rejected() {
        let result = Fetcher::new(
            "https://example.com/toggles",
            &HashMap::from([("bad header".to_owned(), "v".to_owned())]),
            Duration::from_secs(30),
        );
        assert!(result.is_err_and(|err| err.kind == ErrorKind::InvalidHeader));
    }
}
