use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode, Url,
};
use serde::Serialize;

use crate::transport::ApiRequest;

use super::ClientError;

/// Sent in place of the configured token when sandbox mode is on.
pub const SANDBOX_AUTHORIZATION: &str = "Bearer sandboxtoken";

const SANDBOX_HEADER: &str = "sandbox";

/// The bank endpoints this client talks to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum Endpoint<'a> {
    AccountInfo,
    OperationHistory { account_id: &'a str },
    AccountBalance { account_id: &'a str },
}

impl Endpoint<'_> {
    fn segments(&self) -> Vec<&str> {
        match *self {
            Endpoint::AccountInfo => vec!["v1", "account-info"],
            Endpoint::OperationHistory { account_id } => {
                vec!["v1", "operation-history", account_id]
            }
            Endpoint::AccountBalance { account_id } => {
                vec!["v1", "account-info", "balance", account_id]
            }
        }
    }

    pub(crate) fn method(&self) -> Method {
        Method::POST
    }

    pub(crate) fn expected_status(&self) -> StatusCode {
        StatusCode::OK
    }
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Credentials {
    Token(String),
    Sandbox,
}

/// Turns an endpoint and an optional payload into an authenticated request.
#[derive(Debug, Clone)]
pub(crate) struct RequestBuilder {
    base_url: String,
    credentials: Credentials,
}

impl RequestBuilder {
    pub(crate) fn new(base_url: String, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
        }
    }

    pub(crate) fn build<T: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint<'_>,
        payload: Option<&T>,
    ) -> Result<ApiRequest, ClientError> {
        let body = payload
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| ClientError::RequestBuild(format!("failed to marshal json: {err}")))?;
        Ok(ApiRequest {
            method: endpoint.method(),
            url: self.url(endpoint)?,
            headers: self.headers()?,
            body,
        })
    }

    fn url(&self, endpoint: &Endpoint<'_>) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            ClientError::RequestBuild(format!("invalid base url {}: {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::RequestBuild(format!("base url {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match &self.credentials {
            Credentials::Token(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                    ClientError::RequestBuild("token is not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Credentials::Sandbox => {
                headers.insert(AUTHORIZATION, HeaderValue::from_static(SANDBOX_AUTHORIZATION));
                headers.insert(SANDBOX_HEADER, HeaderValue::from_static("on"));
            }
        }
        Ok(headers)
    }
}
