pub mod options;
mod request_builder;
mod response_handler;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, debug_span, error, info_span, Instrument, Span};

use crate::{
    model::{AccountInfo, Operation, OperationHistorySearch, TimestampCodec},
    transport::{ApiResponse, HttpExecutor, ReqwestExecutor, TransportError},
    wire::{AccountInfoRecord, CodecError, OperationRecord},
};

pub use options::{ClientOptions, OptionsError, API_URL};
pub use request_builder::SANDBOX_AUTHORIZATION;

use request_builder::{Credentials, Endpoint, RequestBuilder};
use response_handler::{decode_json, decode_number, expect_status};

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ClientError {
    #[error("failed to build the request: {0}")]
    RequestBuild(String),
    #[error("failed to do the request: {0}")]
    Transport(String),
    #[error("unexpected status code {code}")]
    UnexpectedStatus { code: u16 },
    #[error("failed to decode the response body: {0}")]
    Decode(String),
    #[error("invalid {domain}: {input}")]
    InvalidEnumValue { domain: &'static str, input: String },
    #[error("malformed timestamp: {input}")]
    MalformedTimestamp { input: String },
    #[error("malformed number: {input}")]
    MalformatedNumber { input: String },
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidEnumValue { domain, input } => {
                Self::InvalidEnumValue { domain, input }
            }
            CodecError::MalformedTimestamp { input } => Self::MalformedTimestamp { input },
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.0)
    }
}

/// Client of the bank's HTTP API.
///
/// Every call is a single POST with no retries. The client keeps no state
/// between calls, so one instance can be shared across tasks.
#[derive(Clone)]
pub struct Client {
    executor: Arc<dyn HttpExecutor + Send + Sync>,
    requests: RequestBuilder,
    timestamps: TimestampCodec,
    span: Span,
}

impl Client {
    pub fn new(options: ClientOptions) -> Self {
        let ClientOptions {
            executor,
            token,
            sandbox,
            span,
            timestamps,
            base_url,
        } = options;
        let credentials = if sandbox {
            Credentials::Sandbox
        } else {
            Credentials::Token(token)
        };
        Self {
            executor: executor.unwrap_or_else(|| Arc::new(ReqwestExecutor::default())),
            requests: RequestBuilder::new(
                base_url.unwrap_or_else(|| API_URL.to_string()),
                credentials,
            ),
            timestamps,
            span: span.unwrap_or_else(|| info_span!("bank_client", context = "modulbank")),
        }
    }

    pub fn timestamps(&self) -> &TimestampCodec {
        &self.timestamps
    }

    /// Companies and accounts visible to the token.
    pub async fn account_info(&self) -> Result<Vec<AccountInfo>, ClientError> {
        async {
            let response = self.exchange::<()>(Endpoint::AccountInfo, None).await?;
            let records: Vec<AccountInfoRecord> = decode_json(&response)?;
            records
                .into_iter()
                .map(|record| AccountInfo::from_wire(record, &self.timestamps))
                .collect::<Result<_, _>>()
                .map_err(codec_failure)
        }
        .instrument(debug_span!(parent: &self.span, "account_info"))
        .await
    }

    /// Operations of one account. `None` searches with the bank's defaults.
    pub async fn operation_history(
        &self,
        account_id: &str,
        search: Option<&OperationHistorySearch>,
    ) -> Result<Vec<Operation>, ClientError> {
        async {
            let body = search
                .cloned()
                .unwrap_or_default()
                .to_wire(&self.timestamps);
            let response = self
                .exchange(Endpoint::OperationHistory { account_id }, Some(&body))
                .await?;
            let records: Vec<OperationRecord> = decode_json(&response)?;
            records
                .into_iter()
                .map(|record| Operation::from_wire(record, &self.timestamps))
                .collect::<Result<_, _>>()
                .map_err(codec_failure)
        }
        .instrument(debug_span!(parent: &self.span, "operation_history", account_id))
        .await
    }

    pub async fn account_balance(&self, account_id: &str) -> Result<f64, ClientError> {
        async {
            let response = self
                .exchange::<()>(Endpoint::AccountBalance { account_id }, None)
                .await?;
            decode_number(&response)
        }
        .instrument(debug_span!(parent: &self.span, "account_balance", account_id))
        .await
    }

    async fn exchange<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint<'_>,
        payload: Option<&T>,
    ) -> Result<ApiResponse, ClientError> {
        let request = self.requests.build(&endpoint, payload).map_err(|err| {
            error!(error = %err, "failed to build request");
            err
        })?;
        debug!(contents = %request.dump(), "raw request");

        let response = self.executor.execute(request).await.map_err(|err| {
            error!(error = %err, "failed to do request");
            ClientError::from(err)
        })?;
        debug!(contents = %response.dump(), "raw response");

        expect_status(&response, endpoint.expected_status())?;
        Ok(response)
    }
}

fn codec_failure(err: CodecError) -> ClientError {
    error!(error = %err, "failed to decode body");
    err.into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use chrono::FixedOffset;
    use reqwest::header::AUTHORIZATION;
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    use crate::model::{
        BankAccountCategory, BankAccountStatus, Currency, OperationCategory,
        OperationHistorySearch, OperationStatus, TimestampCodec,
    };
    use crate::transport::tests::RecordingExecutor;

    use super::{Client, ClientError, ClientOptions};

    const ACCOUNT_INFO: &str = r#"[{
        "companyId": "c1",
        "companyName": "Acme",
        "bankAccounts": [{
            "id": "acc-1",
            "accountName": "Main",
            "balance": 1500.25,
            "bankBic": "044525092",
            "bankInn": "2204000595",
            "bankKpp": "771543001",
            "bankCorrespondentAccount": "30101810645250000092",
            "bankName": "MODULBANK",
            "beginDate": "2019-05-20T00:00:00",
            "category": "CheckingAccount",
            "currency": "RUR",
            "number": "40702810070010113722",
            "status": "New"
        }]
    }]"#;

    const OPERATIONS: &str = r#"[{
        "id": "op-1",
        "companyId": "c1",
        "status": "Received",
        "category": "Credit",
        "contragentName": "Customer LLC",
        "contragentInn": "7701234567",
        "contragentKpp": null,
        "contragentBankAccountNumber": "40702810900000000001",
        "contragentBankName": "Some Bank",
        "contragentBankBic": "044525225",
        "currency": "RUR",
        "amount": 5000.0,
        "amountWithCommission": 5000.0,
        "bankAccountNumber": "40702810070010113722",
        "paymentPurpose": "Payment for invoice 42",
        "executed": "2024-02-01T12:00:00",
        "created": "2024-02-01T11:59:00",
        "docNumber": "42",
        "kbk": "",
        "oktmo": "",
        "paymentBasis": "",
        "taxCode": "",
        "taxDocNum": "",
        "taxDocDate": "",
        "payerStatus": "",
        "uin": "0"
    }]"#;

    fn client(executor: &Arc<RecordingExecutor>, sandbox: bool) -> Client {
        Client::new(ClientOptions {
            executor: Some(executor.clone()),
            token: "secret".to_string(),
            sandbox,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn account_info_is_decoded() {
        let executor = Arc::new(RecordingExecutor::responding(200, ACCOUNT_INFO));
        let accounts = client(&executor, false).account_info().await.unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].company_name, "Acme");
        let account = &accounts[0].bank_accounts[0];
        assert_eq!(account.category, BankAccountCategory::CheckingAccount);
        assert_eq!(account.currency, Currency::Rur);
        assert_eq!(account.status, BankAccountStatus::New);

        let requests = executor.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.modulbank.ru/v1/account-info"
        );
        assert_eq!(requests[0].body, None);
        assert_eq!(requests[0].headers[AUTHORIZATION], "Bearer secret");
    }

    #[tokio::test]
    async fn operation_history_sends_the_search() {
        let executor = Arc::new(RecordingExecutor::responding(200, OPERATIONS));
        let search = OperationHistorySearch::default()
            .category(OperationCategory::Credit)
            .records(50);
        let operations = client(&executor, false)
            .operation_history("acc-1", Some(&search))
            .await
            .unwrap();

        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].status, OperationStatus::Received);
        assert_eq!(operations[0].contragent_kpp, "");

        let requests = executor.requests.lock().unwrap();
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.modulbank.ru/v1/operation-history/acc-1"
        );
        assert_eq!(
            requests[0].body.as_deref(),
            Some(br#"{"category":"Credit","records":50}"#.as_slice())
        );
    }

    #[tokio::test]
    async fn missing_search_sends_an_empty_object() {
        let executor = Arc::new(RecordingExecutor::responding(200, "[]"));
        let operations = client(&executor, false)
            .operation_history("acc-1", None)
            .await
            .unwrap();

        assert!(operations.is_empty());
        assert_eq!(
            executor.requests.lock().unwrap()[0].body.as_deref(),
            Some(b"{}".as_slice())
        );
    }

    #[tokio::test]
    async fn balance_is_read_from_a_bare_literal() {
        let executor = Arc::new(RecordingExecutor::responding(200, "1234.56"));
        let balance = client(&executor, false)
            .account_balance("acc-1")
            .await
            .unwrap();

        assert_eq!(balance, 1234.56);
        assert_eq!(
            executor.requests.lock().unwrap()[0].url.as_str(),
            "https://api.modulbank.ru/v1/account-info/balance/acc-1"
        );
    }

    #[template]
    #[rstest]
    #[case(403)]
    #[case(401)]
    #[case(500)]
    fn rejected_statuses(#[case] status: u16) {}

    #[apply(rejected_statuses)]
    #[tokio::test]
    async fn unexpected_status_fails_account_info(#[case] status: u16) {
        // A body that would decode fine must still be ignored.
        let executor = Arc::new(RecordingExecutor::responding(status, ACCOUNT_INFO));
        assert_eq!(
            client(&executor, false).account_info().await,
            Err(ClientError::UnexpectedStatus { code: status })
        );
    }

    #[apply(rejected_statuses)]
    #[tokio::test]
    async fn unexpected_status_fails_balance(#[case] status: u16) {
        let executor = Arc::new(RecordingExecutor::responding(status, "1.0"));
        assert_eq!(
            client(&executor, false).account_balance("acc-1").await,
            Err(ClientError::UnexpectedStatus { code: status })
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let executor = Arc::new(RecordingExecutor::failing("connection refused"));
        assert_eq!(
            client(&executor, false).account_info().await,
            Err(ClientError::Transport("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn codec_errors_reach_the_caller_unchanged() {
        let body = OPERATIONS.replace("\"Received\"", "\"Lost\"");
        let executor = Arc::new(RecordingExecutor::responding(200, &body));
        assert_eq!(
            client(&executor, false)
                .operation_history("acc-1", None)
                .await,
            Err(ClientError::InvalidEnumValue {
                domain: "operation status",
                input: "Lost".to_string()
            })
        );
    }

    #[tokio::test]
    async fn bad_timestamp_discards_the_whole_response() {
        let body = ACCOUNT_INFO.replace("2019-05-20T00:00:00", "2019-05-20");
        let executor = Arc::new(RecordingExecutor::responding(200, &body));
        assert_matches!(
            client(&executor, false).account_info().await,
            Err(ClientError::MalformedTimestamp { .. })
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let executor = Arc::new(RecordingExecutor::responding(200, "<html>"));
        assert_matches!(
            client(&executor, false).account_info().await,
            Err(ClientError::Decode(_))
        );
    }

    #[tokio::test]
    async fn sandbox_mode_overrides_the_token() {
        let executor = Arc::new(RecordingExecutor::responding(200, "0"));
        client(&executor, true)
            .account_balance("acc-1")
            .await
            .unwrap();

        let requests = executor.requests.lock().unwrap();
        assert_eq!(requests[0].headers[AUTHORIZATION], "Bearer sandboxtoken");
        assert_eq!(requests[0].headers["sandbox"], "on");
    }

    #[tokio::test]
    async fn configured_timestamp_codec_decodes_operations() {
        let executor = Arc::new(RecordingExecutor::responding(200, OPERATIONS));
        let utc = TimestampCodec::new(FixedOffset::east_opt(0).unwrap());
        let client = Client::new(ClientOptions {
            executor: Some(executor.clone()),
            token: "secret".to_string(),
            timestamps: utc,
            ..Default::default()
        });

        let operations = client.operation_history("acc-1", None).await.unwrap();

        assert_eq!(client.timestamps(), &utc);
        assert_eq!(operations[0].executed.offset().local_minus_utc(), 0);
        assert_eq!(utc.encode(&operations[0].executed), "2024-02-01T12:00:00");
    }

    #[tokio::test]
    async fn build_failure_never_reaches_the_transport() {
        let executor = Arc::new(RecordingExecutor::responding(200, "[]"));
        let client = Client::new(ClientOptions {
            executor: Some(executor.clone()),
            base_url: Some("not a url".to_string()),
            ..Default::default()
        });

        assert_matches!(
            client.account_info().await,
            Err(ClientError::RequestBuild(_))
        );
        assert!(executor.requests.lock().unwrap().is_empty());
    }
}
