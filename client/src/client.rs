use crate::{
    http::HEADER_LOCATION,
    options::join_ids,
    ByteRange, ClientConfig, ClientError, Content, DocumentListOptions, ForwardingEmail,
    HttpResponse, HttpTransport, InboundFax, InboundListOptions, ListOptions, OutboundFax,
    QueryParams, RequestTranslator, ReqwestTransport, Result, SearchOptions, SendOptions,
    UploadSession, UploadSessionOptions,
};
use std::sync::Arc;

static OUTBOUND_FAXES: &'static str = "/outbound/faxes";
static OUTBOUND_SEARCH: &'static str = "/outbound/search";
static OUTBOUND_DOCUMENTS: &'static str = "/outbound/documents";
static INBOUND_FAXES: &'static str = "/inbound/faxes";
static ACCOUNT_BALANCE: &'static str = "/accounts/self/ppcards/balance";

/// Entry point for the InterFAX API, grouped by resource.
#[derive(Debug, Clone)]
pub struct InterfaxClient {
    translator: RequestTranslator,
}

impl InterfaxClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(
            config.base_url_str(),
            Arc::new(transport),
        ))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            translator: RequestTranslator::new(base_url, transport),
        }
    }

    pub fn translator(&self) -> &RequestTranslator {
        &self.translator
    }

    pub fn outbound(&self) -> Outbound<'_> {
        Outbound {
            translator: &self.translator,
        }
    }

    pub fn inbound(&self) -> Inbound<'_> {
        Inbound {
            translator: &self.translator,
        }
    }

    pub fn documents(&self) -> Documents<'_> {
        Documents {
            translator: &self.translator,
        }
    }

    pub fn account(&self) -> Account<'_> {
        Account {
            translator: &self.translator,
        }
    }
}

/// Sent faxes.
pub struct Outbound<'a> {
    translator: &'a RequestTranslator,
}

impl Outbound<'_> {
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<OutboundFax>> {
        self.translator
            .fetch_resource(OUTBOUND_FAXES, Some(options))
            .await
    }

    /// Completed faxes among `ids`.
    pub async fn completed(&self, ids: &[i64]) -> Result<Vec<OutboundFax>> {
        let url = format!("{}/completed", OUTBOUND_FAXES);
        let params = QueryParams::new().set("ids", join_ids(ids));
        self.translator.fetch_resource(&url, Some(&params)).await
    }

    pub async fn get(&self, id: i64) -> Result<OutboundFax> {
        let url = format!("{}/{}", OUTBOUND_FAXES, id);
        self.translator.fetch_resource(&url, None).await
    }

    pub async fn search(&self, options: &SearchOptions) -> Result<Vec<OutboundFax>> {
        self.translator
            .fetch_resource(OUTBOUND_SEARCH, Some(options))
            .await
    }

    /// Submit `document` for delivery and return the new fax id.
    pub async fn send(&self, document: Content, options: &SendOptions) -> Result<i64> {
        let response = self
            .translator
            .submit_raw(OUTBOUND_FAXES, Some(options), Some(document))
            .await?;
        parse_id(&location_id(&response)?)
    }

    /// Send a previous fax again, optionally to a different number.
    pub async fn resend(&self, id: i64, fax_number: Option<&str>) -> Result<i64> {
        let url = format!("{}/{}/resend", OUTBOUND_FAXES, id);
        let params = QueryParams::new().set_opt("faxNumber", fax_number);
        let response = self.translator.submit_raw(&url, Some(&params), None).await?;
        parse_id(&location_id(&response)?)
    }

    pub async fn cancel(&self, id: i64) -> Result<String> {
        let url = format!("{}/{}/cancel", OUTBOUND_FAXES, id);
        let response = self.translator.submit_raw(&url, None, None).await?;
        Ok(response.reason)
    }

    /// Hide a fax from listings.
    pub async fn hide(&self, id: i64) -> Result<String> {
        let url = format!("{}/{}/hide", OUTBOUND_FAXES, id);
        let response = self.translator.submit_raw(&url, None, None).await?;
        Ok(response.reason)
    }
}

/// Received faxes.
pub struct Inbound<'a> {
    translator: &'a RequestTranslator,
}

impl Inbound<'_> {
    pub async fn list(&self, options: &InboundListOptions) -> Result<Vec<InboundFax>> {
        self.translator
            .fetch_resource(INBOUND_FAXES, Some(options))
            .await
    }

    pub async fn get(&self, id: i64) -> Result<InboundFax> {
        let url = format!("{}/{}", INBOUND_FAXES, id);
        self.translator.fetch_resource(&url, None).await
    }

    /// Addresses the fax was forwarded to.
    pub async fn emails(&self, id: i64) -> Result<Vec<ForwardingEmail>> {
        let url = format!("{}/{}/emails", INBOUND_FAXES, id);
        self.translator.fetch_resource(&url, None).await
    }

    pub async fn mark(&self, id: i64, read: bool) -> Result<String> {
        let url = format!("{}/{}/mark", INBOUND_FAXES, id);
        let params = QueryParams::new().set("unread", !read);
        let response = self.translator.submit_raw(&url, Some(&params), None).await?;
        Ok(response.reason)
    }

    /// Forward the fax by email again, to `email` or the original recipients.
    pub async fn resend(&self, id: i64, email: Option<&str>) -> Result<String> {
        let url = format!("{}/{}/resend", INBOUND_FAXES, id);
        let params = QueryParams::new().set_opt("email", email);
        let response = self.translator.submit_raw(&url, Some(&params), None).await?;
        Ok(response.reason)
    }
}

/// Upload sessions for large documents.
pub struct Documents<'a> {
    translator: &'a RequestTranslator,
}

impl Documents<'_> {
    pub async fn list(&self, options: &DocumentListOptions) -> Result<Vec<UploadSession>> {
        self.translator
            .fetch_resource(OUTBOUND_DOCUMENTS, Some(options))
            .await
    }

    /// Open an upload session and return its id.
    pub async fn create(&self, options: &UploadSessionOptions) -> Result<String> {
        let response = self
            .translator
            .submit_raw(OUTBOUND_DOCUMENTS, Some(options), None)
            .await?;
        location_id(&response)
    }

    pub async fn upload_chunk(
        &self,
        id: &str,
        range: ByteRange,
        data: Vec<u8>,
    ) -> Result<HttpResponse> {
        let url = format!("{}/{}", OUTBOUND_DOCUMENTS, urlencoding::encode(id));
        self.translator.submit_range(&url, data, range).await
    }

    /// Open a session sized for `data` and upload it in `chunk_size` pieces.
    ///
    /// Chunks go out one at a time, in order. Returns the session id.
    pub async fn upload(
        &self,
        options: &UploadSessionOptions,
        data: &[u8],
        chunk_size: usize,
    ) -> Result<String> {
        if chunk_size == 0 {
            return Err(ClientError::InvalidRange(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(ClientError::InvalidRange("nothing to upload".to_string()));
        }
        let total = data.len() as u64;
        if options.size != total {
            return Err(ClientError::InvalidRange(format!(
                "session size {} does not match {} bytes of data",
                options.size, total
            )));
        }

        let id = self.create(options).await?;
        let mut start = 0u64;
        for chunk in data.chunks(chunk_size) {
            let end = start + chunk.len() as u64 - 1;
            let range = ByteRange::new(start, end, Some(total))?;
            tracing::debug!(session = %id, range = %range, "uploading chunk");
            self.upload_chunk(&id, range, chunk.to_vec()).await?;
            start = end + 1;
        }
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Result<UploadSession> {
        let url = format!("{}/{}", OUTBOUND_DOCUMENTS, urlencoding::encode(id));
        self.translator.fetch_resource(&url, None).await
    }

    /// Cancel a session and discard what was uploaded.
    pub async fn cancel(&self, id: &str) -> Result<String> {
        let url = format!("{}/{}", OUTBOUND_DOCUMENTS, urlencoding::encode(id));
        self.translator.delete_resource(&url).await
    }
}

pub struct Account<'a> {
    translator: &'a RequestTranslator,
}

impl Account<'_> {
    /// Remaining prepaid credit.
    pub async fn balance(&self) -> Result<f64> {
        self.translator.fetch_resource(ACCOUNT_BALANCE, None).await
    }
}

/// Last path segment of the `Location` header.
fn location_id(response: &HttpResponse) -> Result<String> {
    let location = response.header(HEADER_LOCATION).ok_or_else(|| {
        ClientError::UnexpectedResponse("missing Location header".to_string())
    })?;
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .ok_or_else(|| {
            ClientError::UnexpectedResponse(format!("no id in Location header: {}", location))
        })
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ClientError::UnexpectedResponse(format!("non-numeric id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{created, response, MockTransport};
    use crate::HttpMethod;
    use futures::executor::block_on;

    fn client(transport: &Arc<MockTransport>) -> InterfaxClient {
        InterfaxClient::with_transport("https://rest.interfax.net", transport.clone())
    }

    #[test]
    fn test_outbound_list() {
        let transport = MockTransport::replying(vec![response(
            200,
            "OK",
            r#"[{"id":1,"status":0},{"id":2,"status":-2}]"#,
        )]);
        let options = ListOptions {
            limit: Some(2),
            ..Default::default()
        };

        let faxes = block_on(client(&transport).outbound().list(&options)).unwrap();

        assert_eq!(faxes.len(), 2);
        assert_eq!(faxes[1].status, Some(-2));
        assert_eq!(
            transport.requests()[0].url,
            "https://rest.interfax.net/outbound/faxes?limit=2"
        );
    }

    #[test]
    fn test_outbound_completed_joins_ids() {
        let transport = MockTransport::replying(vec![response(200, "OK", "[]")]);
        let faxes = block_on(client(&transport).outbound().completed(&[4, 5])).unwrap();
        assert!(faxes.is_empty());
        assert_eq!(
            transport.requests()[0].url,
            "https://rest.interfax.net/outbound/faxes/completed?ids=4%2C5"
        );
    }

    #[test]
    fn test_outbound_send_reads_location() {
        let transport = MockTransport::replying(vec![created(
            "https://rest.interfax.net/outbound/faxes/663347",
        )]);
        let document = Content::new("text/html", b"<p>hello</p>".to_vec());

        let id = block_on(
            client(&transport)
                .outbound()
                .send(document, &SendOptions::new("+12125551234")),
        )
        .unwrap();

        assert_eq!(id, 663347);
        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.method, HttpMethod::POST);
        assert_eq!(
            sent.url,
            "https://rest.interfax.net/outbound/faxes?faxNumber=%2B12125551234"
        );
        assert_eq!(sent.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_outbound_send_without_location() {
        let transport = MockTransport::replying(vec![response(201, "Created", "")]);
        let result = block_on(
            client(&transport)
                .outbound()
                .send(Content::octet_stream(vec![1]), &SendOptions::new("1")),
        );
        assert!(matches!(result, Err(ClientError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_outbound_resend_without_number_has_no_query() {
        let transport = MockTransport::replying(vec![created("/outbound/faxes/12")]);
        let id = block_on(client(&transport).outbound().resend(11, None)).unwrap();
        assert_eq!(id, 12);
        assert_eq!(
            transport.requests()[0].url,
            "https://rest.interfax.net/outbound/faxes/11/resend"
        );
    }

    #[test]
    fn test_outbound_cancel_not_found() {
        let transport = MockTransport::replying(vec![response(
            404,
            "Not Found",
            r#"{"code":404,"message":"Not Found","moreInfo":"no such fax"}"#,
        )]);
        let err = block_on(client(&transport).outbound().cancel(1)).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.api_error().map(|e| e.more_info.as_str()), Some("no such fax"));
    }

    #[test]
    fn test_inbound_mark_read() {
        let transport = MockTransport::replying(vec![response(200, "OK", "")]);
        let reason = block_on(client(&transport).inbound().mark(9, true)).unwrap();
        assert_eq!(reason, "OK");
        assert_eq!(
            transport.requests()[0].url,
            "https://rest.interfax.net/inbound/faxes/9/mark?unread=false"
        );
    }

    #[test]
    fn test_inbound_emails() {
        let transport = MockTransport::replying(vec![response(
            200,
            "OK",
            r#"[{"emailAddress":"ops@example.com","messageStatus":0}]"#,
        )]);
        let emails = block_on(client(&transport).inbound().emails(3)).unwrap();
        assert_eq!(emails[0].email_address, "ops@example.com");
    }

    #[test]
    fn test_documents_upload_in_chunks() {
        let transport = MockTransport::replying(vec![
            created("https://rest.interfax.net/outbound/documents/abc123"),
            response(202, "Accepted", ""),
            response(202, "Accepted", ""),
            response(200, "OK", ""),
        ]);
        let data = vec![0u8; 2500];
        let options = UploadSessionOptions::new(2500, "big.pdf");

        let id = block_on(client(&transport).documents().upload(&options, &data, 1000)).unwrap();

        assert_eq!(id, "abc123");
        let sent = transport.requests();
        assert_eq!(sent.len(), 4);
        assert_eq!(
            sent[0].url,
            "https://rest.interfax.net/outbound/documents?size=2500&name=big.pdf"
        );
        let ranges: Vec<_> = sent[1..]
            .iter()
            .map(|r| r.header("Content-Range").unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            ranges,
            vec!["bytes 0-999/2500", "bytes 1000-1999/2500", "bytes 2000-2499/2500"]
        );
        assert_eq!(sent[3].body.as_ref().map(Vec::len), Some(500));
        assert!(sent[1..]
            .iter()
            .all(|r| r.url == "https://rest.interfax.net/outbound/documents/abc123"));
    }

    #[test]
    fn test_documents_upload_stops_on_failure() {
        let transport = MockTransport::replying(vec![
            created("/outbound/documents/s1"),
            response(500, "Internal Server Error", "boom"),
        ]);
        let options = UploadSessionOptions::new(20, "x.pdf");

        let err = block_on(client(&transport).documents().upload(&options, &[1u8; 20], 10))
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.api_error().map(|e| e.more_info.as_str()), Some("boom"));
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_documents_upload_rejects_bad_input() {
        let transport = MockTransport::replying(vec![]);
        let documents_client = client(&transport);
        let documents = documents_client.documents();

        let zero_chunk = block_on(documents.upload(&UploadSessionOptions::new(1, "a"), &[1], 0));
        assert!(matches!(zero_chunk, Err(ClientError::InvalidRange(_))));

        let mismatch = block_on(documents.upload(&UploadSessionOptions::new(5, "a"), &[1], 1));
        assert!(matches!(mismatch, Err(ClientError::InvalidRange(_))));

        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_documents_cancel_deletes() {
        let transport = MockTransport::replying(vec![response(200, "OK", "")]);
        let reason = block_on(client(&transport).documents().cancel("abc123")).unwrap();
        assert_eq!(reason, "OK");
        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.method, HttpMethod::DELETE);
        assert_eq!(sent.url, "https://rest.interfax.net/outbound/documents/abc123");
    }

    #[test]
    fn test_account_balance() {
        let transport = MockTransport::replying(vec![response(200, "OK", "12.5")]);
        let balance = block_on(client(&transport).account().balance()).unwrap();
        assert_eq!(balance, 12.5);
    }

    #[test]
    fn test_location_id_variants() {
        assert_eq!(location_id(&created("/outbound/faxes/5/")).unwrap(), "5");
        assert!(matches!(
            location_id(&created("")),
            Err(ClientError::UnexpectedResponse(_))
        ));
        assert!(matches!(
            parse_id("abc"),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }
}
