use serde::{Deserialize, Serialize};
use std::fmt;

/// Error payload returned by the API alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "moreInfo", default)]
    pub more_info: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.code, self.message, self.more_info)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundFax {
    pub id: i64,
    pub uri: Option<String>,
    pub status: Option<i32>,
    pub user_id: Option<String>,
    pub submit_time: Option<String>,
    pub completion_time: Option<String>,
    pub contact: Option<String>,
    pub destination_fax: Option<String>,
    pub reply_email: Option<String>,
    pub remote_csid: Option<String>,
    pub sender_csid: Option<String>,
    pub subject: Option<String>,
    pub reference: Option<String>,
    pub pages_sent: Option<u32>,
    pub page_count: Option<u32>,
    pub attempts_made: Option<u32>,
    pub duration: Option<u32>,
    pub units: Option<f64>,
    pub cost_per_unit: Option<f64>,
    pub page_size: Option<String>,
    pub page_orientation: Option<String>,
    pub page_resolution: Option<String>,
    pub rendering: Option<String>,
    pub page_header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundFax {
    pub message_id: i64,
    pub phone_number: Option<String>,
    pub remote_csid: Option<String>,
    pub message_status: Option<i32>,
    pub pages: Option<u32>,
    pub message_size: Option<u64>,
    pub message_type: Option<i32>,
    pub receive_time: Option<String>,
    pub caller_id: Option<String>,
    pub message_record_duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingEmail {
    pub email_address: String,
    pub message_status: Option<i32>,
    pub completion_time: Option<String>,
}

/// A document upload session, used to send large documents in chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    pub uri: String,
    pub user_id: Option<String>,
    pub media_type: Option<String>,
    pub document_name: Option<String>,
    pub document_bytes_size: Option<u64>,
    pub document_bytes_uploaded: Option<u64>,
    pub disposition: Option<String>,
    pub sharing: Option<String>,
    pub status: Option<String>,
    pub creation_time: Option<String>,
}
