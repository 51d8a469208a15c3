//! Per-call query options for each resource.
//!
//! Each struct lists the parameters its endpoint accepts. Only fields that are
//! set end up in the query string.

use crate::{Options, QueryParams};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
    B4,
}

impl PageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::B4 => "b4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

impl PageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOrientation::Portrait => "portrait",
            PageOrientation::Landscape => "landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Standard,
    Fine,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Standard => "standard",
            Resolution::Fine => "fine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Greyscale,
    BlackAndWhite,
}

impl Rendering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rendering::Greyscale => "greyscale",
            Rendering::BlackAndWhite => "bw",
        }
    }
}

/// How long an uploaded document stays available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    SingleUse,
    MultiUse,
    Permanent,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::SingleUse => "singleUse",
            Disposition::MultiUse => "multiUse",
            Disposition::Permanent => "permanent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    Private,
    Shared,
}

impl Sharing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sharing::Private => "private",
            Sharing::Shared => "shared",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(
    SortOrder,
    PageSize,
    PageOrientation,
    Resolution,
    Rendering,
    Disposition,
    Sharing
);

/// Paging for outbound fax listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub last_id: Option<i64>,
    pub sort_order: Option<SortOrder>,
    pub user_id: Option<String>,
}

impl Options for ListOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .set_opt("limit", self.limit)
            .set_opt("lastId", self.last_id)
            .set_opt("sortOrder", self.sort_order)
            .set_opt("userId", self.user_id.as_deref())
            .to_query_pairs()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub ids: Vec<i64>,
    pub reference: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<i32>,
    pub user_id: Option<String>,
    pub fax_number: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Options for SearchOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let ids = (!self.ids.is_empty()).then(|| join_ids(&self.ids));
        QueryParams::new()
            .set_opt("ids", ids)
            .set_opt("reference", self.reference.as_deref())
            .set_opt("dateFrom", self.date_from.as_deref())
            .set_opt("dateTo", self.date_to.as_deref())
            .set_opt("status", self.status)
            .set_opt("userId", self.user_id.as_deref())
            .set_opt("faxNumber", self.fax_number.as_deref())
            .set_opt("limit", self.limit)
            .set_opt("offset", self.offset)
            .to_query_pairs()
    }
}

/// Delivery settings for a new outbound fax. Only `fax_number` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct SendOptions {
    pub fax_number: String,
    pub contact: Option<String>,
    pub postpone_time: Option<String>,
    pub retries_to_perform: Option<u32>,
    pub csid: Option<String>,
    pub page_header: Option<String>,
    pub reference: Option<String>,
    pub reply_address: Option<String>,
    pub page_size: Option<PageSize>,
    pub fit_to_page: Option<bool>,
    pub page_orientation: Option<PageOrientation>,
    pub resolution: Option<Resolution>,
    pub rendering: Option<Rendering>,
}

impl SendOptions {
    pub fn new<S: Into<String>>(fax_number: S) -> Self {
        Self {
            fax_number: fax_number.into(),
            contact: None,
            postpone_time: None,
            retries_to_perform: None,
            csid: None,
            page_header: None,
            reference: None,
            reply_address: None,
            page_size: None,
            fit_to_page: None,
            page_orientation: None,
            resolution: None,
            rendering: None,
        }
    }
}

impl Options for SendOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let fit_to_page = self
            .fit_to_page
            .map(|fit| if fit { "scale" } else { "noscale" });
        QueryParams::new()
            .set("faxNumber", &self.fax_number)
            .set_opt("contact", self.contact.as_deref())
            .set_opt("postponeTime", self.postpone_time.as_deref())
            .set_opt("retriesToPerform", self.retries_to_perform)
            .set_opt("csid", self.csid.as_deref())
            .set_opt("pageHeader", self.page_header.as_deref())
            .set_opt("reference", self.reference.as_deref())
            .set_opt("replyAddress", self.reply_address.as_deref())
            .set_opt("pageSize", self.page_size)
            .set_opt("fitToPage", fit_to_page)
            .set_opt("pageOrientation", self.page_orientation)
            .set_opt("resolution", self.resolution)
            .set_opt("rendering", self.rendering)
            .to_query_pairs()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundListOptions {
    pub unread_only: Option<bool>,
    pub limit: Option<u32>,
    pub last_id: Option<i64>,
    pub all_users: Option<bool>,
}

impl Options for InboundListOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .set_opt("unreadOnly", self.unread_only)
            .set_opt("limit", self.limit)
            .set_opt("lastId", self.last_id)
            .set_opt("allUsers", self.all_users)
            .to_query_pairs()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentListOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Options for DocumentListOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .set_opt("limit", self.limit)
            .set_opt("offset", self.offset)
            .to_query_pairs()
    }
}

/// Parameters for opening a document upload session.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSessionOptions {
    pub size: u64,
    pub name: String,
    pub disposition: Option<Disposition>,
    pub sharing: Option<Sharing>,
}

impl UploadSessionOptions {
    pub fn new<S: Into<String>>(size: u64, name: S) -> Self {
        Self {
            size,
            name: name.into(),
            disposition: None,
            sharing: None,
        }
    }
}

impl Options for UploadSessionOptions {
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .set("size", self.size)
            .set("name", &self.name)
            .set_opt("disposition", self.disposition)
            .set_opt("sharing", self.sharing)
            .to_query_pairs()
    }
}

pub(crate) fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
