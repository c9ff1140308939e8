//! Explorer entities and the data-provider boundary the views read through.

pub mod mock;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::pagination::{item_range, total_pages};

/// Direction/type tag shown in the transaction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Sent,
    Received,
    Rbt,
}

impl TxKind {
    pub fn label(self) -> &'static str {
        match self {
            TxKind::Sent => "sent",
            TxKind::Received => "received",
            TxKind::Rbt => "RBT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub tx_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub timestamp: DateTime<Local>,
    pub amount: f64,
    pub kind: TxKind,
    /// Only present for token-history entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub token_id: String,
    pub block_id: String,
    pub amount: f64,
    pub is_split: bool,
    pub timestamp: DateTime<Local>,
    pub token_level: String,
    pub token_number: String,
    pub parent_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerInfo {
    pub peer_id: String,
    pub balance: f64,
}

/// A token held by a peer, as listed in the peer view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerToken {
    pub token_id: String,
    pub token_value: f64,
    pub token_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuorumMember {
    pub id: String,
}

/// Everything the transaction side panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDetails {
    pub parent_token_id: String,
    pub amount: f64,
    pub token_level: String,
    pub token_number: String,
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub timestamp: DateTime<Local>,
    pub amount_rbt: f64,
    pub kind: TxKind,
    pub quorum: Vec<QuorumMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub transactions: u64,
    pub total_peers: u64,
    pub total_supply: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePoint {
    pub label: String,
    pub value: u64,
}

/// Window of the transaction-volume chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "12m")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Day, TimeRange::Month, TimeRange::Year];

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Day => "24 Hours",
            TimeRange::Month => "30 Days",
            TimeRange::Year => "12 Months",
        }
    }

    /// Number of chart points, oldest first, including "now".
    pub fn points(self) -> usize {
        match self {
            TimeRange::Day => 25,
            TimeRange::Month => 31,
            TimeRange::Year => 13,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeRange::Day => TimeRange::Month,
            TimeRange::Month => TimeRange::Year,
            TimeRange::Year => TimeRange::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Whether this request addresses an existing page of `total_items`.
    pub fn is_valid_for(&self, total_items: usize) -> bool {
        self.per_page > 0 && self.page >= 1 && self.page <= total_pages(total_items, self.per_page)
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `all` according to `req`. The caller validates the request.
    pub fn slice(all: &[T], req: PageRequest) -> Self {
        let (start, end) = item_range(req.page, req.per_page, all.len());
        Self {
            items: all[start..end].to_vec(),
            page: req.page,
            per_page: req.per_page,
            total_items: all.len(),
        }
    }
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.per_page)
    }

    /// One-based index of the first item on this page.
    pub fn first_index(&self) -> usize {
        self.page.saturating_sub(1) * self.per_page + 1
    }
}

/// Source of everything the explorer displays.
///
/// The views only talk to this trait, so they can run against the mock
/// generator or against fixed fixtures in tests.
#[allow(async_fn_in_trait)]
pub trait DataProvider {
    async fn network_stats(&self) -> Result<NetworkStats>;

    async fn volume_series(&self, range: TimeRange) -> Result<Vec<VolumePoint>>;

    /// Latest network transactions, newest first.
    async fn fetch_transactions(&self, req: PageRequest) -> Result<Page<Transaction>>;

    async fn token_info(&self, token_id: &str) -> Result<TokenInfo>;

    async fn fetch_token_history(&self, token_id: &str, req: PageRequest) -> Result<Page<Transaction>>;

    async fn peer_info(&self, peer_id: &str) -> Result<PeerInfo>;

    async fn fetch_peer_tokens(&self, peer_id: &str, req: PageRequest) -> Result<Page<PeerToken>>;

    async fn transaction_details(&self, tx: &Transaction) -> Result<TransactionDetails>;
}
