//! Mock data provider.
//!
//! Generates explorer data with a pseudo-random generator. Lists the UI
//! pages through (dashboard transactions, a peer's tokens) are generated
//! once and then served page by page; token history and quorum lists are
//! regenerated on every request.

use std::collections::{HashMap, VecDeque};

use anyhow::{bail, Result};
use chrono::{Duration, Local, Months};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::config::MockSettings;
use crate::pagination::item_range;

use super::{
    DataProvider, NetworkStats, Page, PageRequest, PeerInfo, PeerToken, QuorumMember, TimeRange,
    TokenInfo, Transaction, TransactionDetails, TxKind, VolumePoint,
};

const NETWORK_STATS: NetworkStats = NetworkStats {
    transactions: 5_830_343,
    total_peers: 605_196,
    total_supply: 10_247_786,
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Peers whose token lists stay memoized; the oldest is dropped beyond this
const PEER_CACHE_LIMIT: usize = 32;

/// Generated token lists by peer id, evicted oldest first
#[derive(Default)]
struct PeerTokenCache {
    lists: HashMap<String, Vec<PeerToken>>,
    order: VecDeque<String>,
}

impl PeerTokenCache {
    fn get(&self, peer_id: &str) -> Option<&Vec<PeerToken>> {
        self.lists.get(peer_id)
    }

    fn insert(&mut self, peer_id: &str, tokens: Vec<PeerToken>) {
        if self.lists.insert(peer_id.to_string(), tokens).is_none() {
            self.order.push_back(peer_id.to_string());
        }
        while self.order.len() > PEER_CACHE_LIMIT {
            if let Some(oldest) = self.order.pop_front() {
                self.lists.remove(&oldest);
            }
        }
    }
}

pub struct MockProvider {
    settings: MockSettings,
    rng: Mutex<StdRng>,
    transactions: Vec<Transaction>,
    peer_tokens: Mutex<PeerTokenCache>,
}

impl MockProvider {
    /// Create a provider. With a seed every generated id and amount is reproducible.
    pub fn new(settings: MockSettings, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut transactions: Vec<Transaction> = (0..settings.dashboard_transactions)
            .map(|index| dashboard_transaction(&mut rng, index))
            .collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        tracing::debug!(
            "Mock provider ready: {} transactions, seed {:?}",
            transactions.len(),
            seed
        );

        Self {
            settings,
            rng: Mutex::new(rng),
            transactions,
            peer_tokens: Mutex::new(PeerTokenCache::default()),
        }
    }
}

fn check_request(req: PageRequest, total_items: usize) -> Result<()> {
    if !req.is_valid_for(total_items) {
        bail!(
            "Page {} is out of range for {} items at {} per page",
            req.page,
            total_items,
            req.per_page
        );
    }
    Ok(())
}

fn check_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("{} ID must not be empty", kind);
    }
    Ok(())
}

fn hex_id(rng: &mut StdRng) -> String {
    format!("0x{:08x}", rng.gen::<u32>())
}

fn hex_string(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect()
}

fn cents(rng: &mut StdRng, max: f64) -> f64 {
    (rng.gen::<f64>() * max * 100.0).floor() / 100.0
}

fn token_level(rng: &mut StdRng) -> String {
    format!("Level {}", rng.gen_range(1..=5))
}

fn dashboard_transaction(rng: &mut StdRng, index: usize) -> Transaction {
    let age_ms = rng.gen_range(0..MILLIS_PER_DAY);
    Transaction {
        tx_id: hex_id(rng),
        sender_id: hex_id(rng),
        receiver_id: hex_id(rng),
        timestamp: Local::now() - Duration::milliseconds(age_ms),
        amount: cents(rng, 100.0),
        kind: if index % 2 == 0 { TxKind::Sent } else { TxKind::Received },
        subnet_id: None,
    }
}

impl DataProvider for MockProvider {
    async fn network_stats(&self) -> Result<NetworkStats> {
        Ok(NETWORK_STATS)
    }

    async fn volume_series(&self, range: TimeRange) -> Result<Vec<VolumePoint>> {
        let mut rng = self.rng.lock().await;
        let now = Local::now();
        let count = range.points();

        let points = (0..count)
            .rev()
            .map(|i| {
                let label = match range {
                    TimeRange::Day => (now - Duration::hours(i as i64)).format("%H:%M").to_string(),
                    TimeRange::Month => (now - Duration::days(i as i64)).format("%b %-d").to_string(),
                    TimeRange::Year => now
                        .checked_sub_months(Months::new(i as u32))
                        .unwrap_or(now)
                        .format("%b")
                        .to_string(),
                };
                VolumePoint {
                    label,
                    value: rng.gen_range(500..1500),
                }
            })
            .collect();

        Ok(points)
    }

    async fn fetch_transactions(&self, req: PageRequest) -> Result<Page<Transaction>> {
        check_request(req, self.transactions.len())?;
        Ok(Page::slice(&self.transactions, req))
    }

    async fn token_info(&self, token_id: &str) -> Result<TokenInfo> {
        check_id("Token", token_id)?;
        let mut rng = self.rng.lock().await;
        Ok(TokenInfo {
            token_id: token_id.to_string(),
            block_id: format!("0x{}...", hex_string(&mut rng, 4)),
            amount: cents(&mut rng, 1000.0),
            is_split: rng.gen_bool(0.8),
            timestamp: Local::now(),
            token_level: token_level(&mut rng),
            token_number: format!("#{}", rng.gen_range(10_000..100_000)),
            parent_id: format!("0x{}...", hex_string(&mut rng, 4)),
        })
    }

    async fn fetch_token_history(&self, token_id: &str, req: PageRequest) -> Result<Page<Transaction>> {
        check_id("Token", token_id)?;
        let total = self.settings.token_transactions;
        check_request(req, total)?;

        let (start, end) = item_range(req.page, req.per_page, total);
        let mut rng = self.rng.lock().await;
        let now = Local::now();
        let items = (0..end - start)
            .map(|index| Transaction {
                tx_id: hex_id(&mut rng),
                sender_id: hex_id(&mut rng),
                receiver_id: hex_id(&mut rng),
                timestamp: now - Duration::days(index as i64),
                amount: cents(&mut rng, 100.0),
                kind: TxKind::Rbt,
                subnet_id: Some(format!("SN-{}", hex_string(&mut rng, 4))),
            })
            .collect();

        Ok(Page {
            items,
            page: req.page,
            per_page: req.per_page,
            total_items: total,
        })
    }

    async fn peer_info(&self, peer_id: &str) -> Result<PeerInfo> {
        check_id("Peer", peer_id)?;
        let mut rng = self.rng.lock().await;
        Ok(PeerInfo {
            peer_id: peer_id.to_string(),
            balance: cents(&mut rng, 5000.0),
        })
    }

    async fn fetch_peer_tokens(&self, peer_id: &str, req: PageRequest) -> Result<Page<PeerToken>> {
        check_id("Peer", peer_id)?;
        let total = self.settings.peer_tokens;
        check_request(req, total)?;

        let mut cache = self.peer_tokens.lock().await;
        if cache.get(peer_id).is_none() {
            let mut rng = self.rng.lock().await;
            let tokens = (0..total)
                .map(|_| PeerToken {
                    token_id: format!("TKN-{:08x}", rng.gen::<u32>()),
                    token_value: cents(&mut rng, 1000.0),
                    token_level: token_level(&mut rng),
                })
                .collect();
            tracing::debug!("Generated {} tokens for peer {}", total, peer_id);
            cache.insert(peer_id, tokens);
        }

        match cache.get(peer_id) {
            Some(tokens) => Ok(Page::slice(tokens, req)),
            None => bail!("No tokens cached for peer {}", peer_id),
        }
    }

    async fn transaction_details(&self, tx: &Transaction) -> Result<TransactionDetails> {
        let mut rng = self.rng.lock().await;
        let quorum = (0..self.settings.quorum_size)
            .map(|_| QuorumMember {
                id: hex_string(&mut rng, 16),
            })
            .collect();

        Ok(TransactionDetails {
            parent_token_id: format!("0x{}", hex_string(&mut rng, 64)),
            amount: tx.amount,
            token_level: token_level(&mut rng),
            token_number: format!("#{:010}", rng.gen_range(0..10_000_000_000u64)),
            transaction_id: tx.tx_id.clone(),
            sender_id: tx.sender_id.clone(),
            receiver_id: tx.receiver_id.clone(),
            timestamp: tx.timestamp,
            amount_rbt: tx.amount,
            kind: TxKind::Rbt,
            quorum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(seed: u64) -> MockProvider {
        MockProvider::new(MockSettings::default(), Some(seed))
    }

    #[tokio::test]
    async fn test_dashboard_pages() {
        let mock = provider(7);
        let page = mock.fetch_transactions(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_items, 100);
        assert_eq!(page.total_pages(), 10);

        let last = mock.fetch_transactions(PageRequest::new(10, 10)).await.unwrap();
        assert_eq!(last.items.len(), 10);
        assert!(mock.fetch_transactions(PageRequest::new(11, 10)).await.is_err());
    }

    #[tokio::test]
    async fn test_dashboard_is_newest_first() {
        let mock = provider(1);
        let page = mock.fetch_transactions(PageRequest::new(1, 100)).await.unwrap();
        assert!(page.items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_seeded_output_is_reproducible() {
        let a = provider(42).fetch_transactions(PageRequest::new(2, 10)).await.unwrap();
        let b = provider(42).fetch_transactions(PageRequest::new(2, 10)).await.unwrap();
        let ids = |p: &Page<Transaction>| p.items.iter().map(|t| (t.tx_id.clone(), t.amount)).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[tokio::test]
    async fn test_generated_shapes() {
        let mock = provider(3);
        let tx = mock.fetch_transactions(PageRequest::new(1, 1)).await.unwrap().items.remove(0);
        assert!(tx.tx_id.starts_with("0x") && tx.tx_id.len() == 10);
        assert!((0.0..100.0).contains(&tx.amount));

        let details = mock.transaction_details(&tx).await.unwrap();
        assert_eq!(details.quorum.len(), 7);
        assert!(details.quorum.iter().all(|m| m.id.len() == 16));
        assert_eq!(details.transaction_id, tx.tx_id);
        assert_eq!(details.token_number.len(), 11);
        assert_eq!(details.parent_token_id.len(), 66);
    }

    #[tokio::test]
    async fn test_peer_tokens_are_memoized() {
        let mock = provider(9);
        let first = mock.fetch_peer_tokens("peer-1", PageRequest::new(2, 10)).await.unwrap();
        let again = mock.fetch_peer_tokens("peer-1", PageRequest::new(2, 10)).await.unwrap();
        assert_eq!(first, again);
        assert_eq!(first.total_items, 50);
        assert!(first.items.iter().all(|t| t.token_id.starts_with("TKN-")));
        assert!(mock.fetch_peer_tokens("peer-1", PageRequest::new(6, 10)).await.is_err());
        assert!(mock.fetch_peer_tokens("", PageRequest::new(1, 10)).await.is_err());
    }

    #[tokio::test]
    async fn test_peer_token_cache_is_bounded() {
        let mock = provider(11);
        let req = PageRequest::new(1, 10);
        let oldest = mock.fetch_peer_tokens("peer-0", req).await.unwrap();

        for i in 1..=PEER_CACHE_LIMIT + 8 {
            mock.fetch_peer_tokens(&format!("peer-{}", i), req).await.unwrap();
        }

        let cache = mock.peer_tokens.lock().await;
        assert_eq!(cache.lists.len(), PEER_CACHE_LIMIT);
        assert_eq!(cache.order.len(), PEER_CACHE_LIMIT);
        assert!(cache.get("peer-0").is_none());
        assert!(cache.get(&format!("peer-{}", PEER_CACHE_LIMIT + 8)).is_some());
        drop(cache);

        // An evicted peer gets a freshly generated list
        let regenerated = mock.fetch_peer_tokens("peer-0", req).await.unwrap();
        assert_eq!(regenerated.total_items, oldest.total_items);
        assert_ne!(regenerated.items, oldest.items);
    }

    #[tokio::test]
    async fn test_token_history_pages() {
        let mock = provider(5);
        let page = mock.fetch_token_history("0xabc", PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_items, 30);
        assert!(page.items.iter().all(|t| t.kind == TxKind::Rbt && t.subnet_id.is_some()));
        assert!(mock.fetch_token_history("0xabc", PageRequest::new(4, 10)).await.is_err());
    }

    #[tokio::test]
    async fn test_volume_series_lengths() {
        let mock = provider(11);
        for range in TimeRange::ALL {
            let series = mock.volume_series(range).await.unwrap();
            assert_eq!(series.len(), range.points());
            assert!(series.iter().all(|p| (500..1500).contains(&p.value)));
        }
    }
}
