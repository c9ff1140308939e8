use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::ExplorerConfig;
use crate::data::{
    DataProvider, Page, PageRequest, PeerInfo, PeerToken, TimeRange, TokenInfo,
    Transaction, TransactionDetails, VolumePoint,
};
use crate::pagination::Paginator;

/// Status messages clear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Fraction of the remaining distance a counter covers per tick
const COUNTER_EASING: f64 = 0.15;

/// Search queries up to this many characters are treated as peer IDs
const PEER_ID_MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Token,
    Peer,
}

/// Where typed characters go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Transaction, // Transaction details side panel
    PeerToken,   // Token details side panel in the peer view
    Help,
}

/// Destination of a search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Peer(String),
    Token(String),
}

/// Short queries are peer IDs, longer ones token IDs. Blank queries go nowhere.
///
/// The query is routed as typed; surrounding whitespace counts toward its length.
pub fn route_search(query: &str) -> Option<Route> {
    if query.trim().is_empty() {
        return None;
    }
    if query.chars().count() <= PEER_ID_MAX_LEN {
        Some(Route::Peer(query.to_string()))
    } else {
        Some(Route::Token(query.to_string()))
    }
}

/// A number that eases from zero toward its target value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counter {
    target: u64,
    shown: f64,
}

impl Counter {
    pub fn new(target: u64) -> Self {
        Self { target, shown: 0.0 }
    }

    pub fn step(&mut self) {
        let remaining = self.target as f64 - self.shown;
        if remaining.abs() < 1.0 {
            self.shown = self.target as f64;
        } else {
            self.shown += remaining * COUNTER_EASING;
        }
    }

    pub fn value(&self) -> u64 {
        self.shown.round() as u64
    }

    pub fn is_settled(&self) -> bool {
        self.value() == self.target
    }
}

pub struct DashboardState {
    pub counters: [Counter; 3],
    pub time_range: TimeRange,
    pub volume: Vec<VolumePoint>,
    pub transactions: Page<Transaction>,
    pub pager: Paginator,
}

pub struct TokenState {
    pub info: TokenInfo,
    pub viewing_parts: bool,
    pub history: Page<Transaction>,
    pub pager: Paginator,
}

pub struct PeerState {
    pub info: PeerInfo,
    pub tokens: Page<PeerToken>,
    pub pager: Paginator,
}

/// Contents of the peer view's token side panel
#[derive(Debug, Clone)]
pub struct PeerTokenDetails {
    pub token: PeerToken,
    pub opened_at: DateTime<Local>,
}

pub struct App<P: DataProvider> {
    provider: P,
    config: ExplorerConfig,

    pub view: View,
    pub focus: Focus,
    pub popup: Popup,

    // Search bar
    pub search_input: String,

    // Row cursor within the current page
    pub selected_row: usize,

    pub dashboard: DashboardState,
    pub token: Option<TokenState>,
    pub peer: Option<PeerState>,

    // Side panel content
    pub tx_details: Option<TransactionDetails>,
    pub peer_token_details: Option<PeerTokenDetails>,
    pub token_info_expanded: bool,
    pub quorum_expanded: bool,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl<P: DataProvider> App<P> {
    pub async fn new(provider: P, config: ExplorerConfig) -> Result<Self> {
        let per_page = config.page_size;
        let time_range = config.default_time_range;

        let stats = provider.network_stats().await.context("Failed to load network stats")?;
        let volume = provider
            .volume_series(time_range)
            .await
            .context("Failed to load volume series")?;
        let transactions = provider
            .fetch_transactions(PageRequest::new(1, per_page))
            .await
            .context("Failed to load transactions")?;
        let pager = Paginator::new(transactions.total_items, per_page).with_delta(config.window_delta);

        let dashboard = DashboardState {
            counters: [
                Counter::new(stats.transactions),
                Counter::new(stats.total_peers),
                Counter::new(stats.total_supply),
            ],
            time_range,
            volume,
            transactions,
            pager,
        };

        Ok(Self {
            provider,
            config,
            view: View::Dashboard,
            focus: Focus::Table,
            popup: Popup::None,
            search_input: String::new(),
            selected_row: 0,
            dashboard,
            token: None,
            peer: None,
            tx_details: None,
            peer_token_details: None,
            token_info_expanded: false,
            quorum_expanded: false,
            status_message: None,
            status_message_time: None,
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.config.tick_rate_ms)
    }

    /// Whether a plain `q` should quit rather than be typed or close something
    pub fn accepts_quit(&self) -> bool {
        self.popup == Popup::None && self.focus == Focus::Table
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Paginator of the list shown in the current view
    pub fn active_pager(&self) -> &Paginator {
        let pager = match self.view {
            View::Token => self.token.as_ref().map(|t| &t.pager),
            View::Peer => self.peer.as_ref().map(|p| &p.pager),
            View::Dashboard => None,
        };
        pager.unwrap_or(&self.dashboard.pager)
    }

    fn active_pager_mut(&mut self) -> &mut Paginator {
        match self.view {
            View::Token => {
                if let Some(token) = self.token.as_mut() {
                    return &mut token.pager;
                }
            }
            View::Peer => {
                if let Some(peer) = self.peer.as_mut() {
                    return &mut peer.pager;
                }
            }
            View::Dashboard => {}
        }
        &mut self.dashboard.pager
    }

    /// Rows on the current page of the active list
    pub fn row_count(&self) -> usize {
        match self.view {
            View::Dashboard => self.dashboard.transactions.items.len(),
            View::Token => self.token.as_ref().map_or(0, |t| t.history.items.len()),
            View::Peer => self.peer.as_ref().map_or(0, |p| p.tokens.items.len()),
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return Ok(());
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key).await,
            Focus::Jump => self.handle_jump_key(key).await,
            Focus::Table => self.handle_table_key(key).await,
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::Transaction | Popup::PeerToken => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => self.close_side_panel(),
                KeyCode::Char('i') => self.token_info_expanded = !self.token_info_expanded,
                KeyCode::Char('u') if self.popup == Popup::Transaction => {
                    self.quorum_expanded = !self.quorum_expanded;
                }
                _ => {}
            },
            Popup::None => {}
        }
    }

    async fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Table,
            KeyCode::Enter => {
                self.focus = Focus::Table;
                self.submit_search().await?;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
        Ok(())
    }

    async fn handle_jump_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.active_pager_mut().clear_jump();
                self.focus = Focus::Table;
            }
            KeyCode::Enter => {
                let mut pager = self.active_pager().clone();
                let submitted = pager.submit_jump();
                if pager.current_page() != self.active_pager().current_page() {
                    self.load_page(pager).await?;
                } else {
                    *self.active_pager_mut() = pager;
                }
                if submitted.is_ok() {
                    self.focus = Focus::Table;
                }
            }
            KeyCode::Backspace => self.active_pager_mut().pop_jump_char(),
            KeyCode::Char(c) => self.active_pager_mut().push_jump_char(c),
            _ => {}
        }
        Ok(())
    }

    async fn handle_table_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('s') => self.focus = Focus::Search,
            KeyCode::Char('g') => self.focus = Focus::Jump,

            // Row navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            // Page navigation
            KeyCode::Left | KeyCode::Char('[') => self.change_page(|p| p.previous()).await?,
            KeyCode::Right | KeyCode::Char(']') => self.change_page(|p| p.next()).await?,
            KeyCode::Home => self.change_page(|p| p.set_page(1)).await?,
            KeyCode::End => {
                self.change_page(|p| {
                    let last = p.total_pages();
                    p.set_page(last)
                })
                .await?
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.open_selected_details().await?,

            // View-specific actions
            KeyCode::Char('t') if self.view == View::Dashboard => self.cycle_time_range().await?,
            KeyCode::Char('p') if self.view == View::Token => self.view_parts().await?,
            KeyCode::Char('o') if self.view == View::Peer => self.open_selected_peer_token().await?,

            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                if self.view != View::Dashboard {
                    self.go_home();
                }
            }

            KeyCode::Char('R') => self.refresh().await?,
            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn move_down(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected_row = (self.selected_row + 1) % rows;
        }
    }

    fn move_up(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.selected_row = self.selected_row.checked_sub(1).unwrap_or(rows - 1);
        }
    }

    /// Apply a paginator change and fetch the new page if it moved
    async fn change_page(&mut self, change: impl FnOnce(&mut Paginator)) -> Result<()> {
        let mut pager = self.active_pager().clone();
        change(&mut pager);
        if pager.current_page() != self.active_pager().current_page() {
            self.load_page(pager).await?;
        }
        Ok(())
    }

    /// Re-fetch the active list at its current page
    async fn load_current_page(&mut self) -> Result<()> {
        let pager = self.active_pager().clone();
        self.load_page(pager).await
    }

    /// Fetch the page `pager` points at, then install both pager and rows.
    /// A failed fetch leaves the current page and rows untouched.
    async fn load_page(&mut self, mut pager: Paginator) -> Result<()> {
        let req = PageRequest::new(pager.current_page(), self.config.page_size);
        tracing::debug!("Loading {:?} page {}", self.view, req.page);

        match self.view {
            View::Dashboard => {
                let page = self.provider.fetch_transactions(req).await?;
                pager.set_total_items(page.total_items);
                self.dashboard.pager = pager;
                self.dashboard.transactions = page;
            }
            View::Token => {
                if let Some(token) = self.token.as_mut() {
                    let page = self.provider.fetch_token_history(&token.info.token_id, req).await?;
                    pager.set_total_items(page.total_items);
                    token.pager = pager;
                    token.history = page;
                }
            }
            View::Peer => {
                if let Some(peer) = self.peer.as_mut() {
                    let page = self.provider.fetch_peer_tokens(&peer.info.peer_id, req).await?;
                    pager.set_total_items(page.total_items);
                    peer.pager = pager;
                    peer.tokens = page;
                }
            }
        }

        self.selected_row = 0;
        Ok(())
    }

    async fn submit_search(&mut self) -> Result<()> {
        match route_search(&self.search_input) {
            Some(Route::Peer(id)) => self.open_peer(&id).await?,
            Some(Route::Token(id)) => self.open_token(&id).await?,
            None => {}
        }
        Ok(())
    }

    pub async fn open_token(&mut self, token_id: &str) -> Result<()> {
        let per_page = self.config.page_size;
        let info = self.provider.token_info(token_id).await?;
        let history = self
            .provider
            .fetch_token_history(token_id, PageRequest::new(1, per_page))
            .await?;
        let pager = Paginator::new(history.total_items, per_page).with_delta(self.config.window_delta);

        tracing::info!("Opened token {}", token_id);
        self.token = Some(TokenState {
            info,
            viewing_parts: false,
            history,
            pager,
        });
        self.enter_view(View::Token);
        Ok(())
    }

    pub async fn open_peer(&mut self, peer_id: &str) -> Result<()> {
        let per_page = self.config.page_size;
        let info = self.provider.peer_info(peer_id).await?;
        let tokens = self
            .provider
            .fetch_peer_tokens(peer_id, PageRequest::new(1, per_page))
            .await?;
        let pager = Paginator::new(tokens.total_items, per_page).with_delta(self.config.window_delta);

        tracing::info!("Opened peer {}", peer_id);
        self.peer = Some(PeerState { info, tokens, pager });
        self.enter_view(View::Peer);
        Ok(())
    }

    fn enter_view(&mut self, view: View) {
        self.view = view;
        self.focus = Focus::Table;
        self.popup = Popup::None;
        self.selected_row = 0;
        self.search_input.clear();
    }

    fn go_home(&mut self) {
        self.view = View::Dashboard;
        self.focus = Focus::Table;
        self.selected_row = 0;
    }

    async fn open_selected_details(&mut self) -> Result<()> {
        match self.view {
            View::Dashboard => {
                let tx = self.dashboard.transactions.items.get(self.selected_row).cloned();
                if let Some(tx) = tx {
                    self.open_transaction_details(&tx).await?;
                }
            }
            View::Token => {
                let tx = self
                    .token
                    .as_ref()
                    .and_then(|t| t.history.items.get(self.selected_row).cloned());
                if let Some(tx) = tx {
                    self.open_transaction_details(&tx).await?;
                }
            }
            View::Peer => {
                let token = self
                    .peer
                    .as_ref()
                    .and_then(|p| p.tokens.items.get(self.selected_row).cloned());
                if let Some(token) = token {
                    self.peer_token_details = Some(PeerTokenDetails {
                        token,
                        opened_at: Local::now(),
                    });
                    self.token_info_expanded = false;
                    self.popup = Popup::PeerToken;
                }
            }
        }
        Ok(())
    }

    async fn open_transaction_details(&mut self, tx: &Transaction) -> Result<()> {
        let details = self.provider.transaction_details(tx).await?;
        self.tx_details = Some(details);
        self.token_info_expanded = false;
        self.quorum_expanded = false;
        self.popup = Popup::Transaction;
        Ok(())
    }

    fn close_side_panel(&mut self) {
        self.popup = Popup::None;
        self.tx_details = None;
        self.peer_token_details = None;
    }

    async fn open_selected_peer_token(&mut self) -> Result<()> {
        let token_id = self
            .peer
            .as_ref()
            .and_then(|p| p.tokens.items.get(self.selected_row))
            .map(|t| t.token_id.clone());
        if let Some(id) = token_id {
            self.open_token(&id).await?;
        }
        Ok(())
    }

    async fn view_parts(&mut self) -> Result<()> {
        let Some(token) = self.token.as_ref() else {
            return Ok(());
        };
        if !token.info.is_split || token.viewing_parts {
            return Ok(());
        }
        let mut pager = token.pager.clone();
        pager.set_page(1);
        self.load_page(pager).await?;

        if let Some(token) = self.token.as_mut() {
            token.viewing_parts = true;
        }
        self.set_status("Viewing part tokens");
        Ok(())
    }

    async fn cycle_time_range(&mut self) -> Result<()> {
        let range = self.dashboard.time_range.next();
        self.dashboard.volume = self.provider.volume_series(range).await?;
        self.dashboard.time_range = range;
        Ok(())
    }

    /// Re-fetch everything the current view shows
    async fn refresh(&mut self) -> Result<()> {
        match self.view {
            View::Dashboard => {
                self.dashboard.volume = self.provider.volume_series(self.dashboard.time_range).await?;
                self.load_current_page().await?;
            }
            View::Token | View::Peer => self.load_current_page().await?,
        }
        self.set_status("Refreshed");
        Ok(())
    }

    /// Called every loop iteration
    pub async fn tick(&mut self) -> Result<()> {
        for counter in self.dashboard.counters.iter_mut() {
            if !counter.is_settled() {
                counter.step();
            }
        }

        if let Some(set_at) = self.status_message_time {
            if set_at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        Ok(())
    }

    /// Record an error from key handling without leaving the UI
    pub fn report_error(&mut self, err: &anyhow::Error) {
        tracing::warn!("Action failed: {:#}", err);
        self.set_status(format!("Error: {}", err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockSettings;
    use crate::data::mock::MockProvider;
    use crate::data::NetworkStats;
    use crate::error::JumpError;
    use std::cell::Cell;

    async fn app() -> App<MockProvider> {
        let config = ExplorerConfig::default();
        let provider = MockProvider::new(config.mock.clone(), Some(17));
        App::new(provider, config).await.unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(app: &mut App<MockProvider>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Mock data with switchable fetch failures
    struct FlakyProvider {
        inner: MockProvider,
        fail_transactions_page: Option<usize>,
        fail_history: Cell<bool>,
    }

    impl FlakyProvider {
        fn new(fail_transactions_page: Option<usize>) -> Self {
            Self {
                inner: MockProvider::new(MockSettings::default(), Some(17)),
                fail_transactions_page,
                fail_history: Cell::new(false),
            }
        }
    }

    impl DataProvider for FlakyProvider {
        async fn network_stats(&self) -> Result<NetworkStats> {
            self.inner.network_stats().await
        }

        async fn volume_series(&self, range: TimeRange) -> Result<Vec<VolumePoint>> {
            self.inner.volume_series(range).await
        }

        async fn fetch_transactions(&self, req: PageRequest) -> Result<Page<Transaction>> {
            if self.fail_transactions_page == Some(req.page) {
                anyhow::bail!("connection reset while loading page {}", req.page);
            }
            self.inner.fetch_transactions(req).await
        }

        async fn token_info(&self, token_id: &str) -> Result<TokenInfo> {
            let mut info = self.inner.token_info(token_id).await?;
            info.is_split = true;
            Ok(info)
        }

        async fn fetch_token_history(&self, token_id: &str, req: PageRequest) -> Result<Page<Transaction>> {
            if self.fail_history.get() {
                anyhow::bail!("history unavailable");
            }
            self.inner.fetch_token_history(token_id, req).await
        }

        async fn peer_info(&self, peer_id: &str) -> Result<PeerInfo> {
            self.inner.peer_info(peer_id).await
        }

        async fn fetch_peer_tokens(&self, peer_id: &str, req: PageRequest) -> Result<Page<PeerToken>> {
            self.inner.fetch_peer_tokens(peer_id, req).await
        }

        async fn transaction_details(&self, tx: &Transaction) -> Result<TransactionDetails> {
            self.inner.transaction_details(tx).await
        }
    }

    async fn flaky_app(fail_transactions_page: Option<usize>) -> App<FlakyProvider> {
        App::new(FlakyProvider::new(fail_transactions_page), ExplorerConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_failed_page_fetch_keeps_current_page() {
        let mut app = flaky_app(Some(2)).await;
        let first_row = app.dashboard.transactions.items[0].tx_id.clone();

        assert!(app.handle_key(key(KeyCode::Right)).await.is_err());
        assert_eq!(app.dashboard.pager.current_page(), 1);
        assert_eq!(app.dashboard.transactions.page, 1);
        assert_eq!(app.dashboard.pager.showing(), (1, 10));
        assert_eq!(app.dashboard.transactions.items[0].tx_id, first_row);

        // Skipping past the broken page still works
        app.handle_key(key(KeyCode::End)).await.unwrap();
        assert_eq!(app.dashboard.pager.current_page(), 10);
        assert_eq!(app.dashboard.transactions.page, 10);
    }

    #[tokio::test]
    async fn test_failed_jump_keeps_page_and_input() {
        let mut app = flaky_app(Some(2)).await;
        app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();

        assert!(app.handle_key(key(KeyCode::Enter)).await.is_err());
        assert_eq!(app.focus, Focus::Jump);
        assert_eq!(app.dashboard.pager.current_page(), 1);
        assert_eq!(app.dashboard.pager.jump_input(), "2");
        assert_eq!(app.dashboard.transactions.page, 1);
    }

    #[tokio::test]
    async fn test_failed_parts_load_stays_on_parent_token() {
        let mut app = flaky_app(None).await;
        app.open_token("0xd22b9feaa8a378bd").await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.token.as_ref().unwrap().pager.current_page(), 2);

        app.provider.fail_history.set(true);
        assert!(app.handle_key(key(KeyCode::Char('p'))).await.is_err());
        let token = app.token.as_ref().unwrap();
        assert!(!token.viewing_parts);
        assert_eq!(token.pager.current_page(), 2);
        assert_eq!(token.history.page, 2);

        app.provider.fail_history.set(false);
        app.handle_key(key(KeyCode::Char('p'))).await.unwrap();
        let token = app.token.as_ref().unwrap();
        assert!(token.viewing_parts);
        assert_eq!(token.pager.current_page(), 1);
        assert_eq!(token.history.page, 1);
    }

    #[test]
    fn test_route_search() {
        assert_eq!(route_search("  "), None);
        assert_eq!(route_search("0x1a2b3c4d"), Some(Route::Peer("0x1a2b3c4d".to_string())));
        assert_eq!(
            route_search(" 0x1a2b3c4d "),
            Some(Route::Token(" 0x1a2b3c4d ".to_string()))
        );
        assert_eq!(route_search("0x1a2b3c4d5e"), Some(Route::Token("0x1a2b3c4d5e".to_string())));
    }

    #[test]
    fn test_counter_eases_to_target() {
        let mut counter = Counter::new(605_196);
        assert_eq!(counter.value(), 0);
        counter.step();
        assert!(counter.value() > 0 && counter.value() < 605_196);
        for _ in 0..500 {
            counter.step();
        }
        assert!(counter.is_settled());
        assert_eq!(counter.value(), 605_196);
    }

    #[tokio::test]
    async fn test_page_navigation_keys() {
        let mut app = app().await;
        assert_eq!(app.dashboard.pager.current_page(), 1);

        app.handle_key(key(KeyCode::Left)).await.unwrap();
        assert_eq!(app.dashboard.pager.current_page(), 1);

        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.dashboard.pager.current_page(), 2);
        assert_eq!(app.dashboard.transactions.page, 2);

        app.handle_key(key(KeyCode::End)).await.unwrap();
        assert_eq!(app.dashboard.pager.current_page(), 10);
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.dashboard.pager.current_page(), 10);
    }

    #[tokio::test]
    async fn test_jump_to_page_flow() {
        let mut app = app().await;

        app.handle_key(key(KeyCode::Char('g'))).await.unwrap();
        assert_eq!(app.focus, Focus::Jump);
        type_text(&mut app, "42").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.focus, Focus::Jump, "invalid jump keeps the input focused");
        assert_eq!(
            app.dashboard.pager.jump_error(),
            Some(JumpError::OutOfRange { total_pages: 10 })
        );

        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.dashboard.pager.jump_error(), None);
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        type_text(&mut app, "7").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.focus, Focus::Table);
        assert_eq!(app.dashboard.pager.current_page(), 7);
        assert_eq!(app.dashboard.transactions.page, 7);
    }

    #[tokio::test]
    async fn test_search_routes_to_views() {
        let mut app = app().await;

        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        type_text(&mut app, "QmPeer01").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Peer);
        assert_eq!(app.peer.as_ref().unwrap().info.peer_id, "QmPeer01");
        assert_eq!(app.peer.as_ref().unwrap().pager.total_pages(), 5);

        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        type_text(&mut app, "0xd22b9feaa8a378bd").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.view, View::Token);
        assert_eq!(app.token.as_ref().unwrap().pager.total_pages(), 3);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.view, View::Dashboard);
    }

    #[tokio::test]
    async fn test_transaction_panel() {
        let mut app = app().await;
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.popup, Popup::Transaction);
        let details = app.tx_details.as_ref().unwrap();
        assert_eq!(details.transaction_id, app.dashboard.transactions.items[1].tx_id);

        app.handle_key(key(KeyCode::Char('u'))).await.unwrap();
        assert!(app.quorum_expanded);
        app.handle_key(key(KeyCode::Char('i'))).await.unwrap();
        assert!(app.token_info_expanded);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.popup, Popup::None);
        assert!(app.tx_details.is_none());
    }

    #[tokio::test]
    async fn test_peer_token_opens_token_view() {
        let mut app = app().await;
        app.open_peer("QmPeer02").await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.peer.as_ref().unwrap().tokens.page, 2);

        let expected = app.peer.as_ref().unwrap().tokens.items[0].token_id.clone();
        app.handle_key(key(KeyCode::Char('o'))).await.unwrap();
        assert_eq!(app.view, View::Token);
        assert_eq!(app.token.as_ref().unwrap().info.token_id, expected);
    }

    #[tokio::test]
    async fn test_row_cursor_wraps_and_resets() {
        let mut app = app().await;
        app.handle_key(key(KeyCode::Up)).await.unwrap();
        assert_eq!(app.selected_row, 9);
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        assert_eq!(app.selected_row, 0);

        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.selected_row, 0, "changing page resets the cursor");
    }

    #[tokio::test]
    async fn test_time_range_cycles() {
        let mut app = app().await;
        app.handle_key(key(KeyCode::Char('t'))).await.unwrap();
        assert_eq!(app.dashboard.time_range, TimeRange::Month);
        assert_eq!(app.dashboard.volume.len(), 31);
    }

    #[tokio::test]
    async fn test_quit_only_from_table() {
        let mut app = app().await;
        assert!(app.accepts_quit());
        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        assert!(!app.accepts_quit());
        type_text(&mut app, "q").await;
        assert_eq!(app.search_input, "q");
    }
}
