use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::DemoTemplate;
use crate::error::ManagerError;
use crate::models::{
    DateRange, PriceHistory, TokenPriceHistory, TokenProportion, TokenType, TokenWeight,
};

/// Domain state behind the configurator page.
///
/// Setters take `&self`: managers live behind an `Rc` shared by every page of
/// the single-threaded UI and keep their state in interior cells.
#[async_trait(?Send)]
pub trait TokenManager {
    fn amount(&self) -> f64;
    fn set_amount(&self, amount: f64);

    fn exchange_amount(&self) -> f64;
    fn set_exchange_amount(&self, amount: f64);

    fn commission(&self) -> f64;
    fn set_commission(&self, percents: f64);

    fn calculation_date(&self) -> DateRange;
    fn change_calculation_date(&self, start: usize, end: usize);

    /// Number of selectable positions on the date axis.
    fn max_calculation_index(&self) -> usize;

    fn rebalance_weights(&self) -> Vec<TokenWeight>;
    fn set_rebalance_weights(&self, weights: Vec<TokenWeight>);

    fn proportions(&self) -> Vec<TokenProportion>;
    fn change_proportions(&self, proportions: Vec<TokenProportion>);

    fn price_history(&self) -> PriceHistory;

    /// Token name to display label.
    async fn available_tokens(&self) -> Result<BTreeMap<String, String>, ManagerError>;

    fn token_type(&self) -> TokenType;

    /// Seconds between two consecutive price samples.
    fn step_sec(&self) -> i64;
}

/// Snapshot of what the configurator committed, shown on the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedConfig {
    pub amount: f64,
    pub exchange_amount: f64,
    pub commission: f64,
    pub calculation_date: DateRange,
    pub token_type: TokenType,
    pub proportions: Vec<TokenProportion>,
    pub rebalance_weights: Vec<TokenWeight>,
}

impl CommittedConfig {
    pub fn from_manager(manager: &dyn TokenManager) -> Self {
        Self {
            amount: manager.amount(),
            exchange_amount: manager.exchange_amount(),
            commission: manager.commission(),
            calculation_date: manager.calculation_date(),
            token_type: manager.token_type(),
            proportions: manager.proportions(),
            rebalance_weights: manager.rebalance_weights(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone)]
struct ManagerState {
    amount: f64,
    exchange_amount: f64,
    commission: f64,
    calculation_date: DateRange,
    rebalance_weights: Vec<TokenWeight>,
    proportions: Vec<TokenProportion>,
    price_history: PriceHistory,
    available_tokens: Result<BTreeMap<String, String>, ManagerError>,
    token_type: TokenType,
}

impl Default for ManagerState {
    fn default() -> Self {
        Self {
            amount: 10_000.0,
            exchange_amount: 0.0,
            commission: 1.0,
            calculation_date: DateRange::default(),
            rebalance_weights: Vec::new(),
            proportions: Vec::new(),
            price_history: PriceHistory::new(),
            available_tokens: Ok(BTreeMap::new()),
            token_type: TokenType::ManualRebalance,
        }
    }
}

/// In-memory manager used by the demo application and the tests.
#[derive(Debug, Default)]
pub struct MemoryTokenManager {
    state: RefCell<ManagerState>,
}

impl MemoryTokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded history and resets the calculation range to span it.
    pub fn set_price_history(&self, history: PriceHistory) {
        let mut state = self.state.borrow_mut();
        let len = history.values().next().map(|series| series.len()).unwrap_or(0);
        state.calculation_date = DateRange::new(0, len.saturating_sub(1));
        state.price_history = history;
        state.proportions.clear();
        state.rebalance_weights.clear();
        info!("Loaded price history ({} samples)", len);
    }

    pub fn set_available_tokens(&self, tokens: BTreeMap<String, String>) {
        self.state.borrow_mut().available_tokens = Ok(tokens);
    }

    /// Makes the next `available_tokens` call fail with `reason`.
    pub fn fail_available_tokens(&self, reason: impl Into<String>) {
        self.state.borrow_mut().available_tokens =
            Err(ManagerError::TokensUnavailable(reason.into()));
    }

    pub fn set_token_type(&self, token_type: TokenType) {
        self.state.borrow_mut().token_type = token_type;
    }

    /// Generates a random-walk history for every token of `template`.
    pub fn seed_demo<R: Rng>(&self, template: &DemoTemplate, rng: &mut R) {
        let mut history = PriceHistory::new();
        let mut labels = BTreeMap::new();

        for (name, label, start_price) in template.tokens {
            let mut price = *start_price;
            let series = (0..template.samples)
                .map(|i| {
                    if i > 0 {
                        let change = rng.gen_range(-template.volatility..=template.volatility);
                        price = (price * (1.0 + change)).max(start_price * 0.01);
                    }
                    TokenPriceHistory {
                        time: template.start_time + i as i64 * template.step_sec,
                        value: price,
                    }
                })
                .collect();
            history.insert(name.to_string(), series);
            labels.insert(name.to_string(), label.to_string());
        }

        debug!("Seeded demo '{}' with {} tokens", template.name, labels.len());
        self.set_price_history(history);
        self.set_available_tokens(labels);
        self.set_amount(template.amount);
        self.set_exchange_amount(0.0);
    }
}

#[async_trait(?Send)]
impl TokenManager for MemoryTokenManager {
    fn amount(&self) -> f64 {
        self.state.borrow().amount
    }

    fn set_amount(&self, amount: f64) {
        self.state.borrow_mut().amount = amount;
    }

    fn exchange_amount(&self) -> f64 {
        self.state.borrow().exchange_amount
    }

    fn set_exchange_amount(&self, amount: f64) {
        self.state.borrow_mut().exchange_amount = amount;
    }

    fn commission(&self) -> f64 {
        self.state.borrow().commission
    }

    fn set_commission(&self, percents: f64) {
        self.state.borrow_mut().commission = percents;
    }

    fn calculation_date(&self) -> DateRange {
        self.state.borrow().calculation_date
    }

    fn change_calculation_date(&self, start: usize, end: usize) {
        let max = self.max_calculation_index().saturating_sub(1);
        self.state.borrow_mut().calculation_date = DateRange::new(start, end).clamped(max);
    }

    fn max_calculation_index(&self) -> usize {
        self.state
            .borrow()
            .price_history
            .values()
            .next()
            .map(|series| series.len())
            .unwrap_or(0)
    }

    fn rebalance_weights(&self) -> Vec<TokenWeight> {
        self.state.borrow().rebalance_weights.clone()
    }

    fn set_rebalance_weights(&self, weights: Vec<TokenWeight>) {
        self.state.borrow_mut().rebalance_weights = weights;
    }

    fn proportions(&self) -> Vec<TokenProportion> {
        self.state.borrow().proportions.clone()
    }

    fn change_proportions(&self, proportions: Vec<TokenProportion>) {
        self.state.borrow_mut().proportions = proportions;
    }

    fn price_history(&self) -> PriceHistory {
        self.state.borrow().price_history.clone()
    }

    async fn available_tokens(&self) -> Result<BTreeMap<String, String>, ManagerError> {
        let state = self.state.borrow();
        if state.price_history.is_empty() {
            return Err(ManagerError::NoPriceHistory);
        }
        state.available_tokens.clone()
    }

    fn token_type(&self) -> TokenType {
        self.state.borrow().token_type
    }

    fn step_sec(&self) -> i64 {
        let state = self.state.borrow();
        match state.price_history.values().next() {
            Some(series) if series.len() > 1 => series[1].time - series[0].time,
            _ => 0,
        }
    }
}
