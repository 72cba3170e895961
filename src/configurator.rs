//! Headless state of the configurator page.
//!
//! `Configurator` owns everything the page shows and every edit the user can
//! make. Nothing reaches the manager until `calculate`, except the committed
//! period range which the manager persists as soon as the slider is released.

use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::config::{
    COMMISSION_MAX, COMMISSION_MIN, DEFAULT_PROPORTION_MAX, DEFAULT_PROPORTION_MIN,
    DEFAULT_PROPORTION_WEIGHT, WRONG_DATE_LABEL,
};
use crate::error::{ConfiguratorError, ManagerError, Result};
use crate::format::{amount_step, short_date};
use crate::manager::TokenManager;
use crate::models::{DateRange, PriceHistory, TokenProportion, TokenType, TokenWeight};
use crate::routes::Route;

/// Values the user edits on this page.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableState {
    pub amount: f64,
    pub exchange_amount: f64,
    pub commission_percents: f64,
    pub calculate_range: DateRange,
    pub history_chart_range: DateRange,
    pub proportions: Vec<TokenProportion>,
    pub weights: Vec<TokenWeight>,
}

/// Values computed from the manager when tokens are synced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedState {
    pub max_date_index: usize,
    pub tokens_date: Vec<i64>,
    pub token_names: BTreeMap<String, bool>,
    pub token_labels: BTreeMap<String, String>,
    pub history: PriceHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    Add,
    Edit(usize),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightDialog {
    pub open: bool,
    /// Weight of each token right before the edited point in time.
    pub latest_weights: BTreeMap<String, f64>,
    pub edit_position: Option<usize>,
    pub edit_item: Option<TokenWeight>,
    /// Selectable date indices, `start` may exceed `end` when no date is left.
    pub min_dates: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle {
    Idle,
    Loading,
    Ready,
    Failed(String),
    Redirected,
    Closed,
}

/// Identifies one token fetch; results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountAction {
    Redirect(Route),
    FetchTokens(SyncTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Applied,
    Failed(ManagerError),
    Stale,
}

pub struct Configurator {
    manager: Rc<dyn TokenManager>,
    editable: EditableState,
    derived: DerivedState,
    dialog: WeightDialog,
    lifecycle: Lifecycle,
    generation: u64,
}

impl Configurator {
    pub fn new(manager: Rc<dyn TokenManager>) -> Self {
        let range = manager.calculation_date();
        let editable = EditableState {
            amount: manager.amount(),
            exchange_amount: manager.exchange_amount(),
            commission_percents: manager.commission(),
            calculate_range: range,
            history_chart_range: range,
            proportions: Vec::new(),
            weights: manager.rebalance_weights(),
        };
        let derived = DerivedState {
            max_date_index: manager.max_calculation_index().saturating_sub(1),
            ..DerivedState::default()
        };
        let dialog = WeightDialog {
            min_dates: range,
            ..WeightDialog::default()
        };

        Self {
            manager,
            editable,
            derived,
            dialog,
            lifecycle: Lifecycle::Idle,
            generation: 0,
        }
    }

    pub fn manager(&self) -> &Rc<dyn TokenManager> {
        &self.manager
    }

    pub fn editable(&self) -> &EditableState {
        &self.editable
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    pub fn dialog(&self) -> &WeightDialog {
        &self.dialog
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Decides what the page does once it is on screen.
    pub fn mount(&mut self) -> MountAction {
        if self.manager.price_history().is_empty() {
            info!("No price history, redirecting to {}", Route::Setup);
            self.lifecycle = Lifecycle::Redirected;
            return MountAction::Redirect(Route::Setup);
        }
        MountAction::FetchTokens(self.begin_sync())
    }

    pub fn begin_sync(&mut self) -> SyncTicket {
        self.generation += 1;
        self.lifecycle = Lifecycle::Loading;
        SyncTicket(self.generation)
    }

    pub fn finish_sync(
        &mut self,
        ticket: SyncTicket,
        result: std::result::Result<BTreeMap<String, String>, ManagerError>,
    ) -> SyncOutcome {
        if ticket.0 != self.generation || self.lifecycle == Lifecycle::Closed {
            debug!("Dropping stale token sync {:?}", ticket);
            return SyncOutcome::Stale;
        }
        match result {
            Ok(tokens) => {
                self.sync_tokens(tokens);
                SyncOutcome::Applied
            }
            Err(err) => {
                self.fail_sync(&err);
                SyncOutcome::Failed(err)
            }
        }
    }

    pub fn sync_tokens(&mut self, tokens: BTreeMap<String, String>) {
        let history = self.manager.price_history();

        let mut proportions = self.manager.proportions();
        if proportions.is_empty() {
            proportions = history
                .keys()
                .map(|name| {
                    TokenProportion::new(
                        name.clone(),
                        DEFAULT_PROPORTION_WEIGHT,
                        DEFAULT_PROPORTION_MIN,
                        DEFAULT_PROPORTION_MAX,
                    )
                })
                .collect();
        }

        self.derived.tokens_date = history
            .values()
            .next()
            .map(|series| series.iter().map(|sample| sample.time).collect())
            .unwrap_or_default();
        self.derived.token_names = tokens.keys().map(|name| (name.clone(), false)).collect();
        self.derived.token_labels = tokens;
        self.derived.history = history;
        self.editable.proportions = proportions;
        self.lifecycle = Lifecycle::Ready;

        info!(
            "Synced {} tokens, {} dates",
            self.editable.proportions.len(),
            self.derived.tokens_date.len()
        );
    }

    pub fn fail_sync(&mut self, err: &ManagerError) {
        error!("Token sync failed: {}", err);
        self.lifecycle = Lifecycle::Failed(err.to_string());
    }

    /// Invalidates any fetch still in flight.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.lifecycle = Lifecycle::Closed;
    }

    pub fn change_amount(&mut self, value: f64) -> bool {
        if value.is_finite() && value > 0.0 {
            debug!("Amount changed to {}", value);
            self.editable.amount = value;
            true
        } else {
            false
        }
    }

    pub fn change_exchange_amount(&mut self, value: f64) {
        let value = if value.is_finite() { value.trunc() } else { 0.0 };
        self.editable.exchange_amount = value.max(0.0).min(self.editable.amount);
    }

    pub fn change_commission(&mut self, value: f64) -> bool {
        let value = value.clamp(COMMISSION_MIN, COMMISSION_MAX);
        if value > 0.0 {
            self.editable.commission_percents = value;
            true
        } else {
            false
        }
    }

    pub fn change_proportion(&mut self, position: usize, weight: f64) -> Result<()> {
        let len = self.editable.proportions.len();
        match self.editable.proportions.get_mut(position) {
            Some(proportion) => {
                debug!("Proportion of {} changed to {}", proportion.name, weight);
                proportion.weight = weight;
                Ok(())
            }
            None => {
                warn!("Proportion position {} out of range ({})", position, len);
                Err(ConfiguratorError::InvalidPosition { position, len })
            }
        }
    }

    /// Slider drag. Returns false while the period is locked.
    pub fn change_period(&mut self, range: DateRange) -> bool {
        if self.period_locked() {
            return false;
        }
        self.editable.calculate_range = range.clamped(self.derived.max_date_index);
        true
    }

    /// Slider release: the range becomes the chart range and is persisted.
    pub fn commit_period(&mut self, range: DateRange) -> bool {
        if !self.change_period(range) {
            return false;
        }
        let range = self.editable.calculate_range;
        self.editable.history_chart_range = range;
        self.manager.change_calculation_date(range.start, range.end);
        debug!("Calculation period committed: {}..{}", range.start, range.end);
        true
    }

    pub fn open_weight_dialog(&mut self, target: DialogTarget) -> Result<&WeightDialog> {
        if !self.weight_editing_enabled() {
            return Err(ConfiguratorError::WeightEditingDisabled);
        }

        let weights = &self.editable.weights;
        let scanned = match target {
            DialogTarget::Add => &weights[..],
            DialogTarget::Edit(position) if position < weights.len() => &weights[..position],
            DialogTarget::Edit(position) => {
                return Err(ConfiguratorError::InvalidPosition {
                    position,
                    len: weights.len(),
                })
            }
        };

        let mut latest_weights = BTreeMap::new();
        for entry in scanned {
            for token in &entry.tokens {
                latest_weights.insert(token.name.clone(), token.weight);
            }
        }
        for proportion in &self.editable.proportions {
            latest_weights
                .entry(proportion.name.clone())
                .or_insert(proportion.weight);
        }

        let (min_date, edit_item) = match target {
            DialogTarget::Edit(position) => {
                let item = weights[position].clone();
                (item.index, Some(item))
            }
            DialogTarget::Add => {
                let previous = weights
                    .last()
                    .map(|entry| entry.index)
                    .unwrap_or(self.editable.calculate_range.start);
                (previous + 1, None)
            }
        };

        self.dialog = WeightDialog {
            open: true,
            latest_weights,
            edit_position: match target {
                DialogTarget::Edit(position) => Some(position),
                DialogTarget::Add => None,
            },
            edit_item,
            min_dates: DateRange::new(min_date, self.editable.calculate_range.end),
        };
        Ok(&self.dialog)
    }

    pub fn confirm_weight_dialog(&mut self, model: TokenWeight) -> Result<()> {
        let mut list = self.editable.weights.clone();
        match self.dialog.edit_position {
            Some(position) if position < list.len() => list[position] = model,
            Some(position) => {
                return Err(ConfiguratorError::InvalidPosition {
                    position,
                    len: list.len(),
                })
            }
            None => list.push(model),
        }
        list.sort_by_key(|entry| entry.timestamp);

        self.editable.weights = list;
        self.close_weight_dialog();
        Ok(())
    }

    pub fn cancel_weight_dialog(&mut self) {
        self.close_weight_dialog();
    }

    fn close_weight_dialog(&mut self) {
        self.dialog.open = false;
        self.dialog.edit_position = None;
        self.dialog.edit_item = None;
    }

    pub fn delete_weight(&mut self, position: usize) -> Result<TokenWeight> {
        let mut list = self.editable.weights.clone();
        if position >= list.len() {
            return Err(ConfiguratorError::InvalidPosition {
                position,
                len: list.len(),
            });
        }
        let removed = list.remove(position);
        self.editable.weights = list;
        Ok(removed)
    }

    /// Commits the page state into the manager and names the next route.
    pub fn calculate(&self) -> Route {
        let state = &self.editable;
        self.manager.set_exchange_amount(state.exchange_amount);
        self.manager.change_proportions(state.proportions.clone());
        self.manager.set_rebalance_weights(state.weights.clone());
        self.manager.set_commission(state.commission_percents);
        self.manager.set_amount(state.amount);
        info!(
            "Calculation requested: amount {}, {} weight changes",
            state.amount,
            state.weights.len()
        );
        Route::Results
    }

    pub fn range_track_label(&self, index: usize) -> String {
        self.derived
            .tokens_date
            .get(index)
            .and_then(|time| short_date(*time))
            .unwrap_or_else(|| WRONG_DATE_LABEL.to_string())
    }

    pub fn amount_step(&self) -> f64 {
        amount_step(self.editable.amount)
    }

    pub fn exchange_amount_step(&self) -> f64 {
        amount_step(self.editable.exchange_amount)
    }

    /// The period and base proportions are frozen once rebalances exist.
    pub fn period_locked(&self) -> bool {
        !self.editable.weights.is_empty()
    }

    pub fn weight_editing_enabled(&self) -> bool {
        self.manager.token_type() == TokenType::ManualRebalance
    }

    pub fn initial_date(&self) -> Option<i64> {
        self.derived
            .tokens_date
            .get(self.editable.calculate_range.start)
            .copied()
    }

    pub fn finish_date(&self) -> Option<i64> {
        self.derived
            .tokens_date
            .get(self.editable.calculate_range.end)
            .copied()
    }

    pub fn dialog_token_names(&self) -> Vec<String> {
        self.derived.history.keys().cloned().collect()
    }

    /// Whether the open dialog has at least one date of the axis to offer.
    pub fn dialog_has_selectable_dates(&self) -> bool {
        let range = self.dialog.min_dates;
        range.start <= range.end && range.end < self.derived.tokens_date.len()
    }

    /// Display label of a synced token, falling back to its name.
    pub fn token_label<'a>(&'a self, name: &'a str) -> &'a str {
        self.derived
            .token_labels
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::MemoryTokenManager;
    use crate::models::{Token, TokenPriceHistory};

    const DAY: i64 = 86_400;
    const START: i64 = 1_514_764_800;

    fn history(names: &[&str], samples: usize) -> PriceHistory {
        names
            .iter()
            .map(|name| {
                let series = (0..samples)
                    .map(|i| TokenPriceHistory {
                        time: START + i as i64 * DAY,
                        value: 100.0 + i as f64,
                    })
                    .collect();
                (name.to_string(), series)
            })
            .collect()
    }

    fn labels() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("A".to_string(), "Token A".to_string()),
            ("B".to_string(), "Token B".to_string()),
        ])
    }

    fn manager_with(samples: usize) -> Rc<MemoryTokenManager> {
        let manager = Rc::new(MemoryTokenManager::new());
        manager.set_price_history(history(&["A", "B"], samples));
        manager.set_available_tokens(labels());
        manager
    }

    fn synced(manager: &Rc<MemoryTokenManager>) -> Configurator {
        let mut page = Configurator::new(manager.clone());
        page.sync_tokens(labels());
        page
    }

    fn entry(timestamp_day: i64, weights: &[(&str, f64)]) -> TokenWeight {
        TokenWeight::new(
            weights.iter().map(|(n, w)| Token::new(*n, *w)).collect(),
            START + timestamp_day * DAY,
            timestamp_day as usize,
        )
    }

    #[test]
    fn constructor_seeds_from_manager() {
        let manager = manager_with(30);
        manager.set_amount(2500.0);
        manager.set_commission(0.5);
        manager.change_calculation_date(3, 20);
        manager.set_rebalance_weights(vec![entry(5, &[("A", 2.0)])]);

        let page = Configurator::new(manager.clone());
        assert_eq!(page.editable().amount, 2500.0);
        assert_eq!(page.editable().commission_percents, 0.5);
        assert_eq!(page.editable().calculate_range, DateRange::new(3, 20));
        assert_eq!(page.editable().history_chart_range, DateRange::new(3, 20));
        assert_eq!(page.dialog().min_dates, DateRange::new(3, 20));
        assert_eq!(page.editable().weights.len(), 1);
        assert_eq!(page.derived().max_date_index, 29);
        assert_eq!(page.lifecycle(), &Lifecycle::Idle);
    }

    #[test]
    fn empty_history_redirects_without_mutation() {
        let manager = Rc::new(MemoryTokenManager::new());
        let mut page = Configurator::new(manager.clone());
        let before = page.editable().clone();

        assert_eq!(page.mount(), MountAction::Redirect(Route::Setup));
        assert_eq!(page.lifecycle(), &Lifecycle::Redirected);
        assert_eq!(page.editable(), &before);
        assert_eq!(page.derived(), &DerivedState::default());
    }

    #[tokio::test]
    async fn sync_creates_default_proportions_and_date_axis() {
        let manager = manager_with(5);
        let mut page = Configurator::new(manager.clone());

        let ticket = match page.mount() {
            MountAction::FetchTokens(ticket) => ticket,
            other => panic!("unexpected mount action {:?}", other),
        };
        assert_eq!(page.lifecycle(), &Lifecycle::Loading);

        let result = manager.available_tokens().await;
        assert_eq!(page.finish_sync(ticket, result), SyncOutcome::Applied);

        let proportions = &page.editable().proportions;
        assert_eq!(proportions.len(), 2);
        for proportion in proportions {
            assert_eq!(proportion.weight, 10.0);
            assert_eq!(proportion.min, 1.0);
            assert_eq!(proportion.max, 10.0);
        }
        assert_eq!(page.derived().tokens_date.len(), 5);
        assert_eq!(page.derived().token_names.get("A"), Some(&false));
        assert_eq!(page.token_label("B"), "Token B");
        assert_eq!(page.token_label("C"), "C");
        assert_eq!(page.lifecycle(), &Lifecycle::Ready);
    }

    #[test]
    fn sync_keeps_manager_proportions() {
        let manager = manager_with(5);
        manager.change_proportions(vec![
            TokenProportion::new("A", 3.0, 1.0, 10.0),
            TokenProportion::new("B", 7.0, 1.0, 10.0),
        ]);
        let page = synced(&manager);
        assert_eq!(page.editable().proportions[0].weight, 3.0);
        assert_eq!(page.editable().proportions[1].weight, 7.0);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_collections_empty() {
        let manager = manager_with(5);
        manager.fail_available_tokens("backend offline");
        let mut page = Configurator::new(manager.clone());

        let ticket = match page.mount() {
            MountAction::FetchTokens(ticket) => ticket,
            other => panic!("unexpected mount action {:?}", other),
        };
        let outcome = page.finish_sync(ticket, manager.available_tokens().await);

        assert_eq!(
            outcome,
            SyncOutcome::Failed(ManagerError::TokensUnavailable("backend offline".into()))
        );
        assert!(matches!(page.lifecycle(), Lifecycle::Failed(reason) if reason.contains("backend offline")));
        assert!(page.editable().proportions.is_empty());
        assert!(page.derived().tokens_date.is_empty());
    }

    #[test]
    fn teardown_drops_late_results() {
        let manager = manager_with(5);
        let mut page = Configurator::new(manager.clone());
        let ticket = page.begin_sync();
        page.teardown();

        assert_eq!(page.finish_sync(ticket, Ok(labels())), SyncOutcome::Stale);
        assert!(page.editable().proportions.is_empty());
        assert_eq!(page.lifecycle(), &Lifecycle::Closed);
    }

    #[test]
    fn superseded_ticket_is_stale() {
        let manager = manager_with(5);
        let mut page = Configurator::new(manager.clone());
        let first = page.begin_sync();
        let second = page.begin_sync();

        assert_eq!(page.finish_sync(first, Ok(labels())), SyncOutcome::Stale);
        assert_eq!(page.finish_sync(second, Ok(labels())), SyncOutcome::Applied);
    }

    #[test]
    fn non_positive_amount_is_ignored() {
        let manager = manager_with(5);
        let mut page = synced(&manager);
        let before = page.editable().amount;

        for value in [0.0, -1.0, -5000.0, f64::NAN, f64::INFINITY] {
            assert!(!page.change_amount(value));
            assert_eq!(page.editable().amount, before);
        }
        assert!(page.change_amount(42.0));
        assert_eq!(page.editable().amount, 42.0);
    }

    #[test]
    fn exchange_amount_stays_within_amount() {
        let manager = manager_with(5);
        let mut page = synced(&manager);
        page.change_amount(1000.0);

        for value in [-10.0, 0.0, 250.7, 999.0, 1000.0, 1_000_000.0, f64::NAN] {
            page.change_exchange_amount(value);
            let exchange = page.editable().exchange_amount;
            assert!((0.0..=1000.0).contains(&exchange), "{} -> {}", value, exchange);
        }
        page.change_exchange_amount(250.7);
        assert_eq!(page.editable().exchange_amount, 250.0);
    }

    #[test]
    fn commission_is_clamped() {
        let manager = manager_with(5);
        let mut page = synced(&manager);

        for value in [-3.0, 0.0, 0.001, 5.5, 99.99, 150.0] {
            assert!(page.change_commission(value));
            let commission = page.editable().commission_percents;
            assert!((0.01..=99.99).contains(&commission));
        }
        let before = page.editable().commission_percents;
        assert!(!page.change_commission(f64::NAN));
        assert_eq!(page.editable().commission_percents, before);
    }

    #[test]
    fn proportion_change_needs_valid_position() {
        let manager = manager_with(5);
        let mut page = synced(&manager);

        page.change_proportion(1, 4.0).unwrap();
        assert_eq!(page.editable().proportions[1].weight, 4.0);
        assert_eq!(page.editable().proportions.len(), 2);

        assert_eq!(
            page.change_proportion(2, 4.0),
            Err(ConfiguratorError::InvalidPosition { position: 2, len: 2 })
        );
    }

    #[test]
    fn period_commit_updates_chart_range_and_manager() {
        let manager = manager_with(30);
        let mut page = synced(&manager);

        assert!(page.change_period(DateRange::new(4, 12)));
        assert_eq!(page.editable().calculate_range, DateRange::new(4, 12));
        assert_eq!(page.editable().history_chart_range, DateRange::new(0, 29));

        assert!(page.commit_period(DateRange::new(5, 80)));
        assert_eq!(page.editable().calculate_range, DateRange::new(5, 29));
        assert_eq!(page.editable().history_chart_range, DateRange::new(5, 29));
        assert_eq!(manager.calculation_date(), DateRange::new(5, 29));
    }

    #[test]
    fn period_is_locked_by_weight_changes() {
        let manager = manager_with(30);
        manager.set_rebalance_weights(vec![entry(6, &[("A", 1.0)])]);
        let mut page = synced(&manager);

        assert!(page.period_locked());
        assert!(!page.commit_period(DateRange::new(2, 3)));
        assert_eq!(page.editable().calculate_range, DateRange::new(0, 29));
    }

    #[test]
    fn dialog_without_entries_uses_proportions() {
        let manager = manager_with(30);
        manager.change_proportions(vec![TokenProportion::new("A", 5.0, 1.0, 10.0)]);
        manager.change_calculation_date(4, 20);
        let mut page = synced(&manager);

        let dialog = page.open_weight_dialog(DialogTarget::Add).unwrap();
        assert!(dialog.open);
        assert_eq!(dialog.latest_weights, BTreeMap::from([("A".to_string(), 5.0)]));
        assert_eq!(dialog.min_dates, DateRange::new(5, 20));
        assert_eq!(dialog.edit_item, None);
    }

    #[test]
    fn dialog_scans_entries_before_target() {
        let manager = manager_with(30);
        manager.set_rebalance_weights(vec![
            entry(3, &[("A", 2.0), ("B", 8.0)]),
            entry(9, &[("A", 6.0)]),
            entry(15, &[("B", 1.0)]),
        ]);
        let mut page = synced(&manager);

        let dialog = page.open_weight_dialog(DialogTarget::Add).unwrap();
        assert_eq!(dialog.latest_weights.get("A"), Some(&6.0));
        assert_eq!(dialog.latest_weights.get("B"), Some(&1.0));
        assert_eq!(dialog.min_dates.start, 16);

        let dialog = page.open_weight_dialog(DialogTarget::Edit(1)).unwrap();
        assert_eq!(dialog.latest_weights.get("A"), Some(&2.0));
        assert_eq!(dialog.latest_weights.get("B"), Some(&8.0));
        assert_eq!(dialog.min_dates, DateRange::new(9, 29));
        assert_eq!(dialog.edit_item.as_ref().map(|w| w.index), Some(9));

        let dialog = page.open_weight_dialog(DialogTarget::Edit(0)).unwrap();
        assert_eq!(dialog.latest_weights.get("A"), Some(&10.0));

        assert!(matches!(
            page.open_weight_dialog(DialogTarget::Edit(3)),
            Err(ConfiguratorError::InvalidPosition { position: 3, len: 3 })
        ));
    }

    #[test]
    fn dialog_refused_for_automatic_tokens() {
        let manager = manager_with(5);
        manager.set_token_type(TokenType::AutoRebalance);
        let mut page = synced(&manager);

        assert!(!page.weight_editing_enabled());
        assert!(matches!(
            page.open_weight_dialog(DialogTarget::Add),
            Err(ConfiguratorError::WeightEditingDisabled)
        ));
    }

    #[test]
    fn earlier_entry_is_sorted_first() {
        let manager = manager_with(30);
        manager.set_rebalance_weights(vec![entry(12, &[("A", 3.0)])]);
        let mut page = synced(&manager);

        page.open_weight_dialog(DialogTarget::Add).unwrap();
        page.confirm_weight_dialog(entry(4, &[("B", 2.0)])).unwrap();

        let weights = &page.editable().weights;
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].index, 4);
        assert_eq!(weights[1].index, 12);
        assert!(!page.dialog().open);
    }

    #[test]
    fn edits_keep_list_sorted() {
        let manager = manager_with(40);
        let mut page = synced(&manager);

        for day in [20, 3, 35, 11, 27] {
            page.open_weight_dialog(DialogTarget::Add).unwrap();
            page.confirm_weight_dialog(entry(day, &[("A", 1.0)])).unwrap();
        }
        page.open_weight_dialog(DialogTarget::Edit(0)).unwrap();
        page.confirm_weight_dialog(entry(38, &[("A", 9.0)])).unwrap();
        page.open_weight_dialog(DialogTarget::Edit(4)).unwrap();
        page.confirm_weight_dialog(entry(1, &[("B", 9.0)])).unwrap();

        let times: Vec<i64> = page.editable().weights.iter().map(|w| w.timestamp).collect();
        assert_eq!(times.len(), 5);
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(page.editable().weights[0].index, 1);
    }

    #[test]
    fn cancel_keeps_list() {
        let manager = manager_with(10);
        let mut page = synced(&manager);
        page.open_weight_dialog(DialogTarget::Add).unwrap();
        page.cancel_weight_dialog();
        assert!(!page.dialog().open);
        assert!(page.editable().weights.is_empty());
    }

    #[test]
    fn delete_removes_one_and_keeps_order() {
        let manager = manager_with(30);
        manager.set_rebalance_weights(vec![
            entry(2, &[("A", 1.0)]),
            entry(5, &[("A", 2.0)]),
            entry(8, &[("A", 3.0)]),
            entry(13, &[("A", 4.0)]),
        ]);
        let mut page = synced(&manager);

        let removed = page.delete_weight(1).unwrap();
        assert_eq!(removed.index, 5);
        let indices: Vec<usize> = page.editable().weights.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![2, 8, 13]);

        assert!(page.delete_weight(3).is_err());
        assert_eq!(page.editable().weights.len(), 3);
    }

    #[test]
    fn calculate_commits_everything() {
        let manager = manager_with(30);
        let mut page = synced(&manager);
        page.change_amount(5000.0);
        page.change_exchange_amount(1200.0);
        page.change_commission(0.3);
        page.change_proportion(0, 4.0).unwrap();
        page.open_weight_dialog(DialogTarget::Add).unwrap();
        page.confirm_weight_dialog(entry(7, &[("A", 8.0)])).unwrap();

        assert_eq!(manager.amount(), 10_000.0);
        assert_eq!(page.calculate(), Route::Results);

        assert_eq!(manager.amount(), 5000.0);
        assert_eq!(manager.exchange_amount(), 1200.0);
        assert_eq!(manager.commission(), 0.3);
        assert_eq!(manager.proportions()[0].weight, 4.0);
        assert_eq!(manager.rebalance_weights().len(), 1);
    }

    #[test]
    fn slider_labels_and_dates() {
        let manager = manager_with(5);
        manager.change_calculation_date(1, 3);
        let page = synced(&manager);

        assert_eq!(page.range_track_label(0), "01 Jan 2018");
        assert_eq!(page.range_track_label(5), WRONG_DATE_LABEL);
        assert_eq!(page.initial_date(), Some(START + DAY));
        assert_eq!(page.finish_date(), Some(START + 3 * DAY));
        assert_eq!(page.dialog_token_names(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(page.amount_step(), 10_000.0);
    }

    #[test]
    fn dialog_dates_must_exist_on_axis() {
        let manager = manager_with(10);
        manager.change_calculation_date(2, 9);
        let mut page = Configurator::new(manager.clone());
        assert!(!page.dialog_has_selectable_dates());

        page.sync_tokens(labels());
        page.open_weight_dialog(DialogTarget::Add).unwrap();
        assert!(page.dialog_has_selectable_dates());

        page.confirm_weight_dialog(entry(9, &[("A", 3.0)])).unwrap();
        page.open_weight_dialog(DialogTarget::Add).unwrap();
        assert_eq!(page.dialog().min_dates, DateRange::new(10, 9));
        assert!(!page.dialog_has_selectable_dates());
    }

    #[test]
    fn dragged_thumb_stops_at_the_other_one() {
        let manager = manager_with(30);
        manager.change_calculation_date(5, 12);
        let mut page = synced(&manager);

        let range = page.editable().calculate_range;
        assert!(page.change_period(range.with_start(20)));
        assert_eq!(page.editable().calculate_range, DateRange::new(12, 12));

        let range = page.editable().calculate_range;
        assert!(page.commit_period(range.with_end(3)));
        assert_eq!(page.editable().calculate_range, DateRange::new(12, 12));
        assert_eq!(manager.calculation_date(), DateRange::new(12, 12));

        let range = page.editable().calculate_range;
        assert!(page.change_period(range.with_end(40)));
        assert_eq!(page.editable().calculate_range, DateRange::new(12, 29));
    }
}
