use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_navigate, NavigateOptions, A};
use std::collections::BTreeMap;
use tracing::warn;

use super::widgets::{HistoryChart, ProportionsList, WeightChart, WeightDialog, WeightList};
use super::SharedManager;
use crate::config::DIALOG_MAX_WEIGHT;
use crate::configurator::{Configurator, DialogTarget, Lifecycle, MountAction, SyncOutcome};
use crate::dom::alert;
use crate::format::{format_money, format_percent, parse_money, parse_percent};
use crate::models::{DateRange, PriceHistory, TokenProportion, TokenWeight};
use crate::routes::Route;

/// Memoized slices of the page state. Each one notifies only when its own
/// value changes, so an amount keystroke does not redraw the charts.
#[derive(Clone, Copy)]
pub struct PageState {
    pub page: RwSignal<Configurator>,
    pub amount: Memo<f64>,
    pub exchange_amount: Memo<f64>,
    pub commission: Memo<f64>,
    pub range: Memo<DateRange>,
    pub chart_range: Memo<DateRange>,
    pub max_index: Memo<usize>,
    pub start_label: Memo<String>,
    pub end_label: Memo<String>,
    pub proportions: Memo<Vec<TokenProportion>>,
    pub labels: Memo<BTreeMap<String, String>>,
    pub weights: Memo<Vec<TokenWeight>>,
    pub history: Memo<PriceHistory>,
    pub dates: Memo<Vec<i64>>,
    pub initial_date: Memo<Option<i64>>,
    pub finish_date: Memo<Option<i64>>,
    pub locked: Memo<bool>,
    pub editing_enabled: Memo<bool>,
    pub lifecycle: Memo<Lifecycle>,
    pub dialog_open: Memo<bool>,
    pub dialog_weights: Memo<BTreeMap<String, f64>>,
    pub dialog_item: Memo<Option<TokenWeight>>,
    pub dialog_range: Memo<DateRange>,
    pub dialog_selectable: Memo<bool>,
    pub dialog_token_names: Memo<Vec<String>>,
}

impl PageState {
    pub fn new(configurator: Configurator) -> Self {
        let page = create_rw_signal(configurator);
        Self {
            page,
            amount: create_memo(move |_| page.with(|c| c.editable().amount)),
            exchange_amount: create_memo(move |_| page.with(|c| c.editable().exchange_amount)),
            commission: create_memo(move |_| page.with(|c| c.editable().commission_percents)),
            range: create_memo(move |_| page.with(|c| c.editable().calculate_range)),
            chart_range: create_memo(move |_| page.with(|c| c.editable().history_chart_range)),
            max_index: create_memo(move |_| page.with(|c| c.derived().max_date_index)),
            start_label: create_memo(move |_| {
                page.with(|c| c.range_track_label(c.editable().calculate_range.start))
            }),
            end_label: create_memo(move |_| {
                page.with(|c| c.range_track_label(c.editable().calculate_range.end))
            }),
            proportions: create_memo(move |_| page.with(|c| c.editable().proportions.clone())),
            labels: create_memo(move |_| {
                page.with(|c| {
                    c.editable()
                        .proportions
                        .iter()
                        .map(|p| (p.name.clone(), c.token_label(&p.name).to_string()))
                        .collect()
                })
            }),
            weights: create_memo(move |_| page.with(|c| c.editable().weights.clone())),
            history: create_memo(move |_| page.with(|c| c.derived().history.clone())),
            dates: create_memo(move |_| page.with(|c| c.derived().tokens_date.clone())),
            initial_date: create_memo(move |_| page.with(|c| c.initial_date())),
            finish_date: create_memo(move |_| page.with(|c| c.finish_date())),
            locked: create_memo(move |_| page.with(|c| c.period_locked())),
            editing_enabled: create_memo(move |_| page.with(|c| c.weight_editing_enabled())),
            lifecycle: create_memo(move |_| page.with(|c| c.lifecycle().clone())),
            dialog_open: create_memo(move |_| page.with(|c| c.dialog().open)),
            dialog_weights: create_memo(move |_| page.with(|c| c.dialog().latest_weights.clone())),
            dialog_item: create_memo(move |_| page.with(|c| c.dialog().edit_item.clone())),
            dialog_range: create_memo(move |_| page.with(|c| c.dialog().min_dates)),
            dialog_selectable: create_memo(move |_| page.with(|c| c.dialog_has_selectable_dates())),
            dialog_token_names: create_memo(move |_| page.with(|c| c.dialog_token_names())),
        }
    }
}

#[component]
pub fn ConfiguratorPage() -> impl IntoView {
    let manager = expect_context::<SharedManager>();
    let navigate = use_navigate();
    let state = PageState::new(Configurator::new(manager.clone()));
    let page = state.page;

    on_cleanup(move || {
        page.try_update_untracked(|c| c.teardown());
    });

    // Mount: redirect when nothing is loaded, otherwise fetch tokens once.
    let mount_navigate = navigate.clone();
    create_effect(move |mounted: Option<()>| {
        if mounted.is_some() {
            return;
        }
        match page.try_update(|c| c.mount()) {
            Some(MountAction::Redirect(route)) => mount_navigate(
                route.path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            ),
            Some(MountAction::FetchTokens(ticket)) => {
                let manager = manager.clone();
                spawn_local(async move {
                    let result = manager.available_tokens().await;
                    if let Some(SyncOutcome::Failed(err)) =
                        page.try_update(|c| c.finish_sync(ticket, result))
                    {
                        alert(&err.to_string());
                    }
                });
            }
            None => {}
        }
    });

    let step_sec = page.with_untracked(|c| c.manager().step_sec());

    let move_period = move |thumb: fn(DateRange, usize) -> DateRange, index: usize, commit: bool| {
        page.update(|c| {
            let next = thumb(c.editable().calculate_range, index);
            if commit {
                c.commit_period(next);
            } else {
                c.change_period(next);
            }
        });
    };

    let open_dialog = move |target: DialogTarget| {
        page.update(|c| {
            if let Err(err) = c.open_weight_dialog(target) {
                warn!("Cannot open weight dialog: {}", err);
            }
        });
    };

    let on_calculate = move |_: ev::MouseEvent| {
        let route = page.with_untracked(|c| c.calculate());
        navigate(route.path(), Default::default());
    };

    view! {
        <Title text="Configurator"/>
        <div class="max-w-7xl mx-auto p-4">
            <h1 class="text-3xl font-bold mb-6">"Multitoken Configurator"</h1>

            {move || match state.lifecycle.get() {
                Lifecycle::Loading => view! {
                    <div class="p-3 mb-4 rounded bg-blue-50 text-blue-800">"Loading tokens..."</div>
                }.into_view(),
                Lifecycle::Failed(reason) => view! {
                    <div class="p-3 mb-4 rounded bg-red-50 text-red-800">
                        {format!("Unable to load tokens: {}", reason)}
                    </div>
                }.into_view(),
                _ => ().into_view(),
            }}

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="p-6 rounded-lg shadow bg-white space-y-4">
                    <div>
                        <label class="block text-sm font-medium mb-2">"Amount of money:"</label>
                        <div class="flex gap-2">
                            <button
                                class="px-3 rounded bg-gray-200 hover:bg-gray-300"
                                on:click=move |_| page.update(|c| {
                                    let next = c.editable().amount - c.amount_step();
                                    c.change_amount(next);
                                })
                            >
                                "-"
                            </button>
                            <input
                                type="text"
                                class="w-full p-3 border rounded-lg focus:ring-2 focus:ring-blue-500"
                                prop:value=move || format_money(state.amount.get())
                                on:change=move |ev| {
                                    let value = parse_money(&event_target_value(&ev));
                                    page.update(|c| {
                                        if let Some(value) = value {
                                            c.change_amount(value);
                                        }
                                    });
                                }
                            />
                            <button
                                class="px-3 rounded bg-gray-200 hover:bg-gray-300"
                                on:click=move |_| page.update(|c| {
                                    let next = c.editable().amount + c.amount_step();
                                    c.change_amount(next);
                                })
                            >
                                "+"
                            </button>
                        </div>
                    </div>

                    <div>
                        <label class="block text-sm font-medium mb-2">"Exchange Amount (Optional):"</label>
                        <div class="flex gap-2">
                            <button
                                class="px-3 rounded bg-gray-200 hover:bg-gray-300"
                                on:click=move |_| page.update(|c| {
                                    let next = c.editable().exchange_amount - c.exchange_amount_step();
                                    c.change_exchange_amount(next);
                                })
                            >
                                "-"
                            </button>
                            <input
                                type="text"
                                class="w-full p-3 border rounded-lg focus:ring-2 focus:ring-blue-500"
                                prop:value=move || format_money(state.exchange_amount.get())
                                on:change=move |ev| {
                                    let value = parse_money(&event_target_value(&ev)).unwrap_or(0.0);
                                    page.update(|c| c.change_exchange_amount(value));
                                }
                            />
                            <button
                                class="px-3 rounded bg-gray-200 hover:bg-gray-300"
                                on:click=move |_| page.update(|c| {
                                    let next = c.editable().exchange_amount + c.exchange_amount_step();
                                    c.change_exchange_amount(next);
                                })
                            >
                                "+"
                            </button>
                        </div>
                    </div>

                    <div style="display: none">
                        <label class="block text-sm font-medium mb-2">"Commission percents:"</label>
                        <input
                            type="text"
                            class="w-full p-3 border rounded-lg"
                            prop:value=move || format_percent(state.commission.get())
                            on:change=move |ev| {
                                let value = parse_percent(&event_target_value(&ev));
                                page.update(|c| {
                                    if let Some(value) = value {
                                        c.change_commission(value);
                                    }
                                });
                            }
                        />
                    </div>

                    <div>
                        <label class="block text-sm font-medium mb-2">"Period:"</label>
                        <div class="flex justify-between text-xs text-gray-600 mb-1">
                            <span>{move || state.start_label.get()}</span>
                            <span>{move || state.end_label.get()}</span>
                        </div>
                        <input
                            type="range"
                            class="w-full"
                            min="0"
                            max=move || state.max_index.get().to_string()
                            step="1"
                            prop:value=move || state.range.get().start.to_string()
                            prop:disabled=move || state.locked.get()
                            on:input=move |ev| {
                                if let Ok(start) = event_target_value(&ev).parse::<usize>() {
                                    move_period(DateRange::with_start, start, false);
                                }
                            }
                            on:change=move |ev| {
                                if let Ok(start) = event_target_value(&ev).parse::<usize>() {
                                    move_period(DateRange::with_start, start, true);
                                }
                            }
                        />
                        <input
                            type="range"
                            class="w-full"
                            min="0"
                            max=move || state.max_index.get().to_string()
                            step="1"
                            prop:value=move || state.range.get().end.to_string()
                            prop:disabled=move || state.locked.get()
                            on:input=move |ev| {
                                if let Ok(end) = event_target_value(&ev).parse::<usize>() {
                                    move_period(DateRange::with_end, end, false);
                                }
                            }
                            on:change=move |ev| {
                                if let Ok(end) = event_target_value(&ev).parse::<usize>() {
                                    move_period(DateRange::with_end, end, true);
                                }
                            }
                        />
                    </div>

                    <ProportionsList
                        proportions=state.proportions
                        labels=state.labels
                        disabled=state.locked
                        on_change=move |(position, value): (usize, f64)| page.update(|c| {
                            if let Err(err) = c.change_proportion(position, value) {
                                warn!("{}", err);
                            }
                        })
                    />
                </div>

                <div class="lg:col-span-2 space-y-6">
                    <div class="p-6 rounded-lg shadow bg-white relative">
                        <Show when=move || !state.editing_enabled.get()>
                            <div class="absolute inset-0 flex items-center justify-center font-medium z-10">
                                "Disabled in selected type of multitoken."
                            </div>
                        </Show>
                        <div style:opacity=move || if state.editing_enabled.get() { "1" } else { "0.3" }>
                            <div class="text-sm font-medium mb-2">"Change token weight:"</div>
                            <WeightChart
                                weights=state.weights
                                initial_state=state.proportions
                                initial_date=state.initial_date
                                finish_date=state.finish_date
                            />
                            <WeightList
                                weights=state.weights
                                disabled=Signal::derive(move || !state.editing_enabled.get())
                                on_add=move |_: ()| open_dialog(DialogTarget::Add)
                                on_edit=move |position: usize| open_dialog(DialogTarget::Edit(position))
                                on_delete=move |position: usize| page.update(|c| {
                                    if let Err(err) = c.delete_weight(position) {
                                        warn!("{}", err);
                                    }
                                })
                            />
                        </div>
                        <div class="flex items-center gap-4 mt-6">
                            <button
                                class="bg-blue-500 hover:bg-blue-600 text-white px-6 py-3 rounded-lg font-medium"
                                on:click=on_calculate
                            >
                                "Calculate"
                            </button>
                            <A href=Route::Start.path() class="text-blue-600 hover:underline">"Start new"</A>
                        </div>
                    </div>

                    <div class="p-6 rounded-lg shadow bg-white">
                        <HistoryChart
                            history=state.history
                            range=state.chart_range
                            time_step=step_sec
                            apply_scale=true
                        />
                    </div>
                </div>
            </div>

            <WeightDialog
                open=state.dialog_open
                token_weights=state.dialog_weights
                edit_item=state.dialog_item
                range=state.dialog_range
                selectable=state.dialog_selectable
                token_names=state.dialog_token_names
                dates=state.dates
                max_weight=DIALOG_MAX_WEIGHT
                on_ok=move |model: TokenWeight| page.update(|c| {
                    if let Err(err) = c.confirm_weight_dialog(model) {
                        warn!("{}", err);
                    }
                })
                on_cancel=move |_: ()| page.update(|c| c.cancel_weight_dialog())
            />
        </div>
    }
}
