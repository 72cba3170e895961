use leptos::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::charts::{draw_on_canvas, history_series, weight_series, ChartSeries};
use crate::config::token_color;
use crate::dom::set_timeout;
use crate::format::short_date;
use crate::models::{DateRange, PriceHistory, Token, TokenProportion, TokenWeight};

fn css_color(position: usize) -> String {
    let (r, g, b) = token_color(position);
    format!("rgb({}, {}, {})", r, g, b)
}

fn date_label(dates: &[i64], index: usize) -> String {
    dates
        .get(index)
        .and_then(|time| short_date(*time))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn ProportionsList(
    #[prop(into)] proportions: Signal<Vec<TokenProportion>>,
    #[prop(into)] labels: Signal<BTreeMap<String, String>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_change: Callback<(usize, f64)>,
) -> impl IntoView {
    view! {
        <div class="space-y-3">
            <div class="text-sm font-medium">"Proportions:"</div>
            {move || proportions.get().into_iter().enumerate().map(|(position, proportion)| {
                let title = labels
                    .with(|labels| labels.get(&proportion.name).cloned())
                    .unwrap_or_else(|| proportion.name.clone());
                view! {
                    <div class="flex items-center gap-3">
                        <span
                            class="w-16 font-medium"
                            style:color=css_color(position)
                            title=title
                        >
                            {proportion.name.clone()}
                        </span>
                        <input
                            type="range"
                            class="flex-1"
                            min=proportion.min.to_string()
                            max=proportion.max.to_string()
                            step="1"
                            prop:value=proportion.weight.to_string()
                            prop:disabled=move || disabled.get()
                            on:change=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                    on_change.call((position, value));
                                }
                            }
                        />
                        <span class="w-8 text-right">{proportion.weight.to_string()}</span>
                    </div>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn WeightList(
    #[prop(into)] weights: Signal<Vec<TokenWeight>>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_edit: Callback<usize>,
    #[prop(into)] on_delete: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            <div class="max-h-[200px] overflow-y-auto space-y-2">
                {move || weights.get().into_iter().enumerate().map(|(position, entry)| {
                    let tokens = entry
                        .tokens
                        .iter()
                        .map(|token| format!("{}: {}", token.name, token.weight))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let date = short_date(entry.timestamp).unwrap_or_default();
                    view! {
                        <div class="flex justify-between items-center p-2 rounded border bg-white">
                            <div>
                                <div class="text-sm font-medium">{date}</div>
                                <div class="text-xs text-gray-600">{tokens}</div>
                            </div>
                            <div class="flex gap-2">
                                <button
                                    class="px-2 py-1 text-sm rounded bg-gray-200 hover:bg-gray-300"
                                    prop:disabled=move || disabled.get()
                                    on:click=move |_| on_edit.call(position)
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="px-2 py-1 text-sm rounded bg-red-100 text-red-800 hover:bg-red-200"
                                    prop:disabled=move || disabled.get()
                                    on:click=move |_| on_delete.call(position)
                                >
                                    "Delete"
                                </button>
                            </div>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>
            <button
                class="w-full py-2 rounded border-2 border-dashed border-gray-300 hover:border-blue-400"
                prop:disabled=move || disabled.get()
                on:click=move |_| on_add.call(())
            >
                "+ Add weight change"
            </button>
        </div>
    }
}

#[component]
pub fn WeightDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] token_weights: Signal<BTreeMap<String, f64>>,
    #[prop(into)] edit_item: Signal<Option<TokenWeight>>,
    #[prop(into)] range: Signal<DateRange>,
    #[prop(into)] selectable: Signal<bool>,
    #[prop(into)] token_names: Signal<Vec<String>>,
    #[prop(into)] dates: Signal<Vec<i64>>,
    max_weight: f64,
    #[prop(into)] on_ok: Callback<TokenWeight>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (selected, set_selected) = create_signal(0usize);
    let draft = create_rw_signal(BTreeMap::<String, f64>::new());

    // Reset the form every time the dialog opens.
    create_effect(move |_| {
        if !open.get() {
            return;
        }
        let range = range.get_untracked();
        let item = edit_item.get_untracked();
        set_selected.set(item.as_ref().map(|w| w.index).unwrap_or(range.start));

        let mut weights = token_weights.get_untracked();
        for name in token_names.get_untracked() {
            weights.entry(name).or_insert(0.0);
        }
        if let Some(item) = item {
            for token in item.tokens {
                weights.insert(token.name, token.weight);
            }
        }
        draft.set(weights);
    });

    let submit = move |_: ev::MouseEvent| {
        let index = selected.get_untracked();
        let Some(timestamp) = dates.with_untracked(|d| d.get(index).copied()) else {
            return;
        };
        let tokens = draft
            .get_untracked()
            .into_iter()
            .map(|(name, weight)| Token::new(name, weight))
            .collect();
        on_ok.call(TokenWeight::new(tokens, timestamp, index));
    };

    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-50">
                <div class="bg-white rounded-lg shadow-lg p-6 w-full max-w-lg">
                    <h3 class="text-lg font-semibold mb-4">
                        {move || if edit_item.with(|item| item.is_some()) { "Edit weight change" } else { "Add weight change" }}
                    </h3>

                    <Show
                        when=move || selectable.get()
                        fallback=|| view! {
                            <p class="text-sm text-red-600 mb-4">"No dates left in the selected period."</p>
                        }
                    >
                        <label class="block text-sm font-medium mb-1">
                            {move || format!("Date: {}", dates.with(|d| date_label(d, selected.get())))}
                        </label>
                        <input
                            type="range"
                            class="w-full mb-4"
                            min=move || range.get().start.to_string()
                            max=move || range.get().end.to_string()
                            step="1"
                            prop:value=move || selected.get().to_string()
                            on:input=move |ev| {
                                if let Ok(index) = event_target_value(&ev).parse::<usize>() {
                                    set_selected.set(index);
                                }
                            }
                        />
                    </Show>

                    <div class="space-y-2 mb-6">
                        {move || draft.get().into_iter().map(|(name, weight)| {
                            let key = name.clone();
                            view! {
                                <div class="flex items-center gap-3">
                                    <span class="w-16 font-medium">{name}</span>
                                    <input
                                        type="number"
                                        class="flex-1 p-2 border rounded"
                                        min="0"
                                        max=max_weight.to_string()
                                        step="1"
                                        prop:value=weight.to_string()
                                        on:change=move |ev| {
                                            if let Ok(value) = event_target_value(&ev).parse::<f64>() {
                                                let value = value.clamp(0.0, max_weight);
                                                draft.update(|weights| {
                                                    weights.insert(key.clone(), value);
                                                });
                                            }
                                        }
                                    />
                                </div>
                            }
                        }).collect::<Vec<_>>()}
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            class="px-4 py-2 rounded bg-gray-200 hover:bg-gray-300"
                            on:click=move |_| on_cancel.call(())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="px-4 py-2 rounded bg-blue-500 hover:bg-blue-600 text-white"
                            prop:disabled=move || !selectable.get()
                            on:click=submit
                        >
                            "OK"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Canvas redrawn whenever `series` changes.
#[component]
pub fn ChartCanvas(
    id: &'static str,
    caption: &'static str,
    #[prop(into)] series: Signal<Vec<ChartSeries>>,
    #[prop(default = 300)] height: u32,
) -> impl IntoView {
    create_effect(move |_| {
        let data = series.get();
        set_timeout(
            move || {
                if let Err(err) = draw_on_canvas(id, caption, &data) {
                    tracing::warn!("Failed to draw {}: {}", id, err);
                }
            },
            std::time::Duration::from_millis(50),
        );
    });

    view! {
        <canvas id=id width="800" height=height.to_string() class="w-full"></canvas>
    }
}

#[component]
pub fn HistoryChart(
    #[prop(into)] history: Signal<PriceHistory>,
    #[prop(into)] range: Signal<DateRange>,
    time_step: i64,
    apply_scale: bool,
) -> impl IntoView {
    let hidden = create_rw_signal(BTreeSet::<String>::new());
    let series = Signal::derive(move || {
        let range = range.get();
        history.with(|history| hidden.with(|hidden| history_series(history, range, apply_scale, hidden)))
    });
    let step_label = if time_step >= 86_400 {
        format!("{} d", time_step / 86_400)
    } else {
        format!("{} h", time_step / 3_600)
    };

    view! {
        <div>
            <ChartCanvas id="history-chart" caption="Price history" series=series/>
            <div class="flex flex-wrap gap-4 mt-2 text-sm">
                <span class="text-gray-500">{format!("Step: {}", step_label)}</span>
                {move || history.with(|history| history.keys().cloned().enumerate().collect::<Vec<_>>())
                    .into_iter()
                    .map(|(position, name)| {
                        let toggle = name.clone();
                        let checked = name.clone();
                        view! {
                            <label class="flex items-center gap-1" style:color=css_color(position)>
                                <input
                                    type="checkbox"
                                    prop:checked=move || hidden.with(|hidden| !hidden.contains(&checked))
                                    on:change=move |_| hidden.update(|hidden| {
                                        if !hidden.remove(&toggle) {
                                            hidden.insert(toggle.clone());
                                        }
                                    })
                                />
                                {name}
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

#[component]
pub fn WeightChart(
    #[prop(into)] weights: Signal<Vec<TokenWeight>>,
    #[prop(into)] initial_state: Signal<Vec<TokenProportion>>,
    #[prop(into)] initial_date: Signal<Option<i64>>,
    #[prop(into)] finish_date: Signal<Option<i64>>,
) -> impl IntoView {
    let series = Signal::derive(move || match (initial_date.get(), finish_date.get()) {
        (Some(start), Some(end)) => {
            weights.with(|w| initial_state.with(|initial| weight_series(w, initial, start, end)))
        }
        _ => Vec::new(),
    });

    view! {
        <ChartCanvas id="weight-chart" caption="Token weights" series=series height=220/>
    }
}
