use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_navigate, A};
use std::rc::Rc;

use super::SharedManager;
use crate::config::DEMO_TEMPLATES;
use crate::format::{format_money, short_date};
use crate::manager::{CommittedConfig, MemoryTokenManager};
use crate::models::TokenType;
use crate::routes::Route;

/// Loads demo price history into the manager, then opens the configurator.
#[component]
pub fn SetupPage() -> impl IntoView {
    let manager = expect_context::<Rc<MemoryTokenManager>>();
    let navigate = use_navigate();
    let (token_type, set_token_type) = create_signal(TokenType::ManualRebalance);

    view! {
        <Title text="Setup"/>
        <div class="max-w-4xl mx-auto p-4">
            <h1 class="text-3xl font-bold mb-6">"Multitoken Simulator"</h1>

            <div class="flex items-center gap-2 mb-6">
                <span class="text-sm">"Multitoken type:"</span>
                <select
                    class="px-3 py-1 rounded border bg-white border-gray-300"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let kind = match value.as_str() {
                            "AutoRebalance" => TokenType::AutoRebalance,
                            "FixProportions" => TokenType::FixProportions,
                            _ => TokenType::ManualRebalance,
                        };
                        set_token_type.set(kind);
                    }
                >
                    <option value="ManualRebalance">{TokenType::ManualRebalance.name()}</option>
                    <option value="AutoRebalance">{TokenType::AutoRebalance.name()}</option>
                    <option value="FixProportions">{TokenType::FixProportions.name()}</option>
                </select>
            </div>

            <h3 class="text-lg font-semibold mb-3">"Price history"</h3>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                {DEMO_TEMPLATES.iter().map(|template| {
                    let manager = manager.clone();
                    let navigate = navigate.clone();
                    let tokens = template
                        .tokens
                        .iter()
                        .map(|(name, _, _)| *name)
                        .collect::<Vec<_>>()
                        .join(", ");
                    view! {
                        <button
                            class="p-4 rounded-lg border-2 text-left border-gray-200 bg-white hover:border-blue-300 hover:bg-gray-50"
                            on:click=move |_| {
                                manager.seed_demo(template, &mut rand::thread_rng());
                                manager.set_token_type(token_type.get_untracked());
                                navigate(Route::Configurator.path(), Default::default());
                            }
                        >
                            <h4 class="font-semibold mb-2">{template.name}</h4>
                            <div class="text-sm text-gray-600 space-y-1">
                                <div>{format!("Tokens: {}", tokens)}</div>
                                <div>{format!("Samples: {}", template.samples)}</div>
                                <div>{format!("Amount: {}", format_money(template.amount))}</div>
                            </div>
                        </button>
                    }
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// Shows the configuration committed by the last calculation.
#[component]
pub fn ResultsPage() -> impl IntoView {
    let manager = expect_context::<SharedManager>();
    let config = CommittedConfig::from_manager(&*manager);
    let history = manager.price_history();
    let dates = history.values().next().cloned().unwrap_or_default();
    let date_at = move |index: usize| {
        dates
            .get(index)
            .and_then(|sample| short_date(sample.time))
            .unwrap_or_default()
    };
    let period = format!(
        "{} - {}",
        date_at(config.calculation_date.start),
        date_at(config.calculation_date.end)
    );
    let json = config
        .to_json()
        .unwrap_or_else(|err| format!("Unable to export configuration: {}", err));

    view! {
        <Title text="Result"/>
        <div class="max-w-4xl mx-auto p-4 space-y-6">
            <h1 class="text-3xl font-bold">"Calculation input"</h1>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <div class="p-3 rounded shadow bg-white">
                    <div class="text-sm text-gray-600">"Amount"</div>
                    <div class="text-lg font-semibold">{format_money(config.amount)}</div>
                </div>
                <div class="p-3 rounded shadow bg-white">
                    <div class="text-sm text-gray-600">"Exchange amount"</div>
                    <div class="text-lg font-semibold">{format_money(config.exchange_amount)}</div>
                </div>
                <div class="p-3 rounded shadow bg-white">
                    <div class="text-sm text-gray-600">"Period"</div>
                    <div class="text-lg font-semibold">{period}</div>
                </div>
                <div class="p-3 rounded shadow bg-white">
                    <div class="text-sm text-gray-600">"Weight changes"</div>
                    <div class="text-lg font-semibold">{config.rebalance_weights.len()}</div>
                </div>
            </div>
            <pre class="p-4 rounded bg-gray-900 text-gray-100 text-xs overflow-x-auto">{json}</pre>
            <div class="flex gap-4">
                <A href=Route::Configurator.path() class="text-blue-600 hover:underline">"Back to configurator"</A>
                <A href=Route::Start.path() class="text-blue-600 hover:underline">"Start new"</A>
            </div>
        </div>
    }
}
