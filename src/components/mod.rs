mod configurator_page;
mod pages;
mod widgets;

use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::{Route, Router, Routes};
use std::rc::Rc;

use crate::manager::{MemoryTokenManager, TokenManager};

pub use configurator_page::ConfiguratorPage;
pub use pages::{ResultsPage, SetupPage};
pub use widgets::{
    ChartCanvas, HistoryChart, ProportionsList, WeightChart, WeightDialog, WeightList,
};

/// Manager handle injected into every page through context.
pub type SharedManager = Rc<dyn TokenManager>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let manager = Rc::new(MemoryTokenManager::new());
    let shared: SharedManager = manager.clone();
    provide_context(manager);
    provide_context(shared);

    view! {
        <Router>
            <main class="min-h-screen bg-gray-50 text-gray-900">
                <Routes>
                    <Route path="/" view=SetupPage/>
                    <Route path="/simulator" view=SetupPage/>
                    <Route path="/calculator" view=ConfiguratorPage/>
                    <Route path="/calculator/result" view=ResultsPage/>
                </Routes>
            </main>
        </Router>
    }
}
