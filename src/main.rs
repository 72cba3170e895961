use leptos::*;
use multitoken_configurator::{logging, App};

fn main() {
    console_error_panic_hook::set_once();
    logging::init(logging::default_level(cfg!(debug_assertions)));
    mount_to_body(|| view! { <App/> })
}
