/// Main application entry point for Staybook.
/// Provides the API configuration and routes between the listing and the property page.
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Route, Router, Routes, A};

use crate::components::{properties_list::PropertiesList, property_detail::PropertyDetail};
use crate::config::ApiConfig;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    // Every API client in the tree is built from this one configuration.
    provide_context(ApiConfig::load());

    view! {
        <Title text="Staybook"/>
        <Router>
            <header>
                <A href="/">{ "Staybook" }</A>
            </header>
            <main>
                <Routes>
                    <Route path="" view=PropertiesList/>
                    <Route path="/properties/:id" view=PropertyDetail/>
                </Routes>
            </main>
        </Router>
    }
}
