//! Listing page with the search filters.
use leptos::*;
use leptos::logging::error;
use leptos_router::A;

use crate::api::{ApiClient, HttpApiClient};
use crate::config::ApiConfig;
use crate::models::property::{Property, PropertyFilter};

#[component]
pub fn PropertiesList() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let properties = create_rw_signal(Vec::<Property>::new());
    let filter = create_rw_signal(PropertyFilter::default());
    let load_error = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let client = HttpApiClient::from_session(config.clone());
        spawn_local(async move {
            match client.get_properties().await {
                Ok(list) => properties.set(list),
                Err(err) => {
                    error!("[LIST] Failed to load properties: {:?}", err);
                    load_error.set(Some(err.to_string()));
                }
            }
        });
    });

    let parse_price = |value: String| value.trim().parse::<f64>().ok();

    view! {
        <div class="properties">
            <div class="filters">
                <input
                    type="text"
                    placeholder="Where to?"
                    on:input=move |ev| filter.update(|f| f.location = event_target_value(&ev))
                />
                <input
                    type="number"
                    placeholder="Min price"
                    on:input=move |ev| filter.update(|f| f.min_price = parse_price(event_target_value(&ev)))
                />
                <input
                    type="number"
                    placeholder="Max price"
                    on:input=move |ev| filter.update(|f| f.max_price = parse_price(event_target_value(&ev)))
                />
                <input
                    type="number"
                    min="1"
                    placeholder="Guests"
                    on:input=move |ev| filter.update(|f| f.guests = event_target_value(&ev).parse::<u32>().ok())
                />
            </div>
            {move || load_error.get().map(|err| view! { <p class="error">{ err }</p> })}
            <ul>
                {move || {
                    let matching: Vec<Property> = filter.with(|f| {
                        properties.with(|all| f.apply(all).into_iter().cloned().collect())
                    });
                    if matching.is_empty() {
                        return view! { <li>{ "No properties match your search" }</li> }.into_view();
                    }
                    matching.into_iter().map(|p| view! {
                        <li>
                            <A href=format!("/properties/{}", p.id)>
                                <strong>{ p.title }</strong>
                            </A>
                            { format!(" - {} - ${:.0} / night", p.location, p.price_per_night) }
                        </li>
                    }).collect_view()
                }}
            </ul>
        </div>
    }
}
