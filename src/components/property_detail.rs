use leptos::*;
use leptos::logging::{error, log};
use leptos_router::use_params_map;

use crate::api::{ApiClient, HttpApiClient};
use crate::components::{booking_card::BookingCard, review_form::ReviewForm, reviews_list::ReviewsList};
use crate::config::ApiConfig;
use crate::models::{Booking, Property, Review, User};
use crate::workflow::eligibility::can_review;

/// Property page: details, booking sidebar, reviews and the review form.
#[component]
pub fn PropertyDetail() -> impl IntoView {
    let params = use_params_map();
    let property_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let config = expect_context::<ApiConfig>();

    let property = create_rw_signal(None::<Property>);
    let reviews = create_rw_signal(Vec::<Review>::new());
    let user = create_rw_signal(None::<User>);
    let bookings = create_rw_signal(Vec::<Booking>::new());
    let load_error = create_rw_signal(None::<String>);

    create_effect(move |_| {
        let id = property_id();
        let client = HttpApiClient::from_session(config.clone());
        spawn_local(async move {
            log!("[DETAIL] Loading property {}", id);
            let (property_res, reviews_res) =
                futures::join!(client.get_property(&id), client.get_property_reviews(&id));
            match property_res {
                Ok(p) => property.set(Some(p)),
                Err(err) => {
                    error!("[DETAIL] Failed to load property {}: {:?}", id, err);
                    load_error.set(Some(err.to_string()));
                }
            }
            match reviews_res {
                Ok(list) => reviews.set(list),
                Err(err) => error!("[DETAIL] Failed to load reviews for {}: {:?}", id, err),
            }

            if !client.is_authenticated() {
                return;
            }
            let (user_res, bookings_res) =
                futures::join!(client.get_current_user(), client.get_my_bookings());
            match user_res {
                Ok(u) => user.set(Some(u)),
                Err(err) => error!("[DETAIL] Failed to load current user: {:?}", err),
            }
            match bookings_res {
                Ok(list) => bookings.set(list),
                Err(err) => error!("[DETAIL] Failed to load bookings: {:?}", err),
            }
        });
    });

    // Recomputed whenever the user or their bookings change.
    let eligible = create_memo(move |_| {
        let id = property_id();
        user.with(|u| bookings.with(|b| can_review(u.as_ref(), b, &id)))
    });

    view! {
        <div class="property-detail">
            {move || load_error.get().map(|err| view! { <p class="error">{ err }</p> })}
            {move || match property.get() {
                None => view! { <p>{ "Loading..." }</p> }.into_view(),
                Some(p) => {
                    let id = p.id.clone();
                    view! {
                        <h1>{ p.title.clone() }</h1>
                        <p class="location">{ p.location.clone() }</p>
                        <div class="gallery">
                            {p.images.iter().map(|src| view! { <img src=src.clone() alt=p.title.clone()/> }).collect_view()}
                        </div>
                        <p>{ p.description.clone() }</p>
                        <ul class="amenities">
                            {p.amenities.iter().map(|a| view! { <li>{ a.clone() }</li> }).collect_view()}
                        </ul>
                        <BookingCard property=p bookings=bookings/>
                        <ReviewsList reviews=reviews/>
                        <ReviewForm
                            property_id=id
                            eligible=eligible
                            user=user
                            bookings=bookings
                            reviews=reviews
                        />
                    }.into_view()
                }
            }}
        </div>
    }
}
