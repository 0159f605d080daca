use leptos::*;
use leptos::ev::SubmitEvent;

use crate::api::{ApiClient, HttpApiClient};
use crate::config::ApiConfig;
use crate::error::{ApiError, WorkflowError};
use crate::models::{Booking, PaymentMethod, Property};
use crate::utils::leptos_owner::with_owner_safe;
use crate::workflow::booking::{BookingForm, SubmitPhase};

/// Applies the API result to the card and appends a created booking to the
/// page's list. `None` when the card was unmounted while the request ran.
fn apply_booking_result(
    form: RwSignal<BookingForm>,
    bookings: RwSignal<Vec<Booking>>,
    result: Result<Booking, ApiError>,
) -> Option<Result<Booking, WorkflowError>> {
    let outcome = form.try_update(|f| f.complete(result))?;
    if let Ok(booking) = &outcome {
        bookings.try_update(|list| list.push(booking.clone()));
    }
    Some(outcome)
}

/// Booking sidebar on the property page.
#[component]
pub fn BookingCard(property: Property, bookings: RwSignal<Vec<Booking>>) -> impl IntoView {
    let config = store_value(expect_context::<ApiConfig>());
    let price = property.price_per_night;
    let form = create_rw_signal(BookingForm::for_property(&property));
    let owner = Owner::current();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let client = HttpApiClient::from_session(config.get_value());
        let mut state = form.get_untracked();
        let begun = state.begin(client.is_authenticated());
        form.set(state);
        let Ok(request) = begun else {
            return;
        };

        spawn_local(async move {
            let result = client.create_booking(&request).await;
            with_owner_safe(owner, "booking result", || {
                apply_booking_result(form, bookings, result)
            });
        });
    };

    let submitting = move || form.with(BookingForm::is_submitting);

    view! {
        <form class="booking-card" on:submit=handle_submit>
            <h3>{ format!("${:.0} / night", price) }</h3>
            <label>
                { "Check-in" }
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.check_in.clone())
                    on:input=move |ev| form.update(|f| f.check_in = event_target_value(&ev))
                />
            </label>
            <label>
                { "Check-out" }
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.check_out.clone())
                    on:input=move |ev| form.update(|f| f.check_out = event_target_value(&ev))
                />
            </label>
            <label>
                { "Guests" }
                <input
                    type="number"
                    min="1"
                    prop:value=move || form.with(|f| f.guests.to_string())
                    on:input=move |ev| {
                        let guests = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                        form.update(|f| f.guests = guests);
                    }
                />
            </label>
            <label>
                { "Payment" }
                <select on:change=move |ev| {
                    if let Some(method) = PaymentMethod::parse(&event_target_value(&ev)) {
                        form.update(|f| f.payment_method = method);
                    }
                }>
                    {PaymentMethod::ALL.into_iter().map(|method| view! {
                        <option
                            value=method.as_str()
                            selected=move || form.with(|f| f.payment_method == method)
                        >
                            { method.label() }
                        </option>
                    }).collect_view()}
                </select>
            </label>
            {move || form.with(|f| f.quote(price)).map(|quote| view! {
                <p class="quote">
                    { format!("{} nights x ${:.2} = ${:.2}", quote.nights, quote.price_per_night, quote.total) }
                </p>
            })}
            <button type="submit" disabled=submitting>
                {move || if submitting() { "Booking..." } else { "Book now" }}
            </button>
            {move || form.with(|f| match f.phase() {
                SubmitPhase::Succeeded(text) => Some(view! { <p class="success">{ text.clone() }</p> }),
                SubmitPhase::Failed(text) => Some(view! { <p class="error">{ text.clone() }</p> }),
                _ => None,
            })}
        </form>
    }
}
