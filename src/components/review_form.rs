use leptos::*;
use leptos::ev::SubmitEvent;
use gloo_timers::future::TimeoutFuture;

use crate::api::HttpApiClient;
use crate::config::ApiConfig;
use crate::error::WorkflowError;
use crate::models::{Booking, Review, User};
use crate::utils::leptos_owner::with_owner_safe;
use crate::workflow::review::{
    refresh_after_review, send_review, PendingReview, Refreshed, ReviewPanel, NOTICE_DISPLAY,
};

/// `None` when the form was unmounted while the review was being posted.
fn apply_review_result(
    panel: RwSignal<ReviewPanel>,
    pending: &PendingReview,
    result: Result<(), WorkflowError>,
) -> Option<Result<u64, WorkflowError>> {
    panel.try_update(|p| p.confirm(pending, result))
}

/// Swaps in the refreshed lists, then closes the form.
fn apply_refresh(
    panel: RwSignal<ReviewPanel>,
    reviews: RwSignal<Vec<Review>>,
    bookings: RwSignal<Vec<Booking>>,
    refreshed: &Refreshed,
) -> Option<()> {
    if let Some(list) = &refreshed.reviews {
        reviews.try_update(|r| *r = list.clone())?;
    }
    if let Some(list) = &refreshed.bookings {
        bookings.try_update(|b| *b = list.clone())?;
    }
    panel.try_update(|p| p.finish(refreshed))
}

/// Review form for a property. The parent decides whether to show the
/// "Write a review" button; submission re-checks eligibility against the
/// bookings it currently holds.
#[component]
pub fn ReviewForm(
    property_id: String,
    #[prop(into)] eligible: Signal<bool>,
    user: RwSignal<Option<User>>,
    bookings: RwSignal<Vec<Booking>>,
    reviews: RwSignal<Vec<Review>>,
) -> impl IntoView {
    let config = store_value(expect_context::<ApiConfig>());
    let panel = create_rw_signal(ReviewPanel::new());
    let property_id = store_value(property_id);
    // Continuations resume outside the reactive tree; keep the component's owner.
    let owner = Owner::current();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let mut state = panel.get_untracked();
        let begun = user.with_untracked(|u| {
            bookings.with_untracked(|b| {
                property_id.with_value(|id| state.begin(u.as_ref(), b, id))
            })
        });
        panel.set(state);
        let Ok(pending) = begun else {
            return;
        };

        let client = HttpApiClient::from_session(config.get_value());
        spawn_local(async move {
            let posted = send_review(&client, &pending).await;
            let confirmed = with_owner_safe(owner, "review result", || {
                apply_review_result(panel, &pending, posted)
            });
            let Some(Ok(notice_id)) = confirmed.flatten() else {
                return;
            };

            spawn_local(async move {
                TimeoutFuture::new(NOTICE_DISPLAY.as_millis() as u32).await;
                with_owner_safe(owner, "review notice timeout", || {
                    panel.try_update(|p| {
                        p.clear_notice(notice_id);
                    })
                });
            });

            let refreshed = refresh_after_review(&client, &pending.property_id).await;
            with_owner_safe(owner, "review refresh", || {
                apply_refresh(panel, reviews, bookings, &refreshed)
            });
        });
    };

    view! {
        <div class="review-form">
            {move || panel.with(|p| p.notice().map(|n| n.text.clone())).map(|text| view! {
                <p class="success">{ text }</p>
            })}
            <Show
                when=move || panel.with(ReviewPanel::is_open)
                fallback=move || view! {
                    <Show when=move || eligible.get()>
                        <button type="button" on:click=move |_| panel.update(ReviewPanel::open)>
                            { "Write a review" }
                        </button>
                    </Show>
                }
            >
                <form on:submit=handle_submit>
                    <h3>{ "Rate your stay" }</h3>
                    <select on:change=move |ev| {
                        let rating = event_target_value(&ev).parse::<u8>().unwrap_or(0);
                        panel.update(|p| p.rating = rating);
                    }>
                        {(1..=5u8).rev().map(|stars| view! {
                            <option
                                value=stars.to_string()
                                selected=move || panel.with(|p| p.rating == stars)
                            >
                                { format!("{} star{}", stars, if stars == 1 { "" } else { "s" }) }
                            </option>
                        }).collect_view()}
                    </select>
                    <textarea
                        placeholder="Tell other guests about your stay"
                        prop:value=move || panel.with(|p| p.comment.clone())
                        on:input=move |ev| panel.update(|p| p.comment = event_target_value(&ev))
                    />
                    {move || panel.with(|p| p.error().map(str::to_string)).map(|err| view! {
                        <p class="error">{ err }</p>
                    })}
                    <button type="submit" disabled=move || panel.with(ReviewPanel::is_submitting)>
                        {move || if panel.with(ReviewPanel::is_submitting) { "Submitting..." } else { "Submit Review" }}
                    </button>
                    <button
                        type="button"
                        disabled=move || panel.with(ReviewPanel::is_submitting)
                        on:click=move |_| panel.update(ReviewPanel::close)
                    >
                        { "Cancel" }
                    </button>
                </form>
            </Show>
        </div>
    }
}
