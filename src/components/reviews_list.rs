use leptos::*;
use crate::models::review::{RatingSummary, Review};

#[component]
pub fn ReviewsList(#[prop(into)] reviews: Signal<Vec<Review>>) -> impl IntoView {
    let summary = move || reviews.with(|r| RatingSummary::from_reviews(r));

    view! {
        <div class="reviews">
            <h3>{ "Reviews" }</h3>
            <p class="rating-summary">
                {move || match summary() {
                    RatingSummary { average: Some(avg), count } => format!("★ {:.1} ({} reviews)", avg, count),
                    _ => "No reviews yet".to_string(),
                }}
            </p>
            <ul>
                {move || reviews.get().into_iter().map(|review| {
                    let author = review.author_name().unwrap_or("Guest").to_string();
                    let date = review
                        .created_at
                        .map(|d| d.format("%B %Y").to_string())
                        .unwrap_or_default();
                    view! {
                        <li>
                            <strong>{ author }</strong>
                            <span class="date">{ date }</span>
                            <div>{ format!("Rating: {}/5", review.rating) }</div>
                            <p>{ review.comment }</p>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}
