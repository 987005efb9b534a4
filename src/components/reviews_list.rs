use crate::models::review::Review;
use leptos::*;

#[component]
pub fn ReviewsList(reviews: ReadSignal<Vec<Review>>) -> impl IntoView {
    view! {
        <div>
            <h3>{ "Reviews" }</h3>
            <ul>
                {move || reviews.get().iter().map(|review| {
                    view! {
                        <li>{ format!("Rating: {}/5 - {}", review.rating, review.content) }</li>
                    }
                }).collect::<Vec<_>>() }
            </ul>
        </div>
    }
}
