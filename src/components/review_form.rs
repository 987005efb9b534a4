use leptos::*;
use leptos_dom::ev::SubmitEvent;

#[component]
pub fn ReviewForm(on_submit: Callback<(String, u8)>) -> impl IntoView {
    let (content, set_content) = create_signal(String::new());
    let (rating, set_rating) = create_signal(5u8); // Default rating to 5

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call((content.get(), rating.get()));

        // Reset values
        set_content.set(String::new());
        set_rating.set(5);
    };

    view! {
        <form on:submit=handle_submit>
            <h3>{ "Submit Review" }</h3>
            <textarea
                placeholder="Write your review here"
                on:input=move |e| set_content.set(event_target_value(&e))
            />
            <h3>{ "Rating (1-5)" }</h3>
            <input
                type="number"
                min="1"
                max="5"
                value={rating.get()}
                on:input=move |e| set_rating.set(event_target_value(&e).parse::<u8>().unwrap_or(5))
            />
            <button type="submit">{ "Submit Review" }</button>
        </form>
    }
}
