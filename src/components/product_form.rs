use leptos::*;
use leptos_dom::ev::SubmitEvent;

#[component]
pub fn ProductForm(on_submit: Box<dyn Fn(String, String, String, String)>) -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (price, set_price) = create_signal(String::new());
    let (category, set_category) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit(
            name.get(),
            description.get(),
            price.get(),
            category.get(),
        );

        // Reset values
        set_name.set(String::new());
        set_description.set(String::new());
        set_price.set(String::new());
        set_category.set(String::new());
    };

    view! {
        <form on:submit=handle_submit>
            <input type="text" placeholder="Name" on:input=move |e| set_name.set(event_target_value(&e)) />
            <textarea placeholder="Description" on:input=move |e| set_description.set(event_target_value(&e)) />
            <input type="text" placeholder="Price (e.g. 12,50€ or $14.99)" on:input=move |e| set_price.set(event_target_value(&e)) />
            <input type="text" placeholder="Category" on:input=move |e| set_category.set(event_target_value(&e)) />
            <button type="submit">{ "Add Product" }</button>
        </form>
    }
}
