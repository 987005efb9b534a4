/// The cauldron view: lines with quantity controls plus the running total
/// in a selectable display currency.
use crate::cart::Cauldron;
use crate::currency::Currency;
use leptos::*;

#[component]
pub fn CauldronView(
    cauldron: Cauldron,
    currency: ReadSignal<Currency>,
    set_currency: WriteSignal<Currency>,
) -> impl IntoView {
    let pick_currency = move |e: web_sys::Event| {
        let code = event_target_value(&e);
        if let Some(picked) = Currency::from_code(&code) {
            set_currency.set(picked);
        }
    };

    view! {
        <div>
            <h2>{ "Cauldron" }</h2>
            <ul>
                {move || cauldron.lines().iter().map(|line| {
                    let inc_id = line.product_id.clone();
                    let dec_id = line.product_id.clone();
                    let del_id = line.product_id.clone();
                    view! {
                        <li key={line.product_id.clone()}>
                            <strong>{ &line.name }</strong>
                            { format!(" {} x {}", line.quantity, line.unit_price) }
                            <button on:click=move |_| cauldron.increment(&inc_id)>{ "+" }</button>
                            <button on:click=move |_| cauldron.decrement(&dec_id)>{ "-" }</button>
                            <button on:click=move |_| cauldron.remove(&del_id)>{ "Remove" }</button>
                        </li>
                    }
                }).collect::<Vec<_>>() }
            </ul>
            <select on:change=pick_currency>
                <option value="EUR" selected>{ "EUR" }</option>
                <option value="USD">{ "USD" }</option>
                <option value="GBP">{ "GBP" }</option>
            </select>
            <p>
                { move || format!(
                    "{} items - total {}",
                    cauldron.count(),
                    cauldron.total_display(currency.get())
                )}
            </p>
        </div>
    }
}
