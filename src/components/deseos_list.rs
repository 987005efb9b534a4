/// Component to display a user's deseos (wishlist). Product names are
/// resolved against the loaded catalog; rows for products that vanished
/// from the catalog fall back to the raw id.
use crate::models::deseo::Deseo;
use crate::models::product::Product;
use leptos::*;

#[component]
pub fn DeseosList(
    deseos: ReadSignal<Vec<Deseo>>,
    products: ReadSignal<Vec<Product>>,
    on_remove: Callback<String>,
    on_to_cauldron: Callback<String>,
) -> impl IntoView {
    view! {
        <div>
            <h2>{ "Deseos" }</h2>
            <ul>
                {move || deseos.get().iter().map(|deseo| {
                    let name = products.get()
                        .iter()
                        .find(|p| p.id == deseo.product_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| deseo.product_id.clone());
                    let remove_id = deseo.product_id.clone();
                    let cauldron_id = deseo.product_id.clone();
                    view! {
                        <li key={deseo.product_id.clone()}>
                            { name }
                            <button on:click=move |_| on_to_cauldron.call(cauldron_id.clone())>
                                { "Into the cauldron" }
                            </button>
                            <button on:click=move |_| on_remove.call(remove_id.clone())>
                                { "Forget" }
                            </button>
                        </li>
                    }
                }).collect::<Vec<_>>() }
            </ul>
        </div>
    }
}
