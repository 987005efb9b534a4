/// Component to display the product catalog.
/// Iterates through the products and renders name, description, price and
/// the cauldron / deseo actions for each one.
use crate::cart::Cauldron;
use crate::models::product::Product;
use leptos::*;

#[component]
pub fn ProductsList(
    products: ReadSignal<Vec<Product>>,
    cauldron: Cauldron,
    on_save_deseo: Callback<String>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div>
            <h2>{ "Products" }</h2>
            <ul>
                {move || products.get().iter().map(|product| {
                    let for_cauldron = product.clone();
                    let deseo_id = product.id.clone();
                    let select_id = product.id.clone();
                    view! {
                        <li key={product.id.clone()}>
                            <div>
                                <strong>{ &product.name }</strong> - { &product.description }
                            </div>
                            <div>
                                <span>{ &product.price }</span>
                                <span>{ format!(" ({})", product.category) }</span>
                            </div>
                            <button on:click=move |_| cauldron.add(&for_cauldron)>
                                { "Into the cauldron" }
                            </button>
                            <button on:click=move |_| on_save_deseo.call(deseo_id.clone())>
                                { "Save as deseo" }
                            </button>
                            <button on:click=move |_| on_select.call(select_id.clone())>
                                { "Reviews" }
                            </button>
                        </li>
                    }
                }).collect::<Vec<_>>() }
            </ul>
        </div>
    }
}
