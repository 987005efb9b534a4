use cauldronware::cart::Cauldron;
use cauldronware::components::checkout_button::CheckoutButton;
use cauldronware::currency::Currency;
use cauldronware::models::order::Order;
use cauldronware::models::product::Product;
use gloo_timers::future::sleep;
use leptos::logging::log;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;
use wasm_bindgen_test::*;

// Import mock module
mod mocks;
use mocks::payment_sdk_mock::{
    cleanup_all_payment_registry, get_registry_size, get_render_count, invoke_last_create_order,
    setup_payment_sdk_mock,
};

wasm_bindgen_test_configure!(run_in_browser);

// Helper function to setup test environment
async fn setup_test_environment() {
    // Clean up any existing registry entries
    cleanup_all_payment_registry();

    // Setup the PayPal SDK mock
    let sdk_result = setup_payment_sdk_mock();
    assert!(sdk_result, "Failed to setup PayPal SDK mock");

    // Wait a bit for the mock to be fully initialized
    sleep(Duration::from_millis(50)).await;
}

fn test_product(name: &str, price: &str) -> Product {
    Product {
        id: Uuid::new_v4().to_string(),
        name: name.into(),
        description: String::new(),
        price: price.into(),
        image: String::new(),
        category: String::new(),
    }
}

// Builds a checkout button over a fresh cauldron holding one product.
// The currency setter escapes through the slot so tests can flip it.
fn checkout_component(
    name: &'static str,
    price: &'static str,
    currency_slot: Rc<RefCell<Option<WriteSignal<Currency>>>>,
) -> impl FnOnce() -> View {
    move || {
        let cauldron = Cauldron::new();
        cauldron.clear();
        cauldron.add(&test_product(name, price));

        let (currency, set_currency) = create_signal(Currency::Eur);
        *currency_slot.borrow_mut() = Some(set_currency);

        let node_ref = create_node_ref::<html::Div>();
        let on_paid = Callback::new(move |order: Order| {
            log!("Paid: {}", order.id);
        });

        view! {
            <div>
                <CheckoutButton
                    cauldron=cauldron
                    user_id="test-witch".to_string()
                    currency=currency
                    on_paid=on_paid
                    node_ref=node_ref
                />
            </div>
        }
        .into_view()
    }
}

#[wasm_bindgen_test]
async fn test_checkout_initialization() {
    // Setup test environment
    setup_test_environment().await;

    // Setup
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    container.set_id("test-container");

    // Mount the component
    let currency_slot = Rc::new(RefCell::new(None));
    let unmount = mount_to(
        &container,
        checkout_component("Mandrake Elixir", "10,00€", currency_slot.clone()),
    );

    // Wait for the SDK bridge to come up
    for _ in 0..10 {
        if get_render_count() > 0 {
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }

    // The mock SDK rendered one button and the registry tracks it
    assert!(get_render_count() > 0, "Button was never rendered");
    assert_eq!(get_registry_size(), 1, "Registry should track one button");

    // createOrder exposes the cauldron total to the SDK
    let total = invoke_last_create_order();
    assert_eq!(total, "10,00€");

    // Switching the display currency changes what the SDK is told to charge
    let set_currency = currency_slot.borrow().unwrap();
    set_currency.set(Currency::Usd);
    let total = invoke_last_create_order();
    assert_eq!(total, "$10.80");

    // Cleanup
    unmount();
    document.body().unwrap().remove_child(&container).unwrap();
}

#[wasm_bindgen_test]
async fn test_checkout_cleanup() {
    // Setup test environment
    setup_test_environment().await;

    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    container.set_id("cleanup-test-container");

    // Mount the component
    let unmount = mount_to(
        &container,
        checkout_component("Black Salt", "4,00€", Rc::new(RefCell::new(None))),
    );

    // Wait for initialization
    sleep(Duration::from_millis(500)).await;

    // Check registry before unmount
    let registry_before = get_registry_size();

    // Unmount the component
    unmount();

    // Wait for cleanup
    sleep(Duration::from_millis(500)).await;

    // Check if the button was properly removed from the registry
    let registry_after = get_registry_size();
    assert!(
        registry_before > registry_after,
        "Button was not properly removed from registry"
    );

    // Cleanup
    document.body().unwrap().remove_child(&container).unwrap();
}

#[wasm_bindgen_test]
async fn test_rapid_mount_unmount() {
    // Setup test environment
    setup_test_environment().await;

    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    container.set_id("rapid-test-container");

    // Perform rapid mount/unmount cycles to test for race conditions
    for i in 0..5 {
        log!("Mount/unmount cycle {}", i);

        // Mount
        let unmount = mount_to(
            &container,
            checkout_component("Crow Feather", "2,00€", Rc::new(RefCell::new(None))),
        );

        // Wait briefly
        sleep(Duration::from_millis(50)).await;

        // Unmount
        unmount();

        // Wait briefly
        sleep(Duration::from_millis(50)).await;
    }

    // Wait for any pending cleanup
    sleep(Duration::from_millis(500)).await;

    // Registry should be empty or at least not growing
    assert!(
        get_registry_size() < 5,
        "Registry has too many entries after rapid mount/unmount cycles"
    );

    // Cleanup
    document.body().unwrap().remove_child(&container).unwrap();
}

// Helper function to mount a component to a container
fn mount_to(
    container: &web_sys::Element,
    component: impl FnOnce() -> View + 'static,
) -> impl FnOnce() {
    let runtime = create_runtime();
    let view = component();
    let parent: web_sys::HtmlElement = wasm_bindgen::JsCast::unchecked_into(container.clone());
    leptos::mount_to(parent, || view);

    move || {
        runtime.dispose();
    }
}
