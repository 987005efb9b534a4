use crate::cart::Cauldron;
use crate::currency::Currency;
use crate::models::order::{Order, OrderLine};
use crate::utils::leptos_owner::with_owner_safe;
use gloo_net::http::Request;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::Function;
use leptos::html::Div;
use leptos::logging::log;
use leptos::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Body sent to POST /api/orders when the payment SDK approves.
#[derive(Serialize)]
struct CheckoutPayload {
    user_id: String,
    currency: String,
    lines: Vec<OrderLine>,
}

/// What the SDK hands to onApprove. Only the transaction id matters to us.
#[derive(Deserialize, Default)]
struct ApprovalData {
    #[serde(rename = "orderID")]
    order_id: Option<String>,
}

/// Checkout button bridging to the PayPal Buttons JS SDK.
///
/// The SDK owns the button DOM; we hand it two callbacks registered on the
/// window (`createOrder` exposing the cauldron total, `onApprove` posting
/// the order), then let it render into our container div. Mounted buttons
/// are tracked in `window.paymentRegistry` keyed by container id so cleanup
/// and the panic hook can reason about what is still alive.
#[component]
pub fn CheckoutButton(
    cauldron: Cauldron,
    user_id: String,
    currency: ReadSignal<Currency>,
    on_paid: Callback<Order>,
    node_ref: NodeRef<Div>,
) -> impl IntoView {
    let (is_initialized, set_initialized) = create_signal(false);
    let container_id = format!("payment-button-{}", uuid::Uuid::new_v4());

    {
        let container_id = container_id.clone();
        let user_id = user_id.clone();
        spawn_local(async move {
            log!("[PAYMENT] Component mounted");

            let mut retries = 0;
            while retries < 10 {
                if node_ref.get().is_some() {
                    log!("[PAYMENT] Container element found");
                    initialize_payment_button(&container_id, cauldron, user_id, currency, on_paid);
                    set_initialized.set(true);
                    break;
                }
                gloo_timers::future::sleep(Duration::from_millis(100)).await;
                retries += 1;
            }
        });
    }

    {
        let container_id = container_id.clone();
        on_cleanup(move || {
            with_owner_safe("checkout button cleanup", || {
                log!("[PAYMENT] Cleaning up button {}", container_id);
                let cleanup_script = format!(
                    r#"
                    if (window.paymentRegistry && window.paymentRegistry['{id}']) {{
                        window.paymentRegistry['{id}'].alive = false;
                        delete window.paymentRegistry['{id}'];
                    }}
                    "#,
                    id = container_id
                );
                let _ = js_sys::eval(&cleanup_script);
            });
        });
    }

    view! {
        <div
            id={container_id}
            class="payment-button"
            node_ref=node_ref
        >
            {move || if is_initialized.get() { "" } else { "Loading payment button..." }}
        </div>
    }
}

fn initialize_payment_button(
    container_id: &str,
    cauldron: Cauldron,
    user_id: String,
    currency: ReadSignal<Currency>,
    on_paid: Callback<Order>,
) {
    log!("[PAYMENT] Initializing button for #{}", container_id);

    // createOrder: the SDK asks for the amount to charge, in whatever
    // currency the shopper has selected by now
    let create_fn = Closure::wrap(Box::new(move || {
        let total = cauldron.total_display(currency.get_untracked());
        log!("[PAYMENT] createOrder - total: {}", total);
        JsValue::from_str(&total)
    }) as Box<dyn Fn() -> JsValue>);

    // onApprove: the buyer confirmed, turn the cauldron into an order
    let approve_fn = Closure::wrap(Box::new(move |data: JsValue| {
        let approval: ApprovalData = data.into_serde().unwrap_or_default();
        log!(
            "[PAYMENT] onApprove - submitting order (SDK transaction: {})",
            approval.order_id.as_deref().unwrap_or("unknown")
        );
        let lines: Vec<OrderLine> = cauldron
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id.clone(),
                product_name: line.name.clone(),
                unit_price: line.unit_price.clone(),
                quantity: line.quantity,
            })
            .collect();
        let payload = CheckoutPayload {
            user_id: user_id.clone(),
            currency: currency.get_untracked().code().to_string(),
            lines,
        };

        spawn_local(async move {
            let request = match Request::post("/api/orders").json(&payload) {
                Ok(request) => request,
                Err(e) => {
                    log!("[PAYMENT] Failed to encode order: {}", e);
                    return;
                }
            };
            match request.send().await {
                Ok(response) if response.ok() => match response.json::<Order>().await {
                    Ok(order) => {
                        log!("[PAYMENT] Order {} accepted", order.id);
                        cauldron.clear();
                        on_paid.call(order);
                    }
                    Err(e) => log!("[PAYMENT] Bad order response: {}", e),
                },
                Ok(response) => {
                    log!("[PAYMENT] Order rejected with status {}", response.status())
                }
                Err(e) => log!("[PAYMENT] Order request failed: {}", e),
            }
        });
    }) as Box<dyn FnMut(JsValue)>);

    // Register both closures in the JS global scope
    let create_name = format!("createorder_{}", container_id.replace('-', "_"));
    let approve_name = format!("onapprove_{}", container_id.replace('-', "_"));
    let global = js_sys::global();
    js_sys::Reflect::set(
        &global,
        &create_name.clone().into(),
        create_fn.as_ref().unchecked_ref::<Function>(),
    )
    .unwrap();
    js_sys::Reflect::set(
        &global,
        &approve_name.clone().into(),
        approve_fn.as_ref().unchecked_ref::<Function>(),
    )
    .unwrap();

    // SDK initialization
    let init_script = format!(
        r#"
        (function() {{
            console.log('[PAYMENT] Initializing for #{id}');
            if (!window.paymentRegistry) {{
                window.paymentRegistry = {{}};
            }}
            window.paymentRegistry['{id}'] = {{ alive: true, initialized: false }};
            window.paypal.Buttons({{
                createOrder: function(data, actions) {{
                    return {create}();
                }},
                onApprove: function(data, actions) {{
                    {approve}(data);
                }}
            }}).render('#{id}');
            window.paymentRegistry['{id}'].initialized = true;
            console.log('[PAYMENT] Initialization complete for #{id}');
        }})();
        "#,
        id = container_id,
        create = create_name,
        approve = approve_name
    );

    if let Err(e) = js_sys::eval(&init_script) {
        log!("[PAYMENT] SDK initialization failed: {:?}", e);
    }
    create_fn.forget();
    approve_fn.forget();
}
