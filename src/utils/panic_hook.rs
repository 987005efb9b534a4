use leptos::logging::log;
use std::panic;

/// Panic hook that adds payment-bridge context to reactive-owner panics.
///
/// The checkout button hands closures to the payment SDK, and the SDK can
/// keep calling them after Leptos has disposed the component that created
/// them. When that happens the panic message alone is useless; dumping the
/// registry shows which buttons the SDK still believes are mounted.
pub fn set_custom_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        original_hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] Reactive owner was already disposed.");
            log!("[PANIC] An SDK callback (createOrder/onApprove) likely fired after its checkout button unmounted.");
            log!("[PANIC] Compare the registry below against the buttons currently on screen.");

            let js_code = r#"
                if (window.paymentRegistry) {
                    console.log('[PANIC] Payment buttons the SDK still tracks:',
                        Object.keys(window.paymentRegistry).map(id => ({
                            id,
                            alive: window.paymentRegistry[id].alive,
                            initialized: window.paymentRegistry[id].initialized
                        }))
                    );
                } else {
                    console.log('[PANIC] No payment registry found');
                }
            "#;

            let _ = js_sys::eval(js_code);
        }
    }));
}

/// Call once at startup, before any checkout button mounts.
pub fn init() {
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
    log!("[PANIC_HOOK] Custom panic hook set up successfully");
}
