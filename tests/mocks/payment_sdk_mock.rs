use wasm_bindgen::prelude::*;

/// This module provides a mock implementation of the PayPal Buttons SDK
/// for testing the CheckoutButton component without loading the real SDK.

/// Injects the PayPal mock into the window object
pub fn setup_payment_sdk_mock() -> bool {
    #[wasm_bindgen(inline_js = r#"
    export function setup_payment_sdk_mock() {
        // Record every Buttons() configuration so tests can poke at the
        // callbacks the component registered
        window.__paypalButtons = [];

        window.paypal = {
            Buttons: function(options) {
                console.log("[MOCK] paypal.Buttons called");
                window.__paypalButtons.push(options || {});

                return {
                    render: function(selector) {
                        console.log("[MOCK] Buttons.render called for:", selector);
                        window.__paypalRenderCount = (window.__paypalRenderCount || 0) + 1;
                        return true;
                    }
                };
            }
        };

        // Setup payment registry if it doesn't exist
        if (!window.paymentRegistry) {
            window.paymentRegistry = {};
        }

        console.log("[MOCK] PayPal mock setup complete");
        return true;
    }
    "#)]
    extern "C" {
        fn setup_payment_sdk_mock() -> bool;
    }

    setup_payment_sdk_mock()
}

/// Gets the size of the payment registry
pub fn get_registry_size() -> usize {
    #[wasm_bindgen(inline_js = r#"
    export function get_registry_size() {
        if (window.paymentRegistry) {
            return Object.keys(window.paymentRegistry).length;
        }
        return 0;
    }
    "#)]
    extern "C" {
        fn get_registry_size() -> usize;
    }

    get_registry_size()
}

/// Number of times the mock SDK rendered a button
pub fn get_render_count() -> usize {
    #[wasm_bindgen(inline_js = r#"
    export function get_render_count() {
        return window.__paypalRenderCount || 0;
    }
    "#)]
    extern "C" {
        fn get_render_count() -> usize;
    }

    get_render_count()
}

/// Invokes the createOrder callback of the most recently built button and
/// returns whatever total it produced
pub fn invoke_last_create_order() -> String {
    #[wasm_bindgen(inline_js = r#"
    export function invoke_last_create_order() {
        if (!window.__paypalButtons || window.__paypalButtons.length === 0) {
            return "";
        }
        const options = window.__paypalButtons[window.__paypalButtons.length - 1];
        if (typeof options.createOrder !== 'function') {
            return "";
        }
        return options.createOrder(null, null);
    }
    "#)]
    extern "C" {
        fn invoke_last_create_order() -> String;
    }

    invoke_last_create_order()
}

/// Cleans up the entire payment registry
pub fn cleanup_all_payment_registry() -> usize {
    #[wasm_bindgen(inline_js = r#"
    export function cleanup_all_payment_registry() {
        if (window.paymentRegistry) {
            const count = Object.keys(window.paymentRegistry).length;
            window.paymentRegistry = {};
            console.log("[MOCK] Cleaned up entire registry, removed buttons:", count);
            return count;
        }
        return 0;
    }
    "#)]
    extern "C" {
        fn cleanup_all_payment_registry() -> usize;
    }

    cleanup_all_payment_registry()
}
