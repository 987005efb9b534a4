/// Runs a closure under the current Leptos owner, if there still is one.
/// Cleanup paths can fire after the owner is gone; those log and return None.
pub fn with_owner_safe<F, R>(log_context: &str, f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    if let Some(owner) = leptos::Owner::current() {
        leptos::try_with_owner(owner, f).ok()
    } else {
        leptos::logging::log!("[OWNER] No Leptos owner in context: {}", log_context);
        None
    }
}
