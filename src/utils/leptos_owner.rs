use leptos::Owner;

/// Runs `f` under `owner` once an async task resumes. Returns None (and logs)
/// when the component that started the task has been unmounted meanwhile.
pub fn with_owner_safe<F, R>(owner: Option<Owner>, log_context: &str, f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    match owner {
        Some(owner) => match leptos::try_with_owner(owner, f) {
            Ok(value) => Some(value),
            Err(_) => {
                leptos::logging::log!("[OWNER] Owner disposed before {} ran", log_context);
                None
            }
        },
        None => {
            leptos::logging::log!("[OWNER] No Leptos owner in context: {}", log_context);
            None
        }
    }
}
