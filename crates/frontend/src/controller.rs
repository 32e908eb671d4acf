use citymap_shared::state::{Action, AppState, Effect};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

/// Apply `action` to the application state and run whatever it asks for.
pub fn dispatch(mut state: Signal<AppState>, action: Action) {
    let effect = state.write().dispatch(action);
    if let Some(effect) = effect {
        run_effect(state, effect);
    }
}

fn run_effect(state: Signal<AppState>, effect: Effect) {
    match effect {
        Effect::HideFlashAfter { token, delay_ms } => {
            spawn(async move {
                TimeoutFuture::new(delay_ms).await;
                dispatch(state, Action::FlashExpired(token));
            });
        }
    }
}

/// Local wall-clock time for click records.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Copy `text` to the clipboard, fire-and-forget.
pub fn copy_to_clipboard(text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            if wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text))
                .await
                .is_err()
            {
                tracing::warn!("Clipboard write rejected");
            }
        }
    });
}
