use leptos::prelude::*;
use shared::{CONFIG, MenuAction};

use crate::components::{Sidebar, TrackerStatus};

/// Application shell: sidebar plus the main column.
///
/// The shell owns the collapse flag and initializes it to false, so the
/// sidebar starts expanded. Menu activations currently dispatch to a single
/// diagnostic logger until real per-entry behavior is specified.
#[component]
pub fn App() -> impl IntoView {
    let collapsed = RwSignal::new(false);

    let on_activate = Callback::new(|action: MenuAction| {
        web_sys::console::log_1(&format!("menu activated: {}", action.name()).into());
    });

    view! {
        <div class="flex min-h-screen">
            <Sidebar collapsed=collapsed on_activate=on_activate />

            <main class="flex-1 px-6 py-4">
                <header class="mb-6 flex items-center gap-4">
                    <button
                        class="collapse-toggle"
                        on:click=move |_| collapsed.update(|c| *c = !*c)
                    >
                        "☰"
                    </button>
                    <div>
                        <h1 class="font-bold text-xl">{CONFIG.name}</h1>
                        <div class="text-sm text-slate-400">{CONFIG.tagline}</div>
                    </div>
                </header>

                <TrackerStatus />
            </main>
        </div>
    }
}
