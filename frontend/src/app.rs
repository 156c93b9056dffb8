use infinite_scroll::{infinite_scroll, Loader};
use leptos::prelude::*;

pub const ITEMS_PER_LOAD: usize = 20;
pub const MAX_ITEM_COUNT: usize = 200;

/// Demo list loading more items when scrolled close to its end, until `MAX_ITEM_COUNT` items are displayed.
#[component]
pub fn App() -> impl IntoView {
    let items = RwSignal::new(Vec::<usize>::new());
    let is_exhausted = Signal::derive(move || items.read().len() >= MAX_ITEM_COUNT);

    let loader = Loader::new(move || {
        if is_exhausted.get_untracked() {
            return;
        }
        items.update(|items| {
            let start = items.len();
            items.extend(start..start + ITEMS_PER_LOAD);
        });
        log::debug!("Loaded items, count: {}", items.read_untracked().len());
    });

    view! {
        <main style="display: flex; flex-direction: column; gap: 8px; padding: 16px">
            <h1>"Infinite scroll"</h1>
            <div style="height: 400px; overflow-y: auto; border: 1px solid gray">
                <ul
                    use:infinite_scroll=loader
                    infinite-scroll-distance="80"
                    infinite-scroll-delay="200"
                    infinite-scroll-disabled=move || is_exhausted.get()
                >
                    <For
                        each=move || items.get()
                        key=|item| *item
                        children=move |item| view! { <li style="height: 32px">{format!("Item {item}")}</li> }
                    />
                </ul>
                <Show when=move || is_exhausted.get()>
                    <p>"No more items."</p>
                </Show>
            </div>
        </main>
    }
}
