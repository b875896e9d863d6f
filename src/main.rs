//! House Timer entry point
//!
//! Wires the page's DOM to the session and redraws it after every event.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

    use house_timer::platform::storage::LocalStorage;
    use house_timer::platform::ticker::Ticker;
    use house_timer::{
        House, KeyValueStore, MemoryStore, Session, SessionView, Settings, SystemClock,
        TimerPhase, UiEvent,
    };

    /// Falls back to an in-memory store when LocalStorage is blocked
    type Store = Box<dyn KeyValueStore>;

    /// Page state
    struct App {
        session: Session<Store, SystemClock>,
        /// Armed only while the timer runs
        ticker: Option<Ticker>,
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("House Timer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let store: Store = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                log::error!("{} - scores will not survive a reload", err);
                Box::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(&store);
        let mut session = Session::new(store, SystemClock::new(), settings);
        session.load();

        let app = Rc::new(RefCell::new(App {
            session,
            ticker: None,
        }));

        setup_controls(&document, &app);
        setup_leaderboard(&document, &app);
        setup_teardown(&app);

        render(&document, &app.borrow().session.view());

        log::info!("House Timer running!");
    }

    /// Apply an event, re-arm or cancel the refresh interval, redraw
    fn dispatch(app: &Shared, event: UiEvent) {
        let tick_only = event == UiEvent::Tick;
        app.borrow_mut().session.handle(event);
        sync_ticker(app);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let view = app.borrow().session.view();
        if tick_only {
            set_text(&document, "display", &view.display);
        } else {
            render(&document, &view);
        }
    }

    fn sync_ticker(app: &Shared) {
        let mut a = app.borrow_mut();
        let wanted = a.session.needs_ticker();
        if wanted && a.ticker.is_none() {
            // Weak so the interval cannot keep the app alive
            let weak: Weak<RefCell<App>> = Rc::downgrade(app);
            let interval = a.session.tick_interval_ms();
            match Ticker::start(interval, move || {
                if let Some(app) = weak.upgrade() {
                    dispatch(&app, UiEvent::Tick);
                }
            }) {
                Ok(ticker) => a.ticker = Some(ticker),
                Err(e) => log::error!("Could not start display refresh: {:?}", e),
            }
        } else if !wanted && a.ticker.is_some() {
            a.ticker = None;
        }
    }

    fn on_click(document: &Document, id: &str, app: &Shared, event: UiEvent) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("#{} missing", id);
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            dispatch(&app, event.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &Document, app: &Shared) {
        on_click(document, "start-btn", app, UiEvent::Start);
        on_click(document, "stop-btn", app, UiEvent::Stop);
        on_click(document, "reset-btn", app, UiEvent::Reset);
        on_click(document, "save-btn", app, UiEvent::Save);
        on_click(document, "advisory", app, UiEvent::DismissAdvisory);
        on_click(document, "confirm-yes", app, UiEvent::ConfirmDelete);
        on_click(document, "confirm-no", app, UiEvent::CancelDelete);

        // Team name
        if let Some(input) = input_by_id(document, "team-name") {
            {
                let app = app.clone();
                let target = input.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    dispatch(&app, UiEvent::TeamNameChanged(target.value()));
                });
                let _ = input
                    .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Enter saves
            {
                let app = app.clone();
                let closure =
                    Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                        if event.key() == "Enter" {
                            dispatch(&app, UiEvent::Save);
                        }
                    });
                let _ = input
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // House
        if let Some(select) = select_by_id(document, "house") {
            let app = app.clone();
            let target = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                dispatch(&app, UiEvent::HouseChanged(House::from_tag(&target.value())));
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One delegated listener for every row's delete button
    fn setup_leaderboard(document: &Document, app: &Shared) {
        let Some(list) = document.get_element_by_id("leaderboard") else {
            log::warn!("#leaderboard missing");
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-index]").ok().flatten())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                log::info!("removing at {}", index);
                dispatch(&app, UiEvent::RequestDelete(index));
            }
        });
        let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Cancel the refresh interval when the page goes away
    fn setup_teardown(app: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_for_show = app.clone();
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if app.borrow_mut().ticker.take().is_some() {
                log::info!("Display refresh cancelled (page hidden)");
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();

        // Coming back from the back/forward cache re-arms it
        let app = app_for_show;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            dispatch(&app, UiEvent::Tick);
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn render(document: &Document, view: &SessionView) {
        set_text(document, "display", &view.display);

        let running = view.phase == TimerPhase::Running;
        set_hidden(document, "start-btn", running);
        set_hidden(document, "stop-btn", !running);

        if let Some(input) = input_by_id(document, "team-name") {
            if input.value() != view.team_name {
                input.set_value(&view.team_name);
            }
        }
        if let Some(select) = select_by_id(document, "house") {
            select.set_value(view.house.map(|h| h.as_str()).unwrap_or(""));
        }

        if let Some(el) = document.get_element_by_id("advisory") {
            match &view.advisory {
                Some(advisory) => {
                    let _ = el.set_attribute(
                        "class",
                        &format!("advisory {}", advisory.severity.as_str()),
                    );
                    el.set_text_content(Some(&advisory.message));
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                    el.set_text_content(None);
                }
            }
        }

        if let Some(rows) = &view.rows {
            render_rows(document, rows);
        }

        match view.pending_delete {
            Some(index) => {
                let name = view
                    .rows
                    .as_ref()
                    .and_then(|rows| rows.get(index))
                    .map(|r| r.name.as_str())
                    .unwrap_or("this entry");
                set_text(document, "confirm-text", &format!("Delete {}?", name));
                set_hidden(document, "confirm-dialog", false);
            }
            None => set_hidden(document, "confirm-dialog", true),
        }
    }

    fn render_rows(document: &Document, rows: &[house_timer::RowView]) {
        let Some(list) = document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_inner_html("");
        for (index, row) in rows.iter().enumerate() {
            let Ok(tr) = document.create_element("tr") else {
                continue;
            };
            if let Some(color) = row.color {
                let _ = tr.set_attribute("style", &format!("color: {}", color));
            }
            append_cell(document, &tr, "rank", &row.rank.to_string());
            append_cell(document, &tr, "name", &row.name);
            append_cell(document, &tr, "time", &row.time);
            if let Ok(td) = document.create_element("td") {
                if let Ok(btn) = document.create_element("button") {
                    let _ = btn.set_attribute("class", "delete");
                    let _ = btn.set_attribute("aria-label", "delete");
                    let _ = btn.set_attribute("data-index", &index.to_string());
                    btn.set_text_content(Some("\u{2715}"));
                    let _ = td.append_child(&btn);
                }
                let _ = tr.append_child(&td);
            }
            let _ = list.append_child(&tr);
        }
    }

    fn append_cell(document: &Document, tr: &Element, class: &str, text: &str) {
        if let Ok(td) = document.create_element("td") {
            let _ = td.set_attribute("class", class);
            td.set_text_content(Some(text));
            let _ = tr.append_child(&td);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("House Timer (native) starting...");
    log::info!("The widget runs in the browser - use `trunk serve` for the web version");

    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run against an in-memory store
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use house_timer::{House, ManualClock, MemoryStore, Session, Settings, UiEvent};

    let clock = ManualClock::new(0);
    let mut session = Session::new(MemoryStore::new(), clock.clone(), Settings::default());
    session.load();

    for (team, house, ms) in [
        ("Gryffindor", House::Red, 75_230),
        ("Ravenclaw", House::Blue, 61_230),
        ("Hufflepuff", House::Yellow, 92_000),
    ] {
        session.handle(UiEvent::Start);
        clock.advance(ms);
        session.handle(UiEvent::Stop);
        session.handle(UiEvent::TeamNameChanged(team.to_string()));
        session.handle(UiEvent::HouseChanged(Some(house)));
        session.handle(UiEvent::Save);
    }

    let view = session.view();
    println!("\n{:<4} {:<16} {:>9}  House", "#", "Name", "Time");
    for row in view.rows.unwrap_or_default() {
        let house = row.house.map(|h| h.label()).unwrap_or("-");
        println!("{:<4} {:<16} {:>9}  {}", row.rank, row.name, row.time, house);
    }
}
