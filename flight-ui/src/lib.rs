//! Giao diện theo dõi chuyến bay AA 8247 cho môi trường WebAssembly.

pub mod state;

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::state::{
        is_backdrop_click, BoardAction, StatusBoard, StatusRow, ToastAction, ToastEntry,
        ToastStack, TRACKING_MODAL_ID,
    };
    use crate::styles;
    use chrono::Utc;
    use flight_core::{
        startup_banner, GeneratedCodes, LiveUpdate, StartOutcome, StatusBand, StatusItem,
        TickOutcome, ToastPhase, TrackerConfig, TrackingSession, FLIGHT,
    };
    use flight_ticket::{
        calendar_url, render_ticket, CalendarEvent, TicketParams, TICKET_FILE_NAME,
        TICKET_MIME_TYPE,
    };
    use gloo_timers::callback::{Interval, Timeout};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{
        console, Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement,
        KeyboardEvent, Url, Window,
    };
    use yew::prelude::*;

    const DOWNLOAD_CLICK_DELAY_MS: u32 = 100;

    impl Reducible for StatusBoard {
        type Action = BoardAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            let mut next = (*self).clone();
            next.apply(action);
            Rc::new(next)
        }
    }

    impl Reducible for ToastStack {
        type Action = ToastAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            let mut next = (*self).clone();
            next.apply(action);
            Rc::new(next)
        }
    }

    #[derive(Clone)]
    struct Notifier {
        dispatcher: UseReducerDispatcher<ToastStack>,
        next_id: Rc<RefCell<u32>>,
    }

    impl Notifier {
        fn notify(&self, message: &str, tag: &str) {
            let id = {
                let mut next_id = self.next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };

            self.dispatcher
                .dispatch(ToastAction::Push(ToastEntry::new(id, message, tag)));

            let leave = self.dispatcher.clone();
            Timeout::new(ToastPhase::leaving_at_ms(), move || {
                leave.dispatch(ToastAction::Leave(id));
            })
            .forget();

            let remove = self.dispatcher.clone();
            Timeout::new(ToastPhase::lifetime_ms(), move || {
                remove.dispatch(ToastAction::Remove(id));
            })
            .forget();
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct FlightTrackerProps {
        pub config: TrackerConfig,
    }

    #[function_component(FlightTrackerApp)]
    fn flight_tracker_app(props: &FlightTrackerProps) -> Html {
        let config = &props.config;

        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let code_length = config.code_length;
        let codes = use_memo((), move |_| GeneratedCodes::generate(code_length));
        let board = use_reducer(|| StatusBoard::initial(Utc::now()));
        let toasts = use_reducer(ToastStack::default);
        let toast_ids = use_mut_ref(|| 0u32);
        let notifier = Notifier {
            dispatcher: toasts.dispatcher(),
            next_id: toast_ids,
        };

        let session = use_mut_ref(TrackingSession::new);
        let ticker = use_mut_ref(|| None::<Interval>);
        let live = use_state(|| None::<LiveUpdate>);
        let modal_open = use_state(|| false);

        {
            let board = board.dispatcher();
            use_effect_with(config.status_refresh_ms, move |refresh_ms| {
                let interval = Interval::new(*refresh_ms, move || {
                    board.dispatch(BoardAction::Refresh(Utc::now()));
                });
                move || drop(interval)
            });
        }

        use_effect_with(config.flicker_interval_ms, |flicker_ms| {
            let interval = Interval::new(*flicker_ms, flicker_loading_elements);
            move || drop(interval)
        });

        let close_tracking = {
            let modal_open = modal_open.clone();
            let session = session.clone();
            let ticker = ticker.clone();
            Callback::from(move |_: ()| {
                modal_open.set(false);
                session.borrow_mut().stop();
                ticker.borrow_mut().take();
            })
        };

        {
            let close_tracking = close_tracking.clone();
            use_effect_with((), move |_| {
                let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                    if event.key() == "Escape" {
                        close_tracking.emit(());
                    }
                });

                let document = web_sys::window().and_then(|window| window.document());
                if let Some(document) = &document {
                    if let Err(err) = document
                        .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                    {
                        console::error_1(&err);
                    }
                }

                move || {
                    if let Some(document) = document {
                        if let Err(err) = document.remove_event_listener_with_callback(
                            "keydown",
                            listener.as_ref().unchecked_ref(),
                        ) {
                            console::error_1(&err);
                        }
                    }
                }
            });
        }

        let on_track = {
            let modal_open = modal_open.clone();
            let session = session.clone();
            let ticker = ticker.clone();
            let live = live.clone();
            let board = board.dispatcher();
            let tick_ms = config.tick_interval_ms;
            Callback::from(move |_: MouseEvent| {
                modal_open.set(true);
                if session.borrow_mut().start() == StartOutcome::AlreadyRunning {
                    return;
                }

                let session = session.clone();
                let ticker_for_tick = ticker.clone();
                let live = live.clone();
                let board = board.clone();
                let interval = Interval::new(tick_ms, move || {
                    let outcome = session.borrow_mut().tick();
                    match outcome {
                        TickOutcome::Advanced(update) => {
                            live.set(Some(update));
                            board.dispatch(BoardAction::Touch(Utc::now()));
                        }
                        TickOutcome::Completed(update) => {
                            live.set(Some(update));
                            board.dispatch(BoardAction::Touch(Utc::now()));
                            release_ticker(ticker_for_tick.clone());
                        }
                        TickOutcome::Idle => release_ticker(ticker_for_tick.clone()),
                    }
                });
                *ticker.borrow_mut() = Some(interval);
            })
        };

        let on_close = {
            let close_tracking = close_tracking.clone();
            Callback::from(move |_: MouseEvent| close_tracking.emit(()))
        };

        let on_backdrop = {
            let close_tracking = close_tracking.clone();
            Callback::from(move |event: MouseEvent| {
                let target_id = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .map(|element| element.id());
                if is_backdrop_click(target_id.as_deref()) {
                    close_tracking.emit(());
                }
            })
        };

        let on_download = {
            let codes = codes.clone();
            let notifier = notifier.clone();
            Callback::from(move |_: MouseEvent| {
                let html = render_ticket(&TicketParams::from(&*codes));
                match download_ticket(&html) {
                    Ok(()) => notifier.notify("E-Ticket downloaded successfully!", "success"),
                    Err(err) => console::error_1(&err),
                }
            })
        };

        let on_calendar = {
            let codes = codes.clone();
            let notifier = notifier.clone();
            Callback::from(move |_: MouseEvent| {
                let url = calendar_url(&CalendarEvent::for_flight(&codes.confirmation_code));
                match open_in_new_context(&url) {
                    Ok(()) => notifier.notify("Calendar event created!", "success"),
                    Err(err) => console::error_1(&err),
                }
            })
        };

        html! {
            <div class="flight-root">
                <header class="flight-header">
                    <span class="flight-eyebrow">{ FLIGHT.carrier }</span>
                    <h1>{ format!("Flight {}", FLIGHT.flight_number) }</h1>
                    <p class="flight-route">
                        { format!("{} {} → {} {}", FLIGHT.departure.code, FLIGHT.departure.scheduled_time, FLIGHT.arrival.code, FLIGHT.arrival.scheduled_time) }
                    </p>
                    <p class="flight-updated">
                        {"Last updated: "}
                        <span id="lastUpdated" class="loading">{ board.last_updated.clone() }</span>
                    </p>
                </header>
                <section class="booking-card">
                    <div class="booking-field">
                        <span class="booking-label">{"Passenger"}</span>
                        <span class="booking-value">{ FLIGHT.passenger }</span>
                    </div>
                    <div class="booking-field">
                        <span class="booking-label">{"Confirmation"}</span>
                        <span id="confirmationCode" class="booking-value">{ codes.confirmation_code.clone() }</span>
                    </div>
                    <div class="booking-field">
                        <span class="booking-label">{"Booking reference"}</span>
                        <span id="bookingReference" class="booking-value">{ codes.booking_reference.clone() }</span>
                    </div>
                </section>
                <section class="status-list" data-band={band_attr(board.band)}>
                    { render_status_row(StatusItem::CheckIn, "Check-in", &board.check_in) }
                    { render_status_row(StatusItem::Departure, "Departure", &board.departure) }
                    { render_status_row(StatusItem::Arrival, "Arrival", &board.arrival) }
                </section>
                <div class="flight-actions">
                    <button type="button" class="btn btn-primary" onclick={on_track}>{"Track Flight"}</button>
                    <button type="button" class="btn" onclick={on_download}>{"Download E-Ticket"}</button>
                    <button type="button" class="btn" onclick={on_calendar}>{"Add to Calendar"}</button>
                </div>
                { render_tracking_modal(*modal_open, (*live).as_ref(), on_backdrop, on_close) }
                <div class="toast-stack" aria-live="polite">
                    { for toasts.items.iter().map(render_toast) }
                </div>
            </div>
        }
    }

    fn render_status_row(item: StatusItem, title: &str, row: &StatusRow) -> Html {
        html! {
            <div id={item.element_id()} class={classes!("status-item", row.active.then_some("active"))}>
                <strong>{ title }</strong>
                <span>{ row.text.clone() }</span>
            </div>
        }
    }

    fn render_tracking_modal(
        open: bool,
        live: Option<&LiveUpdate>,
        on_backdrop: Callback<MouseEvent>,
        on_close: Callback<MouseEvent>,
    ) -> Html {
        let (label, message, progress, background, gate) = match live {
            Some(update) => (
                update.label,
                update.message,
                update.progress_percent,
                update.tone.background(),
                update.gate.map(|gate| format!("Gate {gate}")),
            ),
            None => ("Scheduled", "Connecting to flight data...", 0, None, None),
        };

        let badge_style = background
            .map(|color| format!("background: {color};"))
            .unwrap_or_default();

        html! {
            <div id={TRACKING_MODAL_ID} class={classes!("tracking-modal", open.then_some("active"))} onclick={on_backdrop}>
                <div class="tracking-dialog" role="dialog" aria-label="Live flight tracking">
                    <header class="tracking-header">
                        <h2>{ format!("Live Tracking - {}", FLIGHT.flight_number) }</h2>
                        <button type="button" class="tracking-close" onclick={on_close} aria-label="Close tracking">{"×"}</button>
                    </header>
                    <span id="liveStatus" class="status-badge" style={badge_style}>{ label }</span>
                    <div class="progress-bar">
                        <div id="progressFill" class="progress-fill" style={format!("width: {progress}%;")}></div>
                    </div>
                    <p id="currentStatus" class="tracking-message">{ message }</p>
                    <p id="gateInfo" class="tracking-gate">{ gate.unwrap_or_else(|| "Gate TBA".to_string()) }</p>
                </div>
            </div>
        }
    }

    fn render_toast(entry: &ToastEntry) -> Html {
        html! {
            <div
                key={entry.id.to_string()}
                class={classes!("toast", entry.leaving.then_some("toast-leaving"))}
                style={format!("background: {};", entry.kind.background())}
            >
                { entry.message.clone() }
            </div>
        }
    }

    fn band_attr(band: StatusBand) -> &'static str {
        match band {
            StatusBand::Scheduled => "scheduled",
            StatusBand::CheckInOpen => "check_in_open",
            StatusBand::Imminent => "imminent",
            StatusBand::Departed => "departed",
        }
    }

    /// Huỷ interval sau khi callback hiện tại kết thúc.
    fn release_ticker(ticker: Rc<RefCell<Option<Interval>>>) {
        Timeout::new(0, move || {
            ticker.borrow_mut().take();
        })
        .forget();
    }

    fn flicker_loading_elements() {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Ok(nodes) = document.query_selector_all(".loading") else {
            return;
        };

        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let opacity = if js_sys::Math::random() > 0.5 { "1" } else { "0.7" };
            if let Err(err) = element.style().set_property("opacity", opacity) {
                console::error_1(&err);
            }
        }
    }

    fn browser() -> Result<(Window, Document), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        Ok((window, document))
    }

    fn download_ticket(html: &str) -> Result<(), JsValue> {
        let (window, document) = browser()?;

        let parts = js_sys::Array::of1(&JsValue::from_str(html));
        let options = BlobPropertyBag::new();
        options.set_type(TICKET_MIME_TYPE);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

        let url = match Url::create_object_url_with_blob(&blob) {
            Ok(url) => url,
            Err(err) => {
                console::warn_1(&err);
                let encoded = String::from(js_sys::encode_uri_component(html));
                let data_url = format!("data:{TICKET_MIME_TYPE};charset=utf-8,{encoded}");
                window.open_with_url_and_target(&data_url, "_blank")?;
                return Ok(());
            }
        };

        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(TICKET_FILE_NAME);
        anchor.style().set_property("display", "none")?;

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("Document không có thẻ <body>"))?;
        body.append_child(&anchor)?;

        Timeout::new(DOWNLOAD_CLICK_DELAY_MS, move || {
            anchor.click();
            if let Err(err) = body.remove_child(&anchor) {
                console::error_1(&err);
            }
            if let Err(err) = Url::revoke_object_url(&url) {
                console::error_1(&err);
            }
        })
        .forget();

        Ok(())
    }

    fn open_in_new_context(url: &str) -> Result<(), JsValue> {
        let (window, _) = browser()?;
        window.open_with_url_and_target(url, "_blank")?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mount_flight_tracker(selector: &str, config: JsValue) -> Result<(), JsValue> {
        let (_, document) = browser()?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let config: TrackerConfig = if config.is_undefined() || config.is_null() {
            TrackerConfig::default()
        } else {
            from_value(config)?
        };
        config
            .validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        for line in startup_banner() {
            console::log_1(&JsValue::from_str(&line));
        }

        yew::Renderer::<FlightTrackerApp>::with_root_and_props(
            target,
            FlightTrackerProps { config },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_flight_tracker;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_flight_tracker(
    _: &str,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "flight-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
