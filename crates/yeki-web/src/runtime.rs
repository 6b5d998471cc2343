use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlAnchorElement, Window};

use yeki_core::{AppConfig, ClickOutcome, Document, PageEvent, ScrollUiController};

use crate::document::{host_error, BrowserDocument};

struct Runtime {
    controller: ScrollUiController,
    document: BrowserDocument,
    /// A requestAnimationFrame callback is queued
    frame_pending: bool,
}

type Shared = Rc<RefCell<Runtime>>;

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` on the shared state unless a handler further up the stack holds it
fn try_with<T, R>(shared: &RefCell<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let mut state = shared.try_borrow_mut().ok()?;
    Some(f(&mut state))
}

/// What a nav click listener has to do with the browser event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavClick {
    prevent_default: bool,
    request_frame: bool,
}

fn nav_click<D: Document>(
    controller: &mut ScrollUiController,
    document: &mut D,
    frame_pending: bool,
    href: &str,
    now: Duration,
) -> NavClick {
    let outcome = match controller.on_click(document, href, now) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, %href, "navigation click failed");
            ClickOutcome::Default
        }
    };
    NavClick {
        prevent_default: outcome.prevents_default(),
        request_frame: controller.is_animating() && !frame_pending,
    }
}

/// Milliseconds from `performance.now()` or a frame timestamp
fn from_millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

fn now(window: &Window) -> Duration {
    from_millis(window.performance().map(|p| p.now()).unwrap_or(0.0))
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
    target.add_event_listener_with_callback(event, callback)?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

/// requestAnimationFrame loop driving the scroll animation
#[derive(Clone)]
struct FrameLoop {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    fn new(window: Window, runtime: Shared) -> Self {
        let frames = Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        };

        let next = frames.clone();
        *frames.callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            let ticked = try_with(&*runtime, |state| {
                let Runtime {
                    controller,
                    document,
                    ..
                } = state;
                match controller.tick(document, from_millis(timestamp)) {
                    Ok(animating) => animating,
                    Err(e) => {
                        warn!(error = %e, "scroll animation aborted");
                        controller.cancel_animation();
                        false
                    }
                }
            });
            // Another handler holds the state; try again next frame
            let animating = ticked.unwrap_or(true);

            if animating {
                if let Err(e) = next.request() {
                    warn!(error = ?e, "requestAnimationFrame failed");
                    runtime.borrow_mut().frame_pending = false;
                }
            } else {
                runtime.borrow_mut().frame_pending = false;
            }
        }));

        frames
    }

    fn request(&self) -> Result<(), JsValue> {
        if let Some(callback) = self.callback.borrow().as_ref() {
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

/// Attach reveal-on-scroll and smooth-scroll navigation to the current page.
///
/// Only the first call per page attaches; later calls fail so listeners
/// and frame loops are never doubled.
pub fn install(config: AppConfig) -> Result<(), JsValue> {
    if INSTALLED.with(|flag| flag.replace(true)) {
        return Err(JsValue::from_str("scroll behavior is already attached to this page"));
    }
    let document = BrowserDocument::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = document.window().clone();
    let dom = document.dom().clone();

    let runtime: Shared = Rc::new(RefCell::new(Runtime {
        controller: ScrollUiController::new(&config),
        document,
        frame_pending: false,
    }));

    // Cover content that is already on screen
    {
        let mut state = runtime.borrow_mut();
        let Runtime {
            controller,
            document,
            ..
        } = &mut *state;
        if let Err(e) = controller.install(document) {
            warn!(error = %e, "initial reveal pass failed");
        }
    }

    for event in ["scroll", "load"] {
        let runtime = runtime.clone();
        let page_event = if event == "load" { PageEvent::Load } else { PageEvent::Scroll };
        listen(window.as_ref(), event, move |_| {
            // Our own frame callback may be mid-update; its reveal pass covers this scroll
            try_with(&*runtime, |state| {
                let Runtime {
                    controller,
                    document,
                    ..
                } = state;
                if let Err(e) = controller.handle(document, page_event.clone(), Duration::ZERO) {
                    warn!(error = %e, "reveal pass failed");
                }
            });
        })?;
    }

    let frames = FrameLoop::new(window.clone(), runtime.clone());
    let selector = config.nav.link_selector.clone();
    let links = dom
        .query_selector_all(&selector)
        .map_err(|e| JsValue::from_str(&host_error(&selector, e).to_string()))?;

    let mut bound = 0;
    for idx in 0..links.length() {
        let Some(anchor) = links
            .item(idx)
            .and_then(|node| node.dyn_into::<HtmlAnchorElement>().ok())
        else {
            continue;
        };

        let runtime = runtime.clone();
        let frames = frames.clone();
        let window = window.clone();
        let target: EventTarget = anchor.clone().into();
        listen(&target, "click", move |event| {
            let href = anchor.href();
            try_with(&*runtime, |state| {
                let Runtime {
                    controller,
                    document,
                    frame_pending,
                } = state;

                let click = nav_click(controller, document, *frame_pending, &href, now(&window));
                if click.prevent_default {
                    event.prevent_default();
                }
                if click.request_frame {
                    match frames.request() {
                        Ok(()) => *frame_pending = true,
                        Err(e) => warn!(error = ?e, "requestAnimationFrame failed"),
                    }
                }
            });
        })?;
        bound += 1;
    }

    debug!(links = bound, %selector, "scroll behavior attached");
    Ok(())
}
