//! Browser dashboard.
//!
//! The page needs only one line of JavaScript:
//!
//! ```text
//! <script type="module">import init, { initTgrmApp } from './pkg/tgrm_sim.js'; init().then(initTgrmApp);</script>
//! ```
//!
//! Expected elements: inputs `steps`, `fault`, `cap` (percent), `krep`; a
//! `run` button; canvases `accChart`, `engChart`, `bpiChart`, `scatter`;
//! text regions `stat-repair`, `stat-retrain`. The dashboard renders once
//! on start and again on every click of `run`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::dashboard::{run_dashboard, ChartKind, ChartLayout, ControlValues};
use crate::engine::rng::SimRng;
use crate::error::SimResult;
use crate::model::StrategyKind;
use crate::renderers::{CanvasTarget, RenderTarget};

/// Seed of the page's noise source. Each click continues the same stream.
const PAGE_SEED: u64 = 42;

/// Page elements, looked up once at startup.
struct PageElements {
    steps: HtmlInputElement,
    fault: HtmlInputElement,
    cap: HtmlInputElement,
    repair_rate: HtmlInputElement,
    stat_repair: HtmlElement,
    stat_retrain: HtmlElement,
}

impl PageElements {
    fn lookup(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            steps: element(document, "steps")?,
            fault: element(document, "fault")?,
            cap: element(document, "cap")?,
            repair_rate: element(document, "krep")?,
            stat_repair: element(document, "stat-repair")?,
            stat_retrain: element(document, "stat-retrain")?,
        })
    }
}

/// App state for the dashboard page.
struct DashboardApp {
    page: PageElements,
    targets: Vec<(ChartKind, CanvasTarget)>,
    layout: ChartLayout,
    rng: SimRng,
}

impl DashboardApp {
    fn new(document: &Document) -> Result<Self, JsValue> {
        let page = PageElements::lookup(document)?;
        let mut targets = Vec::with_capacity(ChartKind::ALL.len());
        let mut layout = ChartLayout::default();
        for kind in ChartKind::ALL {
            let canvas: HtmlCanvasElement = element(document, kind.canvas_id())?;
            let target = CanvasTarget::from_canvas(&canvas).map_err(to_js)?;
            layout = layout.with_size(kind, target.size());
            targets.push((kind, target));
        }
        Ok(Self {
            page,
            targets,
            layout,
            rng: SimRng::new(PAGE_SEED),
        })
    }

    fn refresh(&mut self) -> SimResult<()> {
        let (steps, fault, cap, repair_rate) = (
            self.page.steps.value(),
            self.page.fault.value(),
            self.page.cap.value(),
            self.page.repair_rate.value(),
        );
        let params = ControlValues {
            steps: &steps,
            fault: &fault,
            cap_percent: &cap,
            repair_rate: &repair_rate,
        }
        .to_parameters();

        let frame = run_dashboard(&params, &self.layout, &mut self.rng);
        for (kind, target) in &mut self.targets {
            target.render(frame.chart(*kind))?;
        }

        self.page
            .stat_repair
            .set_inner_text(&frame.summary(StrategyKind::Repair).to_string());
        self.page
            .stat_retrain
            .set_inner_text(&frame.summary(StrategyKind::Retrain).to_string());
        Ok(())
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

fn to_js(err: crate::error::SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn setup_button<F>(document: &Document, id: &str, mut callback: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let button = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?;
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        callback();
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Initialize the dashboard - call from JavaScript.
///
/// # Errors
///
/// Returns error if a required page element is missing or the first render
/// fails.
#[wasm_bindgen(js_name = initTgrmApp)]
pub fn init_tgrm_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let app = Rc::new(RefCell::new(DashboardApp::new(&document)?));
    app.borrow_mut().refresh().map_err(to_js)?;

    let handle = Rc::clone(&app);
    setup_button(&document, "run", move || {
        if let Err(e) = handle.borrow_mut().refresh() {
            web_sys::console::error_1(&to_js(e));
        }
    })?;

    Ok(())
}
