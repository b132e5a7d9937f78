//! Random Walk entry point
//!
//! The web build animates the walks on a canvas. The native build has no
//! window; it runs the engine headlessly and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use random_walk::Canvas;
    use random_walk::Settings;
    use random_walk::consts::*;
    use random_walk::renderer::{RenderState, SceneCache};
    use random_walk::sim::{EngineState, tick};

    /// App instance holding all state
    struct App {
        state: EngineState,
        settings: Settings,
        scene: SceneCache,
        render_state: Option<RenderState>,
        accumulator: f64,
        last_time: f64,
        /// Whether the final frame after the run ended has been drawn
        finished_drawn: bool,
    }

    impl App {
        fn new(seed: u64, settings: Settings) -> Self {
            let state = EngineState::new(seed);
            let scene = SceneCache::new(&state, &settings);
            Self {
                state,
                settings,
                scene,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                finished_drawn: false,
            }
        }

        /// Run playback ticks for the elapsed time
        fn update(&mut self, dt_ms: f64) {
            let dt_ms = dt_ms.min(1000.0);
            self.accumulator += dt_ms * self.settings.effective_speed() as f64;

            let mut steps = 0;
            while self.accumulator >= STEP_INTERVAL_MS && steps < MAX_STEPS_PER_FRAME {
                let report = tick(&mut self.state);
                self.scene.apply(&self.state, &report);
                for id in &report.spawned {
                    log::debug!("Walk #{} started", id);
                }
                self.accumulator -= STEP_INTERVAL_MS;
                steps += 1;
            }
            // Drop backlog we could not catch up on
            if steps == MAX_STEPS_PER_FRAME {
                self.accumulator = self.accumulator.min(STEP_INTERVAL_MS);
            }
        }

        /// Render a frame if a tick changed the scene since the last one
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let Some(vertices) = self.scene.take_frame(&self.state) else {
                return;
            };
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                    self.scene.mark_dirty();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    self.scene.mark_dirty();
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Random Walk starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        document.set_title(TITLE);

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        let _ = canvas.set_attribute(
            "style",
            &format!("width:{}px;height:{}px", CANVAS_WIDTH, CANVAS_HEIGHT),
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = Rc::new(RefCell::new(App::new(seed, settings)));

        log::info!("Engine initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, Canvas::default()).await;
        app.borrow_mut().render_state = Some(render_state);

        request_animation_frame(app);

        log::info!("Random Walk running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                time - a.last_time
            } else {
                0.0
            };
            a.last_time = time;

            a.update(dt);
            a.render();

            if a.state.is_finished() {
                if a.finished_drawn {
                    let summary = a.state.summary();
                    log::info!(
                        "All walks finished: {} walks, {} markers touched",
                        summary.walks_created,
                        summary.markers_touched
                    );
                    return;
                }
                a.finished_drawn = true;
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use random_walk::Settings;
    use random_walk::sim::{EngineState, run_to_completion};

    env_logger::init();
    log::info!("Random Walk (native) starting...");
    log::info!("Native mode has no window - running the walks headlessly");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Engine initialized with seed: {}", seed);

    let mut state = EngineState::new(seed);
    run_to_completion(&mut state);

    match serde_json::to_string_pretty(&state.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
