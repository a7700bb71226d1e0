//! Polygon Bounce entry point
//!
//! Native: runs the toy headless and logs every new polygon name.
//! Web: exports `WebToy` for a JS host that owns the canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_toy {
    use wasm_bindgen::prelude::*;

    use polygon_bounce::Settings;
    use polygon_bounce::renderer::{as_floats, colors, frame};
    use polygon_bounce::sim::{ArenaWorld, TickInput, Toy, ToyEvent};
    use polygon_bounce::speech::WebSpeech;

    /// Toy instance driven from JS
    #[wasm_bindgen]
    pub struct WebToy {
        toy: Toy<ArenaWorld, WebSpeech>,
        pending_reset: bool,
    }

    #[wasm_bindgen]
    impl WebToy {
        /// Create a toy sized to the browser viewport
        #[wasm_bindgen(constructor)]
        pub fn new(viewport_width: f32, viewport_height: f32, seed: f64) -> Result<WebToy, JsValue> {
            let sized = Settings::for_viewport(viewport_width, viewport_height);
            let mut settings = Settings::load(sized.clone());
            // Stored settings may come from another window size
            settings.canvas_width = sized.canvas_width;
            settings.canvas_height = sized.canvas_height;
            settings.polygon_radius = sized.polygon_radius;
            let world = ArenaWorld::new(settings.gravity());
            let speech = WebSpeech::new(&settings.speech);
            let toy = Toy::new(settings, world, speech, seed as u64)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WebToy {
                toy,
                pending_reset: false,
            })
        }

        /// Advance by a frame's worth of seconds; returns true if the polygon changed
        pub fn update(&mut self, frame_dt: f32) -> bool {
            let input = TickInput {
                reset: std::mem::take(&mut self.pending_reset),
            };
            let events = self.toy.update(frame_dt, &input);
            for event in &events {
                if let ToyEvent::RebuildFailed { sides, reason } = event {
                    log::error!("Rebuild to {} sides failed: {}", sides, reason);
                }
            }
            !events.is_empty()
        }

        /// Reset button; applied on the next update
        pub fn reset(&mut self) {
            self.pending_reset = true;
        }

        pub fn sides(&self) -> u32 {
            self.toy.sides()
        }

        pub fn name(&self) -> String {
            self.toy.name().to_string()
        }

        pub fn canvas_width(&self) -> f32 {
            self.toy.settings().canvas_width
        }

        pub fn canvas_height(&self) -> f32 {
            self.toy.settings().canvas_height
        }

        /// Clear colour as [r, g, b, a]
        pub fn background(&self) -> Vec<f32> {
            colors::BACKGROUND.to_vec()
        }

        /// Mute button; the choice is stored with the other settings
        pub fn set_muted(&mut self, muted: bool) {
            self.toy.announcer_mut().set_muted(muted);
            let mut settings = self.toy.settings().clone();
            settings.speech.enabled = !muted;
            settings.save();
        }

        /// Interleaved [x, y, r, g, b, a] triangle list for the current frame
        pub fn vertices(&self) -> js_sys::Float32Array {
            let vertices = frame(&self.toy);
            js_sys::Float32Array::from(as_floats(&vertices))
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Polygon Bounce (web) ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_toy::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use polygon_bounce::consts::SIM_DT;
    use polygon_bounce::sim::{ArenaWorld, TickInput, Toy, ToyEvent};
    use polygon_bounce::speech::LogAnnouncer;
    use polygon_bounce::{Result, Settings, ToyError};

    const USAGE: &str = "usage: polygon-bounce [--settings FILE] [--seconds N] [--seed N]";

    /// Command line options
    #[derive(Debug)]
    pub struct Options {
        pub settings: Option<String>,
        pub seconds: f32,
        pub seed: Option<u64>,
    }

    impl Options {
        pub fn parse(args: Vec<String>) -> Result<Self> {
            let mut options = Options {
                settings: None,
                seconds: 30.0,
                seed: None,
            };
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                let mut value = || {
                    args.next()
                        .ok_or_else(|| ToyError::InvalidArgument(format!("{arg} needs a value. {USAGE}")))
                };
                match arg.as_str() {
                    "--settings" => options.settings = Some(value()?),
                    "--seconds" => {
                        let v = value()?;
                        options.seconds = v
                            .parse()
                            .map_err(|_| ToyError::InvalidArgument(format!("bad --seconds '{v}'")))?;
                    }
                    "--seed" => {
                        let v = value()?;
                        options.seed = Some(
                            v.parse()
                                .map_err(|_| ToyError::InvalidArgument(format!("bad --seed '{v}'")))?,
                        );
                    }
                    other => {
                        return Err(ToyError::InvalidArgument(format!(
                            "unknown argument '{other}'. {USAGE}"
                        )));
                    }
                }
            }
            Ok(options)
        }
    }

    pub fn run(args: Vec<String>) -> Result<()> {
        let options = Options::parse(args)?;
        let settings = match &options.settings {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };
        let seed = options.seed.unwrap_or_else(rand::random);

        log::info!("Polygon Bounce (native, headless) starting...");
        let world = ArenaWorld::new(settings.gravity());
        let announcer = LogAnnouncer::new(&settings.speech);
        let mut toy = Toy::new(settings, world, announcer, seed)?;

        let ticks = (options.seconds.max(0.0) / SIM_DT) as u64;
        for _ in 0..ticks {
            for event in toy.tick(&TickInput::default(), SIM_DT) {
                if let ToyEvent::RebuildFailed { sides, reason } = event {
                    log::error!("Rebuild to {} sides failed: {}", sides, reason);
                }
            }
        }

        println!(
            "After {:.1}s (seed {}): {} sides, {}",
            options.seconds,
            toy.seed(),
            toy.sides(),
            toy.name()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_parse_defaults() {
            let o = Options::parse(Vec::new()).unwrap();
            assert_eq!(o.seconds, 30.0);
            assert!(o.seed.is_none());
            assert!(o.settings.is_none());
        }

        #[test]
        fn test_parse_values() {
            let o = Options::parse(args(&["--seconds", "2.5", "--seed", "7", "--settings", "a.json"]))
                .unwrap();
            assert_eq!(o.seconds, 2.5);
            assert_eq!(o.seed, Some(7));
            assert_eq!(o.settings.as_deref(), Some("a.json"));
        }

        #[test]
        fn test_parse_errors() {
            assert!(Options::parse(args(&["--seed"])).is_err());
            assert!(Options::parse(args(&["--seed", "x"])).is_err());
            assert!(Options::parse(args(&["--bogus"])).is_err());
        }

        #[test]
        fn test_short_run() {
            run(args(&["--seconds", "1", "--seed", "3"])).unwrap();
        }
    }
}
