mod logging;
mod scheduler;

use std::time::Instant;

use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use orbita_canvas::Raster;
use orbita_config::Config;
use orbita_scene::{SceneComposer, SceneSettings};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::scheduler::{FrameHost, FrameScheduler, Refresh};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load().wrap_err("failed to load configuration")?;
    if let Some(path) = logging::init(&config.log)? {
        info!("logging to {}", path.display());
    }

    let terminal = ratatui::init();
    let result = App::new(terminal, &config).and_then(App::run);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    terminal: DefaultTerminal,
    composer: SceneComposer<StdRng>,
    raster: Raster,
    scheduler: FrameScheduler,
}

impl App {
    /// Build the scene for the current terminal size.
    pub fn new(terminal: DefaultTerminal, config: &Config) -> color_eyre::Result<Self> {
        let size = terminal.size()?;
        let mut raster = Raster::new(config.display.scale);
        raster.fit(size.width, size.height);

        let rng = match config.scene.seed {
            Some(seed) => {
                info!(seed, "using fixed seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        let settings = SceneSettings {
            particles: config.scene.particles,
            stars: config.scene.stars,
            shooting_stars: config.scene.shooting_stars,
            arms: config.scene.arms,
        };
        let composer =
            SceneComposer::new(settings, &config.scene.messages, rng, raster.viewport())?;

        Ok(Self {
            running: true,
            terminal,
            composer,
            raster,
            scheduler: FrameScheduler::new(config.display.fps),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self) -> color_eyre::Result<()> {
        let scheduler = self.scheduler;
        scheduler.run(&mut self)?;
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        loop {
            let now = Instant::now();
            if !self.running || now >= deadline {
                return Ok(());
            }
            if !event::poll(deadline - now)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => debug!(cols, rows, "terminal resized"),
                _ => {}
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        info!("quit requested");
        self.running = false;
    }
}

impl FrameHost for App {
    fn render_frame(&mut self) -> color_eyre::Result<()> {
        let Self {
            terminal,
            composer,
            raster,
            ..
        } = self;
        terminal.draw(|frame| {
            let area = frame.area();
            if raster.fit(area.width, area.height) {
                debug!(cols = area.width, rows = area.height, "raster resized");
            }
            let viewport = raster.viewport();
            composer.render_frame(&mut *raster, viewport);
            frame.render_widget(&*raster, area);
        })?;
        Ok(())
    }

    fn wait_until(&mut self, deadline: Instant) -> color_eyre::Result<Refresh> {
        self.handle_crossterm_events(deadline)?;
        Ok(if self.running {
            Refresh::Continue
        } else {
            Refresh::Stop
        })
    }
}
