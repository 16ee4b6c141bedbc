//! Slingshot entry point
//!
//! Headless runner: plays the level catalog with a seeded autoplayer and logs
//! progression. Usage: `slingshot [tuning.json] [seed]`

mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use slingshot::Tuning;
    use slingshot::consts::MAX_IMPULSE;
    use slingshot::sim::{
        FrameClock, GameEvent, GameState, InputEvent, Key, PhysicsEngine, TickInput, tick,
    };

    /// Shots per level before the autoplayer gives up and skips
    const SHOTS_PER_LEVEL: u32 = 6;
    /// Host frames allowed for a whole run
    const FRAME_BUDGET: u32 = 60 * 60 * 5;
    /// Nominal host frame time (seconds)
    const HOST_FRAME: f32 = 1.0 / 60.0;
    /// Release point sits this far left of the target
    const STANDOFF: f32 = 60.0;

    pub struct Autoplayer {
        rng: Pcg32,
        shots: u32,
    }

    impl Autoplayer {
        pub fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                shots: 0,
            }
        }

        /// Input for the next frame: a full drag aimed at the lowest-id pig
        /// whenever nothing is in flight, or a skip once out of shots
        fn next_input<P: PhysicsEngine>(&mut self, state: &GameState<P>) -> TickInput {
            if state.active_projectile().is_some() {
                return TickInput::default();
            }
            if self.shots >= SHOTS_PER_LEVEL {
                self.shots = 0;
                return TickInput::new(vec![InputEvent::Key(Key::Left)]);
            }

            let view = state.frame_view();
            let Some(target) = view.entities.iter().find(|e| e.role.is_pig()) else {
                return TickInput::default();
            };

            let jitter = self.rng.random_range(-4.0f32..4.0);
            let release = target.position + glam::Vec2::new(-STANDOFF, jitter);
            let start = release - glam::Vec2::new(MAX_IMPULSE, 0.0);
            self.shots += 1;

            // Tab once in a while so every kind gets a turn
            let mut events = Vec::with_capacity(3);
            if self.rng.random_bool(0.3) {
                events.push(InputEvent::Key(Key::Tab));
            }
            events.push(InputEvent::Press(start));
            events.push(InputEvent::Release(release));
            TickInput::new(events)
        }

        /// Reset the shot budget when a new level starts
        fn observe(&mut self, event: &GameEvent) {
            if matches!(event, GameEvent::LevelLoaded { .. }) {
                self.shots = 0;
            }
        }
    }

    pub fn run(tuning: Tuning, seed: u64) -> GameState {
        let mut state = GameState::with_tuning(tuning);
        let mut clock = FrameClock::new(state.tuning.sim_dt);
        let mut player = Autoplayer::new(seed);
        log::info!(
            "Game initialized with seed {} ({} levels)",
            seed,
            state.catalog().level_count()
        );

        for frame in 0..FRAME_BUDGET {
            for _ in 0..clock.advance(HOST_FRAME) {
                let input = player.next_input(&state);
                tick(&mut state, &input);
            }

            for event in state.drain_events() {
                player.observe(&event);
                match event {
                    GameEvent::EntityDestroyed { id, role } => {
                        log::debug!("{:?} {} destroyed", role, id)
                    }
                    GameEvent::GameCompleted => log::info!("Completed after {} frames", frame),
                    _ => {}
                }
            }

            if state.is_completed() {
                break;
            }
        }

        if !state.is_completed() {
            log::warn!(
                "Frame budget exhausted on level {}",
                state.current_level_index
            );
        }
        state
    }
}

fn main() {
    use slingshot::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slingshot (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let state = autoplay::run(tuning, seed);

    match serde_json::to_string_pretty(&state.frame_view()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}
