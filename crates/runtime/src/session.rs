use cubescape_common::{CameraPose, MotionConfig, SceneObject};
use cubescape_input::{InputEvent, InputState};
use cubescape_kernel::{
    CollisionField, MovementController, PlayerState, SceneEvent, SceneObjectStore, StepOutcome,
};
use cubescape_persist::{PersistError, Persistence};
use cubescape_render::Renderer;
use rand::Rng;

/// Everything one viewer instance owns.
///
/// Input events are recorded at any time; `tick` samples them once and
/// steps the player against the current scene.
#[derive(Debug, Clone)]
pub struct Session {
    scene: SceneObjectStore,
    controller: MovementController,
    input: InputState,
    prompt: Option<String>,
    frame: u64,
}

impl Session {
    /// Empty scene, player at the spawn point.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            scene: SceneObjectStore::new(),
            controller: MovementController::new(config),
            input: InputState::new(),
            prompt: None,
            frame: 0,
        }
    }

    /// Populate the scene once from `prompt`. Unknown prompts leave it empty.
    pub fn with_prompt<R: Rng + ?Sized>(prompt: &str, config: MotionConfig, rng: &mut R) -> Self {
        let mut session = Self::new(config);
        let added = cubescape_author::populate(&mut session.scene, prompt, rng);
        tracing::info!(prompt, added, "scene generated from prompt");
        session.prompt = Some(prompt.to_owned());
        session
    }

    /// Start over from a new prompt with the same motion config. Look-lock
    /// stays engaged if it was, since the host still holds the pointer.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, prompt: &str, rng: &mut R) {
        let locked = self.look_locked();
        *self = Self::with_prompt(prompt, *self.config(), rng);
        if locked {
            self.handle_input(InputEvent::LookLock(true));
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn scene(&self) -> &SceneObjectStore {
        &self.scene
    }

    pub fn player(&self) -> &PlayerState {
        self.controller.state()
    }

    pub fn config(&self) -> &MotionConfig {
        self.controller.config()
    }

    pub fn pose(&self) -> CameraPose {
        self.controller.pose()
    }

    /// Ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn look_locked(&self) -> bool {
        self.input.look_locked()
    }

    /// Record an input event for the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// Sample input and step the player once, without rendering.
    pub fn update(&mut self) -> StepOutcome {
        let input = self.input.take_frame();
        let field = CollisionField::new(&self.scene, self.controller.config());
        let outcome = self.controller.step(&input, &field);
        self.frame += 1;
        tracing::trace!(frame = self.frame, ?outcome, "tick");
        outcome
    }

    /// One full tick: update, then hand the new pose and the scene to `renderer`.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &R) -> R::Output {
        self.update();
        renderer.render(&self.pose(), self.scene.objects())
    }

    /// Drop one random cube near the origin.
    pub fn add_random_cube<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SceneObject {
        let cube = cubescape_author::random_cube(rng);
        self.scene.place(cube);
        cube
    }

    /// Replace the scene with whatever `persistence` provides.
    ///
    /// Returns `Ok(false)` when nothing was chosen. A failed load returns the
    /// error. Either way the scene is left untouched.
    pub fn load<P: Persistence + ?Sized>(
        &mut self,
        persistence: &mut P,
    ) -> Result<bool, PersistError> {
        match persistence.load()? {
            Some(objects) => {
                self.scene.replace(objects);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save<P: Persistence + ?Sized>(&self, persistence: &mut P) -> Result<(), PersistError> {
        persistence.save(self.scene.objects())
    }

    /// Drain the scene mutation log.
    pub fn drain_scene_events(&mut self) -> Vec<SceneEvent> {
        self.scene.drain_events()
    }
}
