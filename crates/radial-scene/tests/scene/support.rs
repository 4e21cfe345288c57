//! Shared fixtures: a recording surface and a manual clock.

#![allow(dead_code)]

use radial_scene::surface::CommandLog;
use radial_scene::{ManualClock, RecordingSurface, Scene, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 300;

/// Scene without drag throttling.
pub fn scene() -> (Scene, CommandLog, ManualClock) {
    scene_with(SceneConfig {
        drag_throttle_ms: 0,
        ..SceneConfig::default()
    })
}

pub fn scene_with(config: SceneConfig) -> (Scene, CommandLog, ManualClock) {
    let surface = RecordingSurface::new(WIDTH, HEIGHT);
    let log = surface.log();
    let clock = ManualClock::new();
    let scene = Scene::with_options(Some(Box::new(surface)), config, Box::new(clock.clone()));
    (scene, log, clock)
}

pub type Recorded<T> = Rc<RefCell<Vec<T>>>;

pub fn recorded<T>() -> Recorded<T> {
    Rc::new(RefCell::new(Vec::new()))
}
