//! MilkShake demo
//!
//! Drives two shakers through a simulated frame loop and logs their offsets.
//! Usage: `milkshake [presets.json] [settings.json]`

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use milkshake::consts::SIM_DT;
use milkshake::presets::JsonFileLoader;
use milkshake::{BuiltinPresets, FrameClock, PresetBank, Settings, Shaker, ShakerRegistry};

/// Simulated display refresh (seconds per frame)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Simulated run length (frames)
const FRAMES: u32 = 180;

fn load_presets(path: Option<&str>) -> PresetBank {
    let mut bank = BuiltinPresets::bank();
    if let Some(path) = path {
        match PresetBank::load(&JsonFileLoader::new(path)) {
            Ok(custom) => bank.merge(custom),
            Err(e) => log::warn!("Failed to load presets from {}: {}", path, e),
        }
    }
    bank
}

fn main() {
    env_logger::init();
    log::info!("MilkShake demo starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let bank = load_presets(args.first().map(String::as_str));
    let settings = args.get(1).map(Settings::load).unwrap_or_default();

    let camera = Rc::new(RefCell::new(Shaker::with_rng_seed(1)));
    let prop = Rc::new(RefCell::new(Shaker::with_rng_seed(2)));
    prop.borrow_mut().set_position(Vec3::new(6.0, 0.0, 0.0));

    let mut registry = ShakerRegistry::new();
    registry.register(Rc::clone(&camera));
    registry.register(Rc::clone(&prop));

    // Background rumble on the camera only, plus a blast felt by everyone nearby
    let rumble = match bank.parameters("handheld_camera") {
        Ok(params) => Some(camera.borrow_mut().shake(&params, Some(7))),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    match bank.parameters("explosion") {
        Ok(params) => {
            let hit = registry.shake_all_from_point(Vec3::new(2.0, 0.0, 0.0), 10.0, &params, None);
            log::info!("Explosion reached {} shaker(s)", hit.len());
        }
        Err(e) => log::warn!("{}", e),
    }

    let mut clock = FrameClock::new(SIM_DT);
    for frame in 0..FRAMES {
        for tick in clock.accumulate(FRAME_DT) {
            registry.update_all(clock.step(), tick);
        }

        if frame == FRAMES / 2 {
            if let Some(rumble) = &rumble {
                rumble.borrow_mut().stop(0.5, true);
                log::info!("Rumble stopping");
            }
        }

        if frame % 15 == 0 {
            let cam = settings.apply(camera.borrow().offset());
            let other = settings.apply(prop.borrow().offset());
            log::info!(
                "frame {:3}: camera pos={:.3} rot={:.3} | prop pos={:.3} ({} active)",
                frame,
                cam.position,
                cam.rotation,
                other.position,
                prop.borrow().len()
            );
        }
    }

    log::info!("MilkShake demo finished");
}
