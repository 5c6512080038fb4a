//! Aerocar Sandbox
//!
//! Opens a window and drives the vehicle sandbox from keyboard and mouse.
//! Nothing is drawn; the window title carries the flight telemetry.
//!
//! Run with: `cargo run --bin aerocar_sandbox [config.json]`
//!
//! Controls:
//! - Aircraft: W/S throttle/brake, Q/E pitch, Z/X yaw, C/F roll, R reset
//! - Ground vehicle: P/L drive, K/O steer, arrows to rock the chassis, R reset
//! - Free camera (Shift+C): WASD move, E/Q up/down, Left Shift fast
//! - Tab: switch vehicle, V: cockpit view, mouse: look, wheel: slow motion

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use aerocar_engine::world::{InputReceiver, Sandbox, SandboxConfig, VehicleFocus};

/// Ticks between window title refreshes
const TITLE_INTERVAL: u64 = 15;
/// Pixel-delta wheel events are scaled to line units
const PIXELS_PER_LINE: f32 = 40.0;

struct SandboxApp {
    window: Option<Arc<Window>>,
    sandbox: Sandbox,
    last_frame: Instant,
}

impl SandboxApp {
    fn new(sandbox: Sandbox) -> Self {
        Self {
            window: None,
            sandbox,
            last_frame: Instant::now(),
        }
    }

    /// Shortcuts that act on the sandbox itself rather than a receiver.
    fn handle_shortcut(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab => {
                let next = match self.sandbox.focus() {
                    VehicleFocus::Aircraft => VehicleFocus::GroundVehicle,
                    VehicleFocus::GroundVehicle => VehicleFocus::Aircraft,
                };
                self.sandbox.set_focus(next);
                true
            }
            KeyCode::KeyV => {
                let enabled = !self.sandbox.is_first_person();
                self.sandbox.set_first_person(enabled);
                log::info!("cockpit view {}", if enabled { "on" } else { "off" });
                true
            }
            _ => false,
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.sandbox.tick(dt);

        if self.sandbox.ticks() % TITLE_INTERVAL == 0
            && let Some(window) = &self.window
        {
            window.set_title(&self.title());
        }
    }

    fn title(&self) -> String {
        let receiver = match self.sandbox.receiver() {
            InputReceiver::Vehicle(VehicleFocus::Aircraft) => "aircraft",
            InputReceiver::Vehicle(VehicleFocus::GroundVehicle) => "ground vehicle",
            InputReceiver::Camera => "free camera",
        };
        let time = self.sandbox.time.value();
        match self.sandbox.telemetry() {
            Some(t) => format!(
                "Aerocar - {receiver} | speed {:.3} | authority {:.2} | drag {:.4} | lift {:.4} | time x{time:.2}",
                t.forward_speed, t.flight_mode_influence, t.drag, t.lift,
            ),
            None => format!("Aerocar - {receiver} | time x{time:.2}"),
        }
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Aerocar Sandbox")
                .with_inner_size(PhysicalSize::new(1280, 720));
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    self.window = Some(Arc::new(window));
                    self.last_frame = Instant::now();
                }
                Err(err) => {
                    log::error!("failed to create window: {err}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == KeyCode::Escape && pressed {
                        event_loop.exit();
                        return;
                    }
                    if pressed && !event.repeat && self.handle_shortcut(key) {
                        return;
                    }
                }
                self.sandbox.handle_key(event.physical_key.into(), pressed);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.sandbox.set_modifiers(modifiers.state().into());
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.sandbox.handle_mouse_wheel(lines);
            }
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never arrive
                self.sandbox.input.reset();
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.sandbox.handle_mouse_move(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(&path)?,
        None => SandboxConfig::default(),
    };
    let sandbox = Sandbox::from_config(config)?;

    log::info!("Aerocar Sandbox: Shift+C free camera, Tab switch vehicle, V cockpit view, Esc exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = SandboxApp::new(sandbox);
    event_loop.run_app(&mut app)?;
    Ok(())
}
