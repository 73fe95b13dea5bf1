use anyhow::Result;
use log::{info, warn};
use rusted_input::input::{
    ActionBinding, ActionResolver, DeviceState, GamepadButton, GamepadTarget, InputConfig,
    MouseButton, Scancode, WinitPlatform,
};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

/// Actions exercised by the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoAction {
    Jump,
    Fire,
    Zoom,
    Menu,
}

impl DemoAction {
    const ALL: [DemoAction; 4] = [
        DemoAction::Jump,
        DemoAction::Fire,
        DemoAction::Zoom,
        DemoAction::Menu,
    ];

    fn id(self) -> usize {
        self as usize
    }
}

/// Default keyboard/mouse/gamepad bindings
fn default_bindings() -> Vec<(usize, ActionBinding)> {
    let first = GamepadTarget::First;
    vec![
        (DemoAction::Jump.id(), ActionBinding::key(Scancode::SPACE)),
        (DemoAction::Jump.id(), ActionBinding::key(Scancode::W)),
        (DemoAction::Jump.id(), ActionBinding::gamepad(GamepadButton::A, first)),
        (DemoAction::Fire.id(), ActionBinding::mouse(MouseButton::Left)),
        (DemoAction::Fire.id(), ActionBinding::gamepad(GamepadButton::RightTrigger, first)),
        (DemoAction::Zoom.id(), ActionBinding::mouse(MouseButton::ScrollUp)),
        (DemoAction::Menu.id(), ActionBinding::key(Scancode::ESCAPE)),
        (DemoAction::Menu.id(), ActionBinding::gamepad(GamepadButton::Start, first)),
    ]
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting input demo...");

    let mut devices = DeviceState::new(WinitPlatform::new(), InputConfig::default())?;
    let mut actions = ActionResolver::from_bindings(DemoAction::ALL.len(), default_bindings())?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Input")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent { event, .. } => {
                if let Some(device_event) = devices.platform_mut().process_window_event(&event) {
                    if let Err(err) = devices.handle_event(device_event) {
                        warn!("Dropped input event: {}", err);
                    }
                }
            }
            Event::AboutToWait => {
                // All events of this frame were delivered
                devices.update();
                actions.update(&devices);

                for action in DemoAction::ALL {
                    if actions.pressed(action.id()) {
                        info!("{:?} pressed", action);
                    }
                    if actions.released(action.id()) {
                        info!("{:?} released", action);
                    }
                }
                if devices.mouse_moved() && actions.check(DemoAction::Fire.id()) {
                    info!("Dragging at {}", devices.mouse_position());
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
