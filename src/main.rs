use chromalife::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use chromalife::renderer::{DrawList, Renderer};
use chromalife::{Phase, SimulationConfig, SimulationState, TickScheduler, TickStatus};
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn status_title(simulation: &SimulationState, scheduler: &TickScheduler) -> String {
    let state_text = match simulation.phase() {
        Phase::Extinct => " [EXTINCT]",
        _ if simulation.is_paused() => " [PAUSED]",
        _ => "",
    };
    format!(
        "Chromalife - Time: {} Animals: {} - Speed: {:.2}x{}",
        simulation.time(),
        simulation.population(),
        scheduler.speed_multiplier(),
        state_text
    )
}

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Chromalife")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );

    // The surface size is read once; later resizes stretch the view only
    let bounds = window.inner_size();
    let config = SimulationConfig::from_env();
    let initial_population = config.initial_population;
    let mut scheduler = TickScheduler::new(config.tick_delay);
    let mut simulation = SimulationState::new(bounds, config)?;
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), bounds))?;
    let mut draw_list = DrawList::new();
    simulation.start(initial_population)?;
    let mut last_update_time = Instant::now();

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_update_time);
                last_update_time = now;
                for _ in 0..scheduler.due_ticks(elapsed) {
                    match simulation.tick(&mut draw_list) {
                        Ok(TickStatus::Advanced(_)) => {}
                        Ok(TickStatus::Extinct | TickStatus::Paused | TickStatus::Idle) => break,
                        Err(err) => {
                            log::error!("Tick failed: {err}");
                            elwt.exit();
                            break;
                        }
                    }
                }
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => renderer.resize(physical_size),
                WindowEvent::ScaleFactorChanged { .. } => renderer.resize(window.inner_size()),
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state == ElementState::Pressed && !key_event.repeat {
                        match key_event.physical_key {
                            PhysicalKey::Code(KeyCode::ArrowUp) => scheduler.adjust_speed(true),
                            PhysicalKey::Code(KeyCode::ArrowDown) => scheduler.adjust_speed(false),
                            PhysicalKey::Code(KeyCode::Space) => {
                                simulation.toggle_pause();
                                scheduler.reset();
                            }
                            PhysicalKey::Code(KeyCode::KeyR) => {
                                if let Err(err) = simulation.restart() {
                                    log::error!("Restart failed: {err}");
                                }
                                scheduler.reset();
                            }
                            PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    match renderer.render(&draw_list) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("WGPU Error: OutOfMemory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("WGPU Error: {:?}", e),
                    }
                    window.set_title(&status_title(&simulation, &scheduler));
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
