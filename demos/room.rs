//! Headless room demo: drives the whole pipeline (registry, session,
//! render target allocation, frame loop, teardown) over the mock runtime.
//!
//! Run with `cargo run --example room`; pass `--app-distortion` to exercise
//! the application-side distortion path instead of the runtime-side one.

use log::{error, info};

use stereovr::api::mock::MockRenderDevice;
use stereovr::{
    DistortionBackend, FrameLoop, InputFrame, Scene, ServiceRegistry, Session, TargetSize,
    TrackingCaps,
};

const FRAMES: u32 = 180;

/// Scripted stand-in for a real input collaborator: walk in, strafe, look
/// around, freeze briefly to inspect time-warp, walk back out.
fn scripted_input(frame: u32) -> InputFrame {
    InputFrame {
        forward: frame < 60,
        backward: frame >= 150,
        strafe_right: (60..90).contains(&frame),
        yaw_delta: if (90..120).contains(&frame) { 0.01 } else { 0.0 },
        toggle_freeze: frame == 90 || frame == 120,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let backend = if std::env::args().any(|arg| arg == "--app-distortion") {
        DistortionBackend::Application
    } else {
        DistortionBackend::Service
    };

    let mut registry = ServiceRegistry::new();
    registry.register_mock();

    let mut session = match Session::open(&mut registry) {
        Ok(session) => session,
        Err(err) => {
            error!("{}", err);
            registry.shutdown();
            std::process::exit(1);
        }
    };

    let info = session.info().clone();
    info!(
        "driving \"{}\": recommended per-eye {}x{} / {}x{}",
        info.product_name,
        info.left_eye.render_width,
        info.left_eye.render_height,
        info.right_eye.render_width,
        info.right_eye.render_height,
    );

    session
        .configure_tracking(TrackingCaps::full())
        .expect("tracking configuration");

    let mut render = MockRenderDevice::new(TargetSize::new(info.resolution.0, info.resolution.1))
        .expect("graphics device");

    let mut frame_loop = FrameLoop::new(&session, &mut render, backend).expect("frame loop setup");
    info!(
        "shared render target {}x{}, eye viewports {:?}",
        frame_loop.target().size.width,
        frame_loop.target().size.height,
        frame_loop.target().viewports,
    );

    let scene = Scene::room();
    for frame in 0..FRAMES {
        if let Err(err) =
            frame_loop.run_frame(&mut session, &mut render, &scene, &scripted_input(frame))
        {
            // Fatal to this frame only; keep looping.
            error!("frame {} dropped: {}", frame, err);
        }
        if frame % 30 == 0 {
            let controls = frame_loop.controls();
            info!(
                "frame {:3}: body at [{:.2}, {:.2}, {:.2}] yaw {:.2}{}",
                frame,
                controls.position[0],
                controls.position[1],
                controls.position[2],
                controls.yaw,
                if frame_loop.is_frozen() { " (frozen)" } else { "" },
            );
        }
    }

    // Teardown reverses initialization order.
    frame_loop.release(&mut render);
    session.close();
    registry.shutdown();
    info!("done after {} frames", FRAMES);
}
