//! End-to-end frame loop behavior over the mock runtime.

use stereovr::api::mock::{MockHmdDevicePtr, MockHmdService, MockRenderDevice};
use stereovr::{
    DistortionBackend, Error, FrameLoop, HmdCaps, HmdService, InputFrame, Scene, ServiceRegistry,
    Session, TargetSize, TrackingCaps,
};

/// Open a session on a fresh mock runtime, keeping a concrete handle to the
/// mock device for inspection.
fn open_mock_session() -> (Session, ServiceRegistry, MockHmdDevicePtr) {
    let mut service = MockHmdService::new();
    service.detect_device().unwrap();
    let device = service.device().unwrap().clone();

    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(service));
    let session = Session::open(&mut registry).unwrap();
    (session, registry, device)
}

fn render_device() -> MockRenderDevice {
    MockRenderDevice::new(TargetSize::new(1920, 1080)).unwrap()
}

#[test]
fn open_fails_without_device() {
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(MockHmdService::without_device()));
    match Session::open(&mut registry) {
        Err(Error::DeviceNotFound) => {}
        other => panic!("expected DeviceNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn open_with_disabled_display_degrades_but_succeeds() {
    let mut service = MockHmdService::new();
    service.detect_device().unwrap();
    service
        .device()
        .unwrap()
        .borrow_mut()
        .set_display_enabled(false);

    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(service));
    let session = Session::open(&mut registry).unwrap();
    assert!(!session.info().display_enabled);
    assert!(session.info().product_name.is_empty());
}

#[test]
fn session_negotiates_caps_and_tracking() {
    let (mut session, _registry, device) = open_mock_session();
    assert!(device
        .borrow()
        .enabled_caps()
        .contains(HmdCaps::LOW_PERSISTENCE | HmdCaps::DYNAMIC_PREDICTION));

    session.configure_tracking(TrackingCaps::full()).unwrap();
    assert_eq!(device.borrow().tracking(), Some(TrackingCaps::full()));
}

#[test]
fn full_frame_cycle_submits_what_it_rendered() {
    let (mut session, _registry, device) = open_mock_session();
    let mut render = render_device();
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    for _ in 0..3 {
        frame_loop
            .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
            .unwrap();
    }

    assert_eq!(device.borrow().frames_submitted(), 3);
    // one draw per eye per frame
    assert_eq!(render.scene_draws(), 6);

    let layer = device.borrow().last_layer().unwrap();
    assert_eq!(layer.texture, frame_loop.target().texture);
    assert_eq!(layer.texture_size, frame_loop.target().size);
    assert_eq!(layer.viewports, frame_loop.target().viewports);
}

#[test]
fn never_begins_a_second_frame_before_submitting() {
    let (mut session, _registry, _device) = open_mock_session();
    let mut render = render_device();
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    frame_loop.begin_frame(&mut session).unwrap();
    match frame_loop.begin_frame(&mut session) {
        Err(Error::FrameOutOfOrder(_)) => {}
        other => panic!("expected FrameOutOfOrder, got {:?}", other),
    }

    // The in-flight frame is intact and can still complete.
    frame_loop
        .prepare_scene(&session, &mut render, &scene)
        .unwrap();
    frame_loop.submit(&mut session, &mut render).unwrap();
}

#[test]
fn never_submits_a_frame_it_did_not_begin() {
    let (mut session, _registry, device) = open_mock_session();
    let mut render = render_device();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    match frame_loop.submit(&mut session, &mut render) {
        Err(Error::FrameOutOfOrder(_)) => {}
        other => panic!("expected FrameOutOfOrder, got {:?}", other),
    }
    assert_eq!(device.borrow().frames_submitted(), 0);
}

#[test]
fn freeze_keeps_pixels_but_advances_pose_submission() {
    let (mut session, _registry, device) = open_mock_session();
    let mut render = render_device();
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    for _ in 0..2 {
        frame_loop
            .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
            .unwrap();
    }
    let generation_before = render
        .target_generation(frame_loop.target().texture)
        .unwrap();
    let submitted_before = device.borrow().last_submitted().unwrap().frame_index;

    // Toggle freeze; this and following frames skip rendering.
    let freeze = InputFrame {
        toggle_freeze: true,
        ..Default::default()
    };
    frame_loop
        .run_frame(&mut session, &mut render, &scene, &freeze)
        .unwrap();
    assert!(frame_loop.is_frozen());
    for _ in 0..2 {
        frame_loop
            .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
            .unwrap();
    }

    let generation_after = render
        .target_generation(frame_loop.target().texture)
        .unwrap();
    let submitted_after = device.borrow().last_submitted().unwrap().frame_index;

    assert_eq!(generation_before, generation_after);
    assert_eq!(submitted_after, submitted_before + 3);

    // Unfreezing resumes rendering.
    frame_loop
        .run_frame(&mut session, &mut render, &scene, &freeze)
        .unwrap();
    assert!(!frame_loop.is_frozen());
    assert!(render.target_generation(frame_loop.target().texture).unwrap() > generation_after);
}

#[test]
fn device_loss_is_fatal_to_the_current_frame_only() {
    let (mut session, _registry, device) = open_mock_session();
    let mut render = render_device();
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    device.borrow_mut().fail_next_submit();
    match frame_loop.run_frame(&mut session, &mut render, &scene, &InputFrame::default()) {
        Err(Error::FrameInterrupted(_)) => {}
        other => panic!("expected FrameInterrupted, got {:?}", other),
    }

    // Control returned to the outer loop; the next frame runs normally.
    frame_loop
        .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
        .unwrap();

    device.borrow_mut().fail_next_begin();
    match frame_loop.run_frame(&mut session, &mut render, &scene, &InputFrame::default()) {
        Err(Error::FrameInterrupted(_)) => {}
        other => panic!("expected FrameInterrupted, got {:?}", other),
    }
    frame_loop
        .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
        .unwrap();
}

#[test]
fn hardware_clamp_feeds_viewports_from_actual_size() {
    let (mut session, _registry, device) = open_mock_session();
    // Recommended combined size is 2364x1461; this device cannot do that.
    let mut render = render_device().with_max_target_size(TargetSize::new(2048, 1024));
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    // The allocator still asked for the combined recommended size...
    assert_eq!(render.last_requested_size(), Some(TargetSize::new(2364, 1461)));
    // ...but everything downstream is sized from what was granted.
    let target = frame_loop.target();
    assert_eq!(target.size, TargetSize::new(2048, 1024));
    assert_eq!(target.viewports[0].width, 1024);
    assert_eq!(target.viewports[1].x, 1024);

    frame_loop
        .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
        .unwrap();
    let layer = device.borrow().last_layer().unwrap();
    assert_eq!(layer.texture_size, TargetSize::new(2048, 1024));
}

#[test]
fn target_allocation_failure_is_fatal() {
    let (session, _registry, _device) = open_mock_session();
    let mut render = render_device();
    render.deny_allocations();

    match FrameLoop::new(&session, &mut render, DistortionBackend::Service) {
        Err(Error::RenderingConfigurationFailed(_)) => {}
        other => panic!(
            "expected RenderingConfigurationFailed, got {:?}",
            other.map(|_| ())
        ),
    }
}

#[test]
fn application_distortion_path_draws_and_presents_itself() {
    let (mut session, _registry, device) = open_mock_session();
    let mut render = render_device();
    let scene = Scene::room();

    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Application).unwrap();
    assert_eq!(render.live_meshes(), 2);

    frame_loop
        .run_frame(&mut session, &mut render, &scene, &InputFrame::default())
        .unwrap();

    // Both eye distortion passes drawn, one present, no layer handed to the
    // runtime, but its frame timing bracket was closed.
    assert_eq!(render.distortion_draws(), 2);
    assert_eq!(render.presents(), 1);
    assert_eq!(device.borrow().frames_submitted(), 0);
    assert_eq!(device.borrow().timing_brackets_ended(), 1);

    frame_loop.release(&mut render);
    assert_eq!(render.live_meshes(), 0);
    assert_eq!(render.live_targets(), 0);
}

#[test]
fn window_creation_failure_is_surfaced() {
    match MockRenderDevice::new(TargetSize::new(0, 1080)) {
        Err(Error::WindowCreationFailed) => {}
        other => panic!("expected WindowCreationFailed, got {:?}", other.map(|_| ())),
    }
}
