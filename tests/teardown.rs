//! Shutdown must reverse initialization: buffers before the device session,
//! the device session before the global runtime teardown, and the runtime
//! teardown last of all.

use stereovr::api::mock::{
    new_teardown_log, MockHmdService, MockRenderDevice, TeardownEvent,
};
use stereovr::{
    DistortionBackend, FrameLoop, HmdService, InputFrame, Scene, ServiceRegistry, Session,
    TargetSize,
};

#[test]
fn teardown_releases_buffers_then_session_then_services() {
    let log = new_teardown_log();

    let mut service = MockHmdService::with_teardown_log(log.clone());
    service.detect_device().unwrap();
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(service));

    let mut render = MockRenderDevice::new(TargetSize::new(1920, 1080))
        .unwrap()
        .with_teardown_log(log.clone());

    let mut session = Session::open(&mut registry).unwrap();
    let mut frame_loop =
        FrameLoop::new(&session, &mut render, DistortionBackend::Application).unwrap();
    frame_loop
        .run_frame(&mut session, &mut render, &Scene::room(), &InputFrame::default())
        .unwrap();

    // Reverse of initialization order.
    frame_loop.release(&mut render);
    session.close();
    registry.shutdown();

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            TeardownEvent::DistortionMeshDestroyed,
            TeardownEvent::DistortionMeshDestroyed,
            TeardownEvent::RenderTargetDestroyed,
            TeardownEvent::DeviceClosed,
            TeardownEvent::ServiceShutdown,
        ]
    );
}

#[test]
fn service_path_teardown_orders_target_before_session() {
    let log = new_teardown_log();

    let mut service = MockHmdService::with_teardown_log(log.clone());
    service.detect_device().unwrap();
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(service));

    let mut render = MockRenderDevice::new(TargetSize::new(1920, 1080))
        .unwrap()
        .with_teardown_log(log.clone());

    let session = Session::open(&mut registry).unwrap();
    let frame_loop = FrameLoop::new(&session, &mut render, DistortionBackend::Service).unwrap();

    frame_loop.release(&mut render);
    session.close();
    registry.shutdown();

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            TeardownEvent::RenderTargetDestroyed,
            TeardownEvent::DeviceClosed,
            TeardownEvent::ServiceShutdown,
        ]
    );
}
