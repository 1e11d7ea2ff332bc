//! The curve-fit relay against an in-process stand-in for the service.

use algoscope_core::fit::{ChannelTransport, FitEvent, FitEventKind, FitMethod, FitNotice, FitRequest, FunctionType};
use algoscope_engine::EngineConfig;
use tokio::sync::mpsc;

#[tokio::test]
async fn relays_intent_out_and_progress_back_verbatim() {
    let config = EngineConfig::defaults();
    let (near, mut service) = ChannelTransport::pair(8);
    let relay = config.fit_relay(near);

    let (request_tx, request_rx) = mpsc::channel(8);
    let (notice_tx, mut notice_rx) = mpsc::channel(8);
    let pump = tokio::spawn(relay.run(request_rx, notice_tx));

    request_tx
        .send(FitRequest::GenerateDataset { function_type: Some(FunctionType::Sin) })
        .await
        .unwrap();
    let frame = service_recv(&mut service).await;
    assert_eq!(frame, r#"{"action":"generate_dataset","function_type":"sin"}"#);

    let progress = r#"{"progress":40,"coefficients":[1.0,0.5],"mse":0.2,"r_squared":0.9}"#;
    service_send(&mut service, progress).await;
    let Some(FitNotice::Relay(relayed)) = notice_rx.recv().await else {
        panic!("expected relayed frame");
    };
    assert_eq!(relayed, progress);
    assert_eq!(FitEvent::parse(&relayed).unwrap().kind(), FitEventKind::Progress);

    // Over the configured maximum: refused locally, never reaches the service.
    request_tx
        .send(FitRequest::StartFitting { method: FitMethod::Polynomial, degree: 99, delay: 0.1 })
        .await
        .unwrap();
    assert!(matches!(notice_rx.recv().await, Some(FitNotice::ChannelFailed(_))));

    drop(service);
    assert!(matches!(notice_rx.recv().await, Some(FitNotice::ChannelFailed(_))));
    pump.await.unwrap();
}

async fn service_recv(service: &mut ChannelTransport) -> String {
    use algoscope_core::fit::FitTransport;
    service.recv().await.unwrap().unwrap()
}

async fn service_send(service: &mut ChannelTransport, frame: &str) {
    use algoscope_core::fit::FitTransport;
    service.send(frame.to_string()).await.unwrap();
}
