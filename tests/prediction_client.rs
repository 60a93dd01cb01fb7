mod common;

use common::{catalog, prediction_body, StubService};
use epidemic_dashboard_lib::inference::client::FRACTION_UNIT;
use epidemic_dashboard_lib::{LocationSelection, PredictionClient, PredictionError, TransportError, ValidationError};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_short_history_never_reaches_network() {
    for weeks in 1..12 {
        let stub = StubService::answering(prediction_body(2.5, 1.3));
        let client = PredictionClient::new(stub.clone());
        let catalog = catalog(&[("Flu", "ParisRegion", weeks)]);

        let err = client.request_prediction(&catalog, "Flu").await.unwrap_err();
        match err {
            PredictionError::Validation(ValidationError::InsufficientHistory { required, available, .. }) => {
                assert_eq!(required, 12);
                assert_eq!(available, weeks);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(stub.predict_calls(), 0);
    }
}

#[tokio::test]
async fn test_sends_history_unmodified_exactly_once() {
    let stub = StubService::answering(prediction_body(2.5, 1.3));
    let client = PredictionClient::new(stub.clone());
    let catalog = catalog(&[("Flu", "ParisRegion", 14), ("Flu", "Lyon", 20)]);

    let result = client.request_prediction(&catalog, "Flu").await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].location, "ParisRegion");
    assert_eq!(requests[0].history.as_slice(), catalog.history("Flu", "ParisRegion").unwrap());

    assert_eq!(result.mortality_fraction(), 0.025);
    assert_eq!(result.predictions.mortality_rate.unit, FRACTION_UNIT);
}

#[tokio::test]
async fn test_named_location_selection() {
    let stub = StubService::answering(prediction_body(2.5, 1.3));
    let client = PredictionClient::new(stub.clone()).with_selection(LocationSelection::Named("Lyon".into()));
    let catalog = catalog(&[("Flu", "ParisRegion", 12), ("Flu", "Lyon", 13)]);

    let result = client.request_prediction(&catalog, "Flu").await.unwrap();
    assert_eq!(result.location, "Lyon");
    assert_eq!(stub.requests()[0].history.len(), 13);
}

#[tokio::test]
async fn test_unknown_disease_or_location_is_local() {
    let stub = StubService::answering(prediction_body(2.5, 1.3));
    let catalog = catalog(&[("Flu", "ParisRegion", 12)]);

    let client = PredictionClient::new(stub.clone());
    let err = client.request_prediction(&catalog, "Ebola").await.unwrap_err();
    assert!(matches!(err, PredictionError::Validation(ValidationError::UnknownDisease(_))));

    let client = PredictionClient::new(stub.clone()).with_selection(LocationSelection::Named("Oslo".into()));
    let err = client.request_prediction(&catalog, "Flu").await.unwrap_err();
    assert!(matches!(err, PredictionError::Validation(ValidationError::UnknownLocation { .. })));

    assert_eq!(stub.predict_calls(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_surfaced() {
    let stub = StubService::unavailable();
    let client = PredictionClient::new(stub.clone());
    let catalog = catalog(&[("Flu", "ParisRegion", 12)]);

    let err = client.request_prediction(&catalog, "Flu").await.unwrap_err();
    assert!(matches!(err, PredictionError::Transport(TransportError::Status { .. })));
    assert!(err.user_message().contains("503"));
    assert_eq!(stub.predict_calls(), 1);
}

#[tokio::test]
async fn test_out_of_range_payload_is_malformed() {
    let stub = StubService::answering(prediction_body(-3.0, 1.3));
    let client = PredictionClient::new(stub);
    let catalog = catalog(&[("Flu", "ParisRegion", 12)]);

    let err = client.request_prediction(&catalog, "Flu").await.unwrap_err();
    assert!(matches!(err, PredictionError::Transport(TransportError::Malformed(_))));
}

#[tokio::test]
async fn test_batch_checks_every_entry_first() {
    let stub = StubService::answering(prediction_body(2.5, 1.3));
    let client = PredictionClient::new(stub.clone());
    let catalog = catalog(&[("Flu", "ParisRegion", 12), ("Mpox", "Lagos", 12)]);

    let mut requests = vec![
        client.build_request(&catalog, "Flu").unwrap(),
        client.build_request(&catalog, "Mpox").unwrap(),
    ];
    let response = client.predict_batch(&requests).await.unwrap();
    assert_eq!(response["results"], 2);

    requests[1].history.truncate(3);
    let err = client.predict_batch(&requests).await.unwrap_err();
    assert!(matches!(err, PredictionError::Validation(_)));
    assert_eq!(stub.batch_calls(), 1);
}

#[tokio::test]
async fn test_health_probe_is_single_call() {
    let stub = StubService::answering(prediction_body(2.5, 1.3));
    let client = PredictionClient::new(stub.clone());

    assert!(client.check_health().await.is_ok());
    assert_eq!(stub.health_calls(), 1);

    let down = StubService::unavailable();
    assert!(PredictionClient::new(down.clone()).check_health().await.is_err());
    assert_eq!(down.health_calls(), 1);
}
