// End-to-end lifecycle scenarios through the public API, backed by the in-memory Robot mock.

use robot_client::mock::{server_fixture, subnet_fixture, vswitch_fixture};
use robot_client::{MockCall, MockRobotClient};
use serde_json::json;
use vswitch_provider::{DeleteOutcome, DesiredVSwitch, ErrorKind, VSwitchReconciler, VSwitchResource};

fn setup(first_id: u64) -> (MockRobotClient, VSwitchReconciler) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mock = MockRobotClient::new("http://test-robot");
    mock.set_next_id(first_id);
    let reconciler = VSwitchReconciler::new(mock.clone());
    (mock, reconciler)
}

#[tokio::test]
async fn test_create_new_vswitch() {
    let (_mock, reconciler) = setup(7);

    let vswitch = reconciler
        .create(&DesiredVSwitch::new("prod-switch", 4010))
        .await
        .unwrap();

    assert_eq!(vswitch.id, 7);
    assert_eq!(vswitch.name, "prod-switch");
    assert_eq!(vswitch.vlan, 4010);
    assert!(!vswitch.is_cancelled);
    assert!(vswitch.servers.is_empty());
    assert!(vswitch.subnets.is_empty());
    assert!(vswitch.cloud_networks.is_empty());
}

#[tokio::test]
async fn test_update_reports_server_attached_out_of_band() {
    let (mock, reconciler) = setup(7);
    reconciler
        .create(&DesiredVSwitch::new("prod-switch", 4010))
        .await
        .unwrap();
    mock.attach_server(7, server_fixture("10.0.0.5", 5));

    let updated = reconciler
        .update(7, &DesiredVSwitch::new("prod-switch-renamed", 4010))
        .await
        .unwrap();

    assert_eq!(updated.name, "prod-switch-renamed");
    assert_eq!(updated.servers.len(), 1);
    assert_eq!(updated.servers[0].ip_address, Some("10.0.0.5".parse().unwrap()));
    assert_eq!(updated.servers[0].server_number, 5);
    assert_eq!(updated, reconciler.read(7).await.unwrap());
}

#[tokio::test]
async fn test_delete_twice_succeeds() {
    let (mock, reconciler) = setup(7);
    reconciler
        .create(&DesiredVSwitch::new("prod-switch", 4010))
        .await
        .unwrap();

    assert_eq!(reconciler.delete(7).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(reconciler.delete(7).await.unwrap(), DeleteOutcome::AlreadyAbsent);
    assert_eq!(
        mock.calls().iter().filter(|c| matches!(c, MockCall::Delete { id: 7 })).count(),
        2
    );

    let err = reconciler.read(7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_import_pre_existing_vswitch() {
    let (mock, reconciler) = setup(1);
    mock.add_vswitch(vswitch_fixture(42, "legacy", 4020));
    mock.attach_subnet(42, subnet_fixture("213.239.252.48", 29, "213.239.252.49"));

    let imported = reconciler.import(42).await.unwrap();

    assert_eq!(imported.id, 42);
    assert_eq!(imported.name, "legacy");
    assert_eq!(imported.vlan, 4020);
    assert_eq!(imported.subnets.len(), 1);
    assert_eq!(imported.subnets[0].mask, 29);
    assert_eq!(imported, reconciler.read(42).await.unwrap());
}

#[tokio::test]
async fn test_never_created_id_is_not_found() {
    let (_mock, reconciler) = setup(1);

    let err = reconciler.read(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("read vSwitch 999"), "{}", err);

    let err = reconciler
        .update(999, &DesiredVSwitch::new("ghost", 4010))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = reconciler.import(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_resource_state_maps_end_to_end() {
    let (mock, reconciler) = setup(7);
    let resource = VSwitchResource::new(reconciler);

    let state = resource
        .create(&json!({"name": "prod-switch", "vlan": 4010}))
        .await
        .unwrap();
    mock.edit_out_of_band(7, "renamed-in-ui", 4010);

    let refreshed = resource.read(&state).await.unwrap();
    assert_eq!(refreshed["name"], json!("renamed-in-ui"));

    let converged = resource
        .reconcile(&json!({"name": "prod-switch", "vlan": 4010}), Some(&refreshed))
        .await
        .unwrap();
    assert_eq!(converged["name"], json!("prod-switch"));
    assert_eq!(converged["vswitch_id"], json!(7));
}
