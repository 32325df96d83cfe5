use joint_bridge::clients::ActorClient;
use joint_bridge::config::BridgeConfig;
use joint_bridge::hosted_joint::{JointCreate, JointError, JointIndices, JointQuery, JointReply};
use joint_bridge::lifecycle::JointSystem;
use joint_ffi::{JointOwner, Mat4d};
use robot_joint::{Isometry3, JointConfig, Limits, Matrix4, Quaternion, Translation3, Unit, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

fn assert_close(actual: &Matrix4<f64>, expected: &Matrix4<f64>) {
    assert!(
        (actual - expected).norm() < 1e-10,
        "expected {expected}, got {actual}"
    );
}

/// Full lifecycle against the real actor.
#[tokio::test]
async fn test_full_joint_system_integration() {
    let system = JointSystem::new(&BridgeConfig::default());
    let client = &system.joint_client;

    let token = client
        .create_joint("base_joint")
        .await
        .expect("Failed to create joint");

    assert_eq!(client.name(token).await.unwrap(), "base_joint");
    assert_eq!(
        client.indices(token).await.unwrap(),
        JointIndices {
            index: 0,
            parent_link_index: 0,
            child_link_index: 1,
            dof_index: 0,
        }
    );
    assert_eq!(client.axis(token).await.unwrap(), Vector3::z());

    let (min, max) = client.limits(token).await.unwrap();
    assert!((min + PI).abs() < 1e-10 && (max - PI).abs() < 1e-10);
    assert!(client.is_within_limits(token, PI).await.unwrap());
    assert!(client.is_within_limits(token, -PI).await.unwrap());
    assert!(!client.is_within_limits(token, PI + 0.1).await.unwrap());

    assert_eq!(
        client.calculate_transform(token, &[]).await.unwrap(),
        Matrix4::identity()
    );
    assert_close(
        &client.calculate_transform(token, &[0.0]).await.unwrap(),
        &Matrix4::identity(),
    );
    assert_close(
        &client.calculate_transform(token, &[2.0 * PI]).await.unwrap(),
        &Matrix4::identity(),
    );
    assert_eq!(
        client.calculate_transform(token, &[0.4, 9.0, -3.0]).await.unwrap(),
        client.calculate_transform(token, &[0.4]).await.unwrap()
    );

    client.release(token).await.unwrap();
    assert!(matches!(
        client.name(token).await,
        Err(JointError::NotFound(_))
    ));

    system.shutdown().await.expect("Shutdown failed");
}

/// The three integration styles must agree on every transform.
#[tokio::test]
async fn test_styles_agree() {
    let config = JointConfig {
        parent_link_to_joint_origin: Isometry3::translation(0.1, 0.2, 0.3),
        axis: Vector3::new(1.0, 1.0, 0.0),
        limits: Limits { min: -2.0, max: 2.0 },
        ..JointConfig::named("diagonal")
    };

    let owner = JointOwner::from_config(&config).unwrap();
    let bridged = joint_ffi::try_new_joint(config.clone()).unwrap();
    let system = JointSystem::new(&BridgeConfig::default());
    let token = system
        .joint_client
        .create_configured(config)
        .await
        .unwrap();

    for angle in [0.0, 0.3, -1.2, FRAC_PI_2, PI] {
        let through_abi = owner.calculate_transform(&[angle]);
        let through_bridge = Matrix4::from_column_slice(&bridged.calculate_transform(&[angle]).unwrap());
        let through_actor = system
            .joint_client
            .calculate_transform(token, &[angle])
            .await
            .unwrap();

        // The ABI path re-decodes the origin from its matrix form.
        assert_close(&through_abi, &through_actor);
        assert_eq!(through_bridge, through_actor);
    }

    assert_eq!(owner.limits(), (-2.0, 2.0));
    assert_eq!(system.joint_client.limits(token).await.unwrap(), (-2.0, 2.0));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected_everywhere() {
    let config = JointConfig {
        limits: Limits { min: 1.0, max: -1.0 },
        ..JointConfig::named("inverted")
    };

    assert!(JointOwner::from_config(&config).is_err());
    assert!(joint_ffi::try_new_joint(config.clone()).is_err());

    let system = JointSystem::new(&BridgeConfig::default());
    let error = system
        .joint_client
        .create_configured(config)
        .await
        .unwrap_err();
    assert!(matches!(error, JointError::Rejected(ref message) if message.contains("Invalid joint configuration")));

    let stretched = Quaternion::new(1.0, 0.0, 1.0, 1.0);
    let scaling_origin = JointConfig {
        parent_link_to_joint_origin: Isometry3::from_parts(Translation3::identity(), Unit::new_unchecked(stretched)),
        ..JointConfig::named("stretched")
    };
    assert!(matches!(
        system.joint_client.create_configured(scaling_origin).await,
        Err(JointError::Rejected(_))
    ));
    assert_eq!(system.joint_client.stats().await.unwrap().live, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_strict_transform_errors_carry_message() {
    let system = JointSystem::new(&BridgeConfig::default());
    let token = system.joint_client.create_joint("strict").await.unwrap();

    let error = system
        .joint_client
        .calculate_transform_strict(token, &[0.1, 0.2])
        .await
        .unwrap_err();
    assert_eq!(
        error,
        JointError::Rejected("Expected 1 variables, got 2".to_string())
    );

    let ok = system
        .joint_client
        .calculate_transform_strict(token, &[0.1])
        .await
        .unwrap();
    assert_eq!(
        ok,
        system.joint_client.calculate_transform(token, &[0.1]).await.unwrap()
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_owned_handles_release_on_drop() {
    let system = JointSystem::new(&BridgeConfig { actor_buffer: 2, ..BridgeConfig::default() });

    let mut handles = Vec::new();
    for i in 0..6 {
        let handle = system
            .joint_client
            .create_owned(JointCreate::Named(format!("joint_{i}")))
            .await
            .unwrap();
        handles.push(handle);
    }
    assert_eq!(system.joint_client.stats().await.unwrap().live, 6);

    let reply = handles[3].query(JointQuery::Name).await.unwrap();
    assert_eq!(reply, JointReply::Name("joint_3".to_string()));

    let origin = handles[0]
        .query(JointQuery::ParentLinkToJointOrigin)
        .await
        .unwrap();
    assert_eq!(origin, JointReply::Transform(Mat4d::IDENTITY));

    drop(handles);

    // Detached releases may have been handed to spawned tasks when the
    // channel was full; give them a chance to land.
    let mut live = usize::MAX;
    for _ in 0..50 {
        live = system.joint_client.stats().await.unwrap().live;
        if live == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(live, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_with_outstanding_joints() {
    let system = JointSystem::new(&BridgeConfig::default());
    system.joint_client.create_joint("leaked").await.unwrap();
    system.shutdown().await.expect("Shutdown should release leftovers");
}
