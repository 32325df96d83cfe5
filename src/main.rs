//! # Joint Bridge Demo
//!
//! Walks one joint through each integration style:
//!
//! 1. the C ABI through a [`JointOwner`], the way a C++ `unique_ptr` would;
//! 2. the safe bridge, including a translated error;
//! 3. the actor, with an explicit release and a scope-exit release.

use joint_bridge::clients::ActorClient;
use joint_bridge::config::BridgeConfig;
use joint_bridge::hosted_joint::{JointCreate, JointQuery};
use joint_bridge::lifecycle::{setup_tracing, JointSystem};
use joint_ffi::{live_handles, new_joint, JointOwner};
use robot_joint::{Isometry3, JointConfig, Vector3};
use std::f64::consts::FRAC_PI_2;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = BridgeConfig::from_env();
    setup_tracing(&config);

    info!("Starting joint bridge demo");

    // 1. C ABI + ownership wrapper
    tracing::info_span!("c_abi").in_scope(|| {
        let mut owner = JointOwner::new("shoulder_pan");
        let transform = owner.calculate_transform(&[FRAC_PI_2]);
        info!(name = %owner.name(), live = live_handles(), "Joint allocated through the C ABI");
        info!(column_0 = ?transform.column(0), "Quarter turn");

        let moved = owner.take();
        info!(source_empty = owner.is_empty(), "Ownership moved");
        drop(moved);
        info!(live = live_handles(), "Moved-to owner dropped, joint freed");
    });

    // 2. Safe bridge
    tracing::info_span!("safe_bridge").in_scope(|| {
        let joint = new_joint("elbow");
        info!(joint = %joint, limits = ?joint.get_limits(), "Bridged joint");
        match joint.checked_transform(&[0.1, 0.2]) {
            Ok(_) => warn!("Strict transform accepted two variables"),
            Err(e) => info!(error = %e, "Translated error"),
        }
    });

    // 3. Message passing
    let system = JointSystem::new(&config);
    let client = system.joint_client.clone();

    let span = tracing::info_span!("actor");
    async {
        let wrist = JointConfig {
            parent_link_to_joint_origin: Isometry3::translation(0.0, 0.0, 0.3),
            axis: Vector3::y(),
            index: 2,
            dof_index: 2,
            ..JointConfig::named("wrist_pitch")
        };
        let token = client
            .create_configured(wrist)
            .await
            .map_err(|e| e.to_string())?;
        let description = client.describe(token).await.map_err(|e| e.to_string())?;
        info!(%token, %description, "Hosted joint created");

        let within = client
            .is_within_limits(token, 4.0)
            .await
            .map_err(|e| e.to_string())?;
        info!(%token, within, "Limit check");
        client.release(token).await.map_err(|e| e.to_string())?;

        {
            let owned = client
                .create_owned(JointCreate::Named("gripper".to_string()))
                .await
                .map_err(|e| e.to_string())?;
            let reply = owned
                .query(JointQuery::Limits)
                .await
                .map_err(|e| e.to_string())?;
            info!(?reply, "Owned joint queried, releasing on scope exit");
        }

        let stats = client.stats().await.map_err(|e| e.to_string())?;
        info!(live = stats.live, released = stats.released, "Actor stats");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    drop(client);
    system.shutdown().await?;

    info!("Demo complete");
    Ok(())
}

