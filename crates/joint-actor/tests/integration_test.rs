use async_trait::async_trait;
use joint_actor::{ActorError, HandleActor, HostedResource, RemoteHandle, SharedRuntime, Token};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Resource ---

#[derive(Debug)]
struct Gripper {
    width: f64,
    releases: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct GripperCreate {
    width: f64,
    releases: Arc<AtomicUsize>,
}

#[derive(Debug)]
enum GripperQuery {
    Width,
    Fits(f64),
}

#[derive(Debug, PartialEq)]
enum GripperReply {
    Width(f64),
    Fits(bool),
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid gripper width: {0}")]
struct GripperError(f64);

#[async_trait]
impl HostedResource for Gripper {
    type Create = GripperCreate;
    type Query = GripperQuery;
    type Reply = GripperReply;
    type Error = GripperError;

    fn create(params: GripperCreate) -> Result<Self, GripperError> {
        if params.width.is_nan() || params.width <= 0.0 {
            return Err(GripperError(params.width));
        }
        Ok(Self {
            width: params.width,
            releases: params.releases,
        })
    }

    fn query(&self, query: GripperQuery) -> Result<GripperReply, GripperError> {
        Ok(match query {
            GripperQuery::Width => GripperReply::Width(self.width),
            GripperQuery::Fits(object) => GripperReply::Fits(object <= self.width),
        })
    }

    async fn on_release(&self, _token: Token) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

fn params(width: f64, releases: &Arc<AtomicUsize>) -> GripperCreate {
    GripperCreate {
        width,
        releases: releases.clone(),
    }
}

#[tokio::test]
async fn test_acquire_query_release_lifecycle() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(10);
    tokio::spawn(actor.run());

    let token = client.acquire(params(0.08, &releases)).await.unwrap();
    assert_eq!(
        client.query(token, GripperQuery::Width).await.unwrap(),
        GripperReply::Width(0.08)
    );
    assert_eq!(
        client.query(token, GripperQuery::Fits(0.1)).await.unwrap(),
        GripperReply::Fits(false)
    );

    client.release(token).await.unwrap();
    assert_eq!(releases.load(Ordering::SeqCst), 1);

    assert!(matches!(
        client.query(token, GripperQuery::Width).await,
        Err(ActorError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_remote_handle_releases_exactly_once() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(10);
    tokio::spawn(actor.run());

    // Explicit release.
    let handle = RemoteHandle::acquire(&client, params(0.05, &releases)).await.unwrap();
    assert!(handle.token().is_some());
    handle.release().await.unwrap();

    // Scope exit.
    {
        let _handle = RemoteHandle::acquire(&client, params(0.05, &releases)).await.unwrap();
    }

    // Stats is processed after the detached release queued above.
    let stats = client.stats().await.unwrap();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.acquired, 2);
    assert_eq!(stats.released, 2);
    assert_eq!(releases.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_ownership_transfer_between_tasks() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(10);
    tokio::spawn(actor.run());

    let handle = RemoteHandle::acquire(&client, params(0.2, &releases)).await.unwrap();
    let token = handle.token();

    let reply = tokio::spawn(async move { handle.query(GripperQuery::Fits(0.1)).await })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply, GripperReply::Fits(true));

    // The handle was dropped inside the task.
    let stats = client.stats().await.unwrap();
    assert_eq!(stats.live, 0);
    assert!(matches!(
        client.release(token.unwrap()).await,
        Err(ActorError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_creation_allocates_nothing() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(10);
    tokio::spawn(actor.run());

    let error = client.acquire(params(-1.0, &releases)).await.unwrap_err();
    assert_eq!(error.to_string(), "Resource error: Invalid gripper width: -1");
    assert_eq!(client.stats().await.unwrap().live, 0);
}

#[tokio::test]
async fn test_concurrent_clients() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(4);
    tokio::spawn(actor.run());

    let mut tasks = Vec::new();
    for i in 1..=20 {
        let client = client.clone();
        let releases = releases.clone();
        tasks.push(tokio::spawn(async move {
            let handle = RemoteHandle::acquire(&client, params(i as f64, &releases)).await?;
            let reply = handle.query(GripperQuery::Width).await?;
            handle.release().await?;
            Ok::<_, ActorError>(reply)
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let reply = task.await.unwrap().unwrap();
        assert_eq!(reply, GripperReply::Width((i + 1) as f64));
    }

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.released, 20);
    assert_eq!(releases.load(Ordering::SeqCst), 20);
}

#[tokio::test]
async fn test_closed_actor() {
    let releases = Arc::new(AtomicUsize::new(0));
    let (actor, client) = HandleActor::<Gripper>::new(10);
    drop(actor);

    assert!(client.is_closed());
    assert!(matches!(
        client.acquire(params(1.0, &releases)).await,
        Err(ActorError::Closed)
    ));
}

#[test]
fn test_blocking_use_through_shared_runtime() {
    let releases = Arc::new(AtomicUsize::new(0));
    let runtime = SharedRuntime::global().acquire().unwrap();

    let (actor, client) = HandleActor::<Gripper>::new(10);
    runtime.spawn(actor.run());

    let handle = runtime
        .block_on(RemoteHandle::acquire(&client, params(0.3, &releases)))
        .unwrap();
    let reply = runtime.block_on(handle.query(GripperQuery::Width)).unwrap();
    assert_eq!(reply, GripperReply::Width(0.3));

    // Dropped outside the runtime: the detached release still goes through.
    drop(handle);
    let stats = runtime.block_on(client.stats()).unwrap();
    assert_eq!(stats.live, 0);
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}
