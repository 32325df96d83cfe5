//! Type-safe wrappers around [`HandleClient`](joint_actor::HandleClient).

pub mod actor_client;
pub mod joint_client;

pub use actor_client::*;
pub use joint_client::*;
