//! # Joint Bridge
//!
//! > **Sharing one Rust-owned robot joint with a foreign runtime, three ways.**
//!
//! A caller on "Side A" (C, C++, or synchronous Rust) holds a joint whose
//! memory is owned on "Side B" (Rust). Side A only ever sees an opaque token;
//! Side B allocates the joint, answers calls against the token, and frees it
//! exactly once.
//!
//! ## Integration Styles
//!
//! | Style | Where | Token | Failure reporting |
//! |-------|-------|-------|-------------------|
//! | Manual C ABI | [`joint_ffi::ffi`] | `*mut RobotJointHandle` | safe defaults, [`BoundaryStatus`](joint_ffi::BoundaryStatus) codes |
//! | Safe bridge | [`joint_ffi::bridge`] | `Box<BridgedJoint>` | `Result<_, BridgeError>` carrying the message |
//! | Message passing | [`clients`], [`lifecycle`] | [`Token`](joint_actor::Token) | [`JointError`](hosted_joint::JointError) |
//!
//! All three share the same resource core, [`robot_joint::Joint`], and all
//! three guarantee that a panic inside the joint never unwinds into the
//! caller.
//!
//! ## Module Tour
//!
//! ### 1. The Resource ([`hosted_joint`])
//! The joint as a [`HostedResource`](joint_actor::HostedResource): which
//! queries it answers and how its errors map to [`JointError`](hosted_joint::JointError).
//!
//! ### 2. The Interface ([`clients`], [`blocking`])
//! [`JointClient`](clients::JointClient) hides the message passing behind
//! typed async methods. [`BlockingJointClient`](blocking::BlockingJointClient)
//! does the same for synchronous callers on a shared runtime.
//!
//! ### 3. The Orchestrator ([`lifecycle`], [`config`])
//! [`JointSystem`](lifecycle::JointSystem) starts and stops the actor;
//! [`setup_tracing`](lifecycle::setup_tracing) and
//! [`BridgeConfig`](config::BridgeConfig) cover logging and runtime knobs.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod blocking;
pub mod clients;
pub mod config;
pub mod hosted_joint;
pub mod lifecycle;
