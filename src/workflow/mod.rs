// Copyright 2025 Cowboy AI, LLC.

//! Workflow definitions walked by an external transition engine
//!
//! This module provides the data side of workflows:
//! - [`WorkflowGraph`] holds state groups, which hold states
//! - [`StateTransition`] records each executed move with its [`Attachment`]s
//! - [`Stateful`] is the contract of entities the engine drives
//!
//! Edges and guards are not modelled here; they belong to the engine.

pub mod attachment;
pub mod graph;
pub mod state;
pub mod transition;

pub use attachment::Attachment;
pub use graph::WorkflowGraph;
pub use state::{State, StateGroup};
pub use transition::{StateTransition, Stateful};
