//! Shared type definitions for tutorbot.
//!
//! This crate is the single source of truth for the data that flows between
//! the chat front end, the state store, student handlers, and the grader.
//!
//! # Modules
//!
//! - [`ids`] -- String newtypes for user and channel identifiers
//! - [`state`] -- Per-user state and the handler result shape
//! - [`message`] -- Inbound chat messages handed to the front end
//! - [`fixture`] -- Level fixtures used for offline grading

pub mod fixture;
pub mod ids;
pub mod message;
pub mod state;

pub use fixture::{LevelFixture, TestCase};
pub use ids::{ChannelId, UserId};
pub use message::InboundMessage;
pub use state::{HandlerResult, UserState};
