//! Conversation state machine for studio-bot.
//!
//! This crate provides:
//!
//! - **Session Store**: per-user dialog state, injected into the router
//! - **Intent Classifier**: resolves a text against the user's current step
//! - **Dialog Router**: applies transitions and the terminal record effects
//! - **Reply Composer**: renders a router outcome as text plus keyboard
//! - **Schedule**: the fixed set of classes on offer

pub mod error;
pub mod intent;
pub mod message;
pub mod reply;
pub mod router;
pub mod schedule;
pub mod session;

pub use error::DialogError;
pub use intent::{FixedOption, Intent, MenuCommand, classify};
pub use message::{InboundMessage, SlashCommand};
pub use reply::{Keyboard, Reply, compose};
pub use router::{DialogRouter, Outcome};
pub use schedule::{Schedule, ScheduleClass};
pub use session::{BookingStep, Dialog, FeedbackStep, InMemorySessionStore, Session, SessionStore};
