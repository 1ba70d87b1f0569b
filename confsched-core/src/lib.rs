//! Core types for confsched, a conference schedule editor.
//!
//! - `Event` and friends: the one record the schedule is made of
//! - `store`: the event table, remote or in-memory
//! - `candidate` / `reconcile`: turning a calendar drag into a store update
//! - `page`: the load sequence behind every schedule page
//! - `form`: adding events by conference day

pub mod candidate;
pub mod colour;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod page;
pub mod reconcile;
pub mod store;
pub mod view;

pub use candidate::UpdateCandidate;
pub use colour::{Colour, TextColour};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventId, NewEvent};
pub use reconcile::Notice;
