//! Core data model for the place explorer workflow

pub mod conversation;
pub mod location;
pub mod place;

pub use conversation::{Conversation, ConversationEntry};
pub use location::{Coordinate, ResolutionMethod, ResolvedLocation};
pub use place::{PlaceResult, SearchQuery, SelectedPlace};
