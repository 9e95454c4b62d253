//! Card catalog: cards, albums, and album providers.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card within an album
//! - `Card`: Immutable card definition (id + display name)
//! - `Album`: Validated, immutable set of cards that counts as "complete"
//! - `AlbumProvider`: Read interface the tracker loads its album from
//!
//! The catalog is loaded once before tracking starts and never mutated.

pub mod album;
pub mod catalog;
pub mod definition;

pub use album::{Album, AlbumDefinition, AlbumId};
pub use catalog::{AlbumProvider, CatalogFormat, FileAlbumProvider, StaticAlbumProvider};
pub use definition::{Card, CardId};
