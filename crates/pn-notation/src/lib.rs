//! Plate Notation (PN)
//!
//! A compact text encoding for sparse assay plate layouts, small enough to
//! live in a URL fragment and decodable without a server round-trip.
//!
//! # Core Concepts
//!
//! - [`PlateType`]: supported plate formats (6 to 384 wells)
//! - [`WellId`]: well address with the notation's canonical ordering
//! - [`WellRecord`]: optional contents of one well
//! - [`PlateGrid`]: plate type plus occupied wells
//! - [`encode`] / [`decode`]: the codec itself
//! - [`create_share_url`] / [`parse_share_url`]: URL fragment embedding
//! - [`notation_stats`]: size hints for QR rendering
//!
//! # Example
//!
//! ```rust
//! use pn_notation::{decode, PlateGrid, PlateType, WellRecord};
//!
//! let grid = PlateGrid::new(PlateType::Wells96).with_well(
//!     "A1",
//!     WellRecord::new()
//!         .with_compound("CompoundA")
//!         .with_concentration("10", "uM")
//!         .with_replicate(1),
//! );
//!
//! let notation = grid.to_notation();
//! assert_eq!(notation, "PN:v1/96/A1:-CompoundA-10-uM-1");
//!
//! let decoded = decode(&notation).unwrap();
//! assert_eq!(decoded.into_grid(), grid);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod codec;
pub mod error;
pub mod escape;
pub mod grid;
pub mod plate;
pub mod share;
pub mod stats;
pub mod well;

// Re-exports for convenience
pub use codec::{decode, encode, try_decode, CURRENT_VERSION, PREFIX};
pub use error::{NotationError, NotationResult, PlateTypeError};
pub use escape::{escape_field, unescape_field};
pub use grid::{DecodedNotation, PlateGrid};
pub use plate::{wells_in_range, PlateType, WellId};
pub use share::{
    create_share_url, encode_component, notation_from_fragment, parse_share_url,
    share_url_for_notation, FRAGMENT_KEY,
};
pub use stats::{notation_stats, NotationStats};
pub use well::WellRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with plate notation
    pub use crate::{
        create_share_url, decode, encode, parse_share_url, DecodedNotation, PlateGrid, PlateType,
        WellId, WellRecord,
    };
}
