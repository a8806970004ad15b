//! # Presentation
//!
//! Display-side stages of the circuit map:
//! - [`ColorResolver`]: driver -> stable display color, with teammate contrast
//! - [`HoverDataBuilder`]: one tooltip record per grid index

mod color;
mod hover;

pub use color::ColorResolver;
pub use hover::{winner_label, HoverDataBuilder};

pub use contracts::{ColorPair, DriverColorProfile, HoverRecord, Rgb};
