// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive camera controls and electrostatic-potential color mapping
//! for a molecule surface viewer.
//!
//! Molesp owns the parts of an ESP viewer that carry real logic: the
//! quaternion orbit/twist camera with inertia, the palette-driven value to
//! color lookup, and the render-on-demand frame driver. Drawing is left to
//! a host-supplied [`render_loop::Renderer`].
//!
//! # Key entry points
//!
//! - [`camera::controls::CameraControls`] - orbit / twist / zoom state machine
//! - [`color_map::ColorMap`] - discretized palette lookup and legend raster
//! - [`render_loop::RenderLoop`] - per-frame tick that redraws only on change
//! - [`esp_view::EspView`] - ESP series selection, range and surface colors
//! - [`options::Options`] - runtime configuration (camera, color map,
//!   display)
//!
//! # Threading
//!
//! Everything here is single-threaded. Input events, UI callbacks and the
//! frame tick must be dispatched from the same thread; hosts that receive
//! events elsewhere should forward them over a channel to the thread that
//! owns the [`render_loop::RenderLoop`].

pub mod camera;
pub mod color;
pub mod color_map;
pub mod error;
pub mod esp_view;
pub mod input;
pub mod molecule;
pub mod options;
pub mod render_loop;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::controls::{CameraControls, ControlState};
pub use color::Color;
pub use color_map::ColorMap;
pub use error::MolEspError;
pub use esp_view::EspView;
pub use input::{InputEvent, MouseButton};
pub use molecule::EspMolecule;
pub use render_loop::{RenderLoop, Renderer};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
