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
// Complexity limits
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

//! Off-screen wgpu viewport embedded in immediate-mode GUI panels.
//!
//! embedview renders one or more application scenes into an off-screen
//! color + depth texture sized to a GUI panel, shows that texture as an
//! image, and turns the GUI's per-frame input into camera manipulation.
//!
//! # Key entry points
//!
//! - [`widget::EmbeddedViewport`] - the per-frame widget and standalone host
//! - [`scene::Scene`] - what applications implement to draw into the view
//! - [`render::TextureRenderTarget`] - the resizable off-screen surface
//! - [`interaction::InteractionController`] - camera styles and key table
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Each GUI frame the widget renders every attached scene, waits for the
//! GPU, and places the texture in a child region. The
//! [`input::EventTranslator`] reads an [`input::InputSnapshot`] of that
//! region and dispatches canonical press/release/move/wheel/key events to an
//! [`interaction::Interactor`], which hands them to the installed camera
//! style. The pivot style rotates, pans and dollies about the surface point
//! under the pointer, found by reading back the depth buffer.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod options;
pub mod render;
pub mod scene;
#[cfg(test)]
mod testing;
pub mod widget;

pub use error::EmbedError;
pub use options::Options;
pub use widget::EmbeddedViewport;
