#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/countdown-widget/")]

//! # countdown-widget
//!
//! Self-contained, styleable countdown timer widgets for embedding in
//! slide decks, documents and interactive apps.
//!
//! ## Overview
//!
//! The crate has exactly one job: take a duration and a set of
//! presentation/behavior options, validate and normalize them, and emit a
//! widget — an HTML fragment annotated with data attributes, plus an asset
//! bundle (a stylesheet templated with the widget's colors and a fixed
//! client script) that brings it to life in the browser. The ticking,
//! state-class switching and sound playback all happen in the shipped
//! script; this crate only parameterizes them.
//!
//! ## Quick Start
//!
//! ```rust
//! use countdown_widget::prelude::*;
//!
//! let timer = new(5, 0, &[
//!     with_warn_when(30),
//!     with_play_sound(true),
//! ])?;
//!
//! let html = timer.view();            // the embeddable fragment
//! let bundle = timer.write_assets()?; // stylesheet + script on disk
//! assert!(bundle.stylesheet.ends_with("countdown.css"));
//! # Ok::<(), countdown_widget::CountdownError>(())
//! ```
//!
//! ## Options
//!
//! Options follow a builder pattern of free `with_*` functions collected
//! into a slice; unsupplied options are omitted from the emitted inline
//! style entirely, because their defaults live in the shipped stylesheet:
//!
//! ```rust
//! use countdown_widget::prelude::*;
//!
//! let timer = new(10, 0, &[
//!     with_id("exercise-timer"),
//!     with_top("1em"),
//!     with_left("1em"),
//!     with_state_background(TimerState::Warning, "#ffa500"),
//! ])?;
//! assert_eq!(timer.id(), "exercise-timer");
//! # Ok::<(), countdown_widget::CountdownError>(())
//! ```
//!
//! ## Validation
//!
//! Exactly two things are validated, both synchronously and with
//! descriptive errors: the normalized duration must stay under 100
//! minutes, and a caller-supplied identifier must start with a letter and
//! contain only letters, digits, `_`, `:`, `.` or `-`. Everything else —
//! color strings, class names, CSS lengths — is passed through
//! permissively, matching the markup domain.
//!
//! ## Randomness isolation
//!
//! Generated identifiers are drawn from a freshly seeded, throwaway
//! generator. A host application's own random sequences (for example a
//! reproducible simulation) are never disturbed by widget creation.

pub mod assets;
pub mod color;
pub mod countdown;
pub mod error;
pub mod ident;
pub mod style;

pub use assets::{AssetBundle, CLIENT_SCRIPT};
pub use countdown::{new, new_fullscreen, CountdownOption, Model as Countdown, Sound};
pub use error::CountdownError;
pub use style::{Palette, StateColors, StyleAttr, TimerState};

/// Prelude module for convenient imports.
///
/// Re-exports the builder entry points, every `with_*` option constructor
/// and the types they mention, so most embedders need a single `use`:
///
/// ```rust
/// use countdown_widget::prelude::*;
///
/// let timer = new_fullscreen(0, 42, &[])?;
/// assert!(timer.classes().contains(&"countdown-fullscreen".to_string()));
/// # Ok::<(), countdown_widget::CountdownError>(())
/// ```
pub mod prelude {
    pub use crate::assets::AssetBundle;
    pub use crate::countdown::{
        new, new_fullscreen, with_background, with_blink_colon, with_border_color,
        with_border_radius, with_border_width, with_bottom, with_box_shadow, with_class,
        with_classes, with_font_size, with_id, with_inline_style, with_left, with_line_height,
        with_margin, with_padding, with_play_sound, with_right, with_sound_source,
        with_start_immediately, with_state_background, with_state_border, with_state_text,
        with_text_color, with_top, with_update_every, with_warn_when, CountdownOption,
        Model as Countdown, Sound,
    };
    pub use crate::error::CountdownError;
    pub use crate::style::{Palette, StateColors, TimerState};
}
