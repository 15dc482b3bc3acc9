//! # gilt-forms
//!
//! Form fields for terminal UIs: a masked `DD/MM/YYYY` date input with a
//! calendar popup, and a percentage input.
//!
//! Widgets render into strips of styled cells, take input as [`event::InputEvent`]s
//! (convertible from crossterm events) and report value changes through an
//! `on_change` callback. A headless [`surface::Surface`] hosts them, routes
//! pointer presses and focus, and draws frames; [`testing::Pilot`] drives it
//! in tests.
//!
//! ## Modules
//!
//! - **[`date`]**: masking, parsing, validation and calendar arithmetic
//! - **[`widgets`]**: `DateInput` and `PercentageInput`
//! - **[`widget`]**: the `Widget` trait and lifecycle tracking
//! - **[`event`]**: input events, change notifications, outside-click listeners
//! - **[`surface`]**: mounting, focus, input routing
//! - **[`render`]**: strips and the screen buffer
//! - **[`theme`]**: color names per visual state
//! - **[`geometry`]**: Offset, Size, Region

// Foundation
pub mod geometry;
pub mod theme;

// Domain
pub mod date;

// Widget system
pub mod widget;
pub mod widgets;

// Events and hosting
pub mod event;
pub mod surface;

// Rendering
pub mod render;

// Testing
pub mod testing;
