//! Tourguide: step-by-step guided tours over a live page
//!
//! A tour walks the user through an ordered list of steps. Each step points
//! at an element by selector, carries content to show next to it, and may
//! run hooks as the user moves through the tour.
//!
//! # Core Concepts
//!
//! - **Steps**: [`StepDescriptor`]s held in an ordered [`StepRegistry`]
//! - **Page**: selector lookup, scrolling and measurement via [`page::Page`]
//! - **Lifecycle**: `preAction`, `action`, `postAction` and `rewindAction`
//!   hooks fired in a fixed order on every transition
//! - **Controller**: [`Tour`] serializes navigation and keeps at most one
//!   mutation watch alive
//! - **History**: immutable record of step transitions, resumable via
//!   [`TourSnapshot`]
//!
//! # Example
//!
//! ```rust
//! use tourguide::builder::TourBuilder;
//! use tourguide::core::Position;
//! use tourguide::page::memory::MemoryPage;
//! use tourguide::page::Rect;
//! use tourguide::tour_steps;
//!
//! let page = MemoryPage::new();
//! page.insert("[data-tut=\"iso\"]", Rect::new(0.0, 0.0, 200.0, 40.0));
//! page.insert("[data-tut=\"logo\"]", Rect::new(0.0, 60.0, 64.0, 64.0));
//!
//! let mut tour = TourBuilder::<String, MemoryPage>::new()
//!     .page(page)
//!     .steps(tour_steps![
//!         "[data-tut=\"iso\"]" => "The name of the tour".to_string(),
//!         "[data-tut=\"logo\"]" => "Our cool bus".to_string(); Position::Right,
//!     ])
//!     .build()
//!     .unwrap();
//!
//! tour.open().unwrap();
//! tour.next().unwrap();
//! assert_eq!(tour.current_index(), Some(1));
//!
//! tour.prev().unwrap();
//! assert_eq!(tour.history().get_path(), vec![0, 1, 0]);
//! tour.close().unwrap();
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod core;
pub mod lifecycle;
pub mod page;

// Re-export commonly used types
pub use builder::{BuildError, StepBuilder, TourBuilder};
pub use checkpoint::{SnapshotError, TourSnapshot};
pub use config::{JumpPolicy, TourConfig};
pub use controller::{Frame, NavContext, NavHandle, Placement, Renderer, Tour, TourError, TourEvent};
pub use self::core::{Content, Direction, Position, StepDescriptor, StepRegistry, TourHistory, TourState};
pub use lifecycle::{HookError, HookResult, StepHooks};
