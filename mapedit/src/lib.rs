//! Interactive map editing engine.
//!
//! This crate contains the state and interaction logic of a map editor: a tiled basemap
//! with vector layers on top, tools to draw, select, edit and delete features, attribute
//! editing, and a client of the map server's REST api. It does not render anything itself;
//! the embedding application draws the map state and feeds user input back in.
//!
//! The usual entry point is [`MapEditor`], which wires a [`Map`], the interaction pipeline
//! from the [`control`] module and an [`api::ApiClient`] together.

pub mod api;
mod color;
pub mod control;
mod editor;
pub mod error;
pub mod layer;
mod map;
mod messenger;
pub mod notification;
mod view;

pub use color::Color;
pub use editor::MapEditor;
pub use map::{LayerId, LayerRegistry, Map};
pub use messenger::{DummyMessenger, Messenger};
pub use view::MapView;

pub use mapedit_types;
