//! # Bricks Registry
//!
//! Block types the page editor knows about.
//!
//! Every block type is one [`BlockDefinition`] implementation providing its
//! palette metadata and inspector schema. Definitions are frozen into a
//! [`TypeRegistry`] at start-up; the editor consults it only to check that a
//! type exists before inserting it. Renderers live with the UI and are looked
//! up through a [`RenderTable`].

mod builtin;
mod definition;
mod entry;
mod error;
mod registry;
mod render;

pub use builtin::{
    builtin_blocks, Button, Columns, Container, Divider, Embed, Image, Spacer, Text, Title, Video,
};
pub use definition::BlockDefinition;
pub use entry::{Category, EditorKind, PropSchema, RegistryEntry, SelectOption};
pub use error::RegistryError;
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use render::{RenderTable, Renderer};
