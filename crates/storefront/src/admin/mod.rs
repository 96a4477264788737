//! Admin inventory editor.
//!
//! Create, edit, remove and restock catalog records against the remote
//! service. Every successful mutation is followed by a full catalog reload;
//! statistics and search are always recomputed from the latest snapshot.

mod draft;
mod editor;
mod form;

pub use draft::AdminEditDraft;
pub use editor::{AdminEditor, ConfirmedRemoval, RemovalRequest};
pub use form::{ItemForm, parse_price, parse_quantity};
