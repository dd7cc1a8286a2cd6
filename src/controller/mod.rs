// CONTROLLER: turning player intent into world edits
pub mod edit;

pub use edit::{BlockEditor, EditAction};
