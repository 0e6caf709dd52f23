pub mod form;
pub mod popup;

pub use form::Form;
pub use popup::Popup;
