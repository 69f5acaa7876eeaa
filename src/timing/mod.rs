//! Timer-owning helpers: debounced values and auto-dismissing toasts

pub mod debounce;
pub mod toast;

pub use debounce::Debounced;
pub use toast::{Toast, ToastKind, ToastQueue};
