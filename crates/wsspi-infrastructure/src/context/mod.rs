//! Loading contexts

pub mod classpath;
pub mod current;

pub use classpath::ClasspathContext;
pub use current::{ThreadContextSupplier, current_context, set_current_context};
