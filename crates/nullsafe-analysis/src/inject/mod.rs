//! Applying and reverting candidate annotations.

pub mod change;
pub mod command;
pub mod virtual_injector;

use std::collections::BTreeSet;

use nullsafe_core::errors::InjectionError;

use crate::model::Fix;

pub use change::{ChangeAction, ChangeRecord};
pub use command::CommandInjector;
pub use virtual_injector::VirtualInjector;

/// Applies candidates to the sources a checker builds from.
///
/// `remove(fixes)` after `inject(fixes)` must restore the previous state.
pub trait AnnotationInjector {
    fn inject(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError>;
    fn remove(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError>;
}
