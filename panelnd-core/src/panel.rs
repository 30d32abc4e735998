//! The [NdPanel] trait implemented by every declared container type.
//!
//! Implementations are generated by `#[derive(NdPanel)]`; a declared type is a
//! one-field wrapper around [NdFrame] plus the [NdConfig] record it was declared with.

use crate::config::NdConfig;
use crate::dtypes::Unit;
use crate::error::Error;
use crate::frame::{InitArgs, NdFrame};
use std::sync::Arc;

pub trait NdPanel<E: Unit>: Sized + std::ops::Deref<Target = NdFrame<E>> {
    /// The configuration record of this type. Built on first use and shared by every
    /// element type afterwards.
    fn config() -> &'static Arc<NdConfig>;

    /// Wraps a frame, checking that it was built with [Self::config].
    fn from_frame(frame: NdFrame<E>) -> Result<Self, Error>;

    fn frame(&self) -> &NdFrame<E>;

    fn into_frame(self) -> NdFrame<E>;

    /// Runs the constructor declared for this type, or [NdFrame::init_data] when none
    /// was declared.
    fn init(args: InitArgs<E>) -> Result<Self, Error>;
}

/// Error returned by [NdPanel::from_frame] when `frame` is of another kind.
pub fn check_kind<E: Unit>(config: &Arc<NdConfig>, frame: &NdFrame<E>) -> Result<(), Error> {
    if Arc::ptr_eq(config, frame.config()) || config == frame.config() {
        Ok(())
    } else {
        Err(Error::ConfigMismatch {
            left: config.klass_name().to_owned(),
            right: frame.klass_name().to_owned(),
        })
    }
}
