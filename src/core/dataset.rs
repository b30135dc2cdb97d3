use std::cell::Cell;

use crate::core::DataExtent;

/// Dataset-side contract: the data extent, once known.
///
/// Implementations return `None` until data has loaded; the controller treats
/// that as "scales unavailable" rather than an error.
pub trait ExtentSource {
    fn extent(&self) -> Option<DataExtent>;
}

impl ExtentSource for DataExtent {
    fn extent(&self) -> Option<DataExtent> {
        Some(*self)
    }
}

impl ExtentSource for Option<DataExtent> {
    fn extent(&self) -> Option<DataExtent> {
        *self
    }
}

/// Lets hosts publish the extent later through a shared `Rc<Cell<..>>`.
impl ExtentSource for Cell<Option<DataExtent>> {
    fn extent(&self) -> Option<DataExtent> {
        self.get()
    }
}
