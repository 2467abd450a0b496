//! Opaque capture and display handles
//!
//! The capture/display layer hands the session opaque references to its
//! preview surface and display context. The session stores them and passes
//! them into video tracks unmodified; ownership stays with the caller and
//! nothing here is ever interpreted or released by rtcast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Which capture device a video track records from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraFacing {
    /// Front-facing camera
    Front,
    /// Back-facing camera
    #[default]
    Back,
}

/// Opaque handle to the rendering target used for live preview.
#[derive(Clone)]
pub struct PreviewSurface {
    raw: Arc<dyn Any + Send + Sync>,
}

impl PreviewSurface {
    /// Wrap an externally-owned surface handle.
    pub fn from_raw<T: Any + Send + Sync>(raw: T) -> Self {
        Self { raw: Arc::new(raw) }
    }

    /// Borrow the handle back as its concrete type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.raw.downcast_ref()
    }
}

impl fmt::Debug for PreviewSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSurface").finish_non_exhaustive()
    }
}

/// Opaque handle to the process/display context owning the capture session.
#[derive(Clone)]
pub struct DisplayContext {
    raw: Arc<dyn Any + Send + Sync>,
}

impl DisplayContext {
    /// Wrap an externally-owned context handle.
    pub fn from_raw<T: Any + Send + Sync>(raw: T) -> Self {
        Self { raw: Arc::new(raw) }
    }

    /// Borrow the handle back as its concrete type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.raw.downcast_ref()
    }
}

impl fmt::Debug for DisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_round_trips_through_downcast() {
        let surface = PreviewSurface::from_raw(42u64);
        assert_eq!(surface.downcast_ref::<u64>(), Some(&42));
        assert!(surface.downcast_ref::<String>().is_none());
    }

    #[test]
    fn clones_share_the_handle() {
        let surface = PreviewSurface::from_raw("window-7".to_string());
        let clone = surface.clone();
        assert_eq!(clone.downcast_ref::<String>().unwrap(), "window-7");
    }
}
