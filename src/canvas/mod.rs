//! Drawing-surface ownership: mount points, raster allocation, and the
//! front/back controllers.

pub mod controller;

// Re-export commonly used types at module level
pub use controller::{BackController, FrontController};

use thiserror::Error;

/// A designated slot in the card markup where a drawing surface goes, reduced
/// to its logical size. The host owns placement; the engine only needs the
/// extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mount {
    /// Logical width in pixels
    pub width: u32,
    /// Logical height in pixels
    pub height: u32,
}

impl Mount {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square mount, the usual shape for both card sides.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

/// Errors raised while attaching a controller to its surface.
///
/// None of these are fatal to the host page: the controller degrades to a
/// logged no-op and the card renders without drawing capability.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no mount point was provided")]
    Missing,

    #[error("mount point has zero area ({width}x{height})")]
    ZeroSized { width: u32, height: u32 },

    #[error("surface allocation failed: {0}")]
    Allocation(String),
}

/// One cairo raster target, exclusively owned by a single controller for the
/// card's lifetime.
///
/// The context is pre-scaled by the hdpi factor so all rendering happens in
/// logical units.
#[derive(Debug)]
pub(crate) struct CanvasSurface {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    logical_width: f64,
    logical_height: f64,
}

impl CanvasSurface {
    /// Allocates a backing raster for `mount` at the given device-pixel scale.
    pub(crate) fn allocate(mount: Option<Mount>, hdpi_factor: f64) -> Result<Self, MountError> {
        let mount = mount.ok_or(MountError::Missing)?;
        if mount.width == 0 || mount.height == 0 {
            return Err(MountError::ZeroSized {
                width: mount.width,
                height: mount.height,
            });
        }

        let px_width = (mount.width as f64 * hdpi_factor).round() as i32;
        let px_height = (mount.height as f64 * hdpi_factor).round() as i32;

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, px_width, px_height)
            .map_err(|err| MountError::Allocation(err.to_string()))?;
        let ctx = cairo::Context::new(&surface)
            .map_err(|err| MountError::Allocation(err.to_string()))?;
        ctx.scale(hdpi_factor, hdpi_factor);

        Ok(Self {
            surface,
            ctx,
            logical_width: mount.width as f64,
            logical_height: mount.height as f64,
        })
    }

    pub(crate) fn ctx(&self) -> &cairo::Context {
        &self.ctx
    }

    pub(crate) fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    /// Writes the surface contents as PNG.
    pub(crate) fn write_png<W: std::io::Write>(&self, out: &mut W) -> Result<(), cairo::IoError> {
        self.surface.write_to_png(out)
    }

    /// Copies the raster out for inspection.
    ///
    /// The live surface is pinned by its context, so the bytes are read from
    /// a flushed duplicate.
    pub(crate) fn pixels(&self) -> Option<Vec<u8>> {
        self.surface.flush();
        let mut copy = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.surface.width(),
            self.surface.height(),
        )
        .ok()?;
        {
            let ctx = cairo::Context::new(&copy).ok()?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0).ok()?;
            let _ = ctx.paint();
        }
        copy.flush();
        copy.data().ok().map(|data| data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_mount_is_an_error() {
        let err = CanvasSurface::allocate(None, 1.0).unwrap_err();
        assert!(matches!(err, MountError::Missing));
    }

    #[test]
    fn zero_area_mount_is_an_error() {
        let err = CanvasSurface::allocate(Some(Mount::new(0, 100)), 1.0).unwrap_err();
        assert!(matches!(
            err,
            MountError::ZeroSized {
                width: 0,
                height: 100
            }
        ));
    }

    #[test]
    fn hdpi_scales_the_backing_raster_only() {
        let surface = CanvasSurface::allocate(Some(Mount::square(100)), 2.0).unwrap();
        assert_eq!(surface.logical_size(), (100.0, 100.0));
        assert_eq!(surface.surface.width(), 200);
        assert_eq!(surface.surface.height(), 200);
    }

    #[test]
    fn pixels_reads_back_the_raster() {
        let surface = CanvasSurface::allocate(Some(Mount::square(8)), 1.0).unwrap();
        let data = surface.pixels().unwrap();
        // ARGB32 is 4 bytes per pixel
        assert_eq!(data.len(), 8 * 8 * 4);
    }
}
