/// Physical size of a surface's backing store, in device pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

impl BackingSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Backing size for a logical client size at `device_pixel_ratio`.
    ///
    /// Fractional pixels are truncated; negative or non-finite inputs map to 0.
    /// Products within `SNAP` below a whole pixel count as that pixel, so a
    /// physical size converted to logical units and back is preserved.
    pub fn from_client(client: (f64, f64), device_pixel_ratio: f64) -> Self {
        const SNAP: f64 = 1e-6;

        fn px(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 { (v + SNAP).floor() as u32 } else { 0 }
        }
        Self {
            width: px(client.0 * device_pixel_ratio),
            height: px(client.1 * device_pixel_ratio),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Drawing target a [`Renderer`](crate::renderer::Renderer) is bound to.
///
/// The logical client size and pixel ratio come from the host (window, canvas).
/// The backing store is the pixel buffer the context draws into; the renderer
/// keeps it at `client_size * device_pixel_ratio`.
pub trait Surface {
    /// Logical (CSS / window-point) size as `(width, height)`.
    fn client_size(&self) -> (f64, f64);

    fn device_pixel_ratio(&self) -> f64;

    fn backing_size(&self) -> BackingSize;

    /// Reallocates the backing store. Called from `Renderer::resize`.
    fn set_backing_size(&mut self, size: BackingSize);

    /// Asks the host to present a new frame. The host answers by calling
    /// `Renderer::tick` once, on the render thread.
    fn request_frame(&self);
}
