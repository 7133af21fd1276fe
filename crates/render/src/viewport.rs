use glam::Mat4;

/// Drawable region in physical pixels. Never zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.near, self.far)
    }
}

/// Tracks the render surface size and derives the projection from it.
///
/// Starts detached; resize events are ignored until `attach`, and again
/// after `detach`.
#[derive(Debug, Clone)]
pub struct ViewportManager {
    viewport: Option<Viewport>,
    fov_degrees: f32,
    near: f32,
    far: f32,
    resizes: u64,
}

impl ViewportManager {
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            viewport: None,
            fov_degrees,
            near,
            far,
            resizes: 0,
        }
    }

    /// Start listening with the surface's initial size.
    pub fn attach(&mut self, width: u32, height: u32) -> Projection {
        let viewport = Viewport::new(width, height);
        self.viewport = Some(viewport);
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport attached");
        self.projection_for(viewport)
    }

    /// Stop listening. Later resizes are ignored.
    pub fn detach(&mut self) {
        if self.viewport.take().is_some() {
            tracing::debug!(resizes = self.resizes, "viewport detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    /// Handle a resize event. Returns the new projection, or `None` while detached.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Option<Projection> {
        let slot = self.viewport.as_mut()?;
        *slot = Viewport::new(width, height);
        let viewport = *slot;
        self.resizes += 1;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = viewport.aspect(),
            "viewport resized"
        );
        Some(self.projection_for(viewport))
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn projection(&self) -> Option<Projection> {
        self.viewport.map(|v| self.projection_for(v))
    }

    /// Number of resize events handled while attached.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    fn projection_for(&self, viewport: Viewport) -> Projection {
        Projection {
            fov_y_radians: self.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: self.near,
            far: self.far,
        }
    }
}
