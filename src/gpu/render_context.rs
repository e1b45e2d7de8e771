use std::fmt;

/// Errors that can occur during GPU context initialization.
#[derive(Debug)]
pub enum RenderContextError {
    /// Failed to create a wgpu surface from the window handle.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// GPU device request failed (limits or features not met).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Surface configuration not supported by the selected adapter.
    UnsupportedSurface,
    /// The context wraps an external device and has no instance/adapter
    /// to create presentation surfaces from.
    MissingAdapter,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => {
                write!(f, "surface creation failed: {e}")
            }
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "surface configuration not supported by adapter")
            }
            Self::MissingAdapter => write!(
                f,
                "render context was built from an external device and has \
                 no adapter"
            ),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface | Self::MissingAdapter => None,
        }
    }
}

/// Owns the core wgpu resources used for off-screen rendering.
///
/// The context never owns a presentation surface itself: the embedded
/// viewport renders into its own textures, and a standalone host creates
/// its window surface from [`instance`](Self::instance) and
/// [`adapter`](Self::adapter).
#[derive(Clone)]
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    instance: Option<wgpu::Instance>,
    adapter: Option<wgpu::Adapter>,
}

impl RenderContext {
    /// Create a headless render context on the default high-performance
    /// adapter.
    ///
    /// # Errors
    ///
    /// Returns `RenderContextError` if the adapter or device request fails.
    pub async fn new_headless() -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: None,
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Primary Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        log::debug!("render context on adapter {:?}", adapter.get_info().name);

        Ok(Self {
            device,
            queue,
            instance: Some(instance),
            adapter: Some(adapter),
        })
    }

    /// Create a render context from an externally-owned device and queue,
    /// e.g. the ones an application's own `egui-wgpu` renderer uses.
    #[must_use]
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            instance: None,
            adapter: None,
        }
    }

    /// Instance the device was requested from, when known.
    #[must_use]
    pub fn instance(&self) -> Option<&wgpu::Instance> {
        self.instance.as_ref()
    }

    /// Adapter the device was requested from, when known.
    #[must_use]
    pub fn adapter(&self) -> Option<&wgpu::Adapter> {
        self.adapter.as_ref()
    }

    /// Create a presentation surface for `window` and configure it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError::MissingAdapter`] for contexts built with
    /// [`from_device`](Self::from_device), otherwise surface creation or
    /// configuration errors.
    pub fn create_surface(
        &self,
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<
        (wgpu::Surface<'static>, wgpu::SurfaceConfiguration),
        RenderContextError,
    > {
        let (Some(instance), Some(adapter)) = (&self.instance, &self.adapter)
        else {
            return Err(RenderContextError::MissingAdapter);
        };
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;
        let mut config = surface
            .get_default_config(adapter, size.0.max(1), size.1.max(1))
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&self.device, &config);
        Ok((surface, config))
    }

    /// Create a new command encoder for recording GPU commands.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// Finish the encoder and submit its command buffer to the GPU queue.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) -> wgpu::SubmissionIndex {
        self.queue.submit(std::iter::once(encoder.finish()))
    }
}
