//! Attached screen
//!
//! A [`Device`] exists only after a successful attach: the screen has been
//! identified, the format negotiated and the frame buffer allocated. It is
//! used from one thread at a time; every call is synchronous.

use mpro_core::{
    format, Capabilities, CapabilityWarning, DamageRect, DriverConfig, FrameBuffer, ModeInfo,
    PanelDescriptor, PixelFormat, SourceFrame,
};
use mpro_hal::UsbTransport;
use mpro_protocol::{request, CommandBuffer, DrawCommand};

use crate::blit;
use crate::error::{AttachError, ConfigError, IoError, Stage};
use crate::identify::identify;
use crate::info::DeviceInfo;

/// Source formats accepted by [`Device::update`]
const SOURCE_FORMATS: [u32; 1] = [format::FOURCC_XRGB8888];

/// An identified screen ready to draw
pub struct Device<T: UsbTransport> {
    transport: T,
    panel: PanelDescriptor,
    format: PixelFormat,
    caps: Capabilities,
    warning: Option<CapabilityWarning>,
    preferred_depth: u32,
    framebuffer: FrameBuffer,
    cmd: CommandBuffer,
}

impl<T: UsbTransport> Device<T> {
    /// Bring up the screen behind `transport`
    ///
    /// Runs identification, resolves capabilities, negotiates the RGB565
    /// destination format and allocates the frame buffer. Nothing is drawn.
    pub fn attach(mut transport: T, config: &DriverConfig) -> Result<Self, AttachError> {
        if !config.depth_supported() {
            return Err(ConfigError::UnsupportedDepth(config.preferred_bits_per_pixel).into());
        }

        let panel = identify(&mut transport)?;

        let (caps, warning) = Capabilities::resolve(config, &panel);
        if let Some(warning) = &warning {
            tracing::warn!("{}", warning);
        }

        let format = format::negotiate(PixelFormat::SELECTED.name()).map_err(ConfigError::from)?;
        let framebuffer = FrameBuffer::new(&panel, format).map_err(ConfigError::from)?;

        tracing::debug!(
            %format,
            stride = framebuffer.stride(),
            block_size = framebuffer.block_size(),
            flip_x = caps.flip_x,
            partial = caps.partial_updates,
            "frame buffer ready"
        );

        Ok(Self {
            transport,
            panel,
            format,
            caps,
            warning,
            preferred_depth: config.preferred_bits_per_pixel,
            framebuffer,
            cmd: CommandBuffer::new(),
        })
    }

    pub fn panel(&self) -> &PanelDescriptor {
        &self.panel
    }

    /// The single mode this screen runs
    pub fn mode(&self) -> ModeInfo {
        ModeInfo::fixed(&self.panel, self.preferred_depth)
    }

    /// Whether `candidate` matches the native mode
    pub fn mode_valid(&self, candidate: &ModeInfo) -> bool {
        self.mode().accepts(candidate)
    }

    /// Destination format of the frame buffer
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Fourcc codes of the source layouts [`Device::update`] accepts
    pub fn source_formats(&self) -> &'static [u32] {
        &SOURCE_FORMATS
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Warning raised at attach, if any
    pub fn capability_warning(&self) -> Option<&CapabilityWarning> {
        self.warning.as_ref()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn info(&self) -> DeviceInfo {
        DeviceInfo::new(
            &self.panel,
            self.format,
            &self.caps,
            self.framebuffer.stride(),
            self.framebuffer.block_size(),
        )
    }

    /// Send the frame buffer, declaring `damage` as changed
    ///
    /// Empty damage (or damage entirely off the panel) sends nothing. The
    /// whole buffer is always transferred after the draw command.
    pub fn blit(&mut self, damage: DamageRect) -> Result<(), IoError> {
        let Some(command) = blit::plan(&self.caps, &self.panel, &damage) else {
            tracing::trace!(?damage, "nothing to blit");
            return Ok(());
        };
        self.send(&command)
    }

    fn send(&mut self, command: &DrawCommand) -> Result<(), IoError> {
        command.encode_into(&mut self.cmd);
        tracing::trace!(?command, "draw");

        crate::transfer::control_out(
            &mut self.transport,
            Stage::DrawCommand,
            request::DRAW,
            &self.cmd,
        )?;
        crate::transfer::bulk_out(&mut self.transport, self.framebuffer.as_bytes())
    }

    /// Convert `rect` of `src` and push it to the screen
    pub fn on_dirty(&mut self, src: &SourceFrame<'_>, rect: DamageRect) -> Result<(), IoError> {
        self.update(src, &[rect])
    }

    /// Convert every rectangle of `src` in `damage`, then blit once
    ///
    /// Rectangles are clipped to the source and the panel. One blit covers
    /// the union of what survives clipping; nothing is sent if nothing does.
    pub fn update(&mut self, src: &SourceFrame<'_>, damage: &[DamageRect]) -> Result<(), IoError> {
        let visible = self.framebuffer.area();
        let bounds = src.bounds();
        let bounding = self.panel.bounding_rect();

        let mut dirty: Option<DamageRect> = None;
        for rect in damage {
            // A whole-panel report covers the last row and column too
            let rect = if *rect == bounding { visible } else { *rect };
            let Some(clip) = rect
                .intersect(&bounds)
                .and_then(|r| r.intersect(&visible))
            else {
                continue;
            };
            self.framebuffer.convert(src, clip, self.caps.flip_x);
            dirty = Some(dirty.map_or(clip, |d| d.union(&clip)));
        }

        match dirty {
            Some(rect) => {
                tracing::trace!(?rect, pixels = rect.area(), "converted");
                self.blit(rect)
            }
            None => Ok(()),
        }
    }

    /// Blank the screen, margin included
    pub fn clear(&mut self) -> Result<(), IoError> {
        self.framebuffer.clear();
        self.send(&DrawCommand::full(self.panel.block_size()))
    }

    /// Release the device and hand the transport back
    ///
    /// The screen keeps showing its last frame.
    pub fn detach(self) -> T {
        tracing::debug!(model = self.panel.model_name(), "detached");
        self.transport
    }
}

#[cfg(test)]
impl<T: UsbTransport> Device<T> {
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
