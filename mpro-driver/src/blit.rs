//! Full/partial blit decision
//!
//! A blit sends a draw command followed by the whole frame buffer. The
//! command is either a full-frame header or a partial header naming the
//! damaged rectangle. Which one is picked depends only on the capabilities
//! and the damage of this call.

use mpro_core::{Capabilities, DamageRect, PanelDescriptor};
use mpro_protocol::DrawCommand;

/// Pick the draw command for `damage`
///
/// Returns `None` when nothing on the panel is damaged. Every decision
/// after that is made on the damage clipped to the panel.
pub fn plan(
    caps: &Capabilities,
    panel: &PanelDescriptor,
    damage: &DamageRect,
) -> Option<DrawCommand> {
    if damage.is_empty() {
        return None;
    }
    let clip = damage.intersect(&panel.pixel_area())?;

    if !caps.partial_updates || panel.is_full_frame(&clip) {
        return Some(DrawCommand::full(panel.block_size()));
    }

    // Panel dimensions fit in 16 bits, so the clipped rectangle does too
    Some(DrawCommand::partial(
        clip.x1 as u16,
        clip.y1 as u16,
        clip.width() as u16,
        clip.height() as u16,
    ))
}
