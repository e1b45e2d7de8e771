//! Synchronous depth-buffer readback over a pixel rectangle.

use std::sync::mpsc;

use super::surface::RenderSurface;
use crate::error::EmbedError;
use crate::render::{DepthWindow, PixelRect};

fn readback_error(e: &dyn std::fmt::Display) -> EmbedError {
    EmbedError::Render(format!("depth readback: {e}"))
}

/// Copy the depth samples under `rect` (display coordinates, origin at the
/// bottom-left) into a [`DepthWindow`].
///
/// The part of `rect` outside the surface is filled with the far value.
/// Blocks until the copy has completed.
///
/// # Errors
///
/// Returns [`EmbedError::Render`] if waiting on the device fails or the
/// staging buffer cannot be mapped.
pub fn read_depth(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    surface: &RenderSurface,
    rect: PixelRect,
) -> Result<DepthWindow, EmbedError> {
    let mut window = DepthWindow::far(rect);
    let (w, h) = surface.size();
    let Some(clip) = rect.clip(w as i32, h as i32) else {
        return Ok(window);
    };

    let copy_w = clip.width() as u32;
    let copy_h = clip.height() as u32;
    // Display rows grow upward, texture rows grow downward.
    let first_texture_row = h - 1 - clip.y1 as u32;

    let unpadded = copy_w * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded = unpadded.div_ceil(align) * align;

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Depth Readback Buffer"),
        size: u64::from(padded * copy_h),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Depth Readback Encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &surface.depth,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: clip.x0 as u32,
                y: first_texture_row,
                z: 0,
            },
            aspect: wgpu::TextureAspect::DepthOnly,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(copy_h),
            },
        },
        wgpu::Extent3d {
            width: copy_w,
            height: copy_h,
            depth_or_array_layers: 1,
        },
    );
    let submission = queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = staging.slice(..);
    let (sender, receiver) = mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    let _ = device
        .poll(wgpu::PollType::Wait {
            submission_index: Some(submission),
            timeout: None,
        })
        .map_err(|e| readback_error(&e))?;

    match receiver.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(readback_error(&e));
        }
        Err(_) => {
            return Err(readback_error(&"map callback dropped"));
        }
    }

    {
        let data = buffer_slice.get_mapped_range();
        for row in 0..copy_h {
            let start = (row * padded) as usize;
            let bytes = &data[start..start + unpadded as usize];
            let depths: &[f32] = bytemuck::try_cast_slice(bytes)
                .map_err(|e| readback_error(&e))?;
            let y = clip.y1 - row as i32;
            for (i, depth) in depths.iter().enumerate() {
                window.set(clip.x0 + i as i32, y, *depth);
            }
        }
    }
    staging.unmap();

    Ok(window)
}
