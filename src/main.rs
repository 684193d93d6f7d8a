use anyhow::{Context, Result};
use frame_processor_rs::logger;
use frame_processor_rs::video_pipeline::format::{
    AllocatorProperties, BufferAllocator, MediaType, PinDirection,
};
use frame_processor_rs::video_pipeline::{EngineConfig, FrameProcessor, OutputSample};

use tracing::info;

const WIDTH: i32 = 640;
const HEIGHT: i32 = 480;
const FRAMES: u64 = 12;

/// Grants whatever is requested; stands in for the host's sample allocator.
struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn set_properties(
        &mut self,
        properties: &AllocatorProperties,
    ) -> frame_processor_rs::video_pipeline::Result<AllocatorProperties> {
        Ok(*properties)
    }
}

/// Horizontal luma ramp with chroma drifting per frame.
fn synthetic_frame(width: usize, height: usize, frame: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * 2 * height);
    for _ in 0..height {
        for x in (0..width).step_by(2) {
            let y = (x * 255 / width) as u8;
            let shift = (frame * 8 % 64) as u8;
            data.extend_from_slice(&[y, 96 + shift, y.saturating_add(1), 160 - shift]);
        }
    }
    data
}

fn mean_luma(frame: &[u8]) -> f64 {
    let sum: u64 = frame.iter().step_by(2).map(|&y| y as u64).sum();
    sum as f64 / (frame.len() / 2) as f64
}

fn main() -> Result<()> {
    logger::init();

    info!("Starting frame processor...");

    let config = EngineConfig::builder().capture_index(4).build();
    let mut processor = FrameProcessor::new(config);

    let input_type = MediaType::yuy2(WIDTH, HEIGHT)?;
    processor.check_input_type(&input_type)?;
    processor.set_media_type(PinDirection::Input, &input_type)?;

    let output_type = processor
        .get_media_type(0)?
        .context("no output format offered")?;
    processor.check_transform(&input_type, &output_type)?;
    processor.set_media_type(PinDirection::Output, &output_type)?;

    let image_size = input_type
        .header()
        .map(|bmi| bmi.size_image as usize)
        .context("input media type has no bitmap header")?;
    let upstream = AllocatorProperties {
        buffers: 1,
        buffer_size: image_size,
        align: 1,
        prefix: 0,
    };
    let mut allocator = HeapAllocator;
    let granted = processor.decide_buffer_size(
        &mut allocator,
        &upstream,
        &AllocatorProperties::default(),
    )?;
    info!(
        buffers = granted.buffers,
        buffer_size = granted.buffer_size,
        "Output allocator configured"
    );

    let controls = processor.controls();
    let settings = std::thread::spawn(move || {
        controls.set_contrast(150);
        controls.set_saturation(180);
        for gamma in [110u8, 127, 140] {
            controls.set_gamma(gamma);
        }
    });

    let mut output = vec![0u8; granted.buffer_size];
    for frame in 0..FRAMES {
        let input = synthetic_frame(WIDTH as usize, HEIGHT as usize, frame);
        let mut sample = OutputSample::new(&mut output);
        let written = processor.transform(&input, &mut sample)?;
        info!(
            frame,
            written,
            mean_in = mean_luma(&input),
            mean_out = mean_luma(&output[..written]),
            "Frame processed"
        );
    }

    settings
        .join()
        .map_err(|_| anyhow::anyhow!("settings thread panicked"))?;

    let levels = processor.controls().parameters();
    info!(?levels, frames = processor.frame_index(), "Stream finished");

    Ok(())
}
