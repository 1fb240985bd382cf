use std::time::Duration;

use anyhow::Context;
use pathtracer::{Engine, FrameBuffer};
use sdl2::{event::Event, pixels::PixelFormatEnum};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub fn run(engine: &Engine<'_>, buffer: &mut FrameBuffer) -> anyhow::Result<()> {
    let width = u32::try_from(buffer.width())?;
    let height = u32::try_from(buffer.height())?;
    let pitch = buffer.width() * 4;

    let sdl2_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut canvas = sdl2_context
        .video()
        .map_err(anyhow::Error::msg)?
        .window("pathtracer", width, height)
        .position_centered()
        .build()?
        .into_canvas()
        .build()?;
    let texture_creator = canvas.texture_creator();
    let mut texture =
        texture_creator.create_texture_streaming(PixelFormatEnum::RGBA32, width, height)?;
    let mut events = sdl2_context.event_pump().map_err(anyhow::Error::msg)?;

    let mut present = |frame: &FrameBuffer| -> anyhow::Result<()> {
        texture.update(None, &frame.to_rgba8(), pitch)?;
        canvas
            .copy(&texture, None, None)
            .map_err(anyhow::Error::msg)?;
        canvas.present();
        Ok(())
    };

    let mut shown = Ok(());
    engine.trace_with(buffer, |_, frame| {
        events.pump_events();
        if shown.is_ok() {
            shown = present(frame);
        }
    })?;
    shown.context("failed to update preview window")?;

    'main: loop {
        for event in events.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'main;
            }
        }
        std::thread::sleep(FRAME_INTERVAL);
    }
    Ok(())
}
