//! SDL2 presenter for rendered frames (cargo feature `window`).

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::render::FrameBuffer;

/// What the user did while a frame was on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Any key other than Escape: show the next frame.
    Continue,
    Quit,
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let event_pump = sdl_context.event_pump()?;

        Ok(Self {
            canvas,
            event_pump,
            width,
            height,
        })
    }

    /// Shows `frame`, scaled to the window if the sizes differ.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, frame.width(), frame.height())
            .map_err(|e| e.to_string())?;
        texture
            .update(None, &top_down_bytes(frame), (frame.width() * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    /// Blocks until a key is pressed or the window is closed.
    pub fn wait_for_key(&mut self) -> WindowEvent {
        loop {
            match self.event_pump.wait_event() {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown { .. } => return WindowEvent::Continue,
                _ => {}
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Native-endian ARGB8888 bytes with the top row first.
fn top_down_bytes(frame: &FrameBuffer) -> Vec<u8> {
    let width = frame.width() as usize;
    frame
        .color_buffer()
        .chunks_exact(width)
        .rev()
        .flatten()
        .flat_map(|pixel| pixel.to_ne_bytes())
        .collect()
}
