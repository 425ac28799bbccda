//! Terminal front end
//!
//! A software rasteriser that draws meshes into a grid of character cells and
//! a crossterm keyboard source. Cells are roughly twice as tall as they are
//! wide, which [`TerminalRenderer::aspect_ratio`] accounts for.

mod buffer;
mod input;

pub use buffer::{Cell, CellBuffer};
pub use input::TerminalInput;

use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use nalgebra::Point3;
use scene_engine::assets::{AssetError, FileAssetStore, TextureData};
use scene_engine::render::{
    AssetLoader, MeshHandle, RenderError, Renderer, ResourceSet, ShaderHandle, ShaderProgram,
    TextureHandle, Uniforms,
};

const SPACE_GLYPHS: [char; 4] = [' ', '.', ' ', ':'];
const OBJECT_GLYPH: char = '█';

/// Raw mode plus alternate screen for as long as the value lives
#[derive(Debug)]
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Switch the terminal into game mode
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen) {
            warn!("Failed to restore the screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
    }
}

/// [`Renderer`] drawing into a terminal
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    store: FileAssetStore,
    buffer: CellBuffer,
    bound: Option<ResourceSet>,
    status: String,
    follow_terminal_size: bool,
}

impl TerminalRenderer<Stdout> {
    /// Renderer on stdout sized to the current terminal, loading assets from `assets`
    pub fn stdout(assets: impl Into<PathBuf>) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::new(
            io::stdout(),
            FileAssetStore::new(assets),
            usize::from(cols),
            usize::from(rows),
        );
        renderer.follow_terminal_size = true;
        Ok(renderer)
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer writing to `out` with a fixed `cols` × `rows` screen
    ///
    /// The last row is reserved for the status line.
    pub fn new(out: W, store: FileAssetStore, cols: usize, rows: usize) -> Self {
        Self {
            out,
            store,
            buffer: CellBuffer::new(cols, rows.saturating_sub(1)),
            bound: None,
            status: String::new(),
            follow_terminal_size: false,
        }
    }

    /// Text shown below the playfield on the next presented frame
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Width / height of the playfield in square units
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        let rows = self.buffer.height().max(1) as f32;
        self.buffer.width() as f32 / (rows * 2.0)
    }

    /// Cells of the frame being drawn
    pub const fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// Backing asset store
    pub const fn store(&self) -> &FileAssetStore {
        &self.store
    }

    /// Underlying writer
    pub const fn output(&self) -> &W {
        &self.out
    }

    fn rasterize(&mut self, resources: ResourceSet, uniforms: &Uniforms) -> Result<(), String> {
        let program = self
            .store
            .shader(resources.shader)
            .ok_or("shader handle is not loaded")?;
        let mesh = self
            .store
            .mesh(resources.mesh)
            .ok_or("mesh handle is not loaded")?;
        let texture = self
            .store
            .texture(resources.texture)
            .ok_or("texture handle is not loaded")?;

        let mvp = uniforms.mvp();
        let color = texture.mean_color();
        let (width, height) = (self.buffer.width(), self.buffer.height());
        let offset = uniforms.offset;

        for triangle in mesh.triangles() {
            let mut screen = [Point3::origin(); 3];
            let mut visible = true;
            for (out, vertex) in screen.iter_mut().zip(triangle) {
                let clip = mvp * vertex.to_homogeneous();
                if clip.w <= f32::EPSILON {
                    visible = false;
                    break;
                }
                let ndc = Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
                *out = self.buffer.to_screen(&ndc);
            }
            if !visible {
                continue;
            }

            match program {
                ShaderProgram::Object => self.buffer.fill_triangle(screen, |_, _| Cell {
                    glyph: OBJECT_GLYPH,
                    color,
                }),
                ShaderProgram::Space => self.buffer.fill_triangle(screen, |x, y| {
                    space_cell(texture, x, y, width, height, offset)
                }),
            }
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut last_color = None;
        for y in 0..self.buffer.height() {
            queue!(self.out, MoveTo(0, to_u16(y)))?;
            for cell in self.buffer.row(y) {
                if last_color != Some(cell.color) {
                    let [r, g, b] = cell.color;
                    queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                    last_color = Some(cell.color);
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }

        let width = self.buffer.width();
        let status: String = self.status.chars().take(width).collect();
        queue!(
            self.out,
            ResetColor,
            MoveTo(0, to_u16(self.buffer.height())),
            Print(format!("{status:<width$}"))
        )?;
        self.out.flush()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn space_cell(
    texture: &TextureData,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    offset: f32,
) -> Cell {
    let u = x as f32 / width.max(1) as f32 + offset;
    let v = y as f32 / height.max(1) as f32;
    let shifted = x + (offset * width as f32) as usize;
    Cell {
        glyph: SPACE_GLYPHS[(shifted + y * 3) % SPACE_GLYPHS.len()],
        color: texture.sample(u, v),
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<W: Write> AssetLoader for TerminalRenderer<W> {
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, AssetError> {
        self.store.load_mesh(name)
    }

    fn load_shader(&mut self, program: ShaderProgram) -> Result<ShaderHandle, AssetError> {
        self.store.load_shader(program)
    }

    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError> {
        self.store.load_texture(name)
    }

    fn release(&mut self, resources: &ResourceSet) {
        self.store.release(resources);
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        if self.follow_terminal_size {
            let (cols, rows) = terminal::size()?;
            let (cols, rows) = (usize::from(cols), usize::from(rows).saturating_sub(1));
            if (cols, rows) != (self.buffer.width(), self.buffer.height()) {
                debug!("Terminal resized to {}x{}", cols, rows);
                self.buffer.resize(cols, rows);
                queue!(self.out, Clear(ClearType::All))?;
            }
        }
        self.buffer.clear();
        self.bound = None;
        Ok(())
    }

    fn bind(&mut self, resources: &ResourceSet) {
        self.bound = Some(*resources);
    }

    fn draw(&mut self, uniforms: &Uniforms) {
        let Some(resources) = self.bound else {
            warn!("draw issued with nothing bound, ignoring");
            return;
        };
        if let Err(reason) = self.rasterize(resources, uniforms) {
            warn!("Skipping draw: {}", reason);
        }
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.present()?;
        Ok(())
    }
}
