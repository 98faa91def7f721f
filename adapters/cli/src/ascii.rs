//! Terminal rendering backend that draws tile layers as characters.

use std::io::Write;

use anyhow::{Context, Result};
use meadow_core::TileKind;
use meadow_rendering::{Lighting, RenderingBackend, TileLayer};

/// Character used to draw a tile kind in the terminal.
pub(crate) const fn glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Water => '~',
        TileKind::Flower => '*',
        TileKind::Tree => 'T',
        TileKind::Grass => '.',
        TileKind::DirtPath => '=',
        TileKind::Cleared => ' ',
    }
}

/// Backend that prints tile layers as rows of characters.
#[derive(Debug)]
pub(crate) struct AsciiBackend<W> {
    out: W,
}

impl<W: Write> AsciiBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn present(&mut self, layer: &TileLayer, lighting: Lighting) -> Result<()> {
        let (red, green, blue) = lighting.ambient.to_rgb_u8();
        writeln!(self.out, "# ambient rgb({red}, {green}, {blue})")
            .context("failed to write frame header")?;

        let columns = layer.columns() as usize;
        let mut row = String::with_capacity(columns);
        for tile in layer.iter() {
            row.push(glyph(tile.kind));
            if row.len() == columns {
                writeln!(self.out, "{row}").context("failed to write tile row")?;
                row.clear();
            }
        }
        self.out.flush().context("failed to flush frame")
    }
}
