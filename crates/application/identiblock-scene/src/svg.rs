//! Flat SVG rendering
//!
//! Square image, light background, half a cell of padding on every side.

use identiblock_core::{Identicon, GRID_SIZE};

const BACKGROUND: &str = "#f0f0f0";

/// Render the identicon as an SVG document `size` pixels square
pub fn render_svg(identicon: &Identicon, size: u32) -> String {
    let size = f64::from(size.max(1));
    // GRID_SIZE cells plus half a cell of padding each side
    let cell = size / (GRID_SIZE as f64 + 1.0);
    let pad = cell / 2.0;
    let color = identicon.color.to_hex();

    let mut cells = String::new();
    for (row, col) in identicon.pattern.filled_cells() {
        cells.push_str(&format!(
            r#"
    <rect x="{x:.2}" y="{y:.2}" width="{c:.2}" height="{c:.2}"/>"#,
            x = pad + col as f64 * cell,
            y = pad + row as f64 * cell,
            c = cell,
        ));
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}">
  <title>{digest}</title>
  <rect width="100%" height="100%" fill="{bg}"/>
  <g fill="{color}" shape-rendering="crispEdges">{cells}
  </g>
</svg>
"#,
        s = size,
        digest = identicon.digest,
        bg = BACKGROUND,
        color = color,
        cells = cells,
    )
}
