//! Terminal preview

use identiblock_core::Pattern;

const ON: &str = "██";
const OFF: &str = "  ";

/// One line per row, two columns per cell so the grid looks square
pub fn render_ascii(pattern: &Pattern) -> String {
    pattern
        .rows()
        .iter()
        .map(|row| row.iter().map(|&on| if on { ON } else { OFF }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
