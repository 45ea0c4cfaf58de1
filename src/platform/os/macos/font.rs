//! macOS のシステムフォント候補
//!
//! fontdue は単体の TrueType を優先して読むため、.ttc より .ttf を先に並べる。

use anyhow::Result;
use std::path::PathBuf;

pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    Ok(vec![
        PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"),
        PathBuf::from("/System/Library/Fonts/Supplemental/Verdana.ttf"),
        PathBuf::from("/Library/Fonts/Arial Unicode.ttf"),
        // San Francisco
        PathBuf::from("/System/Library/Fonts/SFNS.ttf"),
        // fallback (コレクション)
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
        PathBuf::from("/System/Library/Fonts/Menlo.ttc"),
    ])
}
