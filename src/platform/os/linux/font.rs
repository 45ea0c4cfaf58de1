//! Linux のシステムフォント候補
//!
//! ディストリ差が大きいため、ありそうなパスを順に列挙する。
//! 先頭ほど優先。`fc-match` は呼ばない。

use anyhow::Result;
use std::path::PathBuf;

const FONT_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts"];

const RELATIVE: &[&str] = &[
    // Debian / Ubuntu
    "truetype/dejavu/DejaVuSans.ttf",
    "truetype/noto/NotoSans-Regular.ttf",
    "truetype/liberation/LiberationSans-Regular.ttf",
    "truetype/freefont/FreeSans.ttf",
    // Fedora / Arch
    "dejavu-sans-fonts/DejaVuSans.ttf",
    "TTF/DejaVuSans.ttf",
    "noto/NotoSans-Regular.ttf",
    "liberation-sans/LiberationSans-Regular.ttf",
];

pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = FONT_DIRS
        .iter()
        .flat_map(|dir| RELATIVE.iter().map(move |rel| PathBuf::from(dir).join(rel)))
        .collect();
    // ユーザーフォント
    if let Some(home) = std::env::var_os("HOME") {
        out.push(PathBuf::from(home).join(".local/share/fonts/DejaVuSans.ttf"));
    }
    Ok(out)
}
