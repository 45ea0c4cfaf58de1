//! Windows のシステムフォント候補

use anyhow::Result;
use std::path::PathBuf;

/// `%WINDIR%\Fonts` 以下の候補を返す
pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    let fonts = std::env::var_os("WINDIR")
        .map(|w| PathBuf::from(w).join("Fonts"))
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows\Fonts"));
    Ok(["segoeui.ttf", "arial.ttf", "tahoma.ttf", "verdana.ttf", "consola.ttf"]
        .iter()
        .map(|name| fonts.join(name))
        .collect())
}
