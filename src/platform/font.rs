//! fontdue による `Font` 実装と、システムフォント取得の Facade

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use fontdue::{Font as FontDue, FontSettings};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::engine::text::font::{
    Font, FontDescription, FontFamily, FontProvider, FontRef, FontStyle, FontWeight, Glyph,
    GlyphRef,
};

/// Overrides the font picked by [`FontdueProvider::from_system`].
pub const FONT_ENV: &str = "GLYPHLINE_FONT";

#[derive(Debug, Error)]
pub enum FontError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font parse error: {0}")]
    Parse(&'static str),

    #[error("No usable font found: {0}")]
    NotFound(String),
}

/* ==== system fonts ==== */

#[cfg(target_os = "linux")]
use crate::platform::os::linux;
#[cfg(target_os = "macos")]
use crate::platform::os::macos;
#[cfg(target_os = "windows")]
use crate::platform::os::windows;

#[allow(unreachable_code)]
pub fn system_font_candidates() -> Result<Vec<PathBuf>> {
    #[cfg(target_os = "windows")]
    {
        return windows::font::system_font_candidates();
    }
    #[cfg(target_os = "macos")]
    {
        return macos::font::system_font_candidates();
    }
    #[cfg(target_os = "linux")]
    {
        return linux::font::system_font_candidates();
    }

    anyhow::bail!("system font is not supported on this OS yet");
}

/// 最初に存在したシステムフォント（プロセス内で一度だけ探す）
static FIRST_SYSTEM_FONT: Lazy<Option<PathBuf>> = Lazy::new(|| {
    let found = system_font_candidates()
        .ok()?
        .into_iter()
        .find(|p| p.is_file());
    log::debug!(target: "Platform::Font", "system font: {:?}", found);
    found
});

/// `GLYPHLINE_FONT` if set, else the first system candidate on disk.
pub fn default_font_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(FONT_ENV) {
        return Some(PathBuf::from(p));
    }
    (*FIRST_SYSTEM_FONT).clone()
}

/* ==== FontdueFont ==== */

/// One face at one pixel size.
pub struct FontdueFont {
    face: Rc<FontDue>,
    desc: FontDescription,
    px: f32,
    height: i32,
    baseline: i32,
    space_width: i32,
    fixed_pitch: bool,
    // None = 字形なし
    glyphs: RefCell<HashMap<char, Option<GlyphRef>>>,
}

impl FontdueFont {
    pub fn new(face: Rc<FontDue>, desc: FontDescription) -> Self {
        let px = desc.size_px.max(1) as f32;
        // 行メトリクスが無いフォントは 1.2 / 0.8 比で代用
        let (height, baseline) = match face.horizontal_line_metrics(px) {
            Some(lm) => (
                (lm.ascent - lm.descent + lm.line_gap).ceil() as i32,
                lm.ascent.ceil() as i32,
            ),
            None => ((px * 1.2).ceil() as i32, (px * 0.8).ceil() as i32),
        };
        let space_width = face.metrics(' ', px).advance_width.round() as i32;
        let narrow = face.metrics('i', px).advance_width;
        let wide = face.metrics('W', px).advance_width;
        Self {
            face,
            desc,
            px,
            height: height.max(1),
            baseline,
            space_width,
            fixed_pitch: (narrow - wide).abs() < 0.01,
            glyphs: RefCell::new(HashMap::new()),
        }
    }

    pub fn from_bytes(bytes: &[u8], desc: FontDescription) -> Result<Self, FontError> {
        let face = FontDue::from_bytes(bytes, FontSettings::default()).map_err(FontError::Parse)?;
        Ok(Self::new(Rc::new(face), desc))
    }

    fn rasterize(&self, ch: char) -> Option<GlyphRef> {
        let index = self.face.lookup_glyph_index(ch);
        if index == 0 && ch != ' ' {
            return None;
        }
        let (m, coverage) = self.face.rasterize_indexed(index, self.px);
        Some(Rc::new(Glyph {
            id: index as u32,
            black_box_x: m.width as u16,
            black_box_y: m.height as u16,
            origin_x: m.xmin as i16,
            origin_y: (m.ymin + m.height as i32) as i16,
            advance: (m.advance_width * 64.0).round() as i32,
            coverage,
        }))
    }
}

impl std::fmt::Debug for FontdueFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueFont")
            .field("name", &self.face.name())
            .field("desc", &self.desc)
            .field("height", &self.height)
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl Font for FontdueFont {
    fn description(&self) -> &FontDescription {
        &self.desc
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn baseline(&self) -> i32 {
        self.baseline
    }

    fn space_width(&self) -> i32 {
        self.space_width
    }

    fn is_fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }

    fn glyph(&self, ch: char) -> Option<GlyphRef> {
        if ch.is_control() {
            return None;
        }
        self.glyphs
            .borrow_mut()
            .entry(ch)
            .or_insert_with(|| self.rasterize(ch))
            .clone()
    }

    fn has_kerning(&self) -> bool {
        !self.fixed_pitch
    }

    fn kerning(&self, prev: char, cur: char) -> i32 {
        self.face
            .horizontal_kern(prev, cur, self.px)
            .map_or(0, |k| (k * 64.0).round() as i32)
    }
}

/* ==== FontdueProvider ==== */

struct Face {
    name: String,
    family: FontFamily,
    style: FontStyle,
    weight: FontWeight,
    font: Rc<FontDue>,
}

/// Serves [`FontdueFont`]s for descriptions, picking the closest loaded face.
#[derive(Default)]
pub struct FontdueProvider {
    faces: Vec<Face>,
    cache: RefCell<HashMap<FontDescription, FontRef>>,
}

/// ファイル名からスタイルとウェイトを推測する
fn guess_style(name: &str) -> (FontStyle, FontWeight) {
    let lower = name.to_ascii_lowercase();
    let style = if lower.contains("italic") {
        FontStyle::Italic
    } else if lower.contains("oblique") {
        FontStyle::Oblique
    } else {
        FontStyle::Normal
    };
    let weight = if lower.contains("black") || lower.contains("heavy") {
        FontWeight::BLACK
    } else if lower.contains("bold") {
        FontWeight::BOLD
    } else if lower.contains("thin") || lower.contains("light") {
        FontWeight::THIN
    } else {
        FontWeight::NORMAL
    };
    (style, weight)
}

impl FontdueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a face; style and weight are guessed from `name`.
    pub fn load_from_bytes(
        &mut self,
        name: &str,
        family: FontFamily,
        bytes: &[u8],
    ) -> Result<(), FontError> {
        let font = FontDue::from_bytes(bytes, FontSettings::default()).map_err(FontError::Parse)?;
        let (style, weight) = guess_style(name);
        log::debug!(
            target: "Platform::Font",
            "loaded face {:?} ({:?}, {:?}, {:?})",
            name, family, style, weight.0
        );
        self.faces.push(Face {
            name: name.to_string(),
            family,
            style,
            weight,
            font: Rc::new(font),
        });
        self.cache.borrow_mut().clear();
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path, family: FontFamily) -> Result<(), FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.load_from_bytes(&name, family, &bytes)
    }

    /// `GLYPHLINE_FONT` を優先し、なければシステムフォント候補から読む
    pub fn from_system() -> Result<Self, FontError> {
        let mut provider = Self::new();
        if let Some(p) = env::var_os(FONT_ENV) {
            provider.load_file(Path::new(&p), FontFamily::SansSerif)?;
            return Ok(provider);
        }
        let candidates =
            system_font_candidates().map_err(|e| FontError::NotFound(e.to_string()))?;
        for p in candidates.iter().filter(|p| p.is_file()) {
            match provider.load_file(p, FontFamily::SansSerif) {
                Ok(()) => return Ok(provider),
                Err(e) => log::debug!(target: "Platform::Font", "skip {}: {}", p.display(), e),
            }
        }
        Err(FontError::NotFound(format!(
            "none of {} candidates could be loaded",
            candidates.len()
        )))
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Lower is better.
    fn score(face: &Face, desc: &FontDescription) -> u32 {
        if let Some(name) = &desc.face
            && face.name.eq_ignore_ascii_case(name)
        {
            return 0;
        }
        let mut score = 1;
        if face.family != desc.family {
            score += 10_000;
        }
        if face.style != desc.style {
            score += 1_000;
        }
        score + (face.weight.0 as i32 - desc.weight.0 as i32).unsigned_abs()
    }
}

impl FontProvider for FontdueProvider {
    fn font(&self, desc: &FontDescription) -> Option<FontRef> {
        if let Some(f) = self.cache.borrow().get(desc) {
            return Some(f.clone());
        }
        let face = self.faces.iter().min_by_key(|f| Self::score(f, desc))?;
        let font: FontRef = Rc::new(FontdueFont::new(face.font.clone(), desc.clone()));
        self.cache.borrow_mut().insert(desc.clone(), font.clone());
        Some(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_is_guessed_from_name() {
        assert_eq!(guess_style("DejaVuSans-BoldOblique"), (FontStyle::Oblique, FontWeight::BOLD));
        assert_eq!(guess_style("NotoSans-Regular"), (FontStyle::Normal, FontWeight::NORMAL));
        assert_eq!(guess_style("Foo-LightItalic"), (FontStyle::Italic, FontWeight::THIN));
    }

    #[test]
    fn empty_provider_has_no_fonts() {
        let p = FontdueProvider::new();
        assert!(p.font(&FontDescription::default()).is_none());
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut p = FontdueProvider::new();
        let err = p
            .load_from_bytes("junk", FontFamily::SansSerif, b"not a font")
            .unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let mut p = FontdueProvider::new();
        let err = p
            .load_file(Path::new("/nonexistent/font.ttf"), FontFamily::SansSerif)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
