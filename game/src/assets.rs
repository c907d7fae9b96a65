use macroquad::prelude::*;

const FONT_PATH: &str = "assets/DejaVuSans.ttf";

pub struct Assets {
    font: Option<Font>,
}

impl Assets {
    /// Load the UI font, falling back to macroquad's built-in font when it is missing.
    pub async fn load() -> Self {
        let font = match load_ttf_font(FONT_PATH).await {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("failed to load {FONT_PATH}, using the built-in font: {e:?}");
                None
            }
        };
        Self { font }
    }

    pub(crate) fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }
}
