//! Glyph lookup for player controls, stats and categories

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Glyph {
    #[default]
    Video,
    Play,
    Pause,
    SeekBack,
    SeekForward,
    Buffering,
    Failed,
    Fullscreen,
    Views,
    Like,
    Dislike,
    Comment,
    Share,
    Verified,
    Music,
    Photography,
    Travel,
    Film,
    Gaming,
    Dance,
}

/// name, glyph, symbol
static GLYPHS: &[(&str, Glyph, &str)] = &[
    ("video", Glyph::Video, "🎬"),
    ("play", Glyph::Play, "▶"),
    ("pause", Glyph::Pause, "⏸"),
    ("seek-back", Glyph::SeekBack, "⏪ 5s"),
    ("seek-forward", Glyph::SeekForward, "5s ⏩"),
    ("buffering", Glyph::Buffering, "⟳"),
    ("failed", Glyph::Failed, "⚠"),
    ("fullscreen", Glyph::Fullscreen, "⛶"),
    ("views", Glyph::Views, "👁"),
    ("like", Glyph::Like, "👍"),
    ("dislike", Glyph::Dislike, "👎"),
    ("comment", Glyph::Comment, "💬"),
    ("share", Glyph::Share, "↗"),
    ("verified", Glyph::Verified, "✔"),
    ("music", Glyph::Music, "🎵"),
    ("photography", Glyph::Photography, "📷"),
    ("travel", Glyph::Travel, "✈"),
    ("film", Glyph::Film, "🎞"),
    ("gaming", Glyph::Gaming, "🎮"),
    ("dance", Glyph::Dance, "💃"),
];

impl Glyph {
    /// Unknown names resolve to [`Glyph::Video`].
    pub fn from_name(name: &str) -> Glyph {
        let name = name.trim().to_ascii_lowercase();
        GLYPHS
            .iter()
            .find(|(key, _, _)| *key == name)
            .map(|(_, glyph, _)| *glyph)
            .unwrap_or_default()
    }

    pub fn for_category(category: &str) -> Glyph {
        Glyph::from_name(category)
    }

    pub fn symbol(self) -> &'static str {
        GLYPHS
            .iter()
            .find(|(_, glyph, _)| *glyph == self)
            .map(|(_, _, symbol)| *symbol)
            .unwrap_or("🎬")
    }
}
