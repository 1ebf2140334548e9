use crate::error::BarError;

/// Default glyph on both ends of the track.
pub const BOUNDARY_CHAR: char = '|';

/// Default glyph for filled slots.
pub const FILL_CHAR: char = '▓';

/// Glyph for unfilled slots. Not configurable.
pub const BLANK_CHAR: char = ' ';

/// Glyphs that make up the track of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub start_char: char,
    pub end_char: char,
    pub fill_char: char,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            start_char: BOUNDARY_CHAR,
            end_char: BOUNDARY_CHAR,
            fill_char: FILL_CHAR,
        }
    }
}

impl Theme {
    /// Same glyph on both ends.
    pub fn new(boundary_char: char, fill_char: char) -> Self {
        Self {
            start_char: boundary_char,
            end_char: boundary_char,
            fill_char,
        }
    }

    pub fn validate(&self) -> Result<(), BarError> {
        check_glyph(self.start_char, "start glyph must not be NUL")?;
        check_glyph(self.end_char, "end glyph must not be NUL")?;
        check_glyph(self.fill_char, "fill glyph must not be NUL")
    }
}

pub(crate) fn check_glyph(c: char, reason: &'static str) -> Result<(), BarError> {
    if c == '\0' {
        Err(BarError::InvalidStyle(reason))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.start_char, '|');
        assert_eq!(theme.end_char, '|');
        assert_eq!(theme.fill_char, '▓');
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nul_glyphs() {
        assert!(Theme::new('\0', '#').validate().is_err());
        assert!(Theme::new('[', '\0').validate().is_err());

        let theme = Theme {
            start_char: '[',
            end_char: '\0',
            fill_char: '#',
        };
        let err = theme.validate().unwrap_err();
        assert!(matches!(err, BarError::InvalidStyle(msg) if msg.contains("end")));
    }
}
