use crate::error::BarError;
use crate::theme::{check_glyph, Theme};

pub const DEFAULT_WIDTH: i64 = 50;

/// A named construction option. Options are applied in order over
/// [`BarConfig::default`], so a later option overrides an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOption {
    Width(i64),
    Theme(Theme),
    /// Sets both the start and the end glyph.
    BoundaryChar(char),
    StartChar(char),
    EndChar(char),
    FillChar(char),
    ShowPercentage(bool),
    ShowElapsedTime(bool),
}

/// Display configuration of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarConfig {
    pub width: i64,
    pub theme: Theme,
    pub show_percentage: bool,
    pub show_elapsed_time: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            theme: Theme::default(),
            show_percentage: true,
            show_elapsed_time: true,
        }
    }
}

impl BarConfig {
    /// Defaults with `options` applied in order. Fails on the first invalid one.
    pub fn from_options<I>(options: I) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = BarOption>,
    {
        let mut config = Self::default();
        for option in options {
            config.apply(option)?;
        }
        Ok(config)
    }

    pub fn apply(&mut self, option: BarOption) -> Result<(), BarError> {
        match option {
            BarOption::Width(width) => {
                if width <= 0 {
                    return Err(BarError::InvalidWidth(width));
                }
                self.width = width;
            }
            BarOption::Theme(theme) => {
                theme.validate()?;
                self.theme = theme;
            }
            BarOption::BoundaryChar(c) => {
                check_glyph(c, "boundary glyph must not be NUL")?;
                self.theme.start_char = c;
                self.theme.end_char = c;
            }
            BarOption::StartChar(c) => {
                check_glyph(c, "start glyph must not be NUL")?;
                self.theme.start_char = c;
            }
            BarOption::EndChar(c) => {
                check_glyph(c, "end glyph must not be NUL")?;
                self.theme.end_char = c;
            }
            BarOption::FillChar(c) => {
                check_glyph(c, "fill glyph must not be NUL")?;
                self.theme.fill_char = c;
            }
            BarOption::ShowPercentage(show) => self.show_percentage = show,
            BarOption::ShowElapsedTime(show) => self.show_elapsed_time = show,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BarConfig::from_options([]).unwrap();
        assert_eq!(config, BarConfig::default());
        assert_eq!(config.width, 50);
        assert!(config.show_percentage);
        assert!(config.show_elapsed_time);
    }

    #[test]
    fn test_width_option() {
        let cases = [(10, false), (100, false), (0, true), (-10, true)];
        for (width, throws) in cases {
            let result = BarConfig::from_options([BarOption::Width(width)]);
            assert_eq!(result.is_err(), throws, "width {width}");
        }

        assert!(matches!(
            BarConfig::from_options([BarOption::Width(-3)]),
            Err(BarError::InvalidWidth(-3))
        ));
    }

    #[test]
    fn test_theme_option() {
        let valid = Theme::new('|', '▓');
        assert!(BarConfig::from_options([BarOption::Theme(valid)]).is_ok());

        let broken = [
            Theme::new('\0', '\0'),
            Theme {
                start_char: '|',
                end_char: '\0',
                fill_char: '\0',
            },
            Theme {
                start_char: '\0',
                end_char: '|',
                fill_char: '\0',
            },
            Theme {
                start_char: '\0',
                end_char: '\0',
                fill_char: '▓',
            },
        ];
        for theme in broken {
            assert!(matches!(
                BarConfig::from_options([BarOption::Theme(theme)]),
                Err(BarError::InvalidStyle(_))
            ));
        }
    }

    #[test]
    fn test_single_glyph_options() {
        let config = BarConfig::from_options([
            BarOption::BoundaryChar('['),
            BarOption::EndChar(']'),
            BarOption::FillChar('#'),
        ])
        .unwrap();
        assert_eq!(config.theme.start_char, '[');
        assert_eq!(config.theme.end_char, ']');
        assert_eq!(config.theme.fill_char, '#');

        assert!(BarConfig::from_options([BarOption::FillChar('\0')]).is_err());
        assert!(BarConfig::from_options([BarOption::StartChar('\0')]).is_err());
        assert!(BarConfig::from_options([BarOption::BoundaryChar('\0')]).is_err());
    }

    #[test]
    fn test_last_option_wins() {
        let config = BarConfig::from_options([
            BarOption::Width(10),
            BarOption::ShowPercentage(false),
            BarOption::Width(20),
            BarOption::ShowPercentage(true),
            BarOption::ShowElapsedTime(false),
        ])
        .unwrap();
        assert_eq!(config.width, 20);
        assert!(config.show_percentage);
        assert!(!config.show_elapsed_time);
    }

    #[test]
    fn test_first_invalid_option_fails() {
        // A later valid width does not rescue an earlier invalid one.
        let result = BarConfig::from_options([BarOption::Width(0), BarOption::Width(20)]);
        assert!(matches!(result, Err(BarError::InvalidWidth(0))));
    }
}
