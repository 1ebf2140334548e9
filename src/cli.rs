use std::time::Duration;

use clap::Parser;
use clap_complete::Shell;

use consolebar::BarOption;

use crate::demo::DemoConfig;

/// Draw a console progress bar
#[derive(Parser, Debug)]
#[command(name = "consolebar", version, about)]
pub struct Cli {
    /// Value at which the bar is full
    #[arg(short = 'm', long, default_value_t = 100, allow_negative_numbers = true)]
    pub max: i64,

    /// Number of slots in the track
    #[arg(short = 'w', long, default_value_t = 50, allow_negative_numbers = true)]
    pub width: i64,

    /// Pause between updates in milliseconds
    #[arg(short = 'd', long = "delay-ms", default_value_t = 30)]
    pub delay_ms: u64,

    /// Worker threads sharing one bar (1 = sequential updates)
    #[arg(short = 't', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub threads: u16,

    /// Glyph for filled slots
    #[arg(long, default_value_t = '▓')]
    pub fill: char,

    /// Glyph on both ends of the track
    #[arg(long, default_value_t = '|')]
    pub boundary: char,

    /// Hide the percentage
    #[arg(long = "no-percentage")]
    pub no_percentage: bool,

    /// Hide the elapsed time
    #[arg(long = "no-time")]
    pub no_time: bool,

    /// Generate shell completions
    #[arg(long = "generate-completion", value_name = "SHELL")]
    pub completion: Option<Shell>,
}

impl Cli {
    pub fn bar_options(&self) -> Vec<BarOption> {
        vec![
            BarOption::Width(self.width),
            BarOption::BoundaryChar(self.boundary),
            BarOption::FillChar(self.fill),
            BarOption::ShowPercentage(!self.no_percentage),
            BarOption::ShowElapsedTime(!self.no_time),
        ]
    }

    pub fn to_config(&self) -> DemoConfig {
        DemoConfig {
            max: self.max,
            delay: Duration::from_millis(self.delay_ms),
            threads: usize::from(self.threads),
            options: self.bar_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["consolebar"]);
        assert_eq!(cli.max, 100);
        assert_eq!(cli.width, 50);
        assert_eq!(cli.delay_ms, 30);
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.fill, '▓');
        assert_eq!(cli.boundary, '|');
        assert!(cli.completion.is_none());

        let config = cli.to_config();
        assert_eq!(config.delay, Duration::from_millis(30));
        assert_eq!(
            config.options,
            vec![
                BarOption::Width(50),
                BarOption::BoundaryChar('|'),
                BarOption::FillChar('▓'),
                BarOption::ShowPercentage(true),
                BarOption::ShowElapsedTime(true),
            ]
        );
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "consolebar",
            "-m",
            "20",
            "-w",
            "10",
            "-t",
            "4",
            "--fill",
            "#",
            "--boundary",
            "!",
            "--no-percentage",
            "--no-time",
        ]);
        let config = cli.to_config();
        assert_eq!(config.max, 20);
        assert_eq!(config.threads, 4);
        assert!(config.options.contains(&BarOption::FillChar('#')));
        assert!(config.options.contains(&BarOption::BoundaryChar('!')));
        assert!(config.options.contains(&BarOption::ShowPercentage(false)));
        assert!(config.options.contains(&BarOption::ShowElapsedTime(false)));
    }

    #[test]
    fn test_rejects_zero_threads() {
        assert!(Cli::try_parse_from(["consolebar", "--threads", "0"]).is_err());
    }

    #[test]
    fn test_negative_max_reaches_validation() {
        let cli = Cli::parse_from(["consolebar", "--max", "-5"]);
        assert_eq!(cli.max, -5);
    }
}
