use chrono::Local;
use colog::format::CologStyle;
use colored::Colorize;
use log::{Level, LevelFilter};

pub struct Logger;

impl Logger {
    /// `MICROMOUSE_LOG` overrides the level given on the command line
    pub fn init(level: LevelFilter) {
        let mut builder = colog::default_builder();
        builder.format(colog::formatter(TimestampStyle));
        builder.filter_level(level);
        builder.parse_env(env_logger::Env::default().filter("MICROMOUSE_LOG"));
        builder.init();
    }
}

struct TimestampStyle;

impl CologStyle for TimestampStyle {
    fn prefix_token(&self, level: &Level) -> String {
        format!(
            "{} {}{}{}",
            Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
            "[".blue().bold(),
            self.level_color(level, self.level_token(level)),
            "]".blue().bold()
        )
    }
}
