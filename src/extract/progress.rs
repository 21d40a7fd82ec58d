use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Duration: (\d{2}):(\d{2}):(\d{2})\.(\d{2})").expect("valid duration pattern")
});

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"time=(\d{2}):(\d{2}):(\d{2})\.(\d{2})").expect("valid time pattern")
});

/// Substring that marks an encoder-level failure in the diagnostic stream.
const ERROR_MARKER: &str = "Error";

/// What one diagnostic line meant for the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A current-time marker resolved to a completion percentage.
    Progress(u8),
    /// The line signals an encoder failure; stop processing the stream.
    EncoderError,
    /// Nothing actionable (header noise, or a time marker before the
    /// duration is known).
    Ignored,
}

/// Line-oriented state machine over ffmpeg's merged diagnostic stream.
/// Holds exactly two pieces of state: the total duration (resolved at most
/// once from the first duration announcement) and the last emitted percent,
/// which never decreases within a job.
#[derive(Debug, Default)]
pub struct ProgressParser {
    duration: Option<f64>,
    last_percent: u8,
}

impl ProgressParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, line: &str) -> LineOutcome {
        if self.duration.is_none() && line.contains("Duration:") {
            if let Some(total) = parse_timestamp(&DURATION_RE, line) {
                self.duration = Some(total);
            }
        }

        let mut progress = None;
        if let Some(duration) = self.duration {
            if duration > 0.0 && line.contains("time=") {
                if let Some(current) = parse_timestamp(&TIME_RE, line) {
                    let percent = ((current / duration) * 100.0).floor().min(100.0) as u8;
                    self.last_percent = self.last_percent.max(percent);
                    progress = Some(self.last_percent);
                }
            }
        }

        if line.contains(ERROR_MARKER) {
            return LineOutcome::EncoderError;
        }

        match progress {
            Some(percent) => LineOutcome::Progress(percent),
            None => LineOutcome::Ignored,
        }
    }

    pub fn last_percent(&self) -> u8 {
        self.last_percent
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }
}

/// Extract `HH:MM:SS.cc` fixed-width fields and fold them into seconds.
fn parse_timestamp(re: &Regex, line: &str) -> Option<f64> {
    let caps = re.captures(line)?;
    let field = |i| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Some(field(1) * 3600.0 + field(2) * 60.0 + field(3) + field(4) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_time_marker_yields_fifty_percent() {
        let mut parser = ProgressParser::new();
        assert_eq!(
            parser.advance("  Duration: 00:01:00.00, start: 0.000000, bitrate: 1234 kb/s"),
            LineOutcome::Ignored
        );
        assert_eq!(
            parser.advance("size=512kB time=00:00:30.00 bitrate=139.8kbits/s speed=30x"),
            LineOutcome::Progress(50)
        );
    }

    #[test]
    fn percent_is_capped_at_one_hundred() {
        let mut parser = ProgressParser::new();
        parser.advance("  Duration: 00:01:00.00");
        assert_eq!(
            parser.advance("time=00:01:30.00"),
            LineOutcome::Progress(100)
        );
    }

    #[test]
    fn percents_are_non_decreasing() {
        let mut parser = ProgressParser::new();
        parser.advance("  Duration: 00:02:00.00");
        let mut last = 0;
        for line in [
            "time=00:00:10.00",
            "time=00:00:30.00",
            "time=00:00:30.00",
            "time=00:01:00.00",
            "time=00:01:59.99",
        ] {
            if let LineOutcome::Progress(p) = parser.advance(line) {
                assert!(p >= last, "{p} < {last}");
                last = p;
            }
        }
        assert_eq!(last, 99);
    }

    #[test]
    fn duration_is_captured_at_most_once() {
        let mut parser = ProgressParser::new();
        parser.advance("  Duration: 00:01:00.00");
        parser.advance("  Duration: 00:10:00.00");
        assert_eq!(parser.duration(), Some(60.0));
        assert_eq!(
            parser.advance("time=00:00:30.00"),
            LineOutcome::Progress(50)
        );
    }

    #[test]
    fn no_progress_without_duration() {
        let mut parser = ProgressParser::new();
        assert_eq!(parser.advance("time=00:00:30.00"), LineOutcome::Ignored);
        assert_eq!(parser.last_percent(), 0);
    }

    #[test]
    fn error_marker_short_circuits() {
        let mut parser = ProgressParser::new();
        parser.advance("  Duration: 00:01:00.00");
        assert_eq!(
            parser.advance("Error while decoding stream #0:1: Invalid data"),
            LineOutcome::EncoderError
        );
    }

    #[test]
    fn header_noise_is_ignored() {
        let mut parser = ProgressParser::new();
        assert_eq!(
            parser.advance("ffmpeg version 6.1 Copyright (c) 2000-2023"),
            LineOutcome::Ignored
        );
        assert_eq!(
            parser.advance("  Stream #0:1(und): Audio: aac (LC)"),
            LineOutcome::Ignored
        );
    }
}
