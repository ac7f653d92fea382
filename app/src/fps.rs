/// counts frames and reports the count roughly once per second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last_report: f64,
    frames: u32,
}

impl FpsCounter {
    pub const REPORT_INTERVAL: f64 = 1.0;

    pub fn new(now: f64) -> Self {
        Self {
            last_report: now,
            frames: 0,
        }
    }

    /// counts the current frame. once at least `REPORT_INTERVAL` seconds passed since the last
    /// report returns the number of frames counted in between (the current one included) and
    /// starts over.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        if now - self.last_report < Self::REPORT_INTERVAL {
            return None;
        }
        self.last_report = now;
        Some(std::mem::take(&mut self.frames))
    }
}

pub fn format_title(title: &str, fps: u32, credit: Option<&str>) -> String {
    match credit {
        Some(credit) => format!("{title} ({fps} fps) - {credit}"),
        None => format!("{title} ({fps} fps)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_reports_once_per_interval() {
        let mut fps = FpsCounter::new(10.0);
        assert_eq!(fps.tick(10.2), None);
        assert_eq!(fps.tick(10.5), None);
        assert_eq!(fps.tick(10.9), None);
        assert_eq!(fps.tick(11.0), Some(4));

        // counter starts over after a report.
        assert_eq!(fps.tick(11.5), None);
        assert_eq!(fps.tick(12.1), Some(2));
    }

    #[test]
    fn test_fps_counter_long_stall_reports_single_frame() {
        let mut fps = FpsCounter::new(0.0);
        assert_eq!(fps.tick(5.0), Some(1));
    }

    #[test]
    fn test_format_title() {
        assert_eq!(format_title("demo", 60, None), "demo (60 fps)");
        assert_eq!(
            format_title("demo", 144, Some("made with love")),
            "demo (144 fps) - made with love"
        );
    }
}
