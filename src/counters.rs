/// `1 - (1 - progress)^4`, with progress clamped to `[0, 1]`.
pub fn ease_out_quart(progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - progress).powi(4)
}

/// Integer target and suffix declared on a stat element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTarget {
    pub value: Option<i64>,
    pub suffix: String,
}

impl CounterTarget {
    /// Reads the leading integer of `raw` the way a browser's `parseInt`
    /// does. Anything without leading digits leaves `value` empty and the
    /// counter renders `NaN`.
    pub fn parse(raw: &str, suffix: Option<&str>) -> Self {
        Self {
            value: parse_leading_int(raw),
            suffix: suffix.unwrap_or_default().to_string(),
        }
    }

    fn render(&self, eased: f64) -> String {
        match self.value {
            Some(target) => format!("{}{}", round_half_up(eased * target as f64) as i64, self.suffix),
            None => format!("NaN{}", self.suffix),
        }
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub finished: bool,
}

/// Counts one stat element from zero up to its target. The clock starts at the
/// first frame.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: CounterTarget,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterAnimation {
    pub fn new(target: CounterTarget, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    pub fn frame(&mut self, now_ms: f64) -> CounterFrame {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let progress = if self.duration_ms > 0.0 {
            ((now_ms - started_at) / self.duration_ms).min(1.0)
        } else {
            1.0
        };

        CounterFrame {
            text: self.target.render(ease_out_quart(progress)),
            finished: progress >= 1.0,
        }
    }

    /// Final text, for when motion is reduced.
    pub fn final_text(&self) -> String {
        self.target.render(1.0)
    }
}

/// One-shot latch shared by a group of counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnceGate {
    fired: bool,
}

impl OnceGate {
    /// Returns `true` the first time it is called and `false` afterwards.
    pub fn try_fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
