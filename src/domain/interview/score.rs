//! Final score extraction

use std::fmt;

/// Numeric result pulled out of the interviewer's final feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub points: u32,
    pub max_points: u32,
}

impl FinalScore {
    /// Find the first "X/max" fraction in `feedback` with X <= max.
    ///
    /// Returns `None` when the interviewer did not state a usable score;
    /// the narrative feedback is still valid in that case.
    pub fn parse(feedback: &str, max_points: u32) -> Option<Self> {
        let bytes = feedback.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if !bytes[i].is_ascii_digit() || (i > 0 && bytes[i - 1].is_ascii_digit()) {
                i += 1;
                continue;
            }

            let (numerator, after_num) = read_number(bytes, i);
            let mut j = skip_spaces(bytes, after_num);
            if j < bytes.len() && bytes[j] == b'/' {
                j = skip_spaces(bytes, j + 1);
                if j < bytes.len() && bytes[j].is_ascii_digit() {
                    let (denominator, _) = read_number(bytes, j);
                    if let (Some(points), Some(max)) = (numerator, denominator) {
                        if max == max_points && points <= max {
                            return Some(Self {
                                points,
                                max_points,
                            });
                        }
                    }
                }
            }
            i = after_num;
        }

        None
    }

    /// Score as a percentage of the maximum
    pub fn percent(&self) -> f64 {
        if self.max_points == 0 {
            return 0.0;
        }
        self.points as f64 / self.max_points as f64 * 100.0
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.points, self.max_points)
    }
}

/// Parse the digit run starting at `start`; `None` on overflow
fn read_number(bytes: &[u8], start: usize) -> (Option<u32>, usize) {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let value = std::str::from_utf8(&bytes[start..end])
        .ok()
        .and_then(|s| s.parse().ok());
    (value, end)
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos] == b' ' {
        pos += 1;
    }
    pos
}
