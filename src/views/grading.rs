use serde::Serialize;

use super::Tone;

pub fn grade(score: u8) -> &'static str {
    match score {
        90.. => "A+",
        80..=89 => "A",
        70..=79 => "B",
        60..=69 => "C",
        _ => "D",
    }
}

pub fn grade_tone(score: u8) -> Tone {
    match score {
        90.. => Tone::Success,
        80..=89 => Tone::Secondary,
        70..=79 => Tone::Primary,
        _ => Tone::Muted,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkBand {
    pub category: &'static str,
    pub min: u8,
    pub max: u8,
    pub tone: Tone,
}

pub static BENCHMARK_BANDS: [BenchmarkBand; 4] = [
    BenchmarkBand {
        category: "Beginner",
        min: 0,
        max: 60,
        tone: Tone::Muted,
    },
    BenchmarkBand {
        category: "Average",
        min: 60,
        max: 75,
        tone: Tone::Primary,
    },
    BenchmarkBand {
        category: "Good",
        min: 75,
        max: 85,
        tone: Tone::Secondary,
    },
    BenchmarkBand {
        category: "Excellent",
        min: 85,
        max: 100,
        tone: Tone::Success,
    },
];

impl BenchmarkBand {
    /// Bands are half-open so shared edges belong to the upper band; the top
    /// band also takes 100. Checking `min <= score <= max` instead would mark
    /// 60, 75 and 85 in two bands at once.
    pub fn contains(&self, score: u8) -> bool {
        score >= self.min && (score < self.max || (self.max == 100 && score == 100))
    }

    /// Share of the 0..100 axis this band covers.
    pub fn width_percent(&self) -> u8 {
        self.max - self.min
    }

    /// Marker position inside the band, 0.0 at `min` and 100.0 at `max`.
    pub fn marker_offset(&self, score: u8) -> Option<f32> {
        if !self.contains(score) {
            return None;
        }
        let span = f32::from(self.max - self.min);
        Some(f32::from(score - self.min) / span * 100.0)
    }
}

pub fn band_for(score: u8) -> &'static BenchmarkBand {
    BENCHMARK_BANDS
        .iter()
        .find(|band| band.contains(score))
        .unwrap_or(&BENCHMARK_BANDS[BENCHMARK_BANDS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds() {
        assert_eq!(grade(95), "A+");
        assert_eq!(grade(90), "A+");
        assert_eq!(grade(89), "A");
        assert_eq!(grade(82), "A");
        assert_eq!(grade(71), "B");
        assert_eq!(grade(60), "C");
        assert_eq!(grade(59), "D");
        assert_eq!(grade(45), "D");
        assert_eq!(grade(0), "D");
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(grade_tone(100), Tone::Success);
        assert_eq!(grade_tone(80), Tone::Secondary);
        assert_eq!(grade_tone(70), Tone::Primary);
        assert_eq!(grade_tone(69), Tone::Muted);
    }

    #[test]
    fn every_score_lands_in_exactly_one_band() {
        for score in 0..=100u8 {
            let hits = BENCHMARK_BANDS.iter().filter(|b| b.contains(score)).count();
            assert_eq!(hits, 1, "score {score}");
        }
    }

    #[test]
    fn band_edges() {
        assert_eq!(band_for(0).category, "Beginner");
        assert_eq!(band_for(59).category, "Beginner");
        assert_eq!(band_for(60).category, "Average");
        assert_eq!(band_for(75).category, "Good");
        assert_eq!(band_for(84).category, "Good");
        assert_eq!(band_for(85).category, "Excellent");
        assert_eq!(band_for(100).category, "Excellent");
    }

    #[test]
    fn marker_offsets() {
        let good = &BENCHMARK_BANDS[2];
        assert_eq!(good.marker_offset(80), Some(50.0));
        assert_eq!(good.marker_offset(75), Some(0.0));
        assert_eq!(good.marker_offset(90), None);
        assert_eq!(BENCHMARK_BANDS[3].marker_offset(100), Some(100.0));
        assert_eq!(
            BENCHMARK_BANDS.iter().map(BenchmarkBand::width_percent).sum::<u8>(),
            100
        );
    }
}
