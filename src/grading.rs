//! Final grade computation.

use std::fmt;

/// Letter grade derived from a whole-number percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

/// Lowest percentage for each grade, best first.
const GRADE_BREAKPOINTS: [(u32, LetterGrade); 12] = [
    (97, LetterGrade::APlus),
    (93, LetterGrade::A),
    (90, LetterGrade::AMinus),
    (87, LetterGrade::BPlus),
    (83, LetterGrade::B),
    (80, LetterGrade::BMinus),
    (77, LetterGrade::CPlus),
    (73, LetterGrade::C),
    (70, LetterGrade::CMinus),
    (67, LetterGrade::DPlus),
    (63, LetterGrade::D),
    (60, LetterGrade::DMinus),
];

impl LetterGrade {
    pub fn from_percentage(percentage: u32) -> Self {
        GRADE_BREAKPOINTS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map_or(LetterGrade::F, |(_, grade)| *grade)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative band used for the results headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Outstanding,
    Excellent,
    Good,
    KeepPracticing,
    RoomForImprovement,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Tier::Outstanding,
            80..=89 => Tier::Excellent,
            70..=79 => Tier::Good,
            60..=69 => Tier::KeepPracticing,
            _ => Tier::RoomForImprovement,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::Outstanding => "Outstanding Performance!",
            Tier::Excellent => "Excellent Work!",
            Tier::Good => "Good Job!",
            Tier::KeepPracticing => "Keep Practicing!",
            Tier::RoomForImprovement => "Room for Improvement!",
        }
    }
}

/// Summary of a finished exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: LetterGrade,
    pub tier: Tier,
}

impl Report {
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = rounded_percentage(score, total);
        Self {
            score,
            total,
            percentage,
            grade: LetterGrade::from_percentage(percentage),
            tier: Tier::from_percentage(percentage),
        }
    }
}

/// `round(score / total * 100)` with halves rounded up, in integer math.
fn rounded_percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (score * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
