//! Universal tooth numbering: arch layout, names, and tooth types.

use std::borrow::Cow;

use crate::models::ToothNumber;

/// Upper arch, left to right as drawn (patient's right first).
pub const UNIVERSAL_UPPER: [ToothNumber; 16] =
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

/// Lower arch, left to right as drawn.
pub const UNIVERSAL_LOWER: [ToothNumber; 16] =
    [32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17];

const TOOTH_NAMES: [&str; 32] = [
    "UR 3rd Molar",
    "UR 2nd Molar",
    "UR 1st Molar",
    "UR 2nd Premolar",
    "UR 1st Premolar",
    "UR Canine",
    "UR Lateral Incisor",
    "UR Central Incisor",
    "UL Central Incisor",
    "UL Lateral Incisor",
    "UL Canine",
    "UL 1st Premolar",
    "UL 2nd Premolar",
    "UL 1st Molar",
    "UL 2nd Molar",
    "UL 3rd Molar",
    "LL 3rd Molar",
    "LL 2nd Molar",
    "LL 1st Molar",
    "LL 2nd Premolar",
    "LL 1st Premolar",
    "LL Canine",
    "LL Lateral Incisor",
    "LL Central Incisor",
    "LR Central Incisor",
    "LR Lateral Incisor",
    "LR Canine",
    "LR 1st Premolar",
    "LR 2nd Premolar",
    "LR 1st Molar",
    "LR 2nd Molar",
    "LR 3rd Molar",
];

/// Anatomical tooth class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToothType {
    Molar,
    Premolar,
    Canine,
    Incisor,
}

/// Whether a tooth sits in the standard Universal range.
pub fn is_standard_tooth(tooth: ToothNumber) -> bool {
    (1..=32).contains(&tooth)
}

/// Upper teeth are 1..=16. Anything else draws as a lower tooth.
pub fn is_upper(tooth: ToothNumber) -> bool {
    (1..=16).contains(&tooth)
}

/// Display name, e.g. "UL 1st Molar". Non-standard numbers get a generic
/// name rather than an error.
pub fn tooth_name_for(tooth: ToothNumber) -> Cow<'static, str> {
    if is_standard_tooth(tooth) {
        Cow::Borrowed(TOOTH_NAMES[(tooth - 1) as usize])
    } else {
        Cow::Owned(format!("Tooth {}", tooth))
    }
}

/// Tooth class for a standard tooth number.
pub fn tooth_type_for(tooth: ToothNumber) -> Option<ToothType> {
    if !is_standard_tooth(tooth) {
        return None;
    }
    // Position from the distal end of each quadrant: 0..=7.
    let index = (tooth - 1) % 16;
    let from_distal = if index < 8 { index } else { 15 - index };
    Some(match from_distal {
        0..=2 => ToothType::Molar,
        3 | 4 => ToothType::Premolar,
        5 => ToothType::Canine,
        _ => ToothType::Incisor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooth_names() {
        assert_eq!(tooth_name_for(14), "UL 1st Molar");
        assert_eq!(tooth_name_for(19), "LL 1st Molar");
        assert_eq!(tooth_name_for(32), "LR 3rd Molar");
        assert_eq!(tooth_name_for(0), "Tooth 0");
        assert_eq!(tooth_name_for(51), "Tooth 51");
    }

    #[test]
    fn test_arches_cover_all_teeth_once() {
        let mut all: Vec<ToothNumber> = UNIVERSAL_UPPER
            .iter()
            .chain(UNIVERSAL_LOWER.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=32).collect::<Vec<_>>());
        assert!(UNIVERSAL_UPPER.iter().all(|t| is_upper(*t)));
        assert!(UNIVERSAL_LOWER.iter().all(|t| !is_upper(*t)));
    }

    #[test]
    fn test_tooth_types_match_names() {
        for tooth in 1..=32 {
            let name = tooth_name_for(tooth);
            let expected = match tooth_type_for(tooth).unwrap() {
                ToothType::Molar => "Molar",
                ToothType::Premolar => "Premolar",
                ToothType::Canine => "Canine",
                ToothType::Incisor => "Incisor",
            };
            assert!(name.ends_with(expected), "{tooth}: {name} vs {expected}");
        }
        assert_eq!(tooth_type_for(40), None);
    }
}
