//! Dialect conversion of positional tags.

use crate::error::ConvertError;

use super::tag::{Dialect, Faction, PositionalTag};

/// Rewrite `tag` into `dialect`.
///
/// | input     | Newer                                  | Older              |
/// |-----------|----------------------------------------|--------------------|
/// | with race | caller faction if given, else input's  | race digit dropped |
/// | race-less | caller faction (required)              | unchanged          |
/// | other     | unchanged                              | unchanged          |
pub fn convert(
    tag: &str,
    dialect: Dialect,
    faction: Option<Faction>,
) -> Result<String, ConvertError> {
    let converted = match (PositionalTag::parse(tag), dialect) {
        (PositionalTag::WithRace { fields, faction: own }, Dialect::Newer) => {
            fields.render(Some(faction.unwrap_or(own)))
        }
        (PositionalTag::WithRace { fields, .. }, Dialect::Older) => fields.render(None),
        (PositionalTag::WithoutRace { fields }, Dialect::Newer) => {
            let faction = faction.ok_or_else(|| ConvertError::MissingFaction {
                tag: tag.to_string(),
            })?;
            fields.render(Some(faction))
        }
        (PositionalTag::WithoutRace { .. }, Dialect::Older) => tag.to_string(),
        (PositionalTag::Unrecognized(raw), _) => raw.to_string(),
    };
    Ok(converted)
}

/// Like [`convert`], but `fallback` only fills in the race digit of
/// race-less tags. With-race tags keep their own digit.
pub fn convert_keeping_race(
    tag: &str,
    dialect: Dialect,
    fallback: Option<Faction>,
) -> Result<String, ConvertError> {
    let faction = match PositionalTag::parse(tag) {
        PositionalTag::WithRace { .. } => None,
        PositionalTag::WithoutRace { .. } | PositionalTag::Unrecognized(_) => fallback,
    };
    convert(tag, dialect, faction)
}

/// [`convert`] over every tag, keeping order and length.
pub fn convert_batch<S: AsRef<str>>(
    tags: &[S],
    dialect: Dialect,
    faction: Option<Faction>,
) -> Result<Vec<String>, ConvertError> {
    tags.iter()
        .map(|tag| convert(tag.as_ref(), dialect, faction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_RACE: &str = "[pos:Rock;1 210050000 123.4 56.7 89.0 0]";
    const RACE_LESS: &str = "[pos:Rock;210050000 123.4 56.7 89.0 0]";

    #[test]
    fn with_race_to_older_drops_digit() {
        assert_eq!(convert(WITH_RACE, Dialect::Older, None).unwrap(), RACE_LESS);
        assert_eq!(
            convert(WITH_RACE, Dialect::Older, Some(Faction::Elyos)).unwrap(),
            RACE_LESS
        );
    }

    #[test]
    fn race_less_to_newer_inserts_caller_faction() {
        assert_eq!(
            convert(RACE_LESS, Dialect::Newer, Some(Faction::Elyos)).unwrap(),
            "[pos:Rock;0 210050000 123.4 56.7 89.0 0]"
        );
    }

    #[test]
    fn with_race_to_newer_keeps_digit_without_override() {
        assert_eq!(convert(WITH_RACE, Dialect::Newer, None).unwrap(), WITH_RACE);
    }

    #[test]
    fn caller_faction_overrides_existing_digit() {
        assert_eq!(
            convert(WITH_RACE, Dialect::Newer, Some(Faction::Elyos)).unwrap(),
            "[pos:Rock;0 210050000 123.4 56.7 89.0 0]"
        );
    }

    #[test]
    fn race_less_to_older_is_byte_identical() {
        let spaced = "[pos:Rock;210050000   1\t2 3 0]";
        assert_eq!(convert(spaced, Dialect::Older, None).unwrap(), spaced);
    }

    #[test]
    fn whitespace_around_a_tag_survives_conversion() {
        assert_eq!(
            convert("[pos:Rock;1 210050000 123.4 56.7 89.0 0] ", Dialect::Older, None).unwrap(),
            "[pos:Rock;210050000 123.4 56.7 89.0 0] "
        );
        assert_eq!(
            convert("\t[pos:Rock;210050000 1 2 3 0]", Dialect::Newer, Some(Faction::Elyos))
                .unwrap(),
            "\t[pos:Rock;0 210050000 1 2 3 0]"
        );
    }

    #[test]
    fn fallback_faction_only_fills_race_less_tags() {
        let elyos_tag = "[pos:Rock;0 210050000 1 2 3 0]";
        assert_eq!(
            convert_keeping_race(elyos_tag, Dialect::Newer, Some(Faction::Asmodian)).unwrap(),
            elyos_tag
        );
        assert_eq!(
            convert_keeping_race(RACE_LESS, Dialect::Newer, Some(Faction::Asmodian)).unwrap(),
            "[pos:Rock;1 210050000 123.4 56.7 89.0 0]"
        );
        assert_eq!(
            convert_keeping_race(WITH_RACE, Dialect::Older, Some(Faction::Elyos)).unwrap(),
            RACE_LESS
        );
        assert!(convert_keeping_race(RACE_LESS, Dialect::Newer, None).is_err());
    }

    #[test]
    fn race_less_to_newer_without_faction_is_rejected() {
        let err = convert(RACE_LESS, Dialect::Newer, None).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingFaction {
                tag: RACE_LESS.to_string()
            }
        );
    }

    #[test]
    fn unrecognized_input_passes_through() {
        for raw in ["", "hello", "[pos:Rock;12 1 2 3 0]", "[pos:Rock;0 1 2 3]"] {
            for dialect in [Dialect::Newer, Dialect::Older] {
                for faction in [None, Some(Faction::Elyos), Some(Faction::Asmodian)] {
                    assert_eq!(convert(raw, dialect, faction).unwrap(), raw);
                }
            }
        }
    }

    #[test]
    fn batch_preserves_order_and_length() {
        let tags = [WITH_RACE, "junk", RACE_LESS];
        let out = convert_batch(&tags, Dialect::Older, None).unwrap();
        assert_eq!(out, vec![RACE_LESS, "junk", RACE_LESS]);

        let empty: [&str; 0] = [];
        assert!(convert_batch(&empty, Dialect::Newer, None).unwrap().is_empty());
    }
}
