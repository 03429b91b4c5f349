use std::collections::HashSet;
use std::fmt;

use crate::encode::MAX_FIELD_LEN;
use crate::*;

/// Validation error for malformed or dangling data in a `WorldDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
    ShadowedVariant { room: RoomNumber, index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
            ValidationError::ShadowedVariant { room, index } => {
                write!(f, "room {room} variant {index} can never match: an earlier variant requires nothing")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and encoding limits in a `WorldDef`.
///
/// ```
/// use dialquest_data::{ExitsDef, GameDef, RoomDef, VariantDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef { title: "Demo".into(), author: String::new(), start_room: 1 },
///     rooms: vec![RoomDef {
///         number: 1,
///         title: "Start".into(),
///         variants: vec![VariantDef {
///             desc: "A room.".into(),
///             exits: ExitsDef::default(),
///             ..VariantDef::default()
///         }],
///     }],
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut rooms = HashSet::new();

    for room in &world.rooms {
        if room.number == 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("room '{}' uses reserved number 0", room.title),
            });
        }
        if !rooms.insert(room.number) {
            errors.push(ValidationError::DuplicateId {
                kind: "room",
                id: room.number.to_string(),
            });
        }
    }

    check_ref(
        world.game.start_room,
        &rooms,
        "game start room".to_string(),
        &mut errors,
    );

    for room in &world.rooms {
        validate_room(room, &rooms, &mut errors);
    }

    errors
}

fn validate_room(room: &RoomDef, rooms: &HashSet<RoomNumber>, errors: &mut Vec<ValidationError>) {
    check_len(room.title.len(), format!("room {} title", room.number), errors);
    if room.variants.is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: format!("room {} has no variants", room.number),
        });
    }

    let mut catch_all_seen = false;
    for (index, variant) in room.variants.iter().enumerate() {
        let context = format!("room {} variant {index}", room.number);
        if catch_all_seen {
            errors.push(ValidationError::ShadowedVariant {
                room: room.number,
                index,
            });
        }
        catch_all_seen |= variant.is_catch_all();

        check_len(variant.requires.len(), format!("{context} required items"), errors);
        check_len(variant.desc.len(), format!("{context} description"), errors);
        check_len(variant.grants.len(), format!("{context} granted items"), errors);
        if variant.requires.iter().chain(&variant.grants).any(|id| *id == 0) {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} uses reserved item id 0"),
            });
        }
        for (direction, to) in variant.exits.iter_present() {
            check_ref(to, rooms, format!("{context} exit '{direction}'"), errors);
        }
    }
}

fn check_len(len: usize, context: String, errors: &mut Vec<ValidationError>) {
    if len > MAX_FIELD_LEN {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} is {len} long (max {MAX_FIELD_LEN})"),
        });
    }
}

fn check_ref(id: RoomNumber, set: &HashSet<RoomNumber>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(&id) {
        errors.push(ValidationError::MissingReference {
            kind: "room",
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(number: RoomNumber, variants: Vec<VariantDef>) -> RoomDef {
        RoomDef {
            number,
            title: format!("Room {number}"),
            variants,
        }
    }

    fn world(start_room: RoomNumber, rooms: Vec<RoomDef>) -> WorldDef {
        WorldDef {
            game: GameDef {
                title: "Test".into(),
                author: String::new(),
                start_room,
            },
            rooms,
        }
    }

    #[test]
    fn dangling_exit_is_reported() {
        let variant = VariantDef {
            exits: ExitsDef {
                east: 9,
                ..ExitsDef::default()
            },
            ..VariantDef::default()
        };
        let errors = validate_world(&world(1, vec![room(1, vec![variant])]));
        assert_eq!(
            errors,
            vec![ValidationError::MissingReference {
                kind: "room",
                id: "9".into(),
                context: "room 1 variant 0 exit 'east'".into(),
            }]
        );
    }

    #[test]
    fn duplicate_and_missing_start_room() {
        let errors = validate_world(&world(
            5,
            vec![room(1, vec![VariantDef::default()]), room(1, vec![VariantDef::default()])],
        ));
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: "room",
            id: "1".into()
        }));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingReference { id, .. } if id == "5")));
    }

    #[test]
    fn catch_all_before_gated_variant_is_flagged() {
        let gated = VariantDef {
            requires: vec![4],
            ..VariantDef::default()
        };
        let errors = validate_world(&world(1, vec![room(1, vec![VariantDef::default(), gated])]));
        assert_eq!(errors, vec![ValidationError::ShadowedVariant { room: 1, index: 1 }]);
    }

    #[test]
    fn reserved_ids_and_lengths_are_flagged() {
        let bad = VariantDef {
            grants: vec![0],
            desc: "y".repeat(300),
            ..VariantDef::default()
        };
        let errors = validate_world(&world(1, vec![room(1, vec![bad]), room(0, vec![VariantDef::default()])]));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn world_parses_from_toml() {
        let src = r#"
            [game]
            title = "Cellar"

            [[rooms]]
            number = 32
            title = "Stairs"

            [[rooms.variants]]
            desc = "Stone steps."
            exits = { north = 32 }
        "#;
        let world: WorldDef = toml::from_str(src).unwrap();
        assert_eq!(world.game.start_room, DEFAULT_START_ROOM);
        assert!(validate_world(&world).is_empty());
        assert_eq!(world.room(32).unwrap().variants[0].exits.north, 32);
    }
}
