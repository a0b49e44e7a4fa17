use crate::model::{ArmsCategory, ArmsDefinition, QualityProfile, World};

/// Fixed starting roster, one row per entry: name, category, tags,
/// manufacturer, base price (thousands), quality attributes, unit
/// weight (tonnes), required tech level.
type RosterRow = (
    &'static str,
    ArmsCategory,
    &'static [&'static str],
    &'static str,
    f64,
    (u8, u8, u8, u8),
    Option<f64>,
    Option<u8>,
);

const ROSTER: &[RosterRow] = &[
    (
        "KR-7 battle rifle",
        ArmsCategory::SmallArms,
        &["infantry", "7.62mm"],
        "Koval Arms",
        1.2,
        (60, 80, 70, 50),
        Some(0.004),
        None,
    ),
    (
        "VZ-9 machine pistol",
        ArmsCategory::SmallArms,
        &["infantry", "sidearm"],
        "Zbrojovka Vostok",
        0.6,
        (45, 70, 85, 40),
        Some(0.003),
        None,
    ),
    (
        "D-155 towed howitzer",
        ArmsCategory::Artillery,
        &["towed", "155mm"],
        "Uralmash",
        420.0,
        (75, 70, 30, 45),
        Some(7.2),
        Some(2),
    ),
    (
        "T-70 main battle tank",
        ArmsCategory::Armor,
        &["tracked", "125mm"],
        "Uralmash",
        1800.0,
        (70, 70, 70, 70),
        Some(41.5),
        Some(4),
    ),
    (
        "BMV-2 infantry carrier",
        ArmsCategory::Armor,
        &["tracked", "amphibious"],
        "Kharkov Plant 183",
        650.0,
        (50, 65, 80, 55),
        Some(14.0),
        Some(3),
    ),
    (
        "SA-11 air defense battery",
        ArmsCategory::AirDefense,
        &["radar-guided", "mobile"],
        "Almaz Design Bureau",
        5200.0,
        (80, 60, 55, 85),
        Some(34.0),
        Some(6),
    ),
    (
        "MiG-31V interceptor",
        ArmsCategory::CombatAircraft,
        &["supersonic", "interceptor"],
        "Sokol Aviation",
        14_000.0,
        (85, 55, 90, 80),
        Some(21.8),
        Some(7),
    ),
    (
        "Mi-28 attack helicopter",
        ArmsCategory::Helicopters,
        &["gunship", "anti-tank"],
        "Rostvertol",
        8500.0,
        (80, 60, 75, 70),
        Some(8.6),
        Some(5),
    ),
    (
        "Project 1241 missile boat",
        ArmsCategory::NavalVessels,
        &["coastal", "missile"],
        "Vympel Shipyard",
        22_000.0,
        (70, 65, 60, 60),
        Some(469.0),
        Some(5),
    ),
    (
        "Spear-9 guided missile",
        ArmsCategory::Missiles,
        &["guided", "anti-tank"],
        "Valtec Dynamics",
        95.0,
        (85, 75, 60, 90),
        Some(0.03),
        Some(6),
    ),
    (
        "RL-4 targeting radar",
        ArmsCategory::Electronics,
        &["fire-control", "radar"],
        "Fazotron",
        780.0,
        (40, 70, 50, 95),
        Some(1.1),
        Some(6),
    ),
    (
        "7.62mm ball, crated",
        ArmsCategory::Ammunition,
        &["7.62mm", "bulk"],
        "Koval Arms",
        0.3,
        (55, 85, 50, 35),
        Some(0.3),
        None,
    ),
];

/// Load the fixed starting roster into the world's catalog. Definition
/// ids come from the shared generator, like every other entity.
pub fn stock_catalog(world: &mut World) {
    for (name, category, tags, manufacturer, base_price, quality, unit_weight, tech) in ROSTER {
        let id = world.id_gen.next_id();
        let (firepower, reliability, mobility, technology) = *quality;
        world.catalog.insert(ArmsDefinition {
            id,
            name: (*name).to_string(),
            category: *category,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            manufacturer: (*manufacturer).to_string(),
            base_price: *base_price,
            quality: QualityProfile::new(firepower, reliability, mobility, technology),
            unit_weight: *unit_weight,
            required_tech_level: *tech,
        });
    }
}
