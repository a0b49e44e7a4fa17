use rand::Rng;
use rand::RngCore;

use crate::model::World;

const COUNTRY_ROOTS: &[&str] = &[
    "Velast", "Orvan", "Kestr", "Zanher", "Tavrid", "Moldav", "Bryzan", "Caldes", "Norven",
    "Ashkar", "Durest", "Galtan", "Herzog", "Ivern", "Jotak", "Lusern", "Mardan", "Ostrev",
    "Pravik", "Quessa", "Rudnik", "Sevall", "Tirgan", "Ulvar", "Varnas",
];

const COUNTRY_SUFFIXES: &[&str] = &["ia", "a", "istan", "land", "ra", "en"];

/// Generate a random country name, e.g. "Velastia".
pub fn generate_country_name(rng: &mut dyn RngCore) -> String {
    let root = COUNTRY_ROOTS[rng.random_range(0..COUNTRY_ROOTS.len())];
    let suffix = COUNTRY_SUFFIXES[rng.random_range(0..COUNTRY_SUFFIXES.len())];
    format!("{root}{suffix}")
}

/// Generate a country name unique in the world.
/// Falls back to a numbered name after 5 attempts.
pub fn generate_unique_country_name(world: &World, rng: &mut dyn RngCore) -> String {
    for _ in 0..5 {
        let name = generate_country_name(rng);
        if !world.countries.values().any(|c| c.name == name) {
            return name;
        }
    }
    format!("{} {}", generate_country_name(rng), world.countries.len() + 1)
}

const GIVEN_NAMES: &[&str] = &[
    "Adaeze", "Bogdan", "Celeste", "Dmitri", "Efua", "Farid", "Greta", "Hassan", "Ingrid",
    "Jelena", "Kwame", "Lucia", "Mateusz", "Nadia", "Oskar", "Priya", "Ravi", "Sigrun", "Tomas",
    "Yusuf",
];

const FAMILY_NAMES: &[&str] = &[
    "Okafor", "Halvorsen", "Petrov", "Szabo", "Mensah", "Lindqvist", "Moreau", "Castellanos",
    "Farouk", "Novak", "Virtanen", "Duarte", "Kowalski", "Abara", "Stanev", "Reyes",
];

/// Generate a director name, e.g. "Dr. Ingrid Novak".
pub fn generate_director_name(rng: &mut dyn RngCore) -> String {
    let given = GIVEN_NAMES[rng.random_range(0..GIVEN_NAMES.len())];
    let family = FAMILY_NAMES[rng.random_range(0..FAMILY_NAMES.len())];
    format!("Dr. {given} {family}")
}

const FACILITY_QUALIFIERS: &[&str] = &[
    "Northern", "Central", "Coastal", "Highland", "Eastern", "Western", "State", "National",
];

const FACILITY_TYPES: &[&str] = &["Institute", "Works", "Design Bureau", "Proving Ground", "Labs"];

/// Generate a facility name, e.g. "Northern Design Bureau".
pub fn generate_facility_name(rng: &mut dyn RngCore) -> String {
    let qualifier = FACILITY_QUALIFIERS[rng.random_range(0..FACILITY_QUALIFIERS.len())];
    let kind = FACILITY_TYPES[rng.random_range(0..FACILITY_TYPES.len())];
    format!("{qualifier} {kind}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn names_are_deterministic_per_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        assert_eq!(generate_country_name(&mut a), generate_country_name(&mut b));
        assert_eq!(
            generate_director_name(&mut a),
            generate_director_name(&mut b)
        );
    }
}
