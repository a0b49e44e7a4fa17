/// Configuration for world generation.
pub struct WorldGenConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Number of countries to generate.
    pub num_countries: u32,
    /// Extra borders added beyond the connecting chain, as a fraction
    /// of country count.
    pub extra_border_fraction: f64,
    /// Percent chance (0–100) a generated country is expansionist.
    pub expansionist_percent: u32,
    /// Number of hire-able directors in the starting pool.
    pub num_directors: u32,
    /// Number of research facilities scattered across countries.
    pub num_facilities: u32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_countries: 20,
            extra_border_fraction: 0.5,
            expansionist_percent: 25,
            num_directors: 12,
            num_facilities: 6,
        }
    }
}
