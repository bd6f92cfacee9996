//! Tunable game constants.
//!
//! [`GameConstants`] is an immutable value handed to the map generator and
//! the turn resolver at construction. `Default` yields the reference rule
//! set; every number here is configuration, not business logic.

/// What a unit may count toward the cost of converting into a dropoff.
///
/// The reference rules gate conversion on the player's bank plus the floor
/// resource under the unit, ignoring the unit's own cargo. That looks like a
/// defect but is kept as the default so trained agents see the reference
/// economy; `BankFloorAndCargo` is the corrected alternative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropoffFunding {
    /// `bank + floor >= dropoff_cost` (reference behaviour).
    #[default]
    BankAndFloor,
    /// `bank + floor + carried >= dropoff_cost`.
    BankFloorAndCargo,
}

/// Rule constants consumed by the map generator and the turn resolver.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConstants {
    /// Cost of converting a unit into a dropoff. Default: 4000.
    pub dropoff_cost: u64,
    /// Which resources count toward `dropoff_cost`.
    pub dropoff_funding: DropoffFunding,
    /// A unit may move only if `carried >= floor / move_cost_ratio`. Default: 10.
    pub move_cost_ratio: u32,
    /// Move gate divisor for a unit inspired on the previous tick. Default: 10.
    pub inspired_move_cost_ratio: u32,
    /// A unit extracts `ceil(floor / extract_ratio)` per tick. Default: 4.
    pub extract_ratio: u32,
    /// Extraction divisor while inspired. Default: 4.
    pub inspired_extract_ratio: u32,
    /// Inspired units gain `extracted * multiplier` on top of the extracted
    /// amount; the bonus is created, not taken from the floor. Default: 2.0.
    pub inspired_bonus_multiplier: f64,
    /// Cost of spawning a unit. Default: 1000.
    pub new_entity_cost: u64,
    /// Maximum resource a unit can carry. Default: 1000.
    pub max_carry: u32,
    /// Columns scanned on either side of a unit for inspiration. Default: 6.
    pub inspiration_half_width: u32,
    /// Rows scanned above and below a unit for inspiration. Default: 5.
    pub inspiration_half_height: u32,
    /// Bank balance every player starts with. Default: 5000.
    pub starting_bank: u64,
    /// Lower bound of the per-map production ceiling. Default: 900.
    pub min_cell_production: u32,
    /// Upper bound of the per-map production ceiling. Default: 1000.
    pub max_cell_production: u32,
    /// Amplitude falloff between noise octaves. Default: 0.7.
    pub persistence: f64,
    /// Reward subtracted for each failed action. Default: 0.1.
    pub invalid_action_penalty: f64,
    /// Reward granted per unit of banked resource, every tick. Default: 0.0005.
    pub bank_reward_coefficient: f64,
    /// Episode length on the smallest map (32). Default: 400.
    pub min_turns: u32,
    /// Episode length on the largest map (64). Default: 500.
    pub max_turns: u32,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            dropoff_cost: 4000,
            dropoff_funding: DropoffFunding::BankAndFloor,
            move_cost_ratio: 10,
            inspired_move_cost_ratio: 10,
            extract_ratio: 4,
            inspired_extract_ratio: 4,
            inspired_bonus_multiplier: 2.0,
            new_entity_cost: 1000,
            max_carry: 1000,
            inspiration_half_width: 6,
            inspiration_half_height: 5,
            starting_bank: 5000,
            min_cell_production: 900,
            max_cell_production: 1000,
            persistence: 0.7,
            invalid_action_penalty: 0.1,
            bank_reward_coefficient: 0.0005,
            min_turns: 400,
            max_turns: 500,
        }
    }
}

impl GameConstants {
    /// Check that every constant is usable.
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        let ratios = [
            ("move_cost_ratio", self.move_cost_ratio),
            ("inspired_move_cost_ratio", self.inspired_move_cost_ratio),
            ("extract_ratio", self.extract_ratio),
            ("inspired_extract_ratio", self.inspired_extract_ratio),
        ];
        for (name, value) in ratios {
            if value == 0 {
                return Err(format!("{name} must be at least 1"));
            }
        }
        if self.max_carry == 0 {
            return Err("max_carry must be at least 1".to_string());
        }
        if !self.inspired_bonus_multiplier.is_finite() || self.inspired_bonus_multiplier < 0.0 {
            return Err(format!(
                "inspired_bonus_multiplier must be finite and >= 0, got {}",
                self.inspired_bonus_multiplier
            ));
        }
        if self.min_cell_production > self.max_cell_production {
            return Err(format!(
                "min_cell_production ({}) exceeds max_cell_production ({})",
                self.min_cell_production, self.max_cell_production
            ));
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(format!(
                "persistence must be finite and positive, got {}",
                self.persistence
            ));
        }
        for (name, value) in [
            ("invalid_action_penalty", self.invalid_action_penalty),
            ("bank_reward_coefficient", self.bank_reward_coefficient),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        if self.min_turns > self.max_turns {
            return Err(format!(
                "min_turns ({}) exceeds max_turns ({})",
                self.min_turns, self.max_turns
            ));
        }
        Ok(())
    }

    /// Episode length for a square map of side `side`, interpolated
    /// linearly between `min_turns` at 32 and `max_turns` at 64.
    pub fn turn_limit(&self, side: u32) -> u32 {
        let span = u64::from(self.max_turns - self.min_turns);
        let over = u64::from(side.clamp(32, 64) - 32);
        self.min_turns + u32::try_from(over * span / 32).unwrap_or(u32::MAX)
    }
}
