// src/calculator.rs

//! Hotel ROI calculator.
//!
//! Plain arithmetic over a handful of operating assumptions. Percentages
//! are given as whole numbers (`75.0` means 75%).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const DAYS_PER_YEAR: f64 = 365.0;
const IRR_MULTIPLIER: f64 = 1.2;

/// Operating assumptions for one property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    pub budget: f64,
    pub rooms: u32,
    /// Average daily rate
    pub adr: f64,
    pub occupancy_pct: f64,
    pub management_fee_pct: f64,
    pub capex_pct: f64,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            budget: 50_000_000.0,
            rooms: 150,
            adr: 500.0,
            occupancy_pct: 75.0,
            management_fee_pct: 8.0,
            capex_pct: 15.0,
        }
    }
}

impl CalculatorInputs {
    /// Reject negative inputs and percentages above 100.
    pub fn validate(&self) -> Result<()> {
        if self.budget < 0.0 || self.adr < 0.0 {
            return Err(AppError::validation("budget and ADR must not be negative"));
        }
        for (name, pct) in [
            ("occupancy", self.occupancy_pct),
            ("management fee", self.management_fee_pct),
            ("capex", self.capex_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(AppError::validation(format!(
                    "{name} must be between 0 and 100, got {pct}"
                )));
            }
        }
        Ok(())
    }
}

/// Calculator output. Ratios are `None` when their denominator is not
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub annual_revenue: f64,
    pub management_cost: f64,
    pub capex_cost: f64,
    pub net_operating_income: f64,
    pub gross_yield_pct: Option<f64>,
    pub irr_pct: Option<f64>,
    pub break_even_years: Option<f64>,
}

pub fn calculate_roi(inputs: &CalculatorInputs) -> RoiResult {
    let annual_revenue =
        f64::from(inputs.rooms) * inputs.adr * DAYS_PER_YEAR * (inputs.occupancy_pct / 100.0);
    let management_cost = annual_revenue * (inputs.management_fee_pct / 100.0);
    let capex_cost = inputs.budget * (inputs.capex_pct / 100.0);
    let net_operating_income = annual_revenue - management_cost - capex_cost;

    let gross_yield_pct =
        (inputs.budget > 0.0).then(|| net_operating_income / inputs.budget * 100.0);
    let break_even_years =
        (net_operating_income > 0.0).then(|| inputs.budget / net_operating_income);

    RoiResult {
        annual_revenue,
        management_cost,
        capex_cost,
        net_operating_income,
        gross_yield_pct,
        irr_pct: gross_yield_pct.map(|y| y * IRR_MULTIPLIER),
        break_even_years,
    }
}

/// A named example scenario.
///
/// Presets describe the property only. Management fee and capex stay at
/// whatever the caller already has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub budget: f64,
    pub rooms: u32,
    pub adr: f64,
    pub occupancy_pct: f64,
}

impl Preset {
    /// Overlay the preset's property values onto `base`.
    pub fn apply(&self, base: CalculatorInputs) -> CalculatorInputs {
        CalculatorInputs {
            budget: self.budget,
            rooms: self.rooms,
            adr: self.adr,
            occupancy_pct: self.occupancy_pct,
            ..base
        }
    }
}

const fn preset(
    name: &'static str,
    budget: f64,
    rooms: u32,
    adr: f64,
    occupancy_pct: f64,
) -> Preset {
    Preset {
        name,
        budget,
        rooms,
        adr,
        occupancy_pct,
    }
}

pub const PRESETS: [Preset; 4] = [
    preset("Riyadh Business", 45_000_000.0, 180, 450.0, 78.0),
    preset("NEOM Luxury", 120_000_000.0, 250, 1200.0, 85.0),
    preset("Jeddah Boutique", 28_000_000.0, 85, 380.0, 72.0),
    preset("Red Sea Resort", 85_000_000.0, 200, 950.0, 82.0),
];

/// Look up a preset by name, ignoring case and surrounding whitespace.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let wanted = name.trim().to_lowercase();
    PRESETS.iter().find(|p| p.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_default_inputs() {
        let result = calculate_roi(&CalculatorInputs::default());

        // 150 * 500 * 365 * 0.75
        assert!(close(result.annual_revenue, 20_531_250.0));
        assert!(close(result.management_cost, 1_642_500.0));
        assert!(close(result.capex_cost, 7_500_000.0));
        assert!(close(result.net_operating_income, 11_388_750.0));

        let gross = result.gross_yield_pct.unwrap();
        assert!(close(gross, 22.7775));
        assert!(close(result.irr_pct.unwrap(), 22.7775 * 1.2));
        assert!(close(result.break_even_years.unwrap(), 50_000_000.0 / 11_388_750.0));
    }

    #[test]
    fn test_zero_budget_has_no_ratios() {
        let inputs = CalculatorInputs {
            budget: 0.0,
            ..CalculatorInputs::default()
        };
        let result = calculate_roi(&inputs);
        assert_eq!(result.gross_yield_pct, None);
        assert_eq!(result.irr_pct, None);
        assert_eq!(result.capex_cost, 0.0);
    }

    #[test]
    fn test_negative_noi_has_no_break_even() {
        let inputs = CalculatorInputs {
            occupancy_pct: 0.0,
            ..CalculatorInputs::default()
        };
        let result = calculate_roi(&inputs);
        assert!(result.net_operating_income < 0.0);
        assert_eq!(result.break_even_years, None);
        assert!(result.gross_yield_pct.unwrap() < 0.0);
    }

    #[test]
    fn test_presets() {
        assert_eq!(PRESETS.len(), 4);
        let neom = find_preset("  neom luxury ").unwrap();
        assert_eq!(neom.rooms, 250);
        assert!(find_preset("Mars Colony").is_none());

        for preset in &PRESETS {
            let inputs = preset.apply(CalculatorInputs::default());
            assert!(inputs.validate().is_ok(), "{}", preset.name);
            assert!(calculate_roi(&inputs).net_operating_income > 0.0);
        }
    }

    #[test]
    fn test_preset_keeps_fee_and_capex() {
        let base = CalculatorInputs {
            management_fee_pct: 12.0,
            capex_pct: 5.0,
            ..CalculatorInputs::default()
        };
        let inputs = find_preset("Jeddah Boutique").unwrap().apply(base);

        assert_eq!(inputs.budget, 28_000_000.0);
        assert_eq!(inputs.rooms, 85);
        assert_eq!(inputs.adr, 380.0);
        assert_eq!(inputs.occupancy_pct, 72.0);
        assert_eq!(inputs.management_fee_pct, 12.0);
        assert_eq!(inputs.capex_pct, 5.0);
    }

    #[test]
    fn test_validate_rejects_bad_percentages() {
        let inputs = CalculatorInputs {
            occupancy_pct: 120.0,
            ..CalculatorInputs::default()
        };
        assert!(inputs.validate().is_err());

        let negative = CalculatorInputs {
            budget: -1.0,
            ..CalculatorInputs::default()
        };
        assert!(negative.validate().is_err());
    }
}
