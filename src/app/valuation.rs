//! Valuation screen state: an independent request slot plus the editable
//! assumption set, seeded from the loaded company data.

use crate::app::state::RequestToken;
use crate::model::{CompanyData, ValuationAssumptions, ValuationReport};

pub const VALUATION_LOADING_CAPTION: &str = "Performing Multi-Model Valuation...";

/// The eight independently editable assumption inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssumptionField {
    RevenueGrowthRate,
    EbitdaMargin,
    TaxRate,
    CapexAsPercentageOfRevenue,
    DepreciationAsPercentageOfRevenue,
    ChangeInWorkingCapitalAsPercentageOfRevenue,
    TerminalGrowthRate,
    DiscountRate,
}

impl AssumptionField {
    pub const ALL: [AssumptionField; 8] = [
        AssumptionField::RevenueGrowthRate,
        AssumptionField::EbitdaMargin,
        AssumptionField::TaxRate,
        AssumptionField::CapexAsPercentageOfRevenue,
        AssumptionField::DepreciationAsPercentageOfRevenue,
        AssumptionField::ChangeInWorkingCapitalAsPercentageOfRevenue,
        AssumptionField::TerminalGrowthRate,
        AssumptionField::DiscountRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssumptionField::RevenueGrowthRate => "Revenue Growth Rate",
            AssumptionField::EbitdaMargin => "EBITDA Margin",
            AssumptionField::TaxRate => "Tax Rate",
            AssumptionField::CapexAsPercentageOfRevenue => "Capex as % of Revenue",
            AssumptionField::DepreciationAsPercentageOfRevenue => "Depreciation as % of Revenue",
            AssumptionField::ChangeInWorkingCapitalAsPercentageOfRevenue => "Δ NWC as % of Revenue",
            AssumptionField::TerminalGrowthRate => "Terminal Growth Rate",
            AssumptionField::DiscountRate => "Discount Rate (WACC)",
        }
    }

    pub fn get(self, assumptions: &ValuationAssumptions) -> f64 {
        match self {
            AssumptionField::RevenueGrowthRate => assumptions.revenue_growth_rate,
            AssumptionField::EbitdaMargin => assumptions.ebitda_margin,
            AssumptionField::TaxRate => assumptions.tax_rate,
            AssumptionField::CapexAsPercentageOfRevenue => {
                assumptions.capex_as_percentage_of_revenue
            }
            AssumptionField::DepreciationAsPercentageOfRevenue => {
                assumptions.depreciation_as_percentage_of_revenue
            }
            AssumptionField::ChangeInWorkingCapitalAsPercentageOfRevenue => {
                assumptions.change_in_working_capital_as_percentage_of_revenue
            }
            AssumptionField::TerminalGrowthRate => assumptions.terminal_growth_rate,
            AssumptionField::DiscountRate => assumptions.discount_rate,
        }
    }

    fn set(self, assumptions: &mut ValuationAssumptions, value: f64) {
        match self {
            AssumptionField::RevenueGrowthRate => assumptions.revenue_growth_rate = value,
            AssumptionField::EbitdaMargin => assumptions.ebitda_margin = value,
            AssumptionField::TaxRate => assumptions.tax_rate = value,
            AssumptionField::CapexAsPercentageOfRevenue => {
                assumptions.capex_as_percentage_of_revenue = value
            }
            AssumptionField::DepreciationAsPercentageOfRevenue => {
                assumptions.depreciation_as_percentage_of_revenue = value
            }
            AssumptionField::ChangeInWorkingCapitalAsPercentageOfRevenue => {
                assumptions.change_in_working_capital_as_percentage_of_revenue = value
            }
            AssumptionField::TerminalGrowthRate => assumptions.terminal_growth_rate = value,
            AssumptionField::DiscountRate => assumptions.discount_rate = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValuationPhase {
    Idle,
    Loading,
    Error(String),
    Ready(ValuationReport),
}

#[derive(Debug)]
pub struct ValuationController {
    assumptions: ValuationAssumptions,
    phase: ValuationPhase,
    generation: u64,
}

impl ValuationController {
    pub fn new(assumptions: ValuationAssumptions) -> Self {
        Self {
            assumptions,
            phase: ValuationPhase::Idle,
            generation: 0,
        }
    }

    /// Seed the assumption inputs from the model's suggestions in the loaded
    /// company data.
    pub fn from_company(data: &CompanyData) -> Self {
        Self::new(data.valuation_assumptions.clone())
    }

    pub fn assumptions(&self) -> &ValuationAssumptions {
        &self.assumptions
    }

    pub fn phase(&self) -> &ValuationPhase {
        &self.phase
    }

    pub fn report(&self) -> Option<&ValuationReport> {
        match &self.phase {
            ValuationPhase::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ValuationPhase::Loading
    }

    /// Edit one assumption input; no cross-field validation is enforced.
    pub fn set_assumption(&mut self, field: AssumptionField, value: f64) {
        field.set(&mut self.assumptions, value);
    }

    /// Start a valuation run. Clears any prior error and result.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.phase = ValuationPhase::Loading;
        RequestToken::with_generation(self.generation)
    }

    pub fn resolve(&mut self, token: RequestToken, report: ValuationReport) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = ValuationPhase::Ready(report);
        true
    }

    pub fn reject(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = ValuationPhase::Error(message.into());
        true
    }

    fn accepts(&self, token: RequestToken) -> bool {
        token.generation() == self.generation && self.phase == ValuationPhase::Loading
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, ValuationPhase::Error(_)) {
            self.phase = ValuationPhase::Idle;
        }
    }
}
