//! Top-level view state: one analysis request slot, primary navigation, and
//! the secondary analysis tab synchronized from it.

use crate::model::CompanyData;

pub const ANALYSIS_LOADING_CAPTION: &str = "Analyzing company data...";

/// Primary navigation destinations. Reports currently aliases the analysis
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Analysis,
    News,
    Valuation,
    Reports,
}

impl NavTab {
    pub fn label(self) -> &'static str {
        match self {
            NavTab::Analysis => "Company Analysis",
            NavTab::News => "Market News",
            NavTab::Valuation => "Valuation Models",
            NavTab::Reports => "Generate Report",
        }
    }
}

/// Secondary tabs within the analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTab {
    Overview,
    Financials,
    Ratios,
    News,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPhase {
    Idle,
    Loading,
    Error(String),
    Ready(CompanyData),
}

/// Identifies the in-flight request a response belongs to. A token minted by
/// an earlier `submit` goes stale the moment a newer one is issued, so a slow
/// response can never overwrite the state of a later request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub(crate) fn with_generation(generation: u64) -> Self {
        Self { generation }
    }

    pub(crate) fn generation(self) -> u64 {
        self.generation
    }
}

/// Which screen the current state renders to.
#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    Dashboard,
    Loading,
    Error(&'a str),
    Analysis(&'a CompanyData),
    Valuation(&'a CompanyData),
}

#[derive(Debug)]
pub struct AnalysisController {
    phase: AnalysisPhase,
    nav: NavTab,
    tab: AnalysisTab,
    generation: u64,
}

impl Default for AnalysisController {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisController {
    pub fn new() -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            nav: NavTab::Analysis,
            tab: AnalysisTab::Overview,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    pub fn nav(&self) -> NavTab {
        self.nav
    }

    pub fn tab(&self) -> AnalysisTab {
        self.tab
    }

    pub fn company_data(&self) -> Option<&CompanyData> {
        match &self.phase {
            AnalysisPhase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AnalysisPhase::Loading
    }

    /// Start a new analysis request. Clears any prior error and data,
    /// force-selects the primary navigation tab and the overview sub-tab, and
    /// returns the token the eventual response must present.
    pub fn submit(&mut self) -> RequestToken {
        self.generation += 1;
        self.phase = AnalysisPhase::Loading;
        self.nav = NavTab::Analysis;
        self.tab = AnalysisTab::Overview;
        RequestToken {
            generation: self.generation,
        }
    }

    /// Complete the request identified by `token`. A stale token (a newer
    /// request has started since) is discarded and the call returns false.
    pub fn resolve(&mut self, token: RequestToken, data: CompanyData) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = AnalysisPhase::Ready(data);
        true
    }

    /// Fail the request identified by `token`; stale tokens are discarded.
    pub fn reject(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.phase = AnalysisPhase::Error(message.into());
        true
    }

    fn accepts(&self, token: RequestToken) -> bool {
        token.generation == self.generation && self.phase == AnalysisPhase::Loading
    }

    /// Dismiss the error screen back to the idle dashboard.
    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, AnalysisPhase::Error(_)) {
            self.phase = AnalysisPhase::Idle;
        }
    }

    /// Select a primary navigation tab. The secondary tab follows one way:
    /// News selects the news sub-tab, Analysis and Reports reset to the
    /// overview, Valuation leaves it untouched.
    pub fn select_nav(&mut self, nav: NavTab) {
        self.nav = nav;
        match nav {
            NavTab::News => self.tab = AnalysisTab::News,
            NavTab::Analysis | NavTab::Reports => self.tab = AnalysisTab::Overview,
            NavTab::Valuation => {}
        }
    }

    pub fn select_tab(&mut self, tab: AnalysisTab) {
        self.tab = tab;
    }

    /// The screen the current state renders to.
    pub fn screen(&self) -> Screen<'_> {
        match &self.phase {
            AnalysisPhase::Loading => Screen::Loading,
            AnalysisPhase::Error(message) => Screen::Error(message),
            AnalysisPhase::Idle => Screen::Dashboard,
            AnalysisPhase::Ready(data) => match self.nav {
                NavTab::Valuation => Screen::Valuation(data),
                _ => Screen::Analysis(data),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinancialStatement, ValuationAssumptions};

    fn sample_data(name: &str) -> CompanyData {
        CompanyData {
            company_name: name.to_string(),
            ticker: name.to_uppercase(),
            currency: "USD".into(),
            summary: String::new(),
            income_statement: FinancialStatement::new(),
            balance_sheet: FinancialStatement::new(),
            cash_flow_statement: FinancialStatement::new(),
            ratios: vec![],
            ratio_history: vec![],
            news: vec![],
            valuation_assumptions: ValuationAssumptions {
                revenue_growth_rate: 5.0,
                ebitda_margin: 20.0,
                tax_rate: 25.0,
                capex_as_percentage_of_revenue: 4.0,
                depreciation_as_percentage_of_revenue: 3.0,
                change_in_working_capital_as_percentage_of_revenue: 1.0,
                terminal_growth_rate: 2.0,
                discount_rate: 9.0,
            },
        }
    }

    #[test]
    fn submit_enters_loading_and_resets_navigation() {
        let mut controller = AnalysisController::new();
        controller.select_nav(NavTab::News);
        let _token = controller.submit();
        assert!(controller.is_loading());
        assert_eq!(controller.nav(), NavTab::Analysis);
        assert_eq!(controller.tab(), AnalysisTab::Overview);
        assert_eq!(controller.screen(), Screen::Loading);
    }

    #[test]
    fn resolve_moves_loading_to_ready_with_overview_tab() {
        let mut controller = AnalysisController::new();
        controller.select_tab(AnalysisTab::Ratios);
        let token = controller.submit();
        assert!(controller.resolve(token, sample_data("acme")));
        assert_eq!(controller.nav(), NavTab::Analysis);
        assert_eq!(controller.tab(), AnalysisTab::Overview);
        assert!(matches!(controller.screen(), Screen::Analysis(data) if data.company_name == "acme"));
    }

    #[test]
    fn reject_moves_loading_to_error_and_dismiss_returns_to_idle() {
        let mut controller = AnalysisController::new();
        let token = controller.submit();
        assert!(controller.reject(token, "something broke"));
        assert_eq!(controller.screen(), Screen::Error("something broke"));
        controller.dismiss_error();
        assert_eq!(controller.screen(), Screen::Dashboard);
    }

    #[test]
    fn stale_resolve_is_discarded() {
        let mut controller = AnalysisController::new();
        let stale = controller.submit();
        let fresh = controller.submit();
        assert!(!controller.resolve(stale, sample_data("stale")));
        assert!(controller.is_loading());
        assert!(controller.resolve(fresh, sample_data("fresh")));
        assert!(matches!(controller.screen(), Screen::Analysis(data) if data.company_name == "fresh"));
    }

    #[test]
    fn stale_reject_cannot_clobber_a_newer_result() {
        let mut controller = AnalysisController::new();
        let stale = controller.submit();
        let fresh = controller.submit();
        assert!(controller.resolve(fresh, sample_data("fresh")));
        assert!(!controller.reject(stale, "late failure"));
        assert!(matches!(controller.screen(), Screen::Analysis(_)));
    }

    #[test]
    fn submitting_again_clears_previous_data() {
        let mut controller = AnalysisController::new();
        let token = controller.submit();
        assert!(controller.resolve(token, sample_data("acme")));
        controller.submit();
        assert!(controller.company_data().is_none());
        assert!(controller.is_loading());
    }

    #[test]
    fn nav_selection_syncs_the_analysis_tab_one_way() {
        let mut controller = AnalysisController::new();
        let token = controller.submit();
        assert!(controller.resolve(token, sample_data("acme")));

        controller.select_nav(NavTab::News);
        assert_eq!(controller.tab(), AnalysisTab::News);

        controller.select_nav(NavTab::Valuation);
        assert_eq!(controller.tab(), AnalysisTab::News);
        assert!(matches!(controller.screen(), Screen::Valuation(_)));

        controller.select_nav(NavTab::Reports);
        assert_eq!(controller.tab(), AnalysisTab::Overview);
        assert!(matches!(controller.screen(), Screen::Analysis(_)));
    }

    #[test]
    fn manual_tab_selection_is_free_within_ready() {
        let mut controller = AnalysisController::new();
        let token = controller.submit();
        assert!(controller.resolve(token, sample_data("acme")));
        controller.select_tab(AnalysisTab::Financials);
        assert_eq!(controller.tab(), AnalysisTab::Financials);
    }
}
