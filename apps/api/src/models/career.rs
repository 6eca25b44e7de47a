use serde::{Deserialize, Serialize};

/// The closed set of careers the classifier was trained on.
///
/// Declaration order is significant: it is the positional order of the
/// classifier's output and the tie-break order when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Career {
    BusinessAnalyst,
    DataScientist,
    FinancialAnalyst,
    MarketingSpecialist,
    ProductManager,
    ResearchScientist,
    SoftwareEngineer,
    UxDesigner,
}

impl Career {
    pub const COUNT: usize = 8;

    pub const ALL: [Career; Career::COUNT] = [
        Career::BusinessAnalyst,
        Career::DataScientist,
        Career::FinancialAnalyst,
        Career::MarketingSpecialist,
        Career::ProductManager,
        Career::ResearchScientist,
        Career::SoftwareEngineer,
        Career::UxDesigner,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Career::BusinessAnalyst => "Business Analyst",
            Career::DataScientist => "Data Scientist",
            Career::FinancialAnalyst => "Financial Analyst",
            Career::MarketingSpecialist => "Marketing Specialist",
            Career::ProductManager => "Product Manager",
            Career::ResearchScientist => "Research Scientist",
            Career::SoftwareEngineer => "Software Engineer",
            Career::UxDesigner => "UX Designer",
        }
    }

    /// Exact, case-sensitive lookup by display title.
    pub fn from_title(title: &str) -> Option<Self> {
        Career::ALL.into_iter().find(|c| c.title() == title)
    }

    /// Position in [`Career::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Career {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A single ranked career in the `/predict` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    pub confidence: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub careers: Vec<CareerRecommendation>,
    pub model_version: String,
}
