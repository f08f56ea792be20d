use serde::{Deserialize, Serialize};

/// One bar of a dashboard series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(alias = "_id", alias = "nome", alias = "name")]
    pub label: String,
    #[serde(alias = "count", alias = "quantidade")]
    pub total: u64,
}

/// Dimension a dashboard chart is broken down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardFilter {
    #[default]
    Status,
    EvidenceKind,
    Sex,
    BodyCondition,
    City,
}

pub const DASHBOARD_FILTERS: &[DashboardFilter] = &[
    DashboardFilter::Status,
    DashboardFilter::EvidenceKind,
    DashboardFilter::Sex,
    DashboardFilter::BodyCondition,
    DashboardFilter::City,
];

impl DashboardFilter {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardFilter::Status => "Status do caso",
            DashboardFilter::EvidenceKind => "Tipo de evidência",
            DashboardFilter::Sex => "Sexo",
            DashboardFilter::BodyCondition => "Estado do corpo",
            DashboardFilter::City => "Cidade",
        }
    }
}

/// Aggregate payload of `GET /api/dashboardRoutes`. Every dimension arrives
/// in one response; switching filters is local.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub total_casos: u64,
    pub total_evidencias: u64,
    pub total_vitimas: u64,
    pub total_laudos: u64,
    pub por_status: Vec<SeriesPoint>,
    pub por_tipo_evidencia: Vec<SeriesPoint>,
    pub por_sexo: Vec<SeriesPoint>,
    pub por_estado_corpo: Vec<SeriesPoint>,
    pub por_cidade: Vec<SeriesPoint>,
}

impl DashboardData {
    pub fn series(&self, filter: DashboardFilter) -> &[SeriesPoint] {
        match filter {
            DashboardFilter::Status => &self.por_status,
            DashboardFilter::EvidenceKind => &self.por_tipo_evidencia,
            DashboardFilter::Sex => &self.por_sexo,
            DashboardFilter::BodyCondition => &self.por_estado_corpo,
            DashboardFilter::City => &self.por_cidade,
        }
    }

    pub fn series_total(&self, filter: DashboardFilter) -> u64 {
        self.series(filter).iter().map(|p| p.total).sum()
    }
}

/// Whole-number share of `value` in `total`, rounded half up.
pub fn share_percent(value: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        (value.min(total) * 200 + total) / (total * 2)
    }
}
