use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{normalize_text, Reference};
use crate::error::AppError;
use crate::listing::{group_by_key, Identified, Searchable};
use crate::wizard::{require, WizardForm};

// ── Status ──────────────────────────────────────────────────────────

/// Case status; the closed set the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaseStatus {
    #[default]
    #[serde(rename = "Em andamento")]
    EmAndamento,
    #[serde(rename = "Finalizado")]
    Finalizado,
    #[serde(rename = "Arquivado")]
    Arquivado,
}

/// Every status, in the order list pages render their sections.
pub const CASE_STATUSES: &[CaseStatus] = &[
    CaseStatus::EmAndamento,
    CaseStatus::Finalizado,
    CaseStatus::Arquivado,
];

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::EmAndamento => "Em andamento",
            CaseStatus::Finalizado => "Finalizado",
            CaseStatus::Arquivado => "Arquivado",
        }
    }

    /// Parse a status label, ignoring case and accents.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize_text(s);
        CASE_STATUSES
            .iter()
            .copied()
            .find(|status| normalize_text(status.as_str()) == wanted)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ──────────────────────────────────────────────────────────

/// A forensic case ("caso").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caso_referencia: Option<String>,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub estado: String,
}

impl Case {
    pub fn responsavel_label(&self) -> &str {
        self.responsavel.as_ref().map(Reference::label).unwrap_or("—")
    }

    /// "Cidade/UF", or whichever half is present.
    pub fn location(&self) -> String {
        match (self.cidade.trim(), self.estado.trim()) {
            ("", "") => String::new(),
            (c, "") => c.to_string(),
            ("", e) => e.to_string(),
            (c, e) => format!("{c}/{e}"),
        }
    }
}

impl Identified for Case {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Case {
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.title,
            self.description,
            self.caso_referencia.as_deref().unwrap_or_default(),
            self.cidade,
            self.responsavel_label()
        )
    }
}

/// Cases split into status sections, in [`CASE_STATUSES`] order.
pub fn group_by_status(cases: &[Case]) -> Vec<(CaseStatus, Vec<Case>)> {
    group_by_key(cases, CASE_STATUSES, |c| c.status)
}

// ── Reference code ──────────────────────────────────────────────────

/// Format a case reference code: `CR-<year>-<3 digits>`.
pub fn reference_code(year: i32, sequence: u16) -> String {
    format!("CR-{:04}-{:03}", year, sequence % 1000)
}

/// A fresh reference code for the current UTC year with a random suffix.
pub fn generate_reference_code() -> String {
    let sequence = (uuid::Uuid::new_v4().as_u128() % 1000) as u16;
    reference_code(Utc::now().year(), sequence)
}

/// Whether `code` has the shape `CR-<4 digits>-<3 digits>`.
pub fn is_reference_code(code: &str) -> bool {
    let parts: Vec<&str> = code.split('-').collect();
    matches!(parts.as_slice(), ["CR", year, seq]
        if year.len() == 4
            && seq.len() == 3
            && year.chars().all(|c| c.is_ascii_digit())
            && seq.chars().all(|c| c.is_ascii_digit()))
}

// ── Requests ────────────────────────────────────────────────────────

/// Payload for `POST /api/cases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    pub responsavel: String,
    pub cidade: String,
    pub estado: String,
    pub caso_referencia: String,
}

/// Payload for `PUT /api/cases/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCaseRequest {
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<String>,
    pub cidade: String,
    pub estado: String,
}

impl From<&Case> for UpdateCaseRequest {
    fn from(c: &Case) -> Self {
        Self {
            title: c.title.trim().to_string(),
            description: c.description.trim().to_string(),
            status: c.status,
            responsavel: c.responsavel.as_ref().map(|r| r.id().to_string()),
            cidade: c.cidade.trim().to_string(),
            estado: c.estado.trim().to_string(),
        }
    }
}

// ── Intake wizard ───────────────────────────────────────────────────

/// Case intake wizard: identification, responsible party, location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseIntakeForm {
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    pub responsavel: String,
    pub cidade: String,
    pub estado: String,
}

impl WizardForm for CaseIntakeForm {
    const STEPS: &'static [&'static str] = &["Identificação", "Responsável", "Localização"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            0 => {
                require(&mut missing, "title", &self.title);
                require(&mut missing, "description", &self.description);
            }
            1 => require(&mut missing, "responsavel", &self.responsavel),
            2 => {
                require(&mut missing, "cidade", &self.cidade);
                require(&mut missing, "estado", &self.estado);
            }
            _ => {}
        }
        missing
    }
}

impl CaseIntakeForm {
    /// Build the creation payload with the given reference code.
    pub fn to_request(&self, caso_referencia: String) -> Result<CreateCaseRequest, AppError> {
        let missing = self.all_missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        Ok(CreateCaseRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            responsavel: self.responsavel.trim().to_string(),
            cidade: self.cidade.trim().to_string(),
            estado: self.estado.trim().to_string(),
            caso_referencia,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> CaseIntakeForm {
        CaseIntakeForm {
            title: "T".to_string(),
            description: "D".to_string(),
            status: CaseStatus::EmAndamento,
            responsavel: "R".to_string(),
            cidade: "C".to_string(),
            estado: "E".to_string(),
        }
    }

    #[test]
    fn status_serializes_to_portuguese_labels() {
        assert_eq!(
            serde_json::to_value(CaseStatus::EmAndamento).unwrap(),
            "Em andamento"
        );
        let parsed: CaseStatus = serde_json::from_str(r#""Arquivado""#).unwrap();
        assert_eq!(parsed, CaseStatus::Arquivado);
        assert_eq!(CaseStatus::parse("em ANDAMENTO"), Some(CaseStatus::EmAndamento));
        assert_eq!(CaseStatus::parse("aberto"), None);
    }

    #[test]
    fn case_deserializes_with_populated_responsavel() {
        let case: Case = serde_json::from_str(
            r#"{"_id":"c1","title":"Ossada","status":"Finalizado",
                "responsavel":{"_id":"u1","nome":"Dr. Reis"},
                "casoReferencia":"CR-2024-007","cidade":"Recife","estado":"PE",
                "dataCriacao":"2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(case.status, CaseStatus::Finalizado);
        assert_eq!(case.responsavel_label(), "Dr. Reis");
        assert_eq!(case.location(), "Recife/PE");
        assert_eq!(case.description, "");
    }

    #[test]
    fn grouping_omits_empty_statuses() {
        let mk = |id: &str, status| Case {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            status,
            responsavel: None,
            data_criacao: None,
            caso_referencia: None,
            cidade: String::new(),
            estado: String::new(),
        };
        let cases = vec![
            mk("a", CaseStatus::Arquivado),
            mk("b", CaseStatus::EmAndamento),
            mk("c", CaseStatus::EmAndamento),
        ];
        let groups = group_by_status(&cases);
        let order: Vec<CaseStatus> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![CaseStatus::EmAndamento, CaseStatus::Arquivado]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn reference_code_shape() {
        assert_eq!(reference_code(2025, 7), "CR-2025-007");
        assert_eq!(reference_code(2025, 1234), "CR-2025-234");
        assert!(is_reference_code("CR-2025-007"));
        assert!(!is_reference_code("CR-25-007"));
        assert!(!is_reference_code("CR-2025-07"));
        assert!(!is_reference_code("XX-2025-007"));
        for _ in 0..50 {
            assert!(is_reference_code(&generate_reference_code()));
        }
    }

    #[test]
    fn intake_steps_require_their_fields() {
        let mut form = CaseIntakeForm::default();
        assert_eq!(form.missing_fields(0), vec!["title", "description"]);
        assert_eq!(form.missing_fields(1), vec!["responsavel"]);
        assert_eq!(form.missing_fields(2), vec!["cidade", "estado"]);
        form.title = "T".to_string();
        assert!(!form.step_complete(0));
        form.description = "D".to_string();
        assert!(form.step_complete(0));
    }

    #[test]
    fn intake_request_has_exactly_the_seven_fields() {
        let req = filled().to_request("CR-2025-042".to_string()).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["casoReferencia", "cidade", "description", "estado", "responsavel", "status", "title"]
        );
        assert_eq!(json["status"], "Em andamento");
        assert_eq!(json["casoReferencia"], "CR-2025-042");
    }

    #[test]
    fn incomplete_intake_is_rejected_before_sending() {
        let mut form = filled();
        form.estado = " ".to_string();
        let err = form.to_request("CR-2025-001".to_string()).unwrap_err();
        assert!(err.field_errors.contains_key("estado"));
    }

    #[test]
    fn update_request_uses_reference_id() {
        let case = Case {
            id: "c1".to_string(),
            title: " Novo título ".to_string(),
            description: String::new(),
            status: CaseStatus::Arquivado,
            responsavel: Some(Reference::Populated(crate::common::RecordSummary {
                id: "u9".to_string(),
                label: Some("Dra. Paz".to_string()),
            })),
            data_criacao: None,
            caso_referencia: None,
            cidade: "Natal".to_string(),
            estado: "RN".to_string(),
        };
        let req = UpdateCaseRequest::from(&case);
        assert_eq!(req.title, "Novo título");
        assert_eq!(req.responsavel.as_deref(), Some("u9"));
    }
}
