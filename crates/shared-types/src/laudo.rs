use serde::{Deserialize, Serialize};

use crate::common::Reference;
use crate::error::AppError;
use crate::listing::{Identified, Searchable};
use crate::wizard::{require, WizardForm};

/// An expert finding ("laudo") tied to a victim and a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laudo {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub evidencias: Vec<Reference>,
    #[serde(default)]
    pub vitima: Option<Reference>,
    #[serde(default)]
    pub caso: Option<Reference>,
    #[serde(default)]
    pub perito: Option<Reference>,
    #[serde(default)]
    pub dados_antemortem: String,
    #[serde(default)]
    pub dados_postmortem: String,
    #[serde(default)]
    pub analise_lesoes: String,
    #[serde(default)]
    pub conclusao: String,
    #[serde(default)]
    pub data_criacao: Option<String>,
    /// Base64 signature blob produced by the server when the laudo is signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assinatura_digital: Option<String>,
}

impl Laudo {
    pub fn is_signed(&self) -> bool {
        self.assinatura_digital
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    pub fn caso_label(&self) -> &str {
        self.caso.as_ref().map(Reference::label).unwrap_or("—")
    }

    pub fn vitima_label(&self) -> &str {
        self.vitima.as_ref().map(Reference::label).unwrap_or("—")
    }

    pub fn perito_label(&self) -> &str {
        self.perito.as_ref().map(Reference::label).unwrap_or("—")
    }
}

impl Identified for Laudo {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Laudo {
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.caso_label(),
            self.vitima_label(),
            self.perito_label(),
            self.conclusao
        )
    }
}

/// Payload for `POST /api/laudo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaudoRequest {
    pub evidencias: Vec<String>,
    pub vitima: String,
    pub caso: String,
    pub perito: String,
    pub dados_antemortem: String,
    pub dados_postmortem: String,
    pub analise_lesoes: String,
    pub conclusao: String,
}

/// Laudo wizard: links, examination, conclusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaudoForm {
    pub caso: String,
    pub vitima: String,
    pub evidencias: Vec<String>,
    pub dados_antemortem: String,
    pub dados_postmortem: String,
    pub analise_lesoes: String,
    pub conclusao: String,
}

impl WizardForm for LaudoForm {
    const STEPS: &'static [&'static str] = &["Vínculos", "Exame", "Conclusão"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            0 => {
                require(&mut missing, "caso", &self.caso);
                require(&mut missing, "vitima", &self.vitima);
                if self.evidencias.is_empty() {
                    missing.push("evidencias");
                }
            }
            1 => {
                require(&mut missing, "dadosAntemortem", &self.dados_antemortem);
                require(&mut missing, "dadosPostmortem", &self.dados_postmortem);
                require(&mut missing, "analiseLesoes", &self.analise_lesoes);
            }
            2 => require(&mut missing, "conclusao", &self.conclusao),
            _ => {}
        }
        missing
    }
}

impl LaudoForm {
    /// Toggle an evidence id in the selection.
    pub fn toggle_evidence(&mut self, id: &str) {
        if let Some(pos) = self.evidencias.iter().position(|e| e == id) {
            self.evidencias.remove(pos);
        } else {
            self.evidencias.push(id.to_string());
        }
    }

    /// Build the payload; `perito` is the signed-in examiner.
    pub fn to_request(&self, perito: &str) -> Result<CreateLaudoRequest, AppError> {
        let missing = self.all_missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        Ok(CreateLaudoRequest {
            evidencias: self.evidencias.clone(),
            vitima: self.vitima.trim().to_string(),
            caso: self.caso.trim().to_string(),
            perito: perito.to_string(),
            dados_antemortem: self.dados_antemortem.trim().to_string(),
            dados_postmortem: self.dados_postmortem.trim().to_string(),
            analise_lesoes: self.analise_lesoes.trim().to_string(),
            conclusao: self.conclusao.trim().to_string(),
        })
    }
}
