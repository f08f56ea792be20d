use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{Attachment, Reference};
use crate::error::AppError;
use crate::listing::{Identified, Searchable};
use crate::victim::{BodyCondition, Sex, VictimIdentification};
use crate::wizard::{require, WizardForm};

/// What an evidence item carries: an uploaded image or a written note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    #[default]
    Image,
    Text,
}

pub const EVIDENCE_KINDS: &[EvidenceKind] = &[EvidenceKind::Image, EvidenceKind::Text];

impl EvidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Image => "image",
            EvidenceKind::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EvidenceKind::Image => "Imagem",
            EvidenceKind::Text => "Texto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        EVIDENCE_KINDS.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An evidence item attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub caso: Option<Reference>,
    #[serde(default)]
    pub tipo: EvidenceKind,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub data_upload: Option<String>,
    #[serde(default)]
    pub vitima: Option<VictimIdentification>,
    #[serde(default)]
    pub sexo: Option<Sex>,
    #[serde(default)]
    pub estado_corpo: Option<BodyCondition>,
    #[serde(default)]
    pub lesoes: Option<String>,
    #[serde(default)]
    pub coletado_por: Option<Reference>,
    #[serde(default)]
    pub conteudo: Option<String>,
    #[serde(default, rename = "imagemURL", alias = "imagemUrl")]
    pub imagem_url: Option<String>,
    #[serde(default)]
    pub laudo: Option<String>,
}

impl Evidence {
    pub fn caso_label(&self) -> &str {
        self.caso.as_ref().map(Reference::label).unwrap_or("—")
    }

    pub fn coletor_label(&self) -> &str {
        self.coletado_por.as_ref().map(Reference::label).unwrap_or("—")
    }

    pub fn vitima_label(&self) -> &'static str {
        self.vitima.as_ref().map(VictimIdentification::label).unwrap_or("—")
    }

    pub fn is_identified(&self) -> bool {
        self.vitima == Some(VictimIdentification::Identificada)
    }
}

impl Identified for Evidence {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Evidence {
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.categoria,
            self.caso_label(),
            self.coletor_label(),
            self.conteudo.as_deref().unwrap_or_default()
        )
    }
}

// ── Requests ────────────────────────────────────────────────────────

/// Fields of an evidence creation. Text evidence is posted as JSON; image
/// evidence sends the same fields as multipart text parts plus the `imagem` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvidenceRequest {
    pub caso: String,
    pub tipo: EvidenceKind,
    pub categoria: String,
    pub vitima: VictimIdentification,
    pub sexo: Sex,
    pub estado_corpo: BodyCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesoes: Option<String>,
    pub coletado_por: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conteudo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laudo: Option<String>,
}

impl CreateEvidenceRequest {
    /// The request as multipart text fields, in a stable order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("caso", self.caso.clone()),
            ("tipo", self.tipo.as_str().to_string()),
            ("categoria", self.categoria.clone()),
            ("vitima", self.vitima.as_str().to_string()),
            ("sexo", self.sexo.as_str().to_string()),
            ("estadoCorpo", self.estado_corpo.as_str().to_string()),
            ("coletadoPor", self.coletado_por.clone()),
        ];
        if let Some(lesoes) = &self.lesoes {
            fields.push(("lesoes", lesoes.clone()));
        }
        if let Some(conteudo) = &self.conteudo {
            fields.push(("conteudo", conteudo.clone()));
        }
        if let Some(laudo) = &self.laudo {
            fields.push(("laudo", laudo.clone()));
        }
        fields
    }
}

/// Payload for `PUT /api/evidence/:id`; the file is never replaced on edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvidenceRequest {
    pub categoria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitima: Option<VictimIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexo: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado_corpo: Option<BodyCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conteudo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laudo: Option<String>,
}

impl From<&Evidence> for UpdateEvidenceRequest {
    fn from(e: &Evidence) -> Self {
        Self {
            categoria: e.categoria.trim().to_string(),
            vitima: e.vitima,
            sexo: e.sexo,
            estado_corpo: e.estado_corpo,
            lesoes: non_blank(e.lesoes.as_deref().unwrap_or_default()),
            conteudo: e.conteudo.clone(),
            laudo: non_blank(e.laudo.as_deref().unwrap_or_default()),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ── Intake wizard ───────────────────────────────────────────────────

/// Evidence intake wizard: case and collector, victim data, content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceIntakeForm {
    pub caso: String,
    pub tipo: EvidenceKind,
    pub categoria: String,
    pub coletado_por: String,
    pub vitima: Option<VictimIdentification>,
    pub sexo: Option<Sex>,
    pub estado_corpo: Option<BodyCondition>,
    pub lesoes: String,
    pub conteudo: String,
    pub imagem: Option<Attachment>,
    pub laudo: String,
}

impl WizardForm for EvidenceIntakeForm {
    const STEPS: &'static [&'static str] = &["Caso", "Vítima", "Conteúdo"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            0 => {
                require(&mut missing, "caso", &self.caso);
                require(&mut missing, "categoria", &self.categoria);
                require(&mut missing, "coletadoPor", &self.coletado_por);
            }
            1 => {
                if self.vitima.is_none() {
                    missing.push("vitima");
                }
                if self.sexo.is_none() {
                    missing.push("sexo");
                }
                if self.estado_corpo.is_none() {
                    missing.push("estadoCorpo");
                }
            }
            2 => match self.tipo {
                EvidenceKind::Text => require(&mut missing, "conteudo", &self.conteudo),
                EvidenceKind::Image => {
                    if self.imagem.is_none() {
                        missing.push("imagem");
                    }
                }
            },
            _ => {}
        }
        missing
    }
}

impl EvidenceIntakeForm {
    pub fn to_request(&self) -> Result<CreateEvidenceRequest, AppError> {
        let missing = self.all_missing_fields();
        let (Some(vitima), Some(sexo), Some(estado_corpo), true) =
            (self.vitima, self.sexo, self.estado_corpo, missing.is_empty())
        else {
            return Err(AppError::missing_fields(&missing));
        };
        let conteudo = match self.tipo {
            EvidenceKind::Text => non_blank(&self.conteudo),
            EvidenceKind::Image => None,
        };
        Ok(CreateEvidenceRequest {
            caso: self.caso.trim().to_string(),
            tipo: self.tipo,
            categoria: self.categoria.trim().to_string(),
            vitima,
            sexo,
            estado_corpo,
            lesoes: non_blank(&self.lesoes),
            coletado_por: self.coletado_por.trim().to_string(),
            conteudo,
            laudo: non_blank(&self.laudo),
        })
    }

    /// The file to upload, present only for image evidence.
    pub fn attachment(&self) -> Option<&Attachment> {
        match self.tipo {
            EvidenceKind::Image => self.imagem.as_ref(),
            EvidenceKind::Text => None,
        }
    }
}
