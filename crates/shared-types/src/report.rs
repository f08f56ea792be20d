use serde::{Deserialize, Serialize};

use crate::common::{Attachment, Reference};
use crate::error::AppError;
use crate::listing::{Identified, Searchable};
use crate::wizard::{require, WizardForm};

/// A compiled technical report ("relatório") for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub caso: Option<Reference>,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub objetivo: String,
    #[serde(default)]
    pub metodologia: String,
    #[serde(default)]
    pub materiais: String,
    #[serde(default)]
    pub exames_realizados: String,
    #[serde(default)]
    pub consideracoes: String,
    #[serde(default)]
    pub conclusao: String,
    #[serde(default, rename = "audioURL", alias = "audioUrl")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub evidencias: Vec<Reference>,
    #[serde(default)]
    pub vitimas: Vec<Reference>,
    #[serde(default)]
    pub laudos: Vec<Reference>,
    #[serde(default)]
    pub perito_responsavel: Option<Reference>,
    #[serde(default)]
    pub assinado: bool,
    #[serde(default)]
    pub data_criacao: Option<String>,
}

impl Report {
    pub fn caso_label(&self) -> &str {
        self.caso.as_ref().map(Reference::label).unwrap_or("—")
    }

    pub fn perito_label(&self) -> &str {
        self.perito_responsavel
            .as_ref()
            .map(Reference::label)
            .unwrap_or("—")
    }
}

impl Identified for Report {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Report {
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.titulo,
            self.caso_label(),
            self.perito_label(),
            self.conclusao
        )
    }
}

/// Fields of `POST /api/report`, always sent as multipart so an optional
/// `audio` part can ride along.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReportRequest {
    pub caso: String,
    pub titulo: String,
    pub objetivo: String,
    pub metodologia: String,
    pub materiais: String,
    pub exames_realizados: String,
    pub consideracoes: String,
    pub conclusao: String,
    pub evidencias: Vec<String>,
    pub vitimas: Vec<String>,
    pub laudos: Vec<String>,
}

impl CreateReportRequest {
    /// Text parts; id lists are JSON-encoded arrays.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("caso", self.caso.clone()),
            ("titulo", self.titulo.clone()),
            ("objetivo", self.objetivo.clone()),
            ("metodologia", self.metodologia.clone()),
            ("materiais", self.materiais.clone()),
            ("examesRealizados", self.exames_realizados.clone()),
            ("consideracoes", self.consideracoes.clone()),
            ("conclusao", self.conclusao.clone()),
            ("evidencias", id_list(&self.evidencias)),
            ("vitimas", id_list(&self.vitimas)),
            ("laudos", id_list(&self.laudos)),
        ]
    }
}

/// Payload for `PUT /api/report/:id`. Only the text sections are editable;
/// links, audio and the signature stay as issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub titulo: String,
    pub objetivo: String,
    pub metodologia: String,
    pub materiais: String,
    pub exames_realizados: String,
    pub consideracoes: String,
    pub conclusao: String,
}

impl UpdateReportRequest {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require(&mut missing, "titulo", &self.titulo);
        require(&mut missing, "objetivo", &self.objetivo);
        require(&mut missing, "metodologia", &self.metodologia);
        require(&mut missing, "materiais", &self.materiais);
        require(&mut missing, "examesRealizados", &self.exames_realizados);
        require(&mut missing, "consideracoes", &self.consideracoes);
        require(&mut missing, "conclusao", &self.conclusao);
        missing
    }
}

impl From<&Report> for UpdateReportRequest {
    fn from(r: &Report) -> Self {
        Self {
            titulo: r.titulo.trim().to_string(),
            objetivo: r.objetivo.trim().to_string(),
            metodologia: r.metodologia.trim().to_string(),
            materiais: r.materiais.trim().to_string(),
            exames_realizados: r.exames_realizados.trim().to_string(),
            consideracoes: r.consideracoes.trim().to_string(),
            conclusao: r.conclusao.trim().to_string(),
        }
    }
}

fn id_list(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

/// Report wizard: identification, technical analysis, conclusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    pub caso: String,
    pub titulo: String,
    pub objetivo: String,
    pub metodologia: String,
    pub materiais: String,
    pub exames_realizados: String,
    pub consideracoes: String,
    pub conclusao: String,
    pub evidencias: Vec<String>,
    pub vitimas: Vec<String>,
    pub laudos: Vec<String>,
    pub audio: Option<Attachment>,
}

impl WizardForm for ReportForm {
    const STEPS: &'static [&'static str] = &["Identificação", "Análise técnica", "Conclusão"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            0 => {
                require(&mut missing, "caso", &self.caso);
                require(&mut missing, "titulo", &self.titulo);
                require(&mut missing, "objetivo", &self.objetivo);
            }
            1 => {
                require(&mut missing, "metodologia", &self.metodologia);
                require(&mut missing, "materiais", &self.materiais);
                require(&mut missing, "examesRealizados", &self.exames_realizados);
            }
            2 => {
                require(&mut missing, "consideracoes", &self.consideracoes);
                require(&mut missing, "conclusao", &self.conclusao);
            }
            _ => {}
        }
        missing
    }
}

impl ReportForm {
    pub fn to_request(&self) -> Result<CreateReportRequest, AppError> {
        let missing = self.all_missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        if let Some(audio) = &self.audio {
            if !audio.is_audio() {
                let mut fields = std::collections::HashMap::new();
                fields.insert("audio".to_string(), "Arquivo de áudio inválido".to_string());
                return Err(AppError::validation("Arquivo de áudio inválido", fields));
            }
        }
        Ok(CreateReportRequest {
            caso: self.caso.trim().to_string(),
            titulo: self.titulo.trim().to_string(),
            objetivo: self.objetivo.trim().to_string(),
            metodologia: self.metodologia.trim().to_string(),
            materiais: self.materiais.trim().to_string(),
            exames_realizados: self.exames_realizados.trim().to_string(),
            consideracoes: self.consideracoes.trim().to_string(),
            conclusao: self.conclusao.trim().to_string(),
            evidencias: self.evidencias.clone(),
            vitimas: self.vitimas.clone(),
            laudos: self.laudos.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> ReportForm {
        ReportForm {
            caso: "c1".to_string(),
            titulo: "Relatório odontolegal".to_string(),
            objetivo: "Identificação".to_string(),
            metodologia: "Comparativa".to_string(),
            materiais: "Radiografias".to_string(),
            exames_realizados: "Panorâmica".to_string(),
            consideracoes: "Nenhuma".to_string(),
            conclusao: "Positiva".to_string(),
            evidencias: vec!["e1".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn each_step_lists_its_fields() {
        let form = ReportForm::default();
        assert_eq!(form.missing_fields(0), vec!["caso", "titulo", "objetivo"]);
        assert_eq!(form.missing_fields(2), vec!["consideracoes", "conclusao"]);
        assert!(complete().is_complete());
    }

    #[test]
    fn form_fields_encode_id_lists_as_json() {
        let req = complete().to_request().unwrap();
        let fields = req.form_fields();
        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("evidencias"), r#"["e1"]"#);
        assert_eq!(get("laudos"), "[]");
        assert_eq!(get("examesRealizados"), "Panorâmica");
    }

    #[test]
    fn non_audio_attachment_is_rejected() {
        let mut form = complete();
        form.audio = Some(Attachment::new("nota.pdf", "application/pdf", vec![1]));
        let err = form.to_request().unwrap_err();
        assert!(err.field_errors.contains_key("audio"));
        form.audio = Some(Attachment::new("nota.mp3", "audio/mpeg", vec![1]));
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn report_reads_signed_flag_and_audio() {
        let report: Report = serde_json::from_str(
            r#"{"_id":"r1","titulo":"R","assinado":true,"audioURL":"/a.mp3",
                "peritoResponsavel":{"_id":"u1","nome":"Dra. Lima"}}"#,
        )
        .unwrap();
        assert!(report.assinado);
        assert_eq!(report.audio_url.as_deref(), Some("/a.mp3"));
        assert_eq!(report.perito_label(), "Dra. Lima");
    }

    #[test]
    fn update_request_trims_and_flags_blank_sections() {
        let mut report: Report = serde_json::from_str(
            r#"{"_id":"r1","titulo":" Relatório ","objetivo":"Identificar","metodologia":"Comparativa",
                "materiais":"Radiografias","examesRealizados":"Panorâmica","consideracoes":"",
                "conclusao":"Positiva","evidencias":["e1"],"assinado":false}"#,
        )
        .unwrap();
        let req = UpdateReportRequest::from(&report);
        assert_eq!(req.titulo, "Relatório");
        assert_eq!(req.missing_fields(), vec!["consideracoes"]);

        report.consideracoes = "Sem ressalvas".to_string();
        let json = serde_json::to_value(UpdateReportRequest::from(&report)).unwrap();
        assert_eq!(json["examesRealizados"], "Panorâmica");
        assert!(json.get("evidencias").is_none());
        assert!(json.get("assinado").is_none());
    }
}
